// ==========================================
// 端架库位整合 - 导出层
// ==========================================
// 职责: 分配台账落盘
// 支持: CSV（固定 12 列表头）, JSON
// ==========================================

pub mod error;
pub mod ledger_writer;

pub use error::{ExportError, ExportResult};
pub use ledger_writer::LedgerWriter;

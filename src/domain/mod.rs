// ==========================================
// 端架库位整合 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件读写逻辑,不含引擎逻辑
// ==========================================

pub mod assignment;
pub mod batch;
pub mod endcap;
pub mod open_space;
pub mod report;
pub mod types;

// 重导出核心类型
pub use assignment::{Assignment, LEDGER_HEADERS};
pub use batch::BatchIdentifier;
pub use endcap::{EndcapRecord, SourceLine, SourceUnit};
pub use open_space::{CandidateBin, OpenSpaceRecord, FULL_UTILIZATION_PCT, VIRTUAL_STORAGE_TYPE};
pub use report::{ConsolidationReport, RunOutcome, RunStats, SkipReason, SkippedUnit};
pub use types::{InputKind, LedgerFormat};

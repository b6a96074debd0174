// ==========================================
// 端架库位整合 - 引擎层
// ==========================================
// 职责: 批次解析、候选池、分组、分配
// 红线: 引擎不读写文件；所有未分配必须输出原因
// ==========================================

pub mod assignment;
pub mod batch_parser;
pub mod bin_pool;
pub mod error;
pub mod grouping;
pub mod orchestrator;

// 重导出核心引擎
pub use assignment::{AssignmentEngine, AssignmentOutcome, DATE_WINDOW_DAYS, UNITS_PER_MOVE};
pub use batch_parser::{monday_of_week, parse_batch, BatchIdentifierParser};
pub use bin_pool::CandidateBinPool;
pub use error::{CapacityError, CapacityResult};
pub use grouping::SourceGrouper;
pub use orchestrator::ConsolidationOrchestrator;

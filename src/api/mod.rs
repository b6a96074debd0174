// ==========================================
// 端架库位整合 - API 层
// ==========================================
// 职责: 提供整合运行入口，供命令行调用
// ==========================================

pub mod consolidation_api;
pub mod error;

// 重导出核心类型
pub use consolidation_api::{ConsolidationApi, ConsolidationRequest, ConsolidationResponse};
pub use error::{ApiError, ApiResult};

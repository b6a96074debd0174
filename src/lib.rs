// ==========================================
// 端架库位整合 - 核心库
// ==========================================
// 职责: 将待清空端架储位上的储运单元重新分配到空闲储位
// 规则: 同物料、同批次前缀、批次周日期相差不超过 364 天、首个有容量的储位
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 批次解析/候选池/分配
pub mod engine;

// 导入层 - 外部表格
pub mod importer;

// 导出层 - 分配台账
pub mod exporter;

// 配置层
pub mod config;

// API 层 - 整合运行入口
pub mod api;

// 日志系统
pub mod logging;

// 性能埋点
pub mod perf;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    Assignment, BatchIdentifier, CandidateBin, ConsolidationReport, EndcapRecord, InputKind,
    LedgerFormat, OpenSpaceRecord, RunOutcome, RunStats, SkipReason, SkippedUnit, SourceLine,
    SourceUnit, LEDGER_HEADERS,
};

// 引擎
pub use engine::{
    AssignmentEngine, BatchIdentifierParser, CandidateBinPool, CapacityError,
    ConsolidationOrchestrator, SourceGrouper,
};

// API
pub use api::{ApiError, ApiResult, ConsolidationApi, ConsolidationRequest, ConsolidationResponse};

// 配置
pub use config::{ConfigManager, ConsolidationConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "端架库位整合";

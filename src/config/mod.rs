// ==========================================
// 端架库位整合 - 配置层
// ==========================================
// 职责: 运行配置加载与默认值
// 存储: JSON 文件（可选）
// ==========================================

pub mod config_manager;
pub mod consolidation_config;

// 重导出核心配置
pub use config_manager::{config_keys, ConfigError, ConfigManager, ConfigResult, ConfigSource};
pub use consolidation_config::{ConsolidationConfig, DEFAULT_SHEET};

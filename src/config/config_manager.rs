// ==========================================
// 端架库位整合 - 配置管理器
// ==========================================
// 职责: 配置加载（显式路径 > 环境变量 > 默认值）
// 存储: JSON 文件
// ==========================================

use crate::config::consolidation_config::ConsolidationConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置相关常量
pub mod config_keys {
    /// 配置文件路径环境变量
    pub const CONFIG_ENV: &str = "ENDCAP_CONSOLIDATION_CONFIG";
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {0}")]
    NotFound(String),

    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 配置来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Default,
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: ConsolidationConfig,
    source: ConfigSource,
}

impl ConfigManager {
    /// 加载配置
    ///
    /// # 参数
    /// - `explicit_path`: 命令行指定的配置文件
    ///
    /// # 规则
    /// 1) 显式路径：必须存在
    /// 2) 环境变量 ENDCAP_CONSOLIDATION_CONFIG：必须存在
    /// 3) 以上都没有：使用默认值
    pub fn load(explicit_path: Option<&Path>) -> ConfigResult<Self> {
        let env_path = std::env::var(config_keys::CONFIG_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        match explicit_path.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::from_file(&path),
            None => {
                debug!("未指定配置文件，使用默认配置");
                Ok(Self::from_config(ConsolidationConfig::default()))
            }
        }
    }

    /// 从 JSON 文件加载
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let path_str = path.display().to_string();
        if !path.exists() {
            return Err(ConfigError::NotFound(path_str));
        }

        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path_str.clone(),
            message: e.to_string(),
        })?;
        let config: ConsolidationConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        info!(path = %path_str, "配置文件已加载");
        Ok(Self {
            config,
            source: ConfigSource::File(path.to_path_buf()),
        })
    }

    pub fn from_config(config: ConsolidationConfig) -> Self {
        Self {
            config,
            source: ConfigSource::Default,
        }
    }

    pub fn config(&self) -> &ConsolidationConfig {
        &self.config
    }

    pub fn into_config(self) -> ConsolidationConfig {
        self.config
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// 配置快照（JSON），用于运行日志
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.config).unwrap_or_else(|_| "{}".to_string())
    }
}

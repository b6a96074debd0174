// ==========================================
// 端架库位整合 - API层错误类型
// ==========================================
// 职责: 汇总导入/引擎/导出/配置错误，指明失败的输入表
// ==========================================

use crate::config::ConfigError;
use crate::domain::types::InputKind;
use crate::engine::error::CapacityError;
use crate::exporter::error::ExportError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    /// 输入表读取失败（文件缺失/格式错误/缺列）
    #[error("输入表读取失败 [{input}]: {source}")]
    InputRead {
        input: InputKind,
        #[source]
        source: ImportError,
    },

    /// 容量账本不一致（引擎内部错误）
    #[error("容量账本不一致: {0}")]
    CapacityInvariant(#[from] CapacityError),

    #[error("台账导出失败: {0}")]
    Export(#[from] ExportError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("无效输入: {0}")]
    InvalidInput(String),
}

impl ApiError {
    pub fn input_read(input: InputKind, source: ImportError) -> Self {
        ApiError::InputRead { input, source }
    }

    /// 失败的输入表（非输入错误时为 None）
    pub fn failed_input(&self) -> Option<InputKind> {
        match self {
            ApiError::InputRead { input, .. } => Some(*input),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

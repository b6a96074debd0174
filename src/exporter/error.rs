// ==========================================
// 端架库位整合 - 导出层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("无法创建导出目录 {path}: {message}")]
    CreateDirFailed { path: String, message: String },

    #[error("文件写入失败: {0}")]
    WriteFailed(String),

    #[error("CSV 写入错误: {0}")]
    CsvWriteError(String),

    #[error("JSON 序列化错误: {0}")]
    JsonWriteError(String),
}

pub type ExportResult<T> = Result<T, ExportError>;

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::WriteFailed(err.to_string())
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::CsvWriteError(err.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::JsonWriteError(err.to_string())
    }
}

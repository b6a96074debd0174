// ==========================================
// 端架库位整合 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 容量预留错误
///
/// 分配引擎先检查后预留，正常流程不可达；出现即视为内部不变量被破坏。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapacityError {
    #[error("容量不足: bin={bin_id}, available_su={available}, requested={requested}")]
    Insufficient {
        bin_id: String,
        available: u32,
        requested: u32,
    },

    #[error("储位不在候选池中: {0}")]
    UnknownBin(String),
}

/// Result 类型别名
pub type CapacityResult<T> = Result<T, CapacityError>;

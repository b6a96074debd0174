// ==========================================
// 端架库位整合 - 空闲储位（目标）领域模型
// ==========================================
// 用途: 导入层写入 OpenSpaceRecord，候选池构建 CandidateBin
// 红线: available_su 仅由候选池修改
// ==========================================

use crate::domain::batch::BatchIdentifier;
use serde::{Deserialize, Serialize};

/// 利用率上限（%），达到即视为满仓
pub const FULL_UTILIZATION_PCT: f64 = 100.0;

/// 虚拟储位类型，不可预留，任何运行都不作为目标
pub const VIRTUAL_STORAGE_TYPE: &str = "VIR";

// ==========================================
// OpenSpaceRecord - 空闲储位表导入中间结构体
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenSpaceRecord {
    pub storage_type: String,             // Storage Type
    pub storage_bin: String,              // Storage Bin
    pub material_number: String,          // Material Number（已 TRIM）
    pub batch_number: String,             // Batch Number（已 TRIM）
    pub utilization_pct: Option<f64>,     // Utilization %（无法解析为 None）
    pub avail_su: u32,                    // Avail SU（非负整数）
    pub su_capacity: Option<u32>,         // SU Capacity（透传）

    pub row_number: usize, // 原始文件行号
}

// ==========================================
// CandidateBin - 候选目标储位
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateBin {
    pub storage_type: String,
    pub bin_id: String,
    pub material_number: String,
    pub raw_batch_number: String,
    pub batch_identifier: BatchIdentifier,
    pub su_capacity: Option<u32>,
    pub available_su: u32,
    pub utilization_pct: f64,
}

impl CandidateBin {
    /// 是否可作为匹配候选（批次日期有效）
    pub fn is_matchable(&self) -> bool {
        self.batch_identifier.has_date()
    }

    /// 是否仍有可预留容量
    pub fn has_capacity(&self, units: u32) -> bool {
        self.available_su >= units
    }
}

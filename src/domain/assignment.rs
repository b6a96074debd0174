// ==========================================
// 端架库位整合 - 分配台账领域模型
// ==========================================
// 用途: 分配引擎输出，导出层落盘
// 红线: 台账行一经追加不可修改
// 列名与导出文件表头严格一致（共 12 列）
// ==========================================

use serde::{Deserialize, Serialize};

/// 导出台账表头（顺序即列顺序）
pub const LEDGER_HEADERS: [&str; 12] = [
    "Open Space Storage Type",
    "Storage Bin",
    "Bin Moving From",
    "Endcap Storage Type",
    "Material",
    "Batch",
    "Original Batch",
    "SU Capacity",
    "SU Count",
    "Avail SU",
    "Storage Unit",
    "Total Stock",
];

// ==========================================
// Assignment - 分配台账行
// ==========================================
// 每个源批次行对应一条；同一 SU 的所有行共享同一目标储位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(rename = "Open Space Storage Type")]
    pub target_storage_type: String, // 目标储位类型
    #[serde(rename = "Storage Bin")]
    pub target_bin: String, // 目标储位
    #[serde(rename = "Bin Moving From")]
    pub source_bin: String, // 迁出库位（SU 首行）
    #[serde(rename = "Endcap Storage Type")]
    pub source_storage_type: String, // 该行自身的端架类型
    #[serde(rename = "Material")]
    pub material: String,
    #[serde(rename = "Batch")]
    pub target_batch_code: String, // 目标储位现有批次
    #[serde(rename = "Original Batch")]
    pub source_batch_code: String, // 该行原批次
    #[serde(rename = "SU Capacity")]
    pub bin_capacity: Option<u32>,
    #[serde(rename = "SU Count")]
    pub reserved_units: u32, // 固定为 1
    #[serde(rename = "Avail SU")]
    pub remaining_capacity_after: u32, // 预留后剩余
    #[serde(rename = "Storage Unit")]
    pub source_unit_id: String,
    #[serde(rename = "Total Stock")]
    pub total_stock: Option<f64>,
}

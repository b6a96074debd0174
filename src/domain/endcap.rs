// ==========================================
// 端架库位整合 - 端架（源）领域模型
// ==========================================
// 用途: 导入层写入 EndcapRecord，分组后形成 SourceUnit
// 红线: 同一储运单元（SU）的所有批次行必须整体迁移
// ==========================================

use crate::domain::batch::BatchIdentifier;
use serde::{Deserialize, Serialize};

// ==========================================
// EndcapRecord - 端架表导入中间结构体
// ==========================================
// 生命周期: 仅在导入 → 分组流程内
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndcapRecord {
    pub storage_type: String,        // Storage Type
    pub storage_unit: String,        // Storage Unit（分组键）
    pub storage_bin: String,         // Storage Bin（迁出库位）
    pub material: String,            // Material（已 TRIM）
    pub batch: String,               // Batch（已 TRIM）
    pub total_stock: Option<f64>,    // Total Stock（透传）

    pub row_number: usize, // 原始文件行号
}

// ==========================================
// SourceLine - 源批次行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceLine {
    pub storage_type: String,
    pub material: String,
    pub raw_batch_code: String,
    pub batch_identifier: BatchIdentifier,
    pub total_stock: Option<f64>,
}

impl SourceLine {
    pub fn has_valid_date(&self) -> bool {
        self.batch_identifier.has_date()
    }
}

// ==========================================
// SourceUnit - 待迁移储运单元
// ==========================================
// 代表值（material / batch_prefix / source_bin）均取首行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceUnit {
    pub unit_id: String,
    pub source_storage_type: String,
    pub source_bin: String,
    pub material: String,
    pub batch_prefix: Option<String>,
    pub lines: Vec<SourceLine>,
}

impl SourceUnit {
    /// 第一条行数据（代表行）
    pub fn first_line(&self) -> Option<&SourceLine> {
        self.lines.first()
    }

    /// 第一条批次日期缺失的行
    pub fn first_undated_line(&self) -> Option<&SourceLine> {
        self.lines.iter().find(|line| !line.has_valid_date())
    }

    /// 是否具备匹配资格：至少一行，且所有行批次日期有效
    pub fn is_eligible(&self) -> bool {
        !self.lines.is_empty() && self.first_undated_line().is_none()
    }
}

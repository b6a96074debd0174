// ==========================================
// 端架库位整合 - 批次标识领域模型
// ==========================================
// 批次号结构: PP....WWYY
//   PP   = 批次前缀（粗粒度兼容键）
//   WW   = 周次（周一为一周起始）
//   YY   = 年份后两位（2000 + YY）
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// BatchIdentifier - 批次标识
// ==========================================
// 红线: 解析失败不报错，字段各自独立降级为 None
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BatchIdentifier {
    pub prefix: Option<String>,       // 批次前缀（前两位字符）
    pub week_date: Option<NaiveDate>, // 批次周一日期
}

impl BatchIdentifier {
    /// 完全无法识别的批次号
    pub fn unknown() -> Self {
        Self::default()
    }

    /// 是否具备有效批次日期（参与匹配的前提）
    pub fn has_date(&self) -> bool {
        self.week_date.is_some()
    }

    /// 与另一批次日期的绝对天数差
    ///
    /// 任一方缺失日期时返回 None
    pub fn days_apart(&self, other: &BatchIdentifier) -> Option<i64> {
        match (self.week_date, other.week_date) {
            (Some(a), Some(b)) => Some((a - b).num_days().abs()),
            _ => None,
        }
    }

    /// 前缀是否一致（任一方缺失前缀视为不一致）
    pub fn same_prefix(&self, prefix: Option<&str>) -> bool {
        match (self.prefix.as_deref(), prefix) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

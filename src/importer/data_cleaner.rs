// ==========================================
// 端架库位整合 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 数值宽松解析
// ==========================================

use crate::importer::importer_trait::DataCleaner as DataCleanerTrait;

/// 视为空值的文本（表格工具导出空单元格时的常见写法）
const NULL_MARKERS: [&str; 4] = ["nan", "NaN", "null", "NULL"];

#[derive(Debug, Clone, Copy, Default)]
pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() || NULL_MARKERS.contains(&trimmed) {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn parse_number(&self, value: &str) -> Option<f64> {
        let cleaned: String = value
            .trim()
            .trim_end_matches('%')
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();
        if cleaned.is_empty() {
            return None;
        }
        cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    fn parse_count(&self, value: &str) -> Option<u32> {
        let number = self.parse_number(value)?;
        if number <= 0.0 {
            return Some(0);
        }
        Some(number.floor().min(u32::MAX as f64) as u32)
    }
}

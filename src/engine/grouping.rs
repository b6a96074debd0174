// ==========================================
// 端架库位整合 - 储运单元分组
// ==========================================
// 输入: 端架表记录 + 选中的端架储位类型
// 输出: SourceUnit 列表（按 Storage Unit 首次出现顺序）
// ==========================================

use crate::domain::endcap::{EndcapRecord, SourceLine, SourceUnit};
use crate::engine::batch_parser::BatchIdentifierParser;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct SourceGrouper {
    parser: BatchIdentifierParser,
}

impl SourceGrouper {
    pub fn new() -> Self {
        Self {
            parser: BatchIdentifierParser::new(),
        }
    }

    /// 按储运单元分组
    ///
    /// 规则：
    /// 1) 仅保留 storage_type ∈ selected_types 的行
    /// 2) Storage Unit 为空的行无法分组，丢弃并告警
    /// 3) 分组顺序 = 首次出现顺序；组内保持行顺序
    /// 4) 单元代表值（类型/库位/物料/前缀）取首行
    pub fn group(
        &self,
        records: &[EndcapRecord],
        selected_types: &BTreeSet<String>,
    ) -> Vec<SourceUnit> {
        let mut units: Vec<SourceUnit> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for record in records {
            if !selected_types.contains(record.storage_type.trim()) {
                continue;
            }

            let unit_id = record.storage_unit.trim();
            if unit_id.is_empty() {
                warn!(row_number = record.row_number, "Storage Unit 为空，跳过该行");
                continue;
            }

            let material = record.material.trim().to_string();
            let raw_batch_code = record.batch.trim().to_string();
            let line = SourceLine {
                storage_type: record.storage_type.trim().to_string(),
                batch_identifier: self.parser.parse(&raw_batch_code),
                material,
                raw_batch_code,
                total_stock: record.total_stock,
            };

            match positions.get(unit_id) {
                Some(&pos) => units[pos].lines.push(line),
                None => {
                    positions.insert(unit_id, units.len());
                    units.push(SourceUnit {
                        unit_id: unit_id.to_string(),
                        source_storage_type: line.storage_type.clone(),
                        source_bin: record.storage_bin.trim().to_string(),
                        material: line.material.clone(),
                        batch_prefix: line.batch_identifier.prefix.clone(),
                        lines: vec![line],
                    });
                }
            }
        }

        debug!(units = units.len(), "储运单元分组完成");
        units
    }
}

// ==========================================
// 端架库位整合 - 候选储位池
// ==========================================
// 输入: 空闲储位表记录 + 排除储位类型集合
// 输出: 按 available_su 降序的候选储位
// ==========================================
// 职责: 唯一持有并修改 available_su 的组件
// 红线: 任一储位累计预留数 ≤ 初始 available_su
// ==========================================

use crate::domain::open_space::{CandidateBin, OpenSpaceRecord, FULL_UTILIZATION_PCT};
use crate::engine::batch_parser::BatchIdentifierParser;
use crate::engine::error::{CapacityError, CapacityResult};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, instrument};

// ==========================================
// CandidateBinPool - 候选储位池
// ==========================================
// 同一 bin_id 的多行共享一个容量计数（以池内顺序首行的值为准）
#[derive(Debug, Clone, Default)]
pub struct CandidateBinPool {
    entries: Vec<CandidateBin>,
    bin_index: HashMap<String, Vec<usize>>,
}

impl CandidateBinPool {
    /// 构建候选池
    ///
    /// 规则：
    /// 1) 排除 storage_type ∈ excluded_storage_types
    /// 2) 排除 utilization_pct >= 100（或无法解析）
    /// 3) 解析批次号；日期缺失的行保留，但不作为候选返回
    /// 4) 按 available_su 降序稳定排序
    #[instrument(skip(rows, excluded_storage_types), fields(
        rows_count = rows.len(),
        excluded_count = excluded_storage_types.len()
    ))]
    pub fn build(rows: &[OpenSpaceRecord], excluded_storage_types: &BTreeSet<String>) -> Self {
        let parser = BatchIdentifierParser::new();

        let mut entries: Vec<CandidateBin> = rows
            .iter()
            .filter(|row| !excluded_storage_types.contains(row.storage_type.trim()))
            .filter_map(|row| {
                let utilization_pct = row.utilization_pct?;
                if utilization_pct >= FULL_UTILIZATION_PCT {
                    return None;
                }
                let material_number = row.material_number.trim().to_string();
                let raw_batch_number = row.batch_number.trim().to_string();
                Some(CandidateBin {
                    storage_type: row.storage_type.trim().to_string(),
                    bin_id: row.storage_bin.trim().to_string(),
                    batch_identifier: parser.parse(&raw_batch_number),
                    material_number,
                    raw_batch_number,
                    su_capacity: row.su_capacity,
                    available_su: row.avail_su,
                    utilization_pct,
                })
            })
            .collect();

        // 稳定排序：容量相同保持输入顺序
        entries.sort_by(|a, b| b.available_su.cmp(&a.available_su));

        let mut bin_index: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            bin_index.entry(entry.bin_id.clone()).or_default().push(idx);
        }

        // 同一储位的容量以首行为准
        for indices in bin_index.values() {
            let seed = entries[indices[0]].available_su;
            for &idx in indices {
                entries[idx].available_su = seed;
            }
        }

        debug!(
            pool_size = entries.len(),
            distinct_bins = bin_index.len(),
            dropped = rows.len() - entries.len(),
            "候选储位池构建完成"
        );

        Self { entries, bin_index }
    }

    /// 查找候选储位（物料号一致 + 批次前缀一致 + 批次日期有效），保持池内顺序
    pub fn find_candidates(&self, material: &str, batch_prefix: Option<&str>) -> Vec<&CandidateBin> {
        self.entries
            .iter()
            .filter(|bin| bin.material_number == material)
            .filter(|bin| bin.batch_identifier.same_prefix(batch_prefix))
            .filter(|bin| bin.is_matchable())
            .collect()
    }

    /// 预留容量
    ///
    /// # 返回
    /// - Ok(u32): 预留后的 available_su
    /// - Err(CapacityError): 储位不存在或容量不足
    pub fn reserve(&mut self, bin_id: &str, units: u32) -> CapacityResult<u32> {
        let indices = self
            .bin_index
            .get(bin_id)
            .ok_or_else(|| CapacityError::UnknownBin(bin_id.to_string()))?;

        let available = self.entries[indices[0]].available_su;
        if available < units {
            return Err(CapacityError::Insufficient {
                bin_id: bin_id.to_string(),
                available,
                requested: units,
            });
        }

        let remaining = available - units;
        for &idx in indices {
            self.entries[idx].available_su = remaining;
        }

        debug!(bin_id, units, remaining, "储位容量已预留");
        Ok(remaining)
    }

    /// 当前可预留容量
    pub fn available_su(&self, bin_id: &str) -> Option<u32> {
        self.bin_index
            .get(bin_id)
            .map(|indices| self.entries[indices[0]].available_su)
    }

    /// 池内全部条目（池内顺序）
    pub fn entries(&self) -> &[CandidateBin] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

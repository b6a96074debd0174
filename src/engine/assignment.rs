// ==========================================
// 端架库位整合 - 分配引擎
// ==========================================
// 输入: 储运单元列表（已分组，按首次出现顺序） + 候选储位池
// 输出: 分配台账（每个源批次行一条） + 未分配单元及原因
// ==========================================
// 规则:
// 1) 单元无行 / 任一行批次日期缺失 → 跳过
// 2) 以首行物料号 + 批次前缀查找候选
// 3) 候选有效 ⇔ 单元内每一行与候选批次日期相差 ≤ 364 天
// 4) 首个有效且 available_su ≥ 1 的候选入选（first-fit，不比较日期远近）
// 5) 预留 1 个单位，单元内每行追加一条台账
// 红线: 每个单元至多一个目标储位；不直接修改储位记录
// ==========================================

use crate::domain::assignment::Assignment;
use crate::domain::endcap::SourceUnit;
use crate::domain::open_space::CandidateBin;
use crate::domain::report::{SkipReason, SkippedUnit};
use crate::engine::bin_pool::CandidateBinPool;
use crate::engine::error::CapacityResult;
use tracing::{debug, info, instrument};

/// 批次日期兼容窗口（天，含边界）
pub const DATE_WINDOW_DAYS: i64 = 364;

/// 每个储运单元占用的目标储位容量
pub const UNITS_PER_MOVE: u32 = 1;

/// 分配结果（台账 + 跳过列表）
#[derive(Debug, Clone, Default)]
pub struct AssignmentOutcome {
    pub assignments: Vec<Assignment>,
    pub skipped: Vec<SkippedUnit>,
}

// ==========================================
// AssignmentEngine - 分配引擎
// ==========================================
pub struct AssignmentEngine {
    // 无状态引擎，容量状态由候选池持有
}

impl AssignmentEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 执行分配，仅返回台账
    pub fn assign(
        &self,
        source_units: &[SourceUnit],
        pool: &mut CandidateBinPool,
    ) -> CapacityResult<Vec<Assignment>> {
        Ok(self.assign_with_report(source_units, pool)?.assignments)
    }

    /// 执行分配，返回台账与未分配原因
    ///
    /// # 返回
    /// - Ok(AssignmentOutcome): 正常结果（台账可能为空）
    /// - Err(CapacityError): 预留失败，内部不变量被破坏
    #[instrument(skip(self, source_units, pool), fields(
        units_count = source_units.len(),
        pool_size = pool.len()
    ))]
    pub fn assign_with_report(
        &self,
        source_units: &[SourceUnit],
        pool: &mut CandidateBinPool,
    ) -> CapacityResult<AssignmentOutcome> {
        let mut outcome = AssignmentOutcome::default();

        for unit in source_units {
            let chosen = match self.select_bin(unit, pool) {
                Ok(bin) => bin,
                Err(reason) => {
                    debug!(unit_id = %unit.unit_id, reason = %reason, "储运单元未分配");
                    outcome.skipped.push(SkippedUnit {
                        unit_id: unit.unit_id.clone(),
                        material: unit.material.clone(),
                        reason,
                    });
                    continue;
                }
            };

            let remaining = pool.reserve(&chosen.bin_id, UNITS_PER_MOVE)?;
            debug!(
                unit_id = %unit.unit_id,
                bin_id = %chosen.bin_id,
                lines = unit.lines.len(),
                remaining,
                "储运单元已分配"
            );

            for line in &unit.lines {
                outcome.assignments.push(Assignment {
                    target_storage_type: chosen.storage_type.clone(),
                    target_bin: chosen.bin_id.clone(),
                    source_bin: unit.source_bin.clone(),
                    source_storage_type: line.storage_type.clone(),
                    material: line.material.clone(),
                    target_batch_code: chosen.raw_batch_number.clone(),
                    source_batch_code: line.raw_batch_code.clone(),
                    bin_capacity: chosen.su_capacity,
                    reserved_units: UNITS_PER_MOVE,
                    remaining_capacity_after: remaining,
                    source_unit_id: unit.unit_id.clone(),
                    total_stock: line.total_stock,
                });
            }
        }

        info!(
            assignments = outcome.assignments.len(),
            skipped = outcome.skipped.len(),
            "分配完成"
        );
        Ok(outcome)
    }

    /// 为单元选择目标储位（不预留）
    fn select_bin(
        &self,
        unit: &SourceUnit,
        pool: &CandidateBinPool,
    ) -> Result<CandidateBin, SkipReason> {
        let first = unit.first_line().ok_or(SkipReason::NoLines)?;
        if let Some(line) = unit.first_undated_line() {
            return Err(SkipReason::InvalidBatchDate {
                line_batch: line.raw_batch_code.clone(),
            });
        }

        let candidates =
            pool.find_candidates(&first.material, first.batch_identifier.prefix.as_deref());
        if candidates.is_empty() {
            return Err(SkipReason::NoCandidates);
        }

        let mut saw_compatible = false;
        for bin in candidates {
            if !self.is_compatible(unit, bin) {
                continue;
            }
            if bin.has_capacity(UNITS_PER_MOVE) {
                return Ok(bin.clone());
            }
            saw_compatible = true;
        }

        if saw_compatible {
            Err(SkipReason::NoCapacity)
        } else {
            Err(SkipReason::NoCompatibleCandidate)
        }
    }

    /// 单元内每一行批次日期均在候选储位日期的窗口内
    pub fn is_compatible(&self, unit: &SourceUnit, bin: &CandidateBin) -> bool {
        unit.lines.iter().all(|line| {
            line.batch_identifier
                .days_apart(&bin.batch_identifier)
                .is_some_and(|days| days <= DATE_WINDOW_DAYS)
        })
    }
}

impl Default for AssignmentEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::endcap::SourceLine;
    use crate::domain::open_space::OpenSpaceRecord;
    use crate::engine::batch_parser::parse_batch;
    use std::collections::{BTreeSet, HashSet};

    // ==========================================
    // 测试辅助函数
    // ==========================================

    fn unit(unit_id: &str, material: &str, batches: &[&str]) -> SourceUnit {
        let lines: Vec<SourceLine> = batches
            .iter()
            .map(|b| SourceLine {
                storage_type: "END".to_string(),
                material: material.to_string(),
                raw_batch_code: b.to_string(),
                batch_identifier: parse_batch(b),
                total_stock: Some(5.0),
            })
            .collect();
        SourceUnit {
            unit_id: unit_id.to_string(),
            source_storage_type: "END".to_string(),
            source_bin: format!("E-{}", unit_id),
            material: material.to_string(),
            batch_prefix: lines.first().and_then(|l| l.batch_identifier.prefix.clone()),
            lines,
        }
    }

    fn bin(bin_id: &str, material: &str, batch: &str, avail: u32) -> OpenSpaceRecord {
        OpenSpaceRecord {
            storage_type: "OPN".to_string(),
            storage_bin: bin_id.to_string(),
            material_number: material.to_string(),
            batch_number: batch.to_string(),
            utilization_pct: Some(40.0),
            avail_su: avail,
            su_capacity: Some(4),
            row_number: 1,
        }
    }

    fn pool(rows: &[OpenSpaceRecord]) -> CandidateBinPool {
        CandidateBinPool::build(rows, &BTreeSet::new())
    }

    // ==========================================
    // 基础功能测试
    // ==========================================

    #[test]
    fn test_two_line_unit_moves_to_single_bin() {
        let engine = AssignmentEngine::new();
        let mut pool = pool(&[bin("B1", "M1", "AB1501YY0101", 2)]);
        let units = vec![unit("SU1", "M1", &["AB15010101", "AB15010201"])];

        let rows = engine.assign(&units, &mut pool).unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.target_bin == "B1"));
        assert!(rows.iter().all(|r| r.remaining_capacity_after == 1));
        assert!(rows.iter().all(|r| r.reserved_units == 1));
        assert_eq!(rows[0].source_batch_code, "AB15010101");
        assert_eq!(rows[1].source_batch_code, "AB15010201");
        assert_eq!(rows[0].target_batch_code, "AB1501YY0101");
        assert_eq!(pool.available_su("B1"), Some(1));
    }

    #[test]
    fn test_bin_exhausted_after_capacity_used() {
        let engine = AssignmentEngine::new();
        let mut pool = pool(&[bin("B1", "M1", "AB15010101", 2)]);
        let units = vec![
            unit("SU1", "M1", &["AB15010101"]),
            unit("SU2", "M1", &["AB15010101"]),
            unit("SU3", "M1", &["AB15010101"]),
        ];

        let outcome = engine.assign_with_report(&units, &mut pool).unwrap();

        assert_eq!(outcome.assignments.len(), 2);
        assert_eq!(outcome.assignments[0].remaining_capacity_after, 1);
        assert_eq!(outcome.assignments[1].remaining_capacity_after, 0);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].unit_id, "SU3");
        assert_eq!(outcome.skipped[0].reason, SkipReason::NoCapacity);
    }

    #[test]
    fn test_undated_line_blocks_whole_unit() {
        let engine = AssignmentEngine::new();
        let mut pool = pool(&[bin("B1", "M1", "AB15010101", 5)]);
        let units = vec![unit("SU1", "M1", &["AB15010101", "AB1"])];

        let outcome = engine.assign_with_report(&units, &mut pool).unwrap();

        assert!(outcome.assignments.is_empty());
        assert_eq!(
            outcome.skipped[0].reason,
            SkipReason::InvalidBatchDate {
                line_batch: "AB1".to_string()
            }
        );
        assert_eq!(pool.available_su("B1"), Some(5));
    }

    #[test]
    fn test_empty_unit_is_skipped() {
        let engine = AssignmentEngine::new();
        let mut pool = pool(&[bin("B1", "M1", "AB15010101", 5)]);
        let units = vec![unit("SU1", "M1", &[])];

        let outcome = engine.assign_with_report(&units, &mut pool).unwrap();
        assert_eq!(outcome.skipped[0].reason, SkipReason::NoLines);
    }

    // ==========================================
    // 日期窗口测试
    // ==========================================

    #[test]
    fn test_date_window_inclusive_bound() {
        let engine = AssignmentEngine::new();
        // 2001 第 1 周 = 2001-01-01；2001 第 53 周 = 2001-12-31，相差 364 天
        let candidates = pool(&[bin("B1", "M1", "AB15015301", 1)]);
        let u = unit("SU1", "M1", &["AB15010101"]);
        let b = &candidates.entries()[0];
        assert_eq!(
            u.lines[0].batch_identifier.days_apart(&b.batch_identifier),
            Some(364)
        );
        assert!(engine.is_compatible(&u, b));

        // 2002 第 1 周 = 2001-12-31 之后一周（2002-01-07），相差 371 天
        let far = pool(&[bin("B2", "M1", "AB15010102", 1)]);
        assert!(!engine.is_compatible(&u, &far.entries()[0]));
    }

    #[test]
    fn test_one_incompatible_line_invalidates_candidate() {
        let engine = AssignmentEngine::new();
        let mut pool = pool(&[bin("B1", "M1", "AB15010101", 3)]);
        // 第二行为 2003 年，超出窗口
        let units = vec![unit("SU1", "M1", &["AB15010101", "AB15010103"])];

        let outcome = engine.assign_with_report(&units, &mut pool).unwrap();
        assert!(outcome.assignments.is_empty());
        assert_eq!(outcome.skipped[0].reason, SkipReason::NoCompatibleCandidate);
    }

    #[test]
    fn test_date_window_is_symmetric() {
        let engine = AssignmentEngine::new();
        let a = "AB15011001";
        let b = "AB15014001";

        let pool_b = pool(&[bin("B1", "M1", b, 1)]);
        let pool_a = pool(&[bin("B1", "M1", a, 1)]);
        assert!(engine.is_compatible(&unit("SU1", "M1", &[a]), &pool_b.entries()[0]));
        assert!(engine.is_compatible(&unit("SU1", "M1", &[b]), &pool_a.entries()[0]));
    }

    // ==========================================
    // 选择策略测试
    // ==========================================

    #[test]
    fn test_first_fit_prefers_larger_capacity_over_closer_date() {
        let engine = AssignmentEngine::new();
        let mut pool = pool(&[
            bin("CLOSE", "M1", "AB15010101", 1),
            bin("BIG", "M1", "AB15014001", 5),
        ]);
        let units = vec![unit("SU1", "M1", &["AB15010101"])];

        let rows = engine.assign(&units, &mut pool).unwrap();
        assert_eq!(rows[0].target_bin, "BIG");
        assert_eq!(rows[0].remaining_capacity_after, 4);
    }

    #[test]
    fn test_falls_through_to_next_compatible_bin() {
        let engine = AssignmentEngine::new();
        let mut pool = pool(&[
            bin("B1", "M1", "AB15010105", 5), // 2005 年，不兼容
            bin("B2", "M1", "AB15010101", 1),
        ]);
        let units = vec![unit("SU1", "M1", &["AB15010101"])];

        let rows = engine.assign(&units, &mut pool).unwrap();
        assert_eq!(rows[0].target_bin, "B2");
        assert_eq!(pool.available_su("B1"), Some(5));
    }

    #[test]
    fn test_no_candidates_for_other_material() {
        let engine = AssignmentEngine::new();
        let mut pool = pool(&[bin("B1", "M2", "AB15010101", 5)]);
        let units = vec![unit("SU1", "M1", &["AB15010101"])];

        let outcome = engine.assign_with_report(&units, &mut pool).unwrap();
        assert_eq!(outcome.skipped[0].reason, SkipReason::NoCandidates);
    }

    // ==========================================
    // 不变量测试
    // ==========================================

    #[test]
    fn test_invariants_hold_across_mixed_run() {
        let engine = AssignmentEngine::new();
        let rows = vec![
            bin("B1", "M1", "AB15010101", 2),
            bin("B2", "M1", "AB15012001", 1),
            bin("B3", "M2", "CD15010101", 1),
        ];
        let mut pool = pool(&rows);
        let units = vec![
            unit("SU1", "M1", &["AB15010101", "AB15010301"]),
            unit("SU2", "M1", &["AB15011001"]),
            unit("SU3", "M1", &["AB15011501", "AB15011601", "AB15011701"]),
            unit("SU4", "M1", &["AB15010101"]),
            unit("SU5", "M2", &["CD15010201"]),
            unit("SU6", "M2", &["CD15010201"]),
        ];

        let ledger = engine.assign(&units, &mut pool).unwrap();

        // 每个单元至多一个目标储位
        for u in &units {
            let targets: HashSet<&str> = ledger
                .iter()
                .filter(|r| r.source_unit_id == u.unit_id)
                .map(|r| r.target_bin.as_str())
                .collect();
            assert!(targets.len() <= 1);
        }

        // 容量守恒：每个储位被引用的单元数 ≤ 初始容量
        for row in &rows {
            let units_into_bin: HashSet<&str> = ledger
                .iter()
                .filter(|r| r.target_bin == row.storage_bin)
                .map(|r| r.source_unit_id.as_str())
                .collect();
            assert!(units_into_bin.len() as u32 <= row.avail_su);
        }

        // 输出顺序：单元顺序 + 行顺序
        let order: Vec<&str> = ledger.iter().map(|r| r.source_unit_id.as_str()).collect();
        let mut sorted = order.clone();
        sorted.sort_by_key(|id| units.iter().position(|u| u.unit_id == *id));
        assert_eq!(order, sorted);
    }
}

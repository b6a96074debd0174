// ==========================================
// 端架库位整合 - 整合运行编排器
// ==========================================
// 流程: 分组 → 构建候选池 → 分配 → 运行报告
// 职责: 一次运行的全部状态都在本函数作用域内，不共享可变状态
// ==========================================

use crate::domain::endcap::EndcapRecord;
use crate::domain::open_space::{OpenSpaceRecord, VIRTUAL_STORAGE_TYPE};
use crate::domain::report::ConsolidationReport;
use crate::engine::assignment::AssignmentEngine;
use crate::engine::bin_pool::CandidateBinPool;
use crate::engine::error::CapacityResult;
use crate::engine::grouping::SourceGrouper;
use crate::perf::PerfGuard;
use std::collections::BTreeSet;
use tracing::{info, instrument};
use uuid::Uuid;

// ==========================================
// ConsolidationOrchestrator
// ==========================================
pub struct ConsolidationOrchestrator {
    grouper: SourceGrouper,
    engine: AssignmentEngine,
    extra_excluded_types: BTreeSet<String>,
}

impl ConsolidationOrchestrator {
    /// # 参数
    /// - `extra_excluded_types`: 额外排除的目标储位类型（VIR 始终排除）
    pub fn new(extra_excluded_types: BTreeSet<String>) -> Self {
        Self {
            grouper: SourceGrouper::new(),
            engine: AssignmentEngine::new(),
            extra_excluded_types,
        }
    }

    /// 目标池排除集合 = 选中的端架类型 ∪ 额外排除类型 ∪ {VIR}
    pub fn pool_exclusions(&self, selected_types: &BTreeSet<String>) -> BTreeSet<String> {
        let mut excluded: BTreeSet<String> = selected_types
            .union(&self.extra_excluded_types)
            .cloned()
            .collect();
        excluded.insert(VIRTUAL_STORAGE_TYPE.to_string());
        excluded
    }

    /// 执行一次整合运行
    #[instrument(skip(self, endcaps, open_space, selected_types), fields(
        run_id,
        endcap_rows = endcaps.len(),
        open_space_rows = open_space.len(),
        selected = ?selected_types
    ))]
    pub fn run(
        &self,
        endcaps: &[EndcapRecord],
        open_space: &[OpenSpaceRecord],
        selected_types: &BTreeSet<String>,
    ) -> CapacityResult<ConsolidationReport> {
        let _perf = PerfGuard::new("consolidation_run");
        let run_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());

        let units = self.grouper.group(endcaps, selected_types);
        let mut pool = CandidateBinPool::build(open_space, &self.pool_exclusions(selected_types));
        info!(units = units.len(), pool_size = pool.len(), "开始分配");

        let outcome = self.engine.assign_with_report(&units, &mut pool)?;
        let report = ConsolidationReport::new(run_id, outcome.assignments, outcome.skipped);

        info!(
            units_assigned = report.stats.units_assigned,
            units_skipped = report.stats.units_skipped,
            bins_touched = report.stats.bins_touched,
            rows = report.stats.rows_written,
            "整合运行完成"
        );
        Ok(report)
    }
}

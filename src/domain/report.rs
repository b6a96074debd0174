// ==========================================
// 端架库位整合 - 运行报告领域模型
// ==========================================
// 用途: 一次整合运行的完整结果（台账 + 跳过原因 + 统计）
// 红线: 零分配是正常结果，不是错误
// ==========================================

use crate::domain::assignment::Assignment;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ==========================================
// SkipReason - 储运单元未分配原因
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkipReason {
    NoLines,                                    // 无批次行
    InvalidBatchDate { line_batch: String },   // 存在无法解析日期的批次
    NoCandidates,                               // 无同物料同前缀的候选储位
    NoCompatibleCandidate,                      // 候选储位均超出日期窗口
    NoCapacity,                                 // 兼容储位均已无容量
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoLines => write!(f, "NO_LINES"),
            SkipReason::InvalidBatchDate { line_batch } => {
                write!(f, "INVALID_BATCH_DATE: batch={}", line_batch)
            }
            SkipReason::NoCandidates => write!(f, "NO_CANDIDATES"),
            SkipReason::NoCompatibleCandidate => write!(f, "NO_COMPATIBLE_CANDIDATE"),
            SkipReason::NoCapacity => write!(f, "NO_CAPACITY"),
        }
    }
}

// ==========================================
// SkippedUnit - 未分配储运单元
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedUnit {
    pub unit_id: String,
    pub material: String,
    pub reason: SkipReason,
}

// ==========================================
// RunStats - 运行统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub units_seen: usize,
    pub units_assigned: usize,
    pub units_skipped: usize,
    pub bins_touched: usize,
    pub rows_written: usize,
}

impl RunStats {
    /// 由台账与跳过列表汇总统计
    pub fn summarize(assignments: &[Assignment], skipped: &[SkippedUnit]) -> Self {
        let units_assigned = assignments
            .iter()
            .map(|a| a.source_unit_id.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        let bins_touched = assignments
            .iter()
            .map(|a| a.target_bin.as_str())
            .collect::<BTreeSet<_>>()
            .len();

        Self {
            units_seen: units_assigned + skipped.len(),
            units_assigned,
            units_skipped: skipped.len(),
            bins_touched,
            rows_written: assignments.len(),
        }
    }
}

// ==========================================
// RunOutcome - 运行结论
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunOutcome {
    Assigned(usize), // 产生 n 条台账行
    NoMatches,       // 无任何匹配
}

// ==========================================
// ConsolidationReport - 运行报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationReport {
    pub run_id: String,
    pub assignments: Vec<Assignment>,
    pub skipped: Vec<SkippedUnit>,
    pub stats: RunStats,
}

impl ConsolidationReport {
    pub fn new(run_id: String, assignments: Vec<Assignment>, skipped: Vec<SkippedUnit>) -> Self {
        let stats = RunStats::summarize(&assignments, &skipped);
        Self {
            run_id,
            assignments,
            skipped,
            stats,
        }
    }

    pub fn outcome(&self) -> RunOutcome {
        if self.assignments.is_empty() {
            RunOutcome::NoMatches
        } else {
            RunOutcome::Assigned(self.assignments.len())
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

// ==========================================
// 产线质检与装箱系统 - 拒收原因统计引擎
// ==========================================
// 红线: 每件工件每个维度最多计 1 次
// 红线: 未登记的原因标签 → 配置错误,不得静默丢弃
// ==========================================
// 职责: 将拒收原因折叠为按维度计数
// 说明: 统计的是"维度失败次数",不是件数; 计数之和可大于 rejected_total
// ==========================================

use crate::domain::inspection::RejectionReason;
use crate::domain::run_state::RunState;
use crate::domain::types::ReasonTag;
use crate::engine::error::{EngineError, EngineResult};
use std::collections::BTreeSet;

// ==========================================
// Aggregator - 拒收原因统计引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct Aggregator {
    tracked: BTreeSet<ReasonTag>,
}

impl Aggregator {
    /// 统计全部三个维度
    pub fn new() -> Self {
        Self::with_tracked(&ReasonTag::ALL)
    }

    /// 只统计指定维度
    pub fn with_tracked(tags: &[ReasonTag]) -> Self {
        Self {
            tracked: tags.iter().copied().collect(),
        }
    }

    pub fn is_tracked(&self, tag: ReasonTag) -> bool {
        self.tracked.contains(&tag)
    }

    /// 记录一件不合格工件的原因
    ///
    /// # 规则
    /// - 先整体校验,全部通过后才修改计数（失败时 state 不变）
    /// - 同一标签在一件工件内重复出现只计 1 次
    ///
    /// # 错误
    /// - reasons 为空 → EmptyRejection
    /// - 标签未登记 → UnknownReasonTag
    pub fn record(
        &self,
        state: &mut RunState,
        piece_id: u64,
        reasons: &[RejectionReason],
    ) -> EngineResult<()> {
        if reasons.is_empty() {
            return Err(EngineError::EmptyRejection { piece_id });
        }

        let mut tags = BTreeSet::new();
        for reason in reasons {
            if !self.is_tracked(reason.tag) {
                return Err(EngineError::UnknownReasonTag {
                    piece_id,
                    tag: reason.tag,
                });
            }
            tags.insert(reason.tag);
        }

        for tag in tags {
            *state.reason_counts.entry(tag).or_insert(0) += 1;
        }

        Ok(())
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

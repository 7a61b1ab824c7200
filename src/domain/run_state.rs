// ==========================================
// 产线质检与装箱系统 - 运行状态
// ==========================================
// 用途: 单次运行的累计计数与装箱状态
// 红线: 仅由 Packer/Aggregator 修改; Reporter 只读快照
// ==========================================

use crate::domain::types::ReasonTag;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// RunState - 运行状态
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    // ===== 计数 =====
    pub(crate) accepted_total: u64,
    pub(crate) rejected_total: u64,
    pub(crate) reason_counts: BTreeMap<ReasonTag, u64>, // 按维度计数,可重叠

    // ===== 装箱 =====
    pub(crate) boxes_used: u64,       // 已开箱数（含当前箱）
    pub(crate) current_box_fill: u32, // 当前箱件数, 取值 [0, capacity)
}

impl RunState {
    /// 运行开始: 第一个箱子已预先打开
    pub fn new() -> Self {
        Self {
            accepted_total: 0,
            rejected_total: 0,
            reason_counts: BTreeMap::new(),
            boxes_used: 1,
            current_box_fill: 0,
        }
    }

    pub fn accepted_total(&self) -> u64 {
        self.accepted_total
    }

    pub fn rejected_total(&self) -> u64 {
        self.rejected_total
    }

    pub fn boxes_used(&self) -> u64 {
        self.boxes_used
    }

    pub fn current_box_fill(&self) -> u32 {
        self.current_box_fill
    }

    /// 已处理件数
    pub fn pieces_processed(&self) -> u64 {
        self.accepted_total + self.rejected_total
    }

    /// 单维度拒收计数（未出现为 0）
    pub fn reason_count(&self, tag: ReasonTag) -> u64 {
        self.reason_counts.get(&tag).copied().unwrap_or(0)
    }

    /// 生成只读快照
    pub fn snapshot(&self, box_capacity: u32) -> RunSnapshot {
        RunSnapshot {
            accepted_total: self.accepted_total,
            rejected_total: self.rejected_total,
            reason_counts: self.reason_counts.clone(),
            boxes_used: self.boxes_used,
            current_box_fill: self.current_box_fill,
            box_capacity,
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// RunSnapshot - 运行快照（供 Reporter 读取）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub accepted_total: u64,
    pub rejected_total: u64,
    pub reason_counts: BTreeMap<ReasonTag, u64>,
    pub boxes_used: u64,
    pub current_box_fill: u32,
    pub box_capacity: u32,
}

// ==========================================
// Trait: BoxOccupancy
// ==========================================
// 用途: 报表层对装箱状态的解读
pub trait BoxOccupancy {
    /// 已装满并封箱的箱数
    fn completed_boxes(&self) -> u64;

    /// 当前箱是否已放入工件
    fn last_box_started(&self) -> bool;

    /// 当前箱剩余空位
    fn remaining_slots(&self) -> u32;
}

impl BoxOccupancy for RunSnapshot {
    fn completed_boxes(&self) -> u64 {
        self.boxes_used.saturating_sub(1)
    }

    fn last_box_started(&self) -> bool {
        self.current_box_fill > 0
    }

    fn remaining_slots(&self) -> u32 {
        self.box_capacity.saturating_sub(self.current_box_fill)
    }
}

impl RunSnapshot {
    pub fn pieces_processed(&self) -> u64 {
        self.accepted_total + self.rejected_total
    }

    pub fn reason_count(&self, tag: ReasonTag) -> u64 {
        self.reason_counts.get(&tag).copied().unwrap_or(0)
    }

    /// 装箱守恒: accepted = capacity × 已封箱数 + 当前箱件数
    pub fn is_box_accounting_consistent(&self) -> bool {
        self.current_box_fill < self.box_capacity
            && self.accepted_total
                == self.box_capacity as u64 * self.completed_boxes() + self.current_box_fill as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_has_first_box_open() {
        let state = RunState::new();
        assert_eq!(state.accepted_total(), 0);
        assert_eq!(state.rejected_total(), 0);
        assert_eq!(state.boxes_used(), 1);
        assert_eq!(state.current_box_fill(), 0);
        assert_eq!(state.reason_count(ReasonTag::Color), 0);
    }

    #[test]
    fn test_snapshot_occupancy() {
        let mut state = RunState::new();
        state.accepted_total = 23;
        state.boxes_used = 3;
        state.current_box_fill = 3;

        let snapshot = state.snapshot(10);
        assert_eq!(snapshot.completed_boxes(), 2);
        assert!(snapshot.last_box_started());
        assert_eq!(snapshot.remaining_slots(), 7);
        assert!(snapshot.is_box_accounting_consistent());
    }

    #[test]
    fn test_snapshot_accounting_detects_mismatch() {
        let mut state = RunState::new();
        state.accepted_total = 5;
        state.current_box_fill = 4;

        assert!(!state.snapshot(10).is_box_accounting_consistent());
    }
}

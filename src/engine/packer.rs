// ==========================================
// 产线质检与装箱系统 - 装箱引擎
// ==========================================
// 红线: 每件工件恰好调用一次,按到达顺序
// 红线: 当前箱达到容量立即封箱并打开新箱
// ==========================================
// 职责: 合格/不合格累计 + 箱位状态迁移
// 状态机: 开箱 → 装填(0..容量-1) → 满箱(触发) → 新箱开箱
// ==========================================

use crate::domain::run_state::RunState;
use crate::domain::types::Classification;
use crate::engine::events::BoxClosedEvent;

// ==========================================
// Packer - 装箱引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct Packer {
    capacity: u32,
}

impl Packer {
    /// 创建新的 Packer 实例
    ///
    /// # 参数
    /// - capacity: 箱容量（> 0,由配置校验保证）
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// 记录一件工件的判定结论
    ///
    /// # 规则
    /// 1. REJECTED → rejected_total + 1,不触碰箱位
    /// 2. ACCEPTED → accepted_total + 1, current_box_fill + 1
    /// 3. current_box_fill == capacity → boxes_used + 1, current_box_fill = 0
    ///
    /// # 返回
    /// - Some(BoxClosedEvent): 本件触发封箱
    /// - None: 未封箱
    pub fn record(
        &self,
        state: &mut RunState,
        classification: Classification,
    ) -> Option<BoxClosedEvent> {
        if classification == Classification::Rejected {
            state.rejected_total += 1;
            return None;
        }

        state.accepted_total += 1;
        state.current_box_fill += 1;

        if state.current_box_fill < self.capacity {
            return None;
        }

        let closed = BoxClosedEvent::new(state.boxes_used, state.current_box_fill);
        state.boxes_used += 1;
        state.current_box_fill = 0;
        Some(closed)
    }
}

// ==========================================
// 产线质检与装箱系统 - 引擎层事件发布
// ==========================================
// 职责: 定义装箱事件发布 trait
// 说明: Engine 层定义 trait,日志/报表/上位系统实现适配器
// 红线: 发布失败不得影响计数
// ==========================================

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::{Arc, Mutex};

// ==========================================
// 装箱事件
// ==========================================

/// 封箱事件
///
/// 当前箱达到容量时由 Packer 产生
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxClosedEvent {
    /// 封箱的箱号（从 1 开始）
    pub box_number: u64,
    /// 箱内件数（等于容量）
    pub pieces: u32,
    /// 触发封箱的工件编号
    pub last_piece_id: Option<u64>,
}

impl BoxClosedEvent {
    pub fn new(box_number: u64, pieces: u32) -> Self {
        Self {
            box_number,
            pieces,
            last_piece_id: None,
        }
    }

    pub fn with_last_piece(mut self, piece_id: u64) -> Self {
        self.last_piece_id = Some(piece_id);
        self
    }
}

// ==========================================
// 事件发布 Trait
// ==========================================

/// 装箱事件发布者 Trait
pub trait BoxEventPublisher: Send + Sync {
    /// 发布封箱事件
    ///
    /// # 返回
    /// - `Ok(())`: 发布成功
    /// - `Err`: 发布失败（调用方只记录日志）
    fn publish(&self, event: &BoxClosedEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// 空操作事件发布者
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl BoxEventPublisher for NoOpEventPublisher {
    fn publish(&self, event: &BoxClosedEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        tracing::trace!(
            "NoOpEventPublisher: 跳过事件发布 - box_number={}",
            event.box_number
        );
        Ok(())
    }
}

/// 记录型事件发布者
///
/// 保存全部事件,用于测试与运行后回放
#[derive(Debug, Default)]
pub struct RecordingEventPublisher {
    events: Mutex<Vec<BoxClosedEvent>>,
}

impl RecordingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已记录事件的副本
    pub fn events(&self) -> Vec<BoxClosedEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl BoxEventPublisher for RecordingEventPublisher {
    fn publish(&self, event: &BoxClosedEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut events = self
            .events
            .lock()
            .map_err(|e| format!("锁获取失败: {}", e))?;
        events.push(event.clone());
        Ok(())
    }
}

/// 可选的事件发布者包装
///
/// 简化 Option<Arc<dyn BoxEventPublisher>> 的使用
#[derive(Clone)]
pub struct OptionalEventPublisher {
    inner: Option<Arc<dyn BoxEventPublisher>>,
}

impl OptionalEventPublisher {
    /// 创建带发布者的实例
    pub fn with_publisher(publisher: Arc<dyn BoxEventPublisher>) -> Self {
        Self {
            inner: Some(publisher),
        }
    }

    /// 创建空实例（不发布事件）
    pub fn none() -> Self {
        Self { inner: None }
    }

    /// 发布事件（如果有发布者）
    ///
    /// 发布失败只记录 warn 日志
    pub fn publish(&self, event: &BoxClosedEvent) {
        match &self.inner {
            Some(publisher) => {
                if let Err(e) = publisher.publish(event) {
                    tracing::warn!(
                        box_number = event.box_number,
                        error = %e,
                        "封箱事件发布失败,继续运行"
                    );
                }
            }
            None => {
                tracing::trace!(
                    "OptionalEventPublisher: 未配置发布者，跳过事件 - box_number={}",
                    event.box_number
                );
            }
        }
    }

    /// 检查是否配置了发布者
    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }
}

impl Default for OptionalEventPublisher {
    fn default() -> Self {
        Self::none()
    }
}

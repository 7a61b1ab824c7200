// ==========================================
// 产线质检与装箱系统 - 引擎层
// ==========================================
// 职责: 质检判定、装箱累计、原因统计、运行编排
// 红线: 所有拒收必须输出结构化 reason
// ==========================================

pub mod aggregator;
pub mod error;
pub mod events;
pub mod inspection_core;
pub mod inspector;
pub mod orchestrator;
pub mod packer;

// 重导出核心引擎
pub use aggregator::Aggregator;
pub use error::{EngineError, EngineResult};
pub use events::{
    BoxClosedEvent, BoxEventPublisher, NoOpEventPublisher, OptionalEventPublisher,
    RecordingEventPublisher,
};
pub use inspection_core::InspectionCore;
pub use inspector::Inspector;
pub use orchestrator::{
    LineOrchestrator, LineRun, MalformedPolicy, PieceOutcome, RunOutcome, SkippedPiece,
};
pub use packer::Packer;

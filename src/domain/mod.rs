// ==========================================
// 产线质检与装箱系统 - 领域模型层
// ==========================================
// 职责: 定义工件、质检结果、运行状态
// 红线: 不含引擎逻辑,不含 I/O
// ==========================================

pub mod inspection;
pub mod piece;
pub mod run_state;
pub mod types;

// 重导出核心类型
pub use inspection::{InspectionResult, RejectionReason};
pub use piece::{Piece, RawPieceRecord};
pub use run_state::{BoxOccupancy, RunSnapshot, RunState};
pub use types::{Classification, ReasonTag};

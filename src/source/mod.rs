// ==========================================
// 产线质检与装箱系统 - 工件来源层
// ==========================================
// 职责: 提供源记录序列（模拟器 / CSV 文件）
// 红线: 不做质检判定; 核心只依赖记录形态
// ==========================================

pub mod csv_source;
pub mod error;
pub mod simulator;

pub use csv_source::{read_pieces_csv, read_pieces_from_reader, write_pieces_csv};
pub use error::{SourceError, SourceResult};
pub use simulator::PieceSimulator;

// ==========================================
// 产线质检与装箱系统 - 核心库
// ==========================================
// 流程: 工件来源 → 质检 → 装箱（合格）/ 原因统计（不合格）→ 报告
// 系统定位: 单线程、同步、逐件处理
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 质检/装箱/统计/编排
pub mod engine;

// 配置层 - 产线配置
pub mod config;

// 来源层 - 模拟器/CSV
pub mod source;

// 报表层 - 文本/JSON
pub mod report;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Classification, ReasonTag};

// 领域实体
pub use domain::{InspectionResult, Piece, RawPieceRecord, RejectionReason, RunSnapshot, RunState};

// 引擎
pub use engine::{
    Aggregator, EngineError, Inspector, LineOrchestrator, MalformedPolicy, Packer, RunOutcome,
};

// 配置
pub use config::LineConfig;

// 报表
pub use report::{RunReport, TextReporter};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "产线质检与装箱系统";

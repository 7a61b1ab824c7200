// ==========================================
// 产线质检与装箱系统 - 报表层
// ==========================================
// 职责: 读取运行快照,输出文本/JSON 报告
// 红线: 只读,不修改运行状态
// ==========================================

pub mod run_report;
pub mod text_reporter;

pub use run_report::RunReport;
pub use text_reporter::TextReporter;

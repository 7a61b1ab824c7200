// ==========================================
// 产线质检与装箱系统 - 配置层
// ==========================================
// 职责: 产线配置加载与校验
// 存储: JSON 文件（可选）,缺省使用默认值
// ==========================================

pub mod error;
pub mod line_config;

// 重导出核心配置
pub use error::{ConfigError, ConfigResult};
pub use line_config::{config_keys, defaults, LineConfig};

// ==========================================
// 产线质检与装箱系统 - 引擎层错误类型
// ==========================================
// 分类:
// - 数据错误: 单件源记录不合规,可跳过或中止
// - 配置错误: 质检与统计口径不一致,运行必须中止
// ==========================================

use crate::domain::types::ReasonTag;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    // ===== 数据错误 =====
    #[error("字段缺失 (行 {row}, 字段 {field})")]
    MissingField { row: usize, field: String },

    #[error("数值解析失败 (行 {row}, 字段 {field}): {value}")]
    InvalidNumber {
        row: usize,
        field: String,
        value: String,
    },

    #[error("数值非有限 (工件 {piece_id}, 字段 {field}): {value}")]
    NonFiniteValue {
        piece_id: u64,
        field: String,
        value: f64,
    },

    // ===== 配置错误 =====
    #[error("未登记的拒收原因 (工件 {piece_id}): {tag}")]
    UnknownReasonTag { piece_id: u64, tag: ReasonTag },

    #[error("拒收工件缺少原因 (工件 {piece_id})")]
    EmptyRejection { piece_id: u64 },
}

impl EngineError {
    /// 是否为数据错误（单件问题）
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            EngineError::MissingField { .. }
                | EngineError::InvalidNumber { .. }
                | EngineError::NonFiniteValue { .. }
        )
    }

    /// 是否为配置错误（一致性破坏,致命）
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EngineError::UnknownReasonTag { .. } | EngineError::EmptyRejection { .. }
        )
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let data = EngineError::MissingField {
            row: 3,
            field: "weight".to_string(),
        };
        assert!(data.is_data_error());
        assert!(!data.is_configuration_error());

        let config = EngineError::UnknownReasonTag {
            piece_id: 9,
            tag: ReasonTag::Length,
        };
        assert!(config.is_configuration_error());
        assert!(!config.is_data_error());
        assert_eq!(config.to_string(), "未登记的拒收原因 (工件 9): LENGTH");
    }
}

// ==========================================
// 产线质检与装箱系统 - Inspection Core 纯函数库
// ==========================================
// 职责: 三项判定规则 + 源记录字段解析
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::domain::inspection::RejectionReason;
use crate::domain::types::ReasonTag;
use crate::engine::error::{EngineError, EngineResult};

// ==========================================
// InspectionCore - 纯函数工具类
// ==========================================
pub struct InspectionCore;

impl InspectionCore {
    /// 闭区间判定 min ≤ value ≤ max
    pub fn within_inclusive(value: f64, min: f64, max: f64) -> bool {
        min <= value && value <= max
    }

    /// 重量判定
    ///
    /// # 规则
    /// - min ≤ weight ≤ max → 通过
    /// - 否则 → WEIGHT,实测值保留两位小数
    pub fn check_weight(weight: f64, min: f64, max: f64) -> Option<RejectionReason> {
        if Self::within_inclusive(weight, min, max) {
            None
        } else {
            Some(RejectionReason::new(ReasonTag::Weight, format!("{:.2}", weight)))
        }
    }

    /// 颜色判定
    ///
    /// # 规则
    /// - color ∈ allowed（大小写敏感,精确匹配）→ 通过
    /// - 否则（含空串）→ COLOR,实测值为原值
    pub fn check_color(color: &str, allowed: &[String]) -> Option<RejectionReason> {
        if allowed.iter().any(|c| c == color) {
            None
        } else {
            Some(RejectionReason::new(ReasonTag::Color, color))
        }
    }

    /// 长度判定
    ///
    /// # 规则
    /// - min ≤ length ≤ max → 通过
    /// - 否则 → LENGTH,实测值保留两位小数
    pub fn check_length(length: f64, min: f64, max: f64) -> Option<RejectionReason> {
        if Self::within_inclusive(length, min, max) {
            None
        } else {
            Some(RejectionReason::new(ReasonTag::Length, format!("{:.2}", length)))
        }
    }

    // ==========================================
    // 源记录字段解析
    // ==========================================

    /// 取必填文本字段（原样返回,缺失视为错误）
    ///
    /// 颜色按原文精确比较,空白清理由来源层负责
    pub fn require_text<'a>(
        value: Option<&'a str>,
        field: &str,
        row: usize,
    ) -> EngineResult<&'a str> {
        value.ok_or_else(|| EngineError::MissingField {
            row,
            field: field.to_string(),
        })
    }

    /// 解析工件编号
    pub fn parse_id(value: Option<&str>, row: usize) -> EngineResult<u64> {
        let text = Self::require_text(value, "id", row)?.trim();
        text.parse::<u64>().map_err(|_| EngineError::InvalidNumber {
            row,
            field: "id".to_string(),
            value: text.to_string(),
        })
    }

    /// 解析测量值（必须为有限浮点数）
    pub fn parse_measurement(
        value: Option<&str>,
        field: &str,
        row: usize,
        piece_id: u64,
    ) -> EngineResult<f64> {
        let text = Self::require_text(value, field, row)?.trim();
        let parsed = text.parse::<f64>().map_err(|_| EngineError::InvalidNumber {
            row,
            field: field.to_string(),
            value: text.to_string(),
        })?;

        Self::require_finite(parsed, field, piece_id)
    }

    /// 测量值必须为有限数（NaN/∞ 不参与判定）
    pub fn require_finite(value: f64, field: &str, piece_id: u64) -> EngineResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EngineError::NonFiniteValue {
                piece_id,
                field: field.to_string(),
                value,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> Vec<String> {
        vec!["blue".to_string(), "green".to_string()]
    }

    // ==========================================
    // 测试 1: 区间判定
    // ==========================================

    #[test]
    fn test_weight_boundaries_pass() {
        assert!(InspectionCore::check_weight(95.0, 95.0, 105.0).is_none());
        assert!(InspectionCore::check_weight(105.0, 95.0, 105.0).is_none());
    }

    #[test]
    fn test_weight_out_of_range() {
        let reason = InspectionCore::check_weight(105.004, 95.0, 105.0).unwrap();
        assert_eq!(reason.tag, ReasonTag::Weight);
        assert_eq!(reason.measured, "105.00"); // 两位小数展示,判定用原值
    }

    #[test]
    fn test_length_boundaries_pass() {
        assert!(InspectionCore::check_length(10.0, 10.0, 20.0).is_none());
        assert!(InspectionCore::check_length(20.0, 10.0, 20.0).is_none());
        assert!(InspectionCore::check_length(9.999, 10.0, 20.0).is_some());
    }

    #[test]
    fn test_nan_never_within_range() {
        assert!(!InspectionCore::within_inclusive(f64::NAN, 0.0, 1.0));
    }

    // ==========================================
    // 测试 2: 颜色判定
    // ==========================================

    #[test]
    fn test_color_case_sensitive() {
        assert!(InspectionCore::check_color("blue", &colors()).is_none());
        assert!(InspectionCore::check_color("Blue", &colors()).is_some());
    }

    #[test]
    fn test_empty_color_fails_without_panic() {
        let reason = InspectionCore::check_color("", &colors()).unwrap();
        assert_eq!(reason.tag, ReasonTag::Color);
        assert_eq!(reason.measured, "");
    }

    // ==========================================
    // 测试 3: 字段解析
    // ==========================================

    #[test]
    fn test_parse_measurement_ok() {
        let value = InspectionCore::parse_measurement(Some(" 98.5 "), "weight", 2, 1).unwrap();
        assert_eq!(value, 98.5);
    }

    #[test]
    fn test_parse_measurement_missing() {
        let err = InspectionCore::parse_measurement(None, "length", 4, 1).unwrap_err();
        assert_eq!(
            err,
            EngineError::MissingField {
                row: 4,
                field: "length".to_string()
            }
        );
    }

    #[test]
    fn test_parse_measurement_non_numeric() {
        let err = InspectionCore::parse_measurement(Some("heavy"), "weight", 5, 1).unwrap_err();
        assert!(matches!(err, EngineError::InvalidNumber { .. }));
    }

    #[test]
    fn test_parse_measurement_non_finite() {
        let err = InspectionCore::parse_measurement(Some("NaN"), "weight", 6, 3).unwrap_err();
        assert!(matches!(err, EngineError::NonFiniteValue { piece_id: 3, .. }));
    }

    #[test]
    fn test_require_text_keeps_whitespace() {
        assert_eq!(
            InspectionCore::require_text(Some(" blue"), "color", 2).unwrap(),
            " blue"
        );
    }

    #[test]
    fn test_require_finite() {
        assert_eq!(InspectionCore::require_finite(12.5, "length", 1).unwrap(), 12.5);
        let err = InspectionCore::require_finite(f64::NEG_INFINITY, "length", 8).unwrap_err();
        assert!(matches!(err, EngineError::NonFiniteValue { piece_id: 8, ref field, .. } if field == "length"));
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(InspectionCore::parse_id(Some("42"), 1).unwrap(), 42);
        assert!(InspectionCore::parse_id(Some("-1"), 1).is_err());
        assert!(InspectionCore::parse_id(None, 1).is_err());
    }
}

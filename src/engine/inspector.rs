// ==========================================
// 产线质检与装箱系统 - 质检引擎
// ==========================================
// 红线: 三项规则全部独立评估,不短路
// 红线: 源记录不合规时逐件报错,不得默认判定通过/不通过
// ==========================================
// 职责: 源记录准入 + 合格/不合格判定
// 输入: RawPieceRecord / Piece
// 输出: Piece / InspectionResult（原因按 重量→颜色→长度 排序）
// ==========================================

use crate::config::LineConfig;
use crate::domain::inspection::InspectionResult;
use crate::domain::piece::{Piece, RawPieceRecord};
use crate::engine::error::EngineResult;
use crate::engine::InspectionCore;
use std::sync::Arc;
use tracing::instrument;

// ==========================================
// Inspector - 质检引擎
// ==========================================
pub struct Inspector {
    config: Arc<LineConfig>,
}

impl Inspector {
    /// 创建新的 Inspector 实例
    ///
    /// # 参数
    /// - config: 产线配置（运行期间只读）
    pub fn new(config: Arc<LineConfig>) -> Self {
        Self { config }
    }

    /// 源记录准入: 解析为 Piece
    ///
    /// # 错误
    /// - 编号/重量/颜色/长度缺失 → MissingField
    /// - 编号/重量/长度非数值 → InvalidNumber
    /// - 重量/长度为 NaN/∞ → NonFiniteValue
    pub fn admit(&self, record: &RawPieceRecord) -> EngineResult<Piece> {
        let row = record.row_number;

        let id = InspectionCore::parse_id(record.id.as_deref(), row)?;
        let weight = InspectionCore::parse_measurement(record.weight.as_deref(), "weight", row, id)?;
        let color = InspectionCore::require_text(record.color.as_deref(), "color", row)?;
        let length = InspectionCore::parse_measurement(record.length.as_deref(), "length", row, id)?;

        Ok(Piece::new(id, weight, color, length))
    }

    /// 判定单个工件
    ///
    /// # 规则
    /// 1. 重量 ∈ [weight_min_g, weight_max_g]
    /// 2. 颜色 ∈ allowed_colors（原文精确匹配）
    /// 3. 长度 ∈ [length_min_cm, length_max_cm]
    /// 无原因 → ACCEPTED,否则 → REJECTED
    ///
    /// # 错误
    /// - 重量/长度为 NaN/∞ → NonFiniteValue（数据错误,不做判定）
    #[instrument(level = "trace", skip(self, piece), fields(piece_id = piece.id))]
    pub fn inspect(&self, piece: &Piece) -> EngineResult<InspectionResult> {
        let config = &self.config;

        let weight = InspectionCore::require_finite(piece.weight, "weight", piece.id)?;
        let length = InspectionCore::require_finite(piece.length, "length", piece.id)?;

        let reasons = [
            InspectionCore::check_weight(weight, config.weight_min_g, config.weight_max_g),
            InspectionCore::check_color(&piece.color, &config.allowed_colors),
            InspectionCore::check_length(length, config.length_min_cm, config.length_max_cm),
        ]
        .into_iter()
        .flatten()
        .collect();

        Ok(InspectionResult::from_reasons(piece.id, reasons))
    }

    /// 准入 + 判定
    pub fn inspect_record(&self, record: &RawPieceRecord) -> EngineResult<(Piece, InspectionResult)> {
        let piece = self.admit(record)?;
        let result = self.inspect(&piece)?;
        Ok((piece, result))
    }
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new(Arc::new(LineConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Classification, ReasonTag};
    use crate::engine::EngineError;

    fn raw(id: &str, weight: &str, color: &str, length: &str) -> RawPieceRecord {
        RawPieceRecord {
            id: Some(id.to_string()),
            weight: Some(weight.to_string()),
            color: Some(color.to_string()),
            length: Some(length.to_string()),
            row_number: 1,
        }
    }

    #[test]
    fn test_inspect_accepted_piece() {
        let inspector = Inspector::default();
        let result = inspector.inspect(&Piece::new(1, 100.0, "blue", 15.0)).unwrap();

        assert_eq!(result.classification, Classification::Accepted);
        assert!(result.reasons.is_empty());
    }

    #[test]
    fn test_inspect_all_three_reasons_in_order() {
        let inspector = Inspector::default();
        let result = inspector.inspect(&Piece::new(2, 85.0, "red", 25.0)).unwrap();

        assert_eq!(result.classification, Classification::Rejected);
        assert_eq!(
            result.tags(),
            vec![ReasonTag::Weight, ReasonTag::Color, ReasonTag::Length]
        );
        assert_eq!(result.reasons[0].measured, "85.00");
        assert_eq!(result.reasons[1].measured, "red");
        assert_eq!(result.reasons[2].measured, "25.00");
    }

    #[test]
    fn test_inspect_uses_configured_thresholds() {
        let config = LineConfig {
            weight_min_g: 50.0,
            weight_max_g: 60.0,
            allowed_colors: vec!["black".to_string()],
            ..LineConfig::default()
        };
        let inspector = Inspector::new(Arc::new(config));

        assert!(inspector
            .inspect(&Piece::new(1, 55.0, "black", 12.0))
            .unwrap()
            .is_accepted());
        assert_eq!(
            inspector.inspect(&Piece::new(2, 100.0, "blue", 12.0)).unwrap().tags(),
            vec![ReasonTag::Weight, ReasonTag::Color]
        );
    }

    #[test]
    fn test_admit_keeps_color_verbatim() {
        let inspector = Inspector::default();
        let piece = inspector.admit(&raw("3", " 99 ", " green ", "11")).unwrap();
        assert_eq!(piece, Piece::new(3, 99.0, " green ", 11.0));

        let (_, result) = inspector.inspect_record(&raw("3", "99", " green ", "11")).unwrap();
        assert_eq!(result.tags(), vec![ReasonTag::Color]);
    }

    #[test]
    fn test_admit_missing_color_is_data_error() {
        let inspector = Inspector::default();
        let mut record = raw("4", "99", "green", "11");
        record.color = None;

        let err = inspector.admit(&record).unwrap_err();
        assert!(err.is_data_error());
        assert!(matches!(err, EngineError::MissingField { ref field, .. } if field == "color"));
    }

    #[test]
    fn test_inspect_record_rejects_infinite_length() {
        let inspector = Inspector::default();
        let err = inspector
            .inspect_record(&raw("5", "99", "blue", "inf"))
            .unwrap_err();
        assert!(matches!(err, EngineError::NonFiniteValue { piece_id: 5, .. }));
    }

    #[test]
    fn test_inspect_rejects_non_finite_piece() {
        let inspector = Inspector::default();

        let err = inspector
            .inspect(&Piece::new(6, f64::NAN, "blue", 15.0))
            .unwrap_err();
        assert!(err.is_data_error());
        assert!(matches!(err, EngineError::NonFiniteValue { piece_id: 6, ref field, .. } if field == "weight"));

        let err = inspector
            .inspect(&Piece::new(7, 100.0, "red", f64::INFINITY))
            .unwrap_err();
        assert!(matches!(err, EngineError::NonFiniteValue { piece_id: 7, ref field, .. } if field == "length"));
    }
}

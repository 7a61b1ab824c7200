// ==========================================
// 产线质检与装箱系统 - 质检结果
// ==========================================
// 红线: reasons 为空 ⇔ classification = Accepted
// ==========================================

use crate::domain::types::{Classification, ReasonTag};
use crate::i18n::{current_locale, t_with_args_in};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 单条拒收原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionReason {
    pub tag: ReasonTag,
    /// 实测值（重量/长度保留两位小数,颜色为原值）
    pub measured: String,
}

impl RejectionReason {
    pub fn new(tag: ReasonTag, measured: impl Into<String>) -> Self {
        Self {
            tag,
            measured: measured.into(),
        }
    }
}

impl RejectionReason {
    fn detail_key(&self) -> &'static str {
        match self.tag {
            ReasonTag::Weight => "inspection.reason_detail.weight",
            ReasonTag::Color => "inspection.reason_detail.color",
            ReasonTag::Length => "inspection.reason_detail.length",
        }
    }

    /// 指定语言的原因描述（含实测值）
    pub fn describe_in(&self, locale: &str) -> String {
        t_with_args_in(locale, self.detail_key(), &[("measured", self.measured.as_str())])
    }
}

/// 按当前语言输出
impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe_in(&current_locale()))
    }
}

/// 质检结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionResult {
    pub piece_id: u64,
    pub classification: Classification,
    pub reasons: Vec<RejectionReason>,
}

impl InspectionResult {
    /// 由原因列表构造（结论由原因是否为空决定）
    pub fn from_reasons(piece_id: u64, reasons: Vec<RejectionReason>) -> Self {
        let classification = if reasons.is_empty() {
            Classification::Accepted
        } else {
            Classification::Rejected
        };

        Self {
            piece_id,
            classification,
            reasons,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.classification.is_accepted()
    }

    /// 原因标签（按评估顺序）
    pub fn tags(&self) -> Vec<ReasonTag> {
        self.reasons.iter().map(|r| r.tag).collect()
    }
}

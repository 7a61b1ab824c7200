// ==========================================
// 产线质检与装箱系统 - 领域类型定义
// ==========================================
// 职责: 质检结论、拒收原因标签
// 红线: 原因标签是结构化枚举,不从文本反推
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 质检结论 (Classification)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Accepted, // 合格,进入装箱
    Rejected, // 不合格,计入原因统计
}

impl Classification {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Classification::Accepted)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Accepted => write!(f, "ACCEPTED"),
            Classification::Rejected => write!(f, "REJECTED"),
        }
    }
}

// ==========================================
// 拒收原因标签 (Reason Tag)
// ==========================================
// 顺序即规则评估顺序: 重量 → 颜色 → 长度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonTag {
    Weight,
    Color,
    Length,
}

impl ReasonTag {
    /// 全部判定维度（按评估顺序）
    pub const ALL: [ReasonTag; 3] = [ReasonTag::Weight, ReasonTag::Color, ReasonTag::Length];

    /// 转换为字符串标识
    pub fn as_str(&self) -> &'static str {
        match self {
            ReasonTag::Weight => "WEIGHT",
            ReasonTag::Color => "COLOR",
            ReasonTag::Length => "LENGTH",
        }
    }

    /// 国际化键（report.reason.*）
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ReasonTag::Weight => "report.reason.weight",
            ReasonTag::Color => "report.reason.color",
            ReasonTag::Length => "report.reason.length",
        }
    }
}

impl fmt::Display for ReasonTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

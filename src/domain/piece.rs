// ==========================================
// 产线质检与装箱系统 - 工件实体
// ==========================================
// 职责: 工件记录（已校验）与源记录（未校验）
// 红线: Piece 创建后只读,不可修改
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Piece - 工件（已校验）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub id: u64,
    pub weight: f64, // 重量（克）
    pub color: String,
    pub length: f64, // 长度（厘米）
}

impl Piece {
    pub fn new(id: u64, weight: f64, color: impl Into<String>, length: f64) -> Self {
        Self {
            id,
            weight,
            color: color.into(),
            length,
        }
    }
}

// ==========================================
// RawPieceRecord - 源记录（未校验）
// ==========================================
// 用途: 文本来源（CSV/传感器）输出的原始形态
// 说明: 数值字段保留原文,由引擎准入时解析,
//       以便逐件报告缺失/非数值错误而不是整批失败
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPieceRecord {
    pub id: Option<String>,
    pub weight: Option<String>,
    pub color: Option<String>,
    pub length: Option<String>,

    // 元信息
    pub row_number: usize, // 原始文件行号（非文件来源为序号）
}

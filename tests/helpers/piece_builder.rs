// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

#![allow(dead_code)]

use quality_line::domain::{Piece, RawPieceRecord};

// ==========================================
// Piece 构建器
// ==========================================
// 默认值为合格工件: 100g / blue / 15cm

pub struct PieceBuilder {
    id: u64,
    weight: f64,
    color: String,
    length: f64,
}

impl PieceBuilder {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            weight: 100.0,
            color: "blue".to_string(),
            length: 15.0,
        }
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = color.to_string();
        self
    }

    pub fn length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    pub fn build(self) -> Piece {
        Piece::new(self.id, self.weight, self.color, self.length)
    }
}

/// 合格工件序列
pub fn accepted_pieces(ids: std::ops::RangeInclusive<u64>) -> Vec<Piece> {
    ids.map(|id| PieceBuilder::new(id).build()).collect()
}

/// 三项全部不合格的工件
pub fn fully_rejected_piece(id: u64) -> Piece {
    PieceBuilder::new(id)
        .weight(85.0)
        .color("red")
        .length(25.0)
        .build()
}

// ==========================================
// RawPieceRecord 构建器
// ==========================================

pub fn raw_record(
    row_number: usize,
    id: Option<&str>,
    weight: Option<&str>,
    color: Option<&str>,
    length: Option<&str>,
) -> RawPieceRecord {
    RawPieceRecord {
        id: id.map(str::to_string),
        weight: weight.map(str::to_string),
        color: color.map(str::to_string),
        length: length.map(str::to_string),
        row_number,
    }
}

// ==========================================
// 产线质检与装箱系统 - 工件模拟器
// ==========================================
// 用途: 生成随机工件,模拟产线来料
// 分布: 重量 [90,110)g, 长度 [8,22)cm, 颜色 {blue, green, red, yellow}
// 说明: 同一 seed 产生同一序列,便于复现
// ==========================================

use crate::domain::piece::Piece;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::ops::Range;

/// 模拟器默认参数
pub mod defaults {
    pub const WEIGHT_RANGE_G: std::ops::Range<f64> = 90.0..110.0;
    pub const LENGTH_RANGE_CM: std::ops::Range<f64> = 8.0..22.0;
    pub const COLORS: [&str; 4] = ["blue", "green", "red", "yellow"];
}

// ==========================================
// PieceSimulator - 工件模拟器
// ==========================================
// 编号从 1 开始连续递增,产出 count 件后结束
pub struct PieceSimulator {
    rng: StdRng,
    count: u64,
    next_id: u64,
    weight_range: Range<f64>,
    length_range: Range<f64>,
    colors: Vec<String>,
}

impl PieceSimulator {
    /// 固定种子
    pub fn seeded(count: u64, seed: u64) -> Self {
        Self::with_rng(count, StdRng::seed_from_u64(seed))
    }

    /// 系统熵源
    pub fn from_entropy(count: u64) -> Self {
        Self::with_rng(count, StdRng::from_entropy())
    }

    fn with_rng(count: u64, rng: StdRng) -> Self {
        Self {
            rng,
            count,
            next_id: 1,
            weight_range: defaults::WEIGHT_RANGE_G,
            length_range: defaults::LENGTH_RANGE_CM,
            colors: defaults::COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// 覆写颜色候选集
    pub fn with_colors(mut self, colors: Vec<String>) -> Self {
        if !colors.is_empty() {
            self.colors = colors;
        }
        self
    }

    /// 覆写重量/长度分布区间（空区间忽略）
    pub fn with_ranges(mut self, weight: Range<f64>, length: Range<f64>) -> Self {
        if weight.start < weight.end {
            self.weight_range = weight;
        }
        if length.start < length.end {
            self.length_range = length;
        }
        self
    }

    fn generate(&mut self, id: u64) -> Piece {
        let weight = self.rng.gen_range(self.weight_range.clone());
        let color = self
            .colors
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default();
        let length = self.rng.gen_range(self.length_range.clone());

        Piece::new(id, weight, color, length)
    }
}

impl Iterator for PieceSimulator {
    type Item = Piece;

    fn next(&mut self) -> Option<Piece> {
        if self.next_id > self.count {
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        Some(self.generate(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.count + 1).saturating_sub(self.next_id) as usize;
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_and_ids() {
        let ids: Vec<u64> = PieceSimulator::seeded(5, 1).map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_zero_count_is_empty() {
        assert_eq!(PieceSimulator::seeded(0, 1).count(), 0);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a: Vec<Piece> = PieceSimulator::seeded(20, 42).collect();
        let b: Vec<Piece> = PieceSimulator::seeded(20, 42).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_values_within_distribution() {
        for piece in PieceSimulator::seeded(500, 7) {
            assert!((90.0..110.0).contains(&piece.weight));
            assert!((8.0..22.0).contains(&piece.length));
            assert!(defaults::COLORS.contains(&piece.color.as_str()));
        }
    }

    #[test]
    fn test_custom_colors() {
        let colors = vec!["black".to_string()];
        assert!(PieceSimulator::seeded(10, 3)
            .with_colors(colors)
            .all(|p| p.color == "black"));
    }

    #[test]
    fn test_custom_ranges() {
        for piece in PieceSimulator::seeded(200, 9).with_ranges(99.0..101.0, 12.0..13.0) {
            assert!((99.0..101.0).contains(&piece.weight));
            assert!((12.0..13.0).contains(&piece.length));
        }
    }

    #[test]
    fn test_empty_range_ignored() {
        #[allow(clippy::reversed_empty_ranges)]
        let sim = PieceSimulator::seeded(100, 9).with_ranges(101.0..99.0, 12.0..13.0);
        for piece in sim {
            assert!((90.0..110.0).contains(&piece.weight));
            assert!((12.0..13.0).contains(&piece.length));
        }
    }

    #[test]
    fn test_size_hint() {
        let mut sim = PieceSimulator::seeded(3, 1);
        assert_eq!(sim.size_hint(), (3, Some(3)));
        sim.next();
        assert_eq!(sim.size_hint(), (2, Some(2)));
    }
}

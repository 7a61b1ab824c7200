// ==========================================
// 产线质检与装箱系统 - 产线配置
// ==========================================
// 职责: 质检阈值、允许颜色、箱容量
// 默认值: 重量 [95,105]g, 长度 [10,20]cm, 颜色 {blue, green}, 箱容量 10
// 红线: 运行开始后不可修改
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    // 重量（克）
    pub const WEIGHT_MIN_G: &str = "weight_min_g";
    pub const WEIGHT_MAX_G: &str = "weight_max_g";

    // 长度（厘米）
    pub const LENGTH_MIN_CM: &str = "length_min_cm";
    pub const LENGTH_MAX_CM: &str = "length_max_cm";

    // 颜色
    pub const ALLOWED_COLORS: &str = "allowed_colors";

    // 装箱
    pub const BOX_CAPACITY: &str = "box_capacity";
}

// ==========================================
// 默认值
// ==========================================
pub mod defaults {
    pub const WEIGHT_MIN_G: f64 = 95.0;
    pub const WEIGHT_MAX_G: f64 = 105.0;
    pub const LENGTH_MIN_CM: f64 = 10.0;
    pub const LENGTH_MAX_CM: f64 = 20.0;
    pub const ALLOWED_COLORS: [&str; 2] = ["blue", "green"];
    pub const BOX_CAPACITY: u32 = 10;
}

fn default_weight_min_g() -> f64 {
    defaults::WEIGHT_MIN_G
}

fn default_weight_max_g() -> f64 {
    defaults::WEIGHT_MAX_G
}

fn default_length_min_cm() -> f64 {
    defaults::LENGTH_MIN_CM
}

fn default_length_max_cm() -> f64 {
    defaults::LENGTH_MAX_CM
}

fn default_allowed_colors() -> Vec<String> {
    defaults::ALLOWED_COLORS.iter().map(|c| c.to_string()).collect()
}

fn default_box_capacity() -> u32 {
    defaults::BOX_CAPACITY
}

/// 产线配置
///
/// JSON 中缺省的键使用默认值,例如只覆写箱容量:
/// ```
/// use quality_line::config::LineConfig;
/// let config = LineConfig::from_json_str(r#"{"box_capacity": 12}"#).unwrap();
/// assert_eq!(config.box_capacity, 12);
/// assert_eq!(config.weight_min_g, 95.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineConfig {
    #[serde(default = "default_weight_min_g")]
    pub weight_min_g: f64,

    #[serde(default = "default_weight_max_g")]
    pub weight_max_g: f64,

    #[serde(default = "default_length_min_cm")]
    pub length_min_cm: f64,

    #[serde(default = "default_length_max_cm")]
    pub length_max_cm: f64,

    /// 允许颜色（大小写敏感,精确匹配）
    #[serde(default = "default_allowed_colors")]
    pub allowed_colors: Vec<String>,

    #[serde(default = "default_box_capacity")]
    pub box_capacity: u32,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            weight_min_g: default_weight_min_g(),
            weight_max_g: default_weight_max_g(),
            length_min_cm: default_length_min_cm(),
            length_max_cm: default_length_max_cm(),
            allowed_colors: default_allowed_colors(),
            box_capacity: default_box_capacity(),
        }
    }
}

impl LineConfig {
    /// 从 JSON 字符串加载并校验
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: LineConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件加载并校验
    pub fn from_json_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&raw)?;

        tracing::debug!(path = %path.display(), "产线配置已加载");
        Ok(config)
    }

    /// 校验配置
    ///
    /// # 规则
    /// - 区间端点必须为有限值且 min ≤ max
    /// - 允许颜色非空,且不含空白项
    /// - 箱容量 > 0
    pub fn validate(&self) -> ConfigResult<()> {
        check_range(config_keys::WEIGHT_MIN_G, self.weight_min_g, self.weight_max_g)?;
        check_range(config_keys::LENGTH_MIN_CM, self.length_min_cm, self.length_max_cm)?;

        if self.allowed_colors.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: config_keys::ALLOWED_COLORS.to_string(),
                message: "允许颜色不能为空".to_string(),
            });
        }
        if self.allowed_colors.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: config_keys::ALLOWED_COLORS.to_string(),
                message: "允许颜色包含空白项".to_string(),
            });
        }

        if self.box_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                key: config_keys::BOX_CAPACITY.to_string(),
                message: "箱容量必须大于 0".to_string(),
            });
        }

        Ok(())
    }
}

fn check_range(key: &str, min: f64, max: f64) -> ConfigResult<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("区间端点必须为有限值: [{}, {}]", min, max),
        });
    }
    if min > max {
        return Err(ConfigError::InvertedRange {
            key: key.to_string(),
            min,
            max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_matches_reference_line() {
        let config = LineConfig::default();
        assert_eq!(config.weight_min_g, 95.0);
        assert_eq!(config.weight_max_g, 105.0);
        assert_eq!(config.length_min_cm, 10.0);
        assert_eq!(config.length_max_cm, 20.0);
        assert_eq!(config.allowed_colors, vec!["blue", "green"]);
        assert_eq!(config.box_capacity, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = LineConfig::from_json_str(r#"{"allowed_colors": ["black"]}"#).unwrap();
        assert_eq!(config.allowed_colors, vec!["black"]);
        assert_eq!(config.box_capacity, 10);
        assert_eq!(config.length_max_cm, 20.0);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = LineConfig::from_json_str(r#"{"weight_min_g": 110, "weight_max_g": 100}"#);
        assert!(matches!(result, Err(ConfigError::InvertedRange { .. })));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = LineConfig::from_json_str(r#"{"box_capacity": 0}"#);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_empty_colors_rejected() {
        let config = LineConfig {
            allowed_colors: Vec::new(),
            ..LineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let result = LineConfig::from_json_str("{not json");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"box_capacity": 4, "length_max_cm": 25.5}}"#).unwrap();

        let config = LineConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.box_capacity, 4);
        assert_eq!(config.length_max_cm, 25.5);
    }

    #[test]
    fn test_missing_file() {
        let result = LineConfig::from_json_file(Path::new("/nonexistent/line.json"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}

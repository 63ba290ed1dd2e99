use serde::{Deserialize, Serialize};

use crate::core::error::AnalysisError;
use crate::core::verdict::Verdict;

/// 判定分档阈值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerdictThresholds {
    pub yellow: f64,
    pub red: f64,
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        Self {
            yellow: 0.25,
            red: 0.55,
        }
    }
}

impl VerdictThresholds {
    pub fn band(&self, score: f64) -> Verdict {
        if score >= self.red {
            Verdict::Red
        } else if score >= self.yellow {
            Verdict::Yellow
        } else {
            Verdict::Green
        }
    }
}

/// 文本规则阈值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// 去掉首尾空白后的最少字符数，低于此值不评估
    pub min_chars: usize,
    /// 超过此长度的文本截断后再评估
    pub max_chars: usize,
    pub uniform_coeff_var_below: f64,
    pub uniform_avg_sentence_len_above: f64,
    pub complex_avg_word_len_above: f64,
    pub complex_stopword_ratio_below: f64,
    pub trigram_repeat_ratio_above: f64,
    pub structural_punct_ratio_above: f64,
    pub type_token_ratio_below: f64,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            min_chars: 80,
            max_chars: 50_000,
            uniform_coeff_var_below: 0.18,
            uniform_avg_sentence_len_above: 17.0,
            complex_avg_word_len_above: 5.4,
            complex_stopword_ratio_below: 0.33,
            trigram_repeat_ratio_above: 0.045,
            structural_punct_ratio_above: 0.012,
            type_token_ratio_below: 0.38,
        }
    }
}

/// 视觉规则阈值与降采样上限
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    pub max_width: u32,
    pub max_height: u32,
    pub blur_sharpness_below: f64,
    pub extreme_sharpness_above: f64,
    pub static_correlation_above: f64,
    pub inconsistent_correlation_below: f64,
    pub blockiness_above: f64,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            max_width: 640,
            max_height: 360,
            blur_sharpness_below: 85.0,
            extreme_sharpness_above: 1250.0,
            static_correlation_above: 0.987,
            inconsistent_correlation_below: 0.46,
            blockiness_above: 10.2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub text: TextConfig,
    pub visual: VisualConfig,
    pub thresholds: VerdictThresholds,
}

impl AnalysisConfig {
    /// 偏向召回的部署：更低的分档阈值
    pub fn strict() -> Self {
        Self {
            thresholds: VerdictThresholds {
                yellow: 0.20,
                red: 0.45,
            },
            ..Default::default()
        }
    }

    /// 从 JSON5 文本加载，缺省字段使用默认值
    pub fn from_json5(source: &str) -> Result<Self, AnalysisError> {
        json5::from_str(source).map_err(|e| AnalysisError::Config(e.to_string()))
    }
}

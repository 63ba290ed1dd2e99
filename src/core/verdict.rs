use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::config::VerdictThresholds;
use crate::core::error::{ensure_finite, AnalysisError};

/// 真伪判定，按严重程度全序：none < green < yellow < red
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// 信号不足，无法判断
    #[default]
    None,
    Green,
    Yellow,
    Red,
}

impl Verdict {
    pub fn rank(self) -> u8 {
        match self {
            Verdict::None => 0,
            Verdict::Green => 1,
            Verdict::Yellow => 2,
            Verdict::Red => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::None => "none",
            Verdict::Green => "green",
            Verdict::Yellow => "yellow",
            Verdict::Red => "red",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 规则命中标签，稳定标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonTag {
    NoTextDetected,
    NoVisualFramesDetected,
    // 文本规则
    UniformSentenceLengths,
    LowStopwordRatioHighTokenComplexity,
    RepetitivePhrasing,
    HeavyStructuringPunctuation,
    LowLexicalDiversity,
    OverlyFormalRegister,
    // 视觉规则
    NoFaceDetected,
    LowDetailBlur,
    ExtremeSharpness,
    VeryStaticFrames,
    FrameNoiseInconsistency,
    JpegBlockiness,
}

impl ReasonTag {
    pub fn as_str(self) -> &'static str {
        match self {
            ReasonTag::NoTextDetected => "no_text_detected",
            ReasonTag::NoVisualFramesDetected => "no_visual_frames_detected",
            ReasonTag::UniformSentenceLengths => "uniform_sentence_lengths",
            ReasonTag::LowStopwordRatioHighTokenComplexity => {
                "low_stopword_ratio_high_token_complexity"
            }
            ReasonTag::RepetitivePhrasing => "repetitive_phrasing",
            ReasonTag::HeavyStructuringPunctuation => "heavy_structuring_punctuation",
            ReasonTag::LowLexicalDiversity => "low_lexical_diversity",
            ReasonTag::OverlyFormalRegister => "overly_formal_register",
            ReasonTag::NoFaceDetected => "no_face_detected",
            ReasonTag::LowDetailBlur => "low_detail_blur",
            ReasonTag::ExtremeSharpness => "extreme_sharpness",
            ReasonTag::VeryStaticFrames => "very_static_frames",
            ReasonTag::FrameNoiseInconsistency => "frame_noise_inconsistency",
            ReasonTag::JpegBlockiness => "jpeg_blockiness",
        }
    }
}

impl fmt::Display for ReasonTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单项评分结果，构造后只读
///
/// `score` 是严重程度累加值，不是校准过的概率。
/// 反序列化同样做结构校验，档位无法在没有阈值时核对。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScoredResult")]
pub struct ScoredResult {
    verdict: Verdict,
    score: f64,
    reasons: Vec<ReasonTag>,
}

impl ScoredResult {
    /// 信号不足：score 为 0，只带一个缺失标签
    pub fn none(reason: ReasonTag) -> Self {
        Self {
            verdict: Verdict::None,
            score: 0.0,
            reasons: vec![reason],
        }
    }

    /// 由规则累加分数生成结果，先四舍五入到 3 位小数再分档
    pub fn from_rules(raw_score: f64, reasons: Vec<ReasonTag>, thresholds: &VerdictThresholds) -> Self {
        let score = round_score(raw_score);
        Self {
            verdict: thresholds.band(score),
            score,
            reasons,
        }
    }

    /// 外部来源的结果（例如调用方叠加的其他判定）
    ///
    /// 判定档位必须与 `thresholds` 对 score 的分档一致。
    pub fn from_parts(
        verdict: Verdict,
        score: f64,
        reasons: Vec<ReasonTag>,
        thresholds: &VerdictThresholds,
    ) -> Result<Self, AnalysisError> {
        let result = Self {
            verdict,
            score: round_score(ensure_finite(score, "score")?),
            reasons,
        };
        result.check_shape()?;

        if verdict != Verdict::None {
            let banded = thresholds.band(result.score);
            if banded != verdict {
                return Err(AnalysisError::InvalidResult(format!(
                    "score {:.3} bands as {}, not {}",
                    result.score, banded, verdict
                )));
            }
        }
        Ok(result)
    }

    /// 与阈值无关的结构约束
    fn check_shape(&self) -> Result<(), AnalysisError> {
        ensure_finite(self.score, "score")?;
        match self.verdict {
            Verdict::None if self.score != 0.0 || self.reasons.len() != 1 => {
                Err(AnalysisError::InvalidResult(format!(
                    "none needs score 0 and exactly one reason, got {:.3} with {} reasons",
                    self.score,
                    self.reasons.len()
                )))
            }
            Verdict::None => Ok(()),
            _ if self.score < 0.0 => Err(AnalysisError::InvalidResult(format!(
                "negative score {:.3}",
                self.score
            ))),
            // 每条规则权重为正，有分必有标签
            _ if self.score > 0.0 && self.reasons.is_empty() => Err(AnalysisError::InvalidResult(
                format!("{} score {:.3} without reasons", self.verdict, self.score),
            )),
            _ => Ok(()),
        }
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn reasons(&self) -> &[ReasonTag] {
        &self.reasons
    }

    pub fn has_reason(&self, tag: ReasonTag) -> bool {
        self.reasons.contains(&tag)
    }
}

#[derive(Deserialize)]
struct RawScoredResult {
    verdict: Verdict,
    score: f64,
    reasons: Vec<ReasonTag>,
}

impl TryFrom<RawScoredResult> for ScoredResult {
    type Error = AnalysisError;

    fn try_from(raw: RawScoredResult) -> Result<Self, Self::Error> {
        let result = Self {
            verdict: raw.verdict,
            score: raw.score,
            reasons: raw.reasons,
        };
        result.check_shape()?;
        Ok(result)
    }
}

pub fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

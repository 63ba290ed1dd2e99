use log::debug;

use super::face::FaceDetector;
use super::features::{FrameFeatures, VisualFeatureSet};
use super::frame::RasterFrame;
use super::preprocess::prepare;
use crate::core::config::{VerdictThresholds, VisualConfig};
use crate::core::error::AnalysisError;
use crate::core::verdict::{ReasonTag, ScoredResult};

/// 单个分支：条件成立时加权并记录标签
struct VisualBranch {
    tag: ReasonTag,
    weight: f64,
    fires: fn(&VisualFeatureSet, &VisualConfig) -> bool,
}

/// 一组互斥分支，最多命中第一个成立的
type VisualRule = &'static [VisualBranch];

/// 顺序即标签输出顺序
const VISUAL_RULES: [VisualRule; 4] = [
    &[VisualBranch {
        tag: ReasonTag::NoFaceDetected,
        weight: 0.32,
        fires: |f, _| f.face_detected == Some(false),
    }],
    &[
        VisualBranch {
            tag: ReasonTag::LowDetailBlur,
            weight: 0.32,
            fires: |f, c| f.mean_sharpness < c.blur_sharpness_below,
        },
        VisualBranch {
            tag: ReasonTag::ExtremeSharpness,
            weight: 0.10,
            fires: |f, c| f.mean_sharpness > c.extreme_sharpness_above,
        },
    ],
    // 单帧时相关度未定义，两条都不触发
    &[
        VisualBranch {
            tag: ReasonTag::VeryStaticFrames,
            weight: 0.30,
            fires: |f, c| {
                f.mean_histogram_correlation
                    .is_some_and(|corr| corr > c.static_correlation_above)
            },
        },
        VisualBranch {
            tag: ReasonTag::FrameNoiseInconsistency,
            weight: 0.15,
            fires: |f, c| {
                f.mean_histogram_correlation
                    .is_some_and(|corr| corr < c.inconsistent_correlation_below)
            },
        },
    ],
    &[VisualBranch {
        tag: ReasonTag::JpegBlockiness,
        weight: 0.22,
        fires: |f, c| f.mean_blockiness > c.blockiness_above,
    }],
];

pub struct VisualScorer {
    config: VisualConfig,
    thresholds: VerdictThresholds,
}

impl VisualScorer {
    pub fn new() -> Self {
        Self::with_config(VisualConfig::default(), VerdictThresholds::default())
    }

    pub fn with_config(config: VisualConfig, thresholds: VerdictThresholds) -> Self {
        Self { config, thresholds }
    }

    /// 对一组帧（单图或一段视频的采样帧）评分
    pub fn score(
        &self,
        frames: &[RasterFrame],
        face_detector: Option<&dyn FaceDetector>,
    ) -> Result<ScoredResult, AnalysisError> {
        match self.extract(frames, face_detector)? {
            Some(features) => Ok(self.score_features(&features)),
            None => Ok(ScoredResult::none(ReasonTag::NoVisualFramesDetected)),
        }
    }

    /// 空帧列表返回 None
    pub fn extract(
        &self,
        frames: &[RasterFrame],
        face_detector: Option<&dyn FaceDetector>,
    ) -> Result<Option<VisualFeatureSet>, AnalysisError> {
        let Some(first) = frames.first() else {
            return Ok(None);
        };

        let per_frame = frames
            .iter()
            .map(|frame| {
                let prepared = prepare(frame, self.config.max_width, self.config.max_height)?;
                FrameFeatures::extract(&prepared)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let face_detected = face_detector.map(|detector| detector.detect(first));
        let features = VisualFeatureSet::from_frames(&per_frame, face_detected)?;

        debug!(
            "🖼️ Visual features over {} frames: sharpness={:.1}, blockiness={:.2}, correlation={:?}, face={:?}",
            features.frame_count,
            features.mean_sharpness,
            features.mean_blockiness,
            features.mean_histogram_correlation,
            features.face_detected
        );
        Ok(Some(features))
    }

    /// 规则按表顺序独立累加；清晰度与相关度两组规则各自互斥
    pub fn score_features(&self, features: &VisualFeatureSet) -> ScoredResult {
        let mut score = 0.0;
        let mut reasons = Vec::new();

        for rule in VISUAL_RULES.iter() {
            if let Some(branch) = rule
                .iter()
                .find(|branch| (branch.fires)(features, &self.config))
            {
                score += branch.weight;
                reasons.push(branch.tag);
            }
        }

        let result = ScoredResult::from_rules(score, reasons, &self.thresholds);
        debug!(
            "🖼️ Visual scored {:.3} ({}), reasons: {:?}",
            result.score(),
            result.verdict(),
            result.reasons()
        );
        result
    }
}

impl Default for VisualScorer {
    fn default() -> Self {
        Self::new()
    }
}

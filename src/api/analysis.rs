//! 真伪分析入口

use log::info;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::core::aggregate::{self, AggregateReport, ModalityOutcome};
use crate::core::config::AnalysisConfig;
use crate::core::describe;
use crate::core::error::AnalysisError;
use crate::core::scan::{MediaItem, MediaKind, Scanner};
use crate::core::text::TextScorer;
use crate::core::verdict::{ScoredResult, Verdict};
use crate::core::visual::{FaceDetector, RasterFrame, VisualScorer};

/// 默认配置下的文本评分
pub fn score_text(text: &str) -> ScoredResult {
    TextScorer::new().score(text)
}

/// 默认配置下的视觉评分（无人脸检测能力）
pub fn score_visual(frames: &[RasterFrame]) -> Result<ScoredResult, AnalysisError> {
    VisualScorer::new().score(frames, None)
}

pub fn aggregate_modalities(
    text: Option<&ScoredResult>,
    visual: Option<&ScoredResult>,
) -> ModalityOutcome {
    aggregate::aggregate_modalities(text, visual)
}

pub fn aggregate_items(items: &[ScoredResult]) -> Verdict {
    aggregate::aggregate_items(items)
}

/// 分析器 - 持有配置、可选人脸检测能力与并行线程池
///
/// ```ignore
/// let analyzer = Analyzer::create()?;
/// let report = analyzer.scan(&[MediaItem::Text(article), MediaItem::Image(frame)])?;
/// println!("{} via {:?}", report.overall(), report.winning_modality());
/// ```
pub struct Analyzer {
    scanner: Scanner,
    pool: ThreadPool,
}

impl Analyzer {
    pub fn create() -> Result<Self, AnalysisError> {
        Self::with_config(AnalysisConfig::default())
    }

    pub fn with_config(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        let num_threads = num_cpus::get().min(4);
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| AnalysisError::ThreadPool(e.to_string()))?;

        info!("🔎 Analyzer: created with {} worker threads", num_threads);
        Ok(Self {
            scanner: Scanner::with_config(config),
            pool,
        })
    }

    pub fn with_face_detector(mut self, detector: Box<dyn FaceDetector>) -> Self {
        self.scanner.set_face_detector(detector);
        info!("🙂 Analyzer: face detection enabled");
        self
    }

    pub fn score_text(&self, text: &str) -> ScoredResult {
        self.scanner.score_text(text)
    }

    pub fn score_visual(&self, frames: &[RasterFrame]) -> Result<ScoredResult, AnalysisError> {
        self.scanner.score_frames(frames)
    }

    /// 一次扫描请求：并行评分后汇总
    pub fn scan(&self, items: &[MediaItem]) -> Result<AggregateReport, AnalysisError> {
        let report = self.pool.install(|| self.scanner.scan_parallel(items))?;
        info!(
            "📊 Scan finished: {} items, overall {} ({:?})",
            items.len(),
            report.overall(),
            report.winning_modality()
        );
        Ok(report)
    }

    pub fn describe(&self, result: &ScoredResult, kind: MediaKind) -> String {
        describe::describe(result, kind)
    }
}

impl Drop for Analyzer {
    fn drop(&mut self) {
        info!("🗑️ Analyzer: released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregate::Modality;
    use crate::core::config::VerdictThresholds;
    use crate::core::verdict::ReasonTag;
    use crate::core::visual::MockFaceDetector;

    const FORMAL_TEXT: &str = "Comprehensive organizational transformation, necessitates systematic \
        implementation methodologies. Strategic infrastructure optimization, facilitates sustainable \
        operational excellence, initiatives. Integrated stakeholder engagement frameworks, enable \
        measurable performance improvement outcomes.";

    fn create_test_frame(width: u32, height: u32, fill: u8) -> RasterFrame {
        RasterFrame::from_rgb(width, height, vec![fill; (width * height * 3) as usize])
    }

    #[test]
    fn test_score_text_short_is_none() {
        let result = score_text("Nothing much here.");
        assert_eq!(result.verdict(), Verdict::None);
        assert_eq!(result.score(), 0.0);
    }

    #[test]
    fn test_score_text_formal_passage() {
        let result = score_text(FORMAL_TEXT);
        assert!(result.has_reason(ReasonTag::LowStopwordRatioHighTokenComplexity));
        assert!(result.has_reason(ReasonTag::OverlyFormalRegister));
        assert_eq!(result.verdict(), Verdict::Red);
    }

    #[test]
    fn test_score_visual_empty_is_none() {
        let result = score_visual(&[]).unwrap();
        assert_eq!(result.reasons(), &[ReasonTag::NoVisualFramesDetected]);
    }

    #[test]
    fn test_entry_point_aggregation() {
        let t = VerdictThresholds::default();
        let red = ScoredResult::from_parts(Verdict::Red, 0.6, vec![ReasonTag::NoFaceDetected], &t)
            .unwrap();
        let yellow =
            ScoredResult::from_parts(Verdict::Yellow, 0.3, vec![ReasonTag::VeryStaticFrames], &t)
                .unwrap();
        let green = ScoredResult::from_parts(Verdict::Green, 0.0, vec![], &t).unwrap();

        assert_eq!(
            aggregate_items(&[green.clone(), red.clone(), yellow]),
            Verdict::Red
        );
        assert_eq!(
            aggregate_modalities(Some(&red), Some(&red)).winner,
            Some(Modality::Text)
        );
        assert_eq!(aggregate_modalities(Some(&green), None).overall, Verdict::Green);
    }

    #[test]
    fn test_analyzer_scan() {
        let analyzer = Analyzer::create()
            .unwrap()
            .with_face_detector(Box::new(MockFaceDetector::always(true)));

        let report = analyzer
            .scan(&[
                MediaItem::Text(FORMAL_TEXT.to_string()),
                MediaItem::Image(create_test_frame(120, 80, 30)),
            ])
            .unwrap();

        assert_eq!(report.overall(), Verdict::Red);
        assert_eq!(report.winning_modality(), Some(Modality::Text));
        let image = &report.per_item()[1].result;
        assert_eq!(image.reasons(), &[ReasonTag::LowDetailBlur]);
        assert_eq!(image.verdict(), Verdict::Yellow);
    }

    #[test]
    fn test_analyzer_describe() {
        let analyzer = Analyzer::create().unwrap();
        let result = analyzer.score_text("tiny");
        assert_eq!(analyzer.describe(&result, MediaKind::Text), "No text detected.");
    }
}

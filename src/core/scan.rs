//! 批量扫描：一次请求内对多个条目评分并汇总

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::slice;

use crate::core::aggregate::{AggregateReport, ItemReport};
use crate::core::config::AnalysisConfig;
use crate::core::error::AnalysisError;
use crate::core::text::TextScorer;
use crate::core::verdict::ScoredResult;
use crate::core::visual::{FaceDetector, RasterFrame, VideoClip, VisualScorer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Text,
    Image,
    Video,
}

/// 待分析的条目
#[derive(Debug, Clone)]
pub enum MediaItem {
    Text(String),
    Image(RasterFrame),
    Video(VideoClip),
}

impl MediaItem {
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaItem::Text(_) => MediaKind::Text,
            MediaItem::Image(_) => MediaKind::Image,
            MediaItem::Video(_) => MediaKind::Video,
        }
    }
}

pub struct Scanner {
    text: TextScorer,
    visual: VisualScorer,
    face_detector: Option<Box<dyn FaceDetector>>,
}

impl Scanner {
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            text: TextScorer::with_config(config.text, config.thresholds.clone()),
            visual: VisualScorer::with_config(config.visual, config.thresholds),
            face_detector: None,
        }
    }

    pub fn with_face_detector(mut self, detector: Box<dyn FaceDetector>) -> Self {
        self.set_face_detector(detector);
        self
    }

    pub fn set_face_detector(&mut self, detector: Box<dyn FaceDetector>) {
        self.face_detector = Some(detector);
    }

    pub fn has_face_detector(&self) -> bool {
        self.face_detector.is_some()
    }

    pub fn score_text(&self, text: &str) -> ScoredResult {
        self.text.score(text)
    }

    pub fn score_frames(&self, frames: &[RasterFrame]) -> Result<ScoredResult, AnalysisError> {
        self.visual.score(frames, self.face_detector.as_deref())
    }

    pub fn score_item(&self, index: usize, item: &MediaItem) -> Result<ItemReport, AnalysisError> {
        let (result, start_ms, end_ms) = match item {
            MediaItem::Text(text) => (self.score_text(text), None, None),
            MediaItem::Image(frame) => (self.score_frames(slice::from_ref(frame))?, None, None),
            MediaItem::Video(clip) => {
                clip.validate_window()?;
                (
                    self.score_frames(&clip.frames)?,
                    Some(clip.start_ms),
                    Some(clip.end_ms),
                )
            }
        };

        debug!(
            "🔍 Item {} ({:?}) -> {} ({:.3})",
            index,
            item.kind(),
            result.verdict(),
            result.score()
        );

        Ok(ItemReport {
            index,
            kind: item.kind(),
            start_ms,
            end_ms,
            result,
        })
    }

    /// 顺序扫描
    pub fn scan(&self, items: &[MediaItem]) -> Result<AggregateReport, AnalysisError> {
        let per_item = items
            .iter()
            .enumerate()
            .map(|(index, item)| self.score_item(index, item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AggregateReport::from_items(per_item))
    }

    /// 条目之间无数据依赖，并行评分；输出顺序与输入一致
    pub fn scan_parallel(&self, items: &[MediaItem]) -> Result<AggregateReport, AnalysisError> {
        let per_item = items
            .par_iter()
            .enumerate()
            .map(|(index, item)| self.score_item(index, item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AggregateReport::from_items(per_item))
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

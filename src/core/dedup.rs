//! 调用方持有的去重集合，生命周期跟随页面/会话

use image::imageops::{self, FilterType};
use log::debug;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use crate::core::error::AnalysisError;
use crate::core::visual::RasterFrame;

const HASH_SIDE: u32 = 8;

/// 内容标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKey {
    /// 来源字符串（如 URL）的哈希
    Source(u64),
    /// 8x8 灰度缩略图的均值哈希
    Perceptual(u64),
}

impl ContentKey {
    pub fn from_source(source: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        source.hash(&mut hasher);
        ContentKey::Source(hasher.finish())
    }

    pub fn from_frame(frame: &RasterFrame) -> Result<Self, AnalysisError> {
        let img = frame.to_rgb_image()?;
        let thumb = imageops::resize(&img, HASH_SIDE, HASH_SIDE, FilterType::Triangle);

        let gray: Vec<u32> = thumb
            .pixels()
            .map(|p| (p[0] as u32 * 299 + p[1] as u32 * 587 + p[2] as u32 * 114) / 1000)
            .collect();
        let mean = gray.iter().sum::<u32>() / gray.len() as u32;

        let hash = gray
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v > mean)
            .fold(0u64, |acc, (i, _)| acc | 1u64 << i);
        Ok(ContentKey::Perceptual(hash))
    }

    fn hamming_distance(a: u64, b: u64) -> u32 {
        (a ^ b).count_ones()
    }
}

pub struct MediaDeduplicator {
    seen: HashSet<ContentKey>,
    /// 感知哈希允许的最大汉明距离，0 表示只认完全相同
    perceptual_threshold: u32,
}

impl MediaDeduplicator {
    pub fn new() -> Self {
        Self::with_threshold(0)
    }

    pub fn with_threshold(perceptual_threshold: u32) -> Self {
        Self {
            seen: HashSet::new(),
            perceptual_threshold,
        }
    }

    pub fn contains(&self, key: &ContentKey) -> bool {
        if self.seen.contains(key) {
            return true;
        }
        match *key {
            ContentKey::Perceptual(hash) if self.perceptual_threshold > 0 => {
                self.seen.iter().any(|seen| match *seen {
                    ContentKey::Perceptual(prev) => {
                        ContentKey::hamming_distance(hash, prev) <= self.perceptual_threshold
                    }
                    ContentKey::Source(_) => false,
                })
            }
            _ => false,
        }
    }

    /// 未见过则记录并返回 true（应当处理）
    pub fn check_and_mark(&mut self, key: ContentKey) -> bool {
        if self.contains(&key) {
            debug!("♻️ Skipping already processed media: {:?}", key);
            return false;
        }
        self.seen.insert(key);
        true
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// 页面切换时清空
    pub fn clear(&mut self) {
        debug!("🧹 Clearing {} processed media keys", self.seen.len());
        self.seen.clear();
    }
}

impl Default for MediaDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}

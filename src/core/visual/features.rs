use serde::{Deserialize, Serialize};

use super::preprocess::PreparedFrame;
use crate::core::error::{ensure_finite, AnalysisError};

/// 每通道 3 bit，共 8*8*8 个联合 RGB 直方图桶
pub const HISTOGRAM_BINS: usize = 512;
const BLOCK_SIZE: usize = 8;

/// 单帧特征
#[derive(Debug, Clone)]
pub struct FrameFeatures {
    pub sharpness: f64,
    pub blockiness: f64,
    /// L2 归一化后的直方图
    pub histogram: [f64; HISTOGRAM_BINS],
}

impl FrameFeatures {
    pub fn extract(frame: &PreparedFrame) -> Result<Self, AnalysisError> {
        Ok(Self {
            sharpness: ensure_finite(laplacian_variance(frame), "sharpness")?,
            blockiness: ensure_finite(blockiness(frame), "blockiness")?,
            histogram: color_histogram(frame),
        })
    }
}

/// 一个条目（单图或一段视频）的聚合特征
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualFeatureSet {
    pub frame_count: usize,
    pub mean_sharpness: f64,
    pub mean_blockiness: f64,
    /// 少于 2 帧时无定义
    pub mean_histogram_correlation: Option<f64>,
    /// None = 没有可用的人脸检测能力
    pub face_detected: Option<bool>,
}

impl VisualFeatureSet {
    pub fn from_frames(
        frames: &[FrameFeatures],
        face_detected: Option<bool>,
    ) -> Result<Self, AnalysisError> {
        let n = frames.len().max(1) as f64;
        let mean_sharpness = frames.iter().map(|f| f.sharpness).sum::<f64>() / n;
        let mean_blockiness = frames.iter().map(|f| f.blockiness).sum::<f64>() / n;

        let mean_histogram_correlation = if frames.len() >= 2 {
            let pairs = frames.len() - 1;
            let total: f64 = frames
                .windows(2)
                .map(|w| histogram_correlation(&w[0].histogram, &w[1].histogram))
                .sum();
            Some(ensure_finite(total / pairs as f64, "histogram_correlation")?)
        } else {
            None
        };

        Ok(Self {
            frame_count: frames.len(),
            mean_sharpness: ensure_finite(mean_sharpness, "mean_sharpness")?,
            mean_blockiness: ensure_finite(mean_blockiness, "mean_blockiness")?,
            mean_histogram_correlation,
            face_detected,
        })
    }
}

/// 亮度平面与离散拉普拉斯核 [[0,1,0],[1,-4,1],[0,1,0]] 卷积（仅内部像素）后的方差
pub fn laplacian_variance(frame: &PreparedFrame) -> f64 {
    let w = frame.width;
    let h = frame.height;
    if w < 3 || h < 3 {
        return 0.0;
    }

    let luma = &frame.luma;
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    let mut count = 0usize;

    for y in 1..(h - 1) {
        for x in 1..(w - 1) {
            let idx = y * w + x;
            let response = luma[idx - w] + luma[idx + w] + luma[idx - 1] + luma[idx + 1]
                - 4.0 * luma[idx];
            sum += response;
            sum_sq += response * response;
            count += 1;
        }
    }

    let mean = sum / count as f64;
    (sum_sq / count as f64 - mean * mean).max(0.0)
}

/// 8 像素网格边界上的相邻像素差：三通道差值之和的均值再除以 3
pub fn blockiness(frame: &PreparedFrame) -> f64 {
    let w = frame.width;
    let h = frame.height;
    let mut total = 0u64;
    let mut samples = 0u64;

    let channel_diff = |a: [u8; 3], b: [u8; 3]| -> u64 {
        a.iter()
            .zip(b.iter())
            .map(|(&p, &q)| (p as i32 - q as i32).unsigned_abs() as u64)
            .sum()
    };

    // 垂直边界
    for x in (BLOCK_SIZE..w).step_by(BLOCK_SIZE) {
        for y in 0..h {
            total += channel_diff(frame.rgb_at(x, y), frame.rgb_at(x - 1, y));
            samples += 1;
        }
    }
    // 水平边界
    for y in (BLOCK_SIZE..h).step_by(BLOCK_SIZE) {
        for x in 0..w {
            total += channel_diff(frame.rgb_at(x, y), frame.rgb_at(x, y - 1));
            samples += 1;
        }
    }

    if samples == 0 {
        return 0.0;
    }
    total as f64 / samples as f64 / 3.0
}

/// 512 桶联合 RGB 直方图，L2 归一化
pub fn color_histogram(frame: &PreparedFrame) -> [f64; HISTOGRAM_BINS] {
    let mut hist = [0.0f64; HISTOGRAM_BINS];
    for px in frame.rgb.chunks_exact(3) {
        let idx = ((px[0] >> 5) as usize) << 6 | ((px[1] >> 5) as usize) << 3 | (px[2] >> 5) as usize;
        hist[idx] += 1.0;
    }

    let norm = hist.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        hist.iter_mut().for_each(|v| *v /= norm);
    }
    hist
}

/// 两个单位向量的点积，即余弦相似度
pub fn histogram_correlation(h1: &[f64; HISTOGRAM_BINS], h2: &[f64; HISTOGRAM_BINS]) -> f64 {
    h1.iter().zip(h2.iter()).map(|(a, b)| a * b).sum()
}

use image::imageops::{self, FilterType};

use super::frame::RasterFrame;
use crate::core::error::AnalysisError;

/// 降采样后的帧：RGB 三通道 + 亮度平面
#[derive(Debug, Clone)]
pub struct PreparedFrame {
    pub width: usize,
    pub height: usize,
    pub rgb: Vec<u8>,
    pub luma: Vec<f64>,
}

impl PreparedFrame {
    pub fn rgb_at(&self, x: usize, y: usize) -> [u8; 3] {
        let idx = (y * self.width + x) * 3;
        [self.rgb[idx], self.rgb[idx + 1], self.rgb[idx + 2]]
    }
}

/// 等比缩放到不超过 max_w x max_h，小图保持原尺寸
pub fn target_dimensions(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    let scale = (max_w as f64 / width as f64)
        .min(max_h as f64 / height as f64)
        .min(1.0);
    if scale >= 1.0 {
        return (width, height);
    }
    let w = ((width as f64 * scale).round() as u32).clamp(1, max_w);
    let h = ((height as f64 * scale).round() as u32).clamp(1, max_h);
    (w, h)
}

pub fn prepare(frame: &RasterFrame, max_w: u32, max_h: u32) -> Result<PreparedFrame, AnalysisError> {
    let img = frame.to_rgb_image()?;
    let (tw, th) = target_dimensions(frame.width, frame.height, max_w, max_h);
    let img = if (tw, th) == (frame.width, frame.height) {
        img
    } else {
        imageops::resize(&img, tw, th, FilterType::Triangle)
    };

    let rgb = img.into_raw();
    let luma = rgb
        .chunks_exact(3)
        .map(|px| 0.299 * px[0] as f64 + 0.587 * px[1] as f64 + 0.114 * px[2] as f64)
        .collect();

    Ok(PreparedFrame {
        width: tw as usize,
        height: th as usize,
        rgb,
        luma,
    })
}

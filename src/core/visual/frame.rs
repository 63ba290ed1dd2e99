use image::RgbImage;

use crate::core::error::AnalysisError;

/// 解码后的光栅帧，行优先存储，至少 3 通道（RGB），alpha 忽略
#[derive(Debug, Clone)]
pub struct RasterFrame {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub data: Vec<u8>,
}

impl RasterFrame {
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self::new(width, height, 3, data)
    }

    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self::new(width, height, 4, data)
    }

    /// 解码 PNG/JPEG/BMP 字节
    pub fn decode(bytes: &[u8]) -> Result<Self, AnalysisError> {
        let rgb = image::load_from_memory(bytes)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        Ok(Self::from_rgb(width, height, rgb.into_raw()))
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// 尺寸与像素数组长度必须一致
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.width == 0 || self.height == 0 {
            return Err(AnalysisError::EmptyFrame {
                width: self.width,
                height: self.height,
            });
        }
        if self.channels < 3 {
            return Err(AnalysisError::UnsupportedChannels(self.channels));
        }
        let expected = self.pixel_count() * self.channels as usize;
        if self.data.len() != expected {
            return Err(AnalysisError::MalformedFrame {
                width: self.width,
                height: self.height,
                channels: self.channels,
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    /// 去掉多余通道，转为 RGB 图像
    pub fn to_rgb_image(&self) -> Result<RgbImage, AnalysisError> {
        self.validate()?;
        let rgb: Vec<u8> = self
            .data
            .chunks_exact(self.channels as usize)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        RgbImage::from_raw(self.width, self.height, rgb).ok_or(AnalysisError::MalformedFrame {
            width: self.width,
            height: self.height,
            channels: 3,
            expected: self.pixel_count() * 3,
            actual: self.data.len() / self.channels as usize * 3,
        })
    }
}

/// 从一段视频采样得到的帧序列
#[derive(Debug, Clone)]
pub struct VideoClip {
    pub frames: Vec<RasterFrame>,
    pub start_ms: u64,
    pub end_ms: u64,
}

impl VideoClip {
    pub fn new(frames: Vec<RasterFrame>, start_ms: u64, end_ms: u64) -> Result<Self, AnalysisError> {
        let clip = Self {
            frames,
            start_ms,
            end_ms,
        };
        clip.validate_window()?;
        Ok(clip)
    }

    pub fn validate_window(&self) -> Result<(), AnalysisError> {
        if self.end_ms < self.start_ms {
            return Err(AnalysisError::InvalidTimestamps {
                start_ms: self.start_ms,
                end_ms: self.end_ms,
            });
        }
        Ok(())
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }
}

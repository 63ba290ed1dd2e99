use super::frame::RasterFrame;

/// 平台提供的人脸检测能力（可选）
///
/// 评分器只在首帧上调用一次；没有注入检测器时人脸信号视为未知，对应规则跳过。
pub trait FaceDetector: Send + Sync {
    /// 至少检测到一张人脸时返回 true
    fn detect(&self, frame: &RasterFrame) -> bool;
}

pub struct MockFaceDetector {
    pattern: Box<dyn Fn(&RasterFrame) -> bool + Send + Sync>,
}

impl MockFaceDetector {
    pub fn always(found: bool) -> Self {
        Self {
            pattern: Box::new(move |_| found),
        }
    }

    pub fn with_pattern<F>(pattern: F) -> Self
    where
        F: Fn(&RasterFrame) -> bool + Send + Sync + 'static,
    {
        Self {
            pattern: Box::new(pattern),
        }
    }
}

impl FaceDetector for MockFaceDetector {
    fn detect(&self, frame: &RasterFrame) -> bool {
        (self.pattern)(frame)
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Frame is empty: {width}x{height}")]
    EmptyFrame { width: u32, height: u32 },
    #[error("Unsupported channel count: {0} (need at least 3)")]
    UnsupportedChannels(u8),
    #[error(
        "Malformed frame {width}x{height}x{channels}: expected {expected} bytes, got {actual}"
    )]
    MalformedFrame {
        width: u32,
        height: u32,
        channels: u8,
        expected: usize,
        actual: usize,
    },
    #[error("Non-finite value in statistic: {0}")]
    NonFiniteStatistic(&'static str),
    #[error("Invalid clip window: start {start_ms}ms is after end {end_ms}ms")]
    InvalidTimestamps { start_ms: u64, end_ms: u64 },
    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Inconsistent scored result: {0}")]
    InvalidResult(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

/// 统计量有限性检查，NaN/inf 直接拒绝
pub(crate) fn ensure_finite(value: f64, name: &'static str) -> Result<f64, AnalysisError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalysisError::NonFiniteStatistic(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite(1.5, "x").unwrap(), 1.5);
        assert!(matches!(
            ensure_finite(f64::NAN, "sharpness"),
            Err(AnalysisError::NonFiniteStatistic("sharpness"))
        ));
        assert!(ensure_finite(f64::INFINITY, "x").is_err());
    }

    #[test]
    fn test_error_display() {
        let err = AnalysisError::MalformedFrame {
            width: 2,
            height: 2,
            channels: 3,
            expected: 12,
            actual: 10,
        };
        assert_eq!(
            err.to_string(),
            "Malformed frame 2x2x3: expected 12 bytes, got 10"
        );
    }
}

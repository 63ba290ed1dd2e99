use crate::core::scan::MediaKind;
use crate::core::verdict::{ReasonTag, ScoredResult, Verdict};

/// 展示用置信度百分比
///
/// score 衡量的是"合成"程度，green 判定展示的是"真实"置信度，所以取反。
pub fn display_confidence(result: &ScoredResult) -> u8 {
    let pct = (result.score().clamp(0.0, 1.0) * 100.0).round() as u8;
    match result.verdict() {
        Verdict::Green => 100 - pct,
        _ => pct,
    }
}

fn content_name(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "image",
        MediaKind::Video => "video",
        MediaKind::Text => "content",
    }
}

fn reason_phrase(tag: ReasonTag) -> &'static str {
    match tag {
        ReasonTag::NoTextDetected => "no text",
        ReasonTag::NoVisualFramesDetected => "no frames",
        ReasonTag::UniformSentenceLengths => "uniform sentence lengths",
        ReasonTag::LowStopwordRatioHighTokenComplexity => "dense, complex vocabulary",
        ReasonTag::RepetitivePhrasing => "repetitive phrasing",
        ReasonTag::HeavyStructuringPunctuation => "heavy structuring punctuation",
        ReasonTag::LowLexicalDiversity => "low lexical diversity",
        ReasonTag::OverlyFormalRegister => "overly formal register",
        ReasonTag::NoFaceDetected => "no face detected",
        ReasonTag::LowDetailBlur => "low detail or blur",
        ReasonTag::ExtremeSharpness => "unnaturally sharp detail",
        ReasonTag::VeryStaticFrames => "nearly identical frames",
        ReasonTag::FrameNoiseInconsistency => "inconsistent frame noise",
        ReasonTag::JpegBlockiness => "compression blockiness",
    }
}

/// 按判定档位生成确定性的说明文字；red/yellow 附上命中的规则
pub fn describe(result: &ScoredResult, kind: MediaKind) -> String {
    let summary = summarize(result, kind);
    match result.verdict() {
        Verdict::Red | Verdict::Yellow if !result.reasons().is_empty() => {
            let signals: Vec<&str> = result.reasons().iter().map(|t| reason_phrase(*t)).collect();
            format!("{} Signals: {}.", summary, signals.join("; "))
        }
        _ => summary,
    }
}

fn summarize(result: &ScoredResult, kind: MediaKind) -> String {
    let name = content_name(kind);
    let synthetic = result.score().clamp(0.0, 1.0);
    let pct = display_confidence(result);

    match result.verdict() {
        Verdict::None => match kind {
            MediaKind::Text => "No text detected.".to_string(),
            _ => "No visual frames detected.".to_string(),
        },
        Verdict::Red if synthetic >= 0.8 => format!(
            "Strong AI signatures detected in this {}. Analysis shows {}% certainty of synthetic generation.",
            name, pct
        ),
        Verdict::Red if synthetic >= 0.6 => format!(
            "This {} likely contains AI-generated elements with {}% confidence.",
            name, pct
        ),
        Verdict::Red => format!(
            "Possible AI generation detected, though confidence is moderate at {}%.",
            pct
        ),
        Verdict::Yellow => format!(
            "This {} shows mixed characteristics - could be AI-assisted, edited, or hybrid content.",
            name
        ),
        Verdict::Green if 1.0 - synthetic >= 0.8 => format!(
            "This {} appears authentically human-created with {}% confidence.",
            name, pct
        ),
        Verdict::Green if 1.0 - synthetic >= 0.6 => {
            format!("This {} likely authentic with {}% confidence.", name, pct)
        }
        Verdict::Green => format!(
            "Likely authentic, though analysis confidence is moderate at {}%.",
            pct
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::VerdictThresholds;

    fn result(verdict: Verdict, score: f64, reasons: Vec<ReasonTag>) -> ScoredResult {
        ScoredResult::from_parts(verdict, score, reasons, &VerdictThresholds::default()).unwrap()
    }

    #[test]
    fn test_green_confidence_is_inverted() {
        let green = result(Verdict::Green, 0.16, vec![ReasonTag::OverlyFormalRegister]);
        assert_eq!(display_confidence(&green), 84);

        let red = result(Verdict::Red, 0.62, vec![ReasonTag::LowDetailBlur]);
        assert_eq!(display_confidence(&red), 62);

        let over = result(Verdict::Red, 1.28, vec![ReasonTag::UniformSentenceLengths]);
        assert_eq!(display_confidence(&over), 100);
    }

    #[test]
    fn test_describe_bands() {
        let strong = result(Verdict::Red, 0.94, vec![ReasonTag::NoFaceDetected]);
        assert!(describe(&strong, MediaKind::Image).starts_with("Strong AI signatures"));

        let likely = result(Verdict::Red, 0.62, vec![ReasonTag::LowDetailBlur]);
        assert!(describe(&likely, MediaKind::Video).contains("video likely contains"));

        let mixed = result(Verdict::Yellow, 0.3, vec![ReasonTag::VeryStaticFrames]);
        assert!(describe(&mixed, MediaKind::Text).contains("mixed characteristics"));

        let human = result(Verdict::Green, 0.0, vec![]);
        assert_eq!(
            describe(&human, MediaKind::Image),
            "This image appears authentically human-created with 100% confidence."
        );
    }

    #[test]
    fn test_describe_none() {
        let none = ScoredResult::none(ReasonTag::NoTextDetected);
        assert_eq!(describe(&none, MediaKind::Text), "No text detected.");
    }

    #[test]
    fn test_describe_is_deterministic() {
        let red = result(Verdict::Red, 0.55, vec![ReasonTag::JpegBlockiness]);
        assert_eq!(describe(&red, MediaKind::Image), describe(&red, MediaKind::Image));
    }

    #[test]
    fn test_describe_lists_fired_rules() {
        let red = result(
            Verdict::Red,
            0.62,
            vec![ReasonTag::LowDetailBlur, ReasonTag::VeryStaticFrames],
        );
        assert_eq!(
            describe(&red, MediaKind::Video),
            "This video likely contains AI-generated elements with 62% confidence. \
             Signals: low detail or blur; nearly identical frames."
        );

        let yellow = result(Verdict::Yellow, 0.3, vec![ReasonTag::VeryStaticFrames]);
        assert!(describe(&yellow, MediaKind::Image).ends_with("Signals: nearly identical frames."));

        let green = result(Verdict::Green, 0.16, vec![ReasonTag::OverlyFormalRegister]);
        assert!(!describe(&green, MediaKind::Text).contains("Signals"));
    }
}

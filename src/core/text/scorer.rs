use log::{debug, warn};

use super::features::TextFeatures;
use crate::core::config::{TextConfig, VerdictThresholds};
use crate::core::verdict::{ReasonTag, ScoredResult};

/// 单条文本规则：条件成立时加权并记录标签
struct TextRule {
    tag: ReasonTag,
    weight: f64,
    fires: fn(&TextFeatures, &TextConfig) -> bool,
}

/// 顺序即标签输出顺序
const TEXT_RULES: [TextRule; 6] = [
    TextRule {
        tag: ReasonTag::UniformSentenceLengths,
        weight: 0.32,
        fires: |f, c| {
            f.sentence_len_coeff_var < c.uniform_coeff_var_below
                && f.avg_sentence_len_words > c.uniform_avg_sentence_len_above
        },
    },
    TextRule {
        tag: ReasonTag::LowStopwordRatioHighTokenComplexity,
        weight: 0.32,
        fires: |f, c| {
            f.avg_word_len > c.complex_avg_word_len_above
                && f.stopword_ratio < c.complex_stopword_ratio_below
        },
    },
    TextRule {
        tag: ReasonTag::RepetitivePhrasing,
        weight: 0.22,
        fires: |f, c| f.max_trigram_repeat_ratio > c.trigram_repeat_ratio_above,
    },
    TextRule {
        tag: ReasonTag::HeavyStructuringPunctuation,
        weight: 0.14,
        fires: |f, c| f.structural_punct_ratio > c.structural_punct_ratio_above,
    },
    TextRule {
        tag: ReasonTag::LowLexicalDiversity,
        weight: 0.12,
        fires: |f, c| f.type_token_ratio < c.type_token_ratio_below,
    },
    TextRule {
        tag: ReasonTag::OverlyFormalRegister,
        weight: 0.16,
        fires: |f, _| !f.has_informal_markers,
    },
];

pub struct TextScorer {
    config: TextConfig,
    thresholds: VerdictThresholds,
}

impl TextScorer {
    pub fn new() -> Self {
        Self::with_config(TextConfig::default(), VerdictThresholds::default())
    }

    pub fn with_config(config: TextConfig, thresholds: VerdictThresholds) -> Self {
        Self { config, thresholds }
    }

    pub fn score(&self, text: &str) -> ScoredResult {
        let text = self.truncate(text);
        match TextFeatures::extract(text, self.config.min_chars) {
            Some(features) => self.score_features(&features),
            None => ScoredResult::none(ReasonTag::NoTextDetected),
        }
    }

    /// 纯函数：特征 -> 结果
    pub fn score_features(&self, features: &TextFeatures) -> ScoredResult {
        let mut score = 0.0;
        let mut reasons = Vec::new();

        for rule in TEXT_RULES.iter() {
            if (rule.fires)(features, &self.config) {
                score += rule.weight;
                reasons.push(rule.tag);
            }
        }

        let result = ScoredResult::from_rules(score, reasons, &self.thresholds);
        debug!(
            "📝 Text scored {:.3} ({}) from {} words, reasons: {:?}",
            result.score(),
            result.verdict(),
            features.word_count,
            result.reasons()
        );
        result
    }

    fn truncate<'a>(&self, text: &'a str) -> &'a str {
        match text.char_indices().nth(self.config.max_chars) {
            Some((byte_idx, _)) => {
                warn!(
                    "✂️ Text exceeds {} chars, truncating before scoring",
                    self.config.max_chars
                );
                &text[..byte_idx]
            }
            None => text,
        }
    }
}

impl Default for TextScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::verdict::Verdict;

    fn neutral_features() -> TextFeatures {
        TextFeatures {
            sentence_count: 10,
            word_count: 150,
            avg_sentence_len_words: 15.0,
            sentence_len_coeff_var: 0.5,
            avg_word_len: 4.5,
            stopword_ratio: 0.45,
            max_trigram_repeat_ratio: 0.01,
            structural_punct_ratio: 0.005,
            type_token_ratio: 0.6,
            has_informal_markers: true,
        }
    }

    #[test]
    fn test_human_like_features_are_green() {
        let result = TextScorer::new().score_features(&neutral_features());
        assert_eq!(result.verdict(), Verdict::Green);
        assert_eq!(result.score(), 0.0);
        assert!(result.reasons().is_empty());
    }

    #[test]
    fn test_uniform_complex_passage_is_red() {
        let features = TextFeatures {
            sentence_count: 9,
            word_count: 200,
            avg_sentence_len_words: 22.0,
            sentence_len_coeff_var: 0.10,
            avg_word_len: 6.1,
            stopword_ratio: 0.20,
            ..neutral_features()
        };
        let result = TextScorer::new().score_features(&features);
        assert_eq!(
            &result.reasons()[..2],
            &[
                ReasonTag::UniformSentenceLengths,
                ReasonTag::LowStopwordRatioHighTokenComplexity
            ]
        );
        assert!(result.score() >= 0.64);
        assert_eq!(result.verdict(), Verdict::Red);
    }

    #[test]
    fn test_all_rules_fire_in_table_order() {
        let features = TextFeatures {
            avg_sentence_len_words: 20.0,
            sentence_len_coeff_var: 0.05,
            avg_word_len: 7.0,
            stopword_ratio: 0.1,
            max_trigram_repeat_ratio: 0.2,
            structural_punct_ratio: 0.05,
            type_token_ratio: 0.2,
            has_informal_markers: false,
            ..neutral_features()
        };
        let result = TextScorer::new().score_features(&features);
        assert_eq!(
            result.reasons(),
            &[
                ReasonTag::UniformSentenceLengths,
                ReasonTag::LowStopwordRatioHighTokenComplexity,
                ReasonTag::RepetitivePhrasing,
                ReasonTag::HeavyStructuringPunctuation,
                ReasonTag::LowLexicalDiversity,
                ReasonTag::OverlyFormalRegister,
            ]
        );
        assert_eq!(result.score(), 1.28);
    }

    #[test]
    fn test_formal_register_alone_is_green() {
        let features = TextFeatures {
            has_informal_markers: false,
            ..neutral_features()
        };
        let result = TextScorer::new().score_features(&features);
        assert_eq!(result.score(), 0.16);
        assert_eq!(result.verdict(), Verdict::Green);
        assert_eq!(result.reasons(), &[ReasonTag::OverlyFormalRegister]);
    }

    #[test]
    fn test_yellow_band() {
        let features = TextFeatures {
            has_informal_markers: false,
            type_token_ratio: 0.3,
            ..neutral_features()
        };
        let result = TextScorer::new().score_features(&features);
        assert_eq!(result.score(), 0.28);
        assert_eq!(result.verdict(), Verdict::Yellow);
    }

    #[test]
    fn test_short_text_is_none() {
        let result = TextScorer::new().score("   Too short to judge.   ");
        assert_eq!(result.verdict(), Verdict::None);
        assert_eq!(result.score(), 0.0);
        assert_eq!(result.reasons(), &[ReasonTag::NoTextDetected]);
    }

    #[test]
    fn test_eighty_chars_is_scored() {
        let scorer = TextScorer::new();
        let at_floor = format!("  {}.  ", "y".repeat(79));
        assert_ne!(scorer.score(&at_floor).verdict(), Verdict::None);

        let below = format!("  {}.  ", "y".repeat(78));
        assert_eq!(scorer.score(&below).reasons(), &[ReasonTag::NoTextDetected]);
    }

    #[test]
    fn test_score_text_end_to_end() {
        let text = "Honestly I don't know what happened last night. We went out, got pizza, \
                    and then my phone died! Maybe I left the charger at Sam's place? Who knows.";
        let result = TextScorer::new().score(text);
        assert_ne!(result.verdict(), Verdict::None);
        assert!(!result.has_reason(ReasonTag::OverlyFormalRegister));
        assert!(result.score() >= 0.0 && result.score() <= 1.3);
    }

    #[test]
    fn test_score_is_idempotent() {
        let text = "The platform leverages advanced optimization methodologies. \
                    The platform leverages advanced optimization methodologies. \
                    Comprehensive integration facilitates organizational transformation.";
        let scorer = TextScorer::new();
        assert_eq!(scorer.score(text), scorer.score(text));
    }

    #[test]
    fn test_truncation_caps_input() {
        let config = TextConfig {
            max_chars: 100,
            ..Default::default()
        };
        let scorer = TextScorer::with_config(config, VerdictThresholds::default());
        let long = "word ".repeat(1000);
        assert_eq!(scorer.truncate(&long).chars().count(), 100);
        assert_eq!(scorer.truncate("short"), "short");
    }
}

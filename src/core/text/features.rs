use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::lexicon::{has_informal_markers, is_stopword};

const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];
const STRUCTURAL_PUNCT: [char; 8] = [',', ':', ';', '(', ')', '-', '–', '—'];

/// 文本统计特征，由输入确定性导出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFeatures {
    pub sentence_count: usize,
    pub word_count: usize,
    pub avg_sentence_len_words: f64,
    pub sentence_len_coeff_var: f64,
    pub avg_word_len: f64,
    pub stopword_ratio: f64,
    pub max_trigram_repeat_ratio: f64,
    pub structural_punct_ratio: f64,
    pub type_token_ratio: f64,
    pub has_informal_markers: bool,
}

impl TextFeatures {
    /// 提取文本特征
    ///
    /// 去掉首尾空白后少于 `min_chars` 个字符、或切分后没有句子/单词时返回 `None`，
    /// 调用方按 "no text detected" 处理。
    pub fn extract(text: &str, min_chars: usize) -> Option<Self> {
        if text.trim().chars().count() < min_chars {
            return None;
        }

        let normalized = normalize(text);
        let sentences = split_sentences(&normalized);
        if sentences.is_empty() {
            return None;
        }

        let words: Vec<String> = tokenize(&normalized)
            .into_iter()
            .map(|w| w.to_lowercase())
            .collect();
        if words.is_empty() {
            return None;
        }

        let sentence_lens: Vec<f64> = sentences
            .iter()
            .map(|s| tokenize(s).len() as f64)
            .collect();
        let (avg_sentence_len_words, sentence_len_coeff_var) = mean_and_coeff_var(&sentence_lens);

        let word_count = words.len();
        let total_word_chars: usize = words.iter().map(|w| w.chars().count()).sum();
        let stopwords = words.iter().filter(|w| is_stopword(w)).count();
        let distinct: HashSet<&str> = words.iter().map(String::as_str).collect();

        let total_chars = normalized.chars().count();
        let punct = normalized
            .chars()
            .filter(|c| STRUCTURAL_PUNCT.contains(c))
            .count();

        Some(Self {
            sentence_count: sentences.len(),
            word_count,
            avg_sentence_len_words,
            sentence_len_coeff_var,
            avg_word_len: total_word_chars as f64 / word_count as f64,
            stopword_ratio: stopwords as f64 / word_count as f64,
            max_trigram_repeat_ratio: max_trigram_repeat_ratio(&words),
            structural_punct_ratio: punct as f64 / total_chars as f64,
            type_token_ratio: distinct.len() as f64 / word_count as f64,
            has_informal_markers: has_informal_markers(&normalized.to_lowercase()),
        })
    }
}

/// 合并空白并统一弯引号
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace('\u{2019}', "'")
}

fn split_sentences(text: &str) -> Vec<&str> {
    text.split(SENTENCE_TERMINATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// 单词 = 字母与撇号的最长连续段（至少含一个字母）
fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphabetic() || c == '\''))
        .filter(|w| w.chars().any(char::is_alphabetic))
        .collect()
}

/// 均值与变异系数（总体标准差 / 均值）
fn mean_and_coeff_var(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if mean <= 0.0 {
        return (mean, 0.0);
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt() / mean)
}

fn max_trigram_repeat_ratio(words: &[String]) -> f64 {
    if words.len() < 3 {
        return 0.0;
    }
    let mut counts: HashMap<(&str, &str, &str), usize> = HashMap::new();
    for window in words.windows(3) {
        *counts
            .entry((window[0].as_str(), window[1].as_str(), window[2].as_str()))
            .or_insert(0) += 1;
    }
    let total = words.len() - 2;
    let max = counts.values().copied().max().unwrap_or(0);
    max as f64 / total as f64
}

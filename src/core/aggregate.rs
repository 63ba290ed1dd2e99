use serde::{Deserialize, Serialize};

use crate::core::scan::MediaKind;
use crate::core::verdict::{ScoredResult, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Visual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalityOutcome {
    pub overall: Verdict,
    /// 总体为 none 时没有胜出模态
    pub winner: Option<Modality>,
}

/// 跨模态合并：严重者胜出，平局偏向文本
pub fn aggregate_modalities(
    text: Option<&ScoredResult>,
    visual: Option<&ScoredResult>,
) -> ModalityOutcome {
    let text_verdict = text.map(ScoredResult::verdict).unwrap_or_default();
    let visual_verdict = visual.map(ScoredResult::verdict).unwrap_or_default();

    let (overall, winner) = if text_verdict.rank() >= visual_verdict.rank() {
        (text_verdict, Modality::Text)
    } else {
        (visual_verdict, Modality::Visual)
    };

    ModalityOutcome {
        overall,
        winner: (overall != Verdict::None).then_some(winner),
    }
}

/// 跨条目合并：严重程度取最大，与数量和顺序无关
pub fn aggregate_items(items: &[ScoredResult]) -> Verdict {
    items
        .iter()
        .map(ScoredResult::verdict)
        .max()
        .unwrap_or(Verdict::None)
}

/// 选出最严重的结果；同档比分数，再同则取最早的
fn severest<'a>(results: impl Iterator<Item = &'a ScoredResult>) -> Option<&'a ScoredResult> {
    let mut best: Option<&'a ScoredResult> = None;
    for candidate in results {
        let replace = match best {
            Some(b) => (candidate.verdict(), candidate.score()) > (b.verdict(), b.score()),
            None => true,
        };
        if replace {
            best = Some(candidate);
        }
    }
    best
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReport {
    pub index: usize,
    pub kind: MediaKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_ms: Option<u64>,
    pub result: ScoredResult,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerModality {
    pub text: Option<ScoredResult>,
    pub visual: Option<ScoredResult>,
}

/// 单次扫描的汇总报告，构造后只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    overall: Verdict,
    winning_modality: Option<Modality>,
    item_verdict: Verdict,
    per_modality: PerModality,
    per_item: Vec<ItemReport>,
}

impl AggregateReport {
    pub fn from_items(per_item: Vec<ItemReport>) -> Self {
        let text = severest(
            per_item
                .iter()
                .filter(|item| item.kind == MediaKind::Text)
                .map(|item| &item.result),
        )
        .cloned();
        let visual = severest(
            per_item
                .iter()
                .filter(|item| item.kind != MediaKind::Text)
                .map(|item| &item.result),
        )
        .cloned();

        let outcome = aggregate_modalities(text.as_ref(), visual.as_ref());
        let results: Vec<ScoredResult> = per_item.iter().map(|item| item.result.clone()).collect();
        let item_verdict = aggregate_items(&results);
        debug_assert!(outcome.overall >= item_verdict);

        Self {
            overall: outcome.overall,
            winning_modality: outcome.winner,
            item_verdict,
            per_modality: PerModality { text, visual },
            per_item,
        }
    }

    pub fn overall(&self) -> Verdict {
        self.overall
    }

    pub fn winning_modality(&self) -> Option<Modality> {
        self.winning_modality
    }

    pub fn item_verdict(&self) -> Verdict {
        self.item_verdict
    }

    pub fn per_modality(&self) -> &PerModality {
        &self.per_modality
    }

    pub fn per_item(&self) -> &[ItemReport] {
        &self.per_item
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

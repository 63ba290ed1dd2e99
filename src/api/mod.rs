pub mod analysis;

pub use analysis::{aggregate_items, aggregate_modalities, score_text, score_visual, Analyzer};

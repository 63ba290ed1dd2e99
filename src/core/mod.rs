pub mod aggregate;
pub mod config;
pub mod dedup;
pub mod describe;
pub mod error;
pub mod scan;
pub mod text;
pub mod verdict;
pub mod visual;

pub use aggregate::{
    aggregate_items, aggregate_modalities, AggregateReport, ItemReport, Modality, ModalityOutcome,
};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use scan::{MediaItem, MediaKind, Scanner};
pub use verdict::{ReasonTag, ScoredResult, Verdict};

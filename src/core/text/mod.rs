pub mod features;
pub mod lexicon;
pub mod scorer;

pub use features::TextFeatures;
pub use scorer::TextScorer;

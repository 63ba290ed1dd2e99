pub mod face;
pub mod features;
pub mod frame;
pub mod preprocess;
pub mod scorer;

pub use face::{FaceDetector, MockFaceDetector};
pub use features::{FrameFeatures, VisualFeatureSet};
pub use frame::{RasterFrame, VideoClip};
pub use preprocess::PreparedFrame;
pub use scorer::VisualScorer;

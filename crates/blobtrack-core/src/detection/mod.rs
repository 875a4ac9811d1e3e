pub mod config;
pub mod moments;
pub mod morphology;
pub mod threshold;

pub use config::ThresholdWindow;
pub use moments::{locate_blob, mask_moments, BlobEstimate, Moments};
pub use morphology::clean_mask;
pub use threshold::in_range;

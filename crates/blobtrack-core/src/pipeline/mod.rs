pub mod config;
mod transform;

pub use config::PlaybackConfig;
pub use transform::{FrameAnalysis, FrameTransformer};

pub mod image_io;
pub mod ser;
pub mod source;
#[cfg(feature = "video")]
pub mod video;

pub use source::{
    open_source, open_source_or_unopened, ImageSequenceSource, SerSource, UnopenedSource,
    VideoSource,
};
#[cfg(feature = "video")]
pub use video::DecodedVideoSource;

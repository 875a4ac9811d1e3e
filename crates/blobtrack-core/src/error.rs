use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlobTrackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid SER file: {0}")]
    InvalidSer(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Frame index {index} out of range (total: {total})")]
    FrameIndexOutOfRange { index: usize, total: usize },

    #[error("Unsupported video format: {0}")]
    UnsupportedFormat(String),

    #[error("{0} is a video container; rebuild with the `video` feature to decode it")]
    DecoderUnavailable(String),

    #[error("Video decoder error: {0}")]
    Decoder(String),

    #[cfg(feature = "video")]
    #[error("OpenCV error: {0}")]
    OpenCv(#[from] opencv::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("No frames found in {0}")]
    EmptySequence(String),

    #[error("Invalid playback config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, BlobTrackError>;

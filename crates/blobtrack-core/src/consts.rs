/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Upper bound of the 8-bit hue channel (degrees / 2).
pub const HUE_MAX: u8 = 180;

/// Upper bound of the saturation and value channels.
pub const CHANNEL_MAX: u8 = 255;

/// Upper bound of the transform-intensity (morphology iteration) slider.
pub const ITERATIONS_MAX: u8 = 20;

/// Reset values for the threshold window.
pub const DEFAULT_HUE_LOW: u8 = 118;
pub const DEFAULT_HUE_HIGH: u8 = 180;
pub const DEFAULT_SAT_LOW: u8 = 145;
pub const DEFAULT_SAT_HIGH: u8 = 255;
pub const DEFAULT_VAL_LOW: u8 = 75;
pub const DEFAULT_VAL_HIGH: u8 = 255;
pub const DEFAULT_ITERATIONS: u8 = 5;

/// Mask value of an "on" pixel when moments are taken over an 8-bit mask.
pub const MASK_ON_VALUE: f64 = 255.0;

/// Side length of the square structuring element used for mask cleanup.
pub const DEFAULT_KERNEL_SIZE: usize = 5;

/// Delay between frames while playing.
pub const DEFAULT_FRAME_DELAY_MS: u64 = 15;

/// How long a pause lasts before playback resumes on its own (15 s).
pub const DEFAULT_PAUSE_TIMEOUT_MS: u64 = 15_000;

/// Marker color in RGB.
pub const DEFAULT_MARKER_COLOR: [u8; 3] = [255, 0, 0];

/// Outline thickness of the square drawn around the blob.
pub const DEFAULT_MARKER_THICKNESS: u32 = 2;

/// Bottom edge (y) of the offset bar drawn from the frame center.
pub const DEFAULT_BAR_HEIGHT: u32 = 5;

/// Size of the SER file header in bytes.
pub const SER_HEADER_SIZE: usize = 178;

/// File extensions accepted as frames of an image sequence.
pub const IMAGE_SEQUENCE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff"];

/// File extensions routed to the video container decoder.
pub const VIDEO_CONTAINER_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "m4v", "webm", "mpg", "mpeg", "wmv"];

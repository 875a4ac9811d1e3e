pub mod hsv;

pub use hsv::{frame_to_hsv, rgb_to_hsv};

use std::path::PathBuf;

use image::RgbImage;
use ndarray::{Array2, Array3};

/// Binary mask: `true` where a pixel matched the threshold window.
pub type Mask = Array2<bool>;

/// A single 8-bit RGB video frame.
#[derive(Clone, Debug)]
pub struct ColorFrame {
    /// Pixel data, row-major, shape = (height, width, 3), channels in R, G, B order.
    pub data: Array3<u8>,
    pub metadata: FrameMetadata,
}

impl ColorFrame {
    pub fn new(data: Array3<u8>) -> Self {
        Self {
            data,
            metadata: FrameMetadata::default(),
        }
    }

    /// A frame where every pixel has the same color.
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Self {
        let data = Array3::from_shape_fn((height, width, 3), |(_, _, c)| rgb[c]);
        Self::new(data)
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        [
            self.data[[row, col, 0]],
            self.data[[row, col, 1]],
            self.data[[row, col, 2]],
        ]
    }

    pub fn set_pixel(&mut self, row: usize, col: usize, rgb: [u8; 3]) {
        for (c, v) in rgb.into_iter().enumerate() {
            self.data[[row, col, c]] = v;
        }
    }

    pub fn from_rgb_image(img: &RgbImage) -> Self {
        let (w, h) = img.dimensions();
        let data = Array3::from_shape_fn((h as usize, w as usize, 3), |(row, col, c)| {
            img.get_pixel(col as u32, row as u32).0[c]
        });
        Self::new(data)
    }
}

#[derive(Clone, Debug, Default)]
pub struct FrameMetadata {
    pub frame_index: usize,
    pub timestamp_us: Option<u64>,
}

/// Color mode of the source data.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorMode {
    Mono,
    BayerRGGB,
    BayerGRBG,
    BayerGBRG,
    BayerBGGR,
    RGB,
    BGR,
}

/// Metadata about an opened video source.
#[derive(Clone, Debug)]
pub struct SourceInfo {
    pub filename: PathBuf,
    pub total_frames: usize,
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_mode: ColorMode,
    pub observer: Option<String>,
    pub telescope: Option<String>,
    pub instrument: Option<String>,
}

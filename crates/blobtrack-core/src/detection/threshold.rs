use ndarray::{Array2, Array3};

use crate::frame::Mask;

use super::config::ThresholdWindow;

/// Build a binary mask selecting pixels of an HSV image whose three channels
/// all fall within the window's inclusive bounds.
pub fn in_range(hsv: &Array3<u8>, window: &ThresholdWindow) -> Mask {
    let (h, w, _) = hsv.dim();
    Array2::from_shape_fn((h, w), |(row, col)| {
        window.contains([hsv[[row, col, 0]], hsv[[row, col, 1]], hsv[[row, col, 2]]])
    })
}

//! Raw image moments of a binary mask and the blob estimate derived from them.
//!
//! The mask is weighted like an 8-bit image (on = 255) so `m00 / 255` is the
//! pixel count. All matching pixels contribute, connected or not; the result is
//! the area-weighted center of everything that passed the threshold.

use rayon::prelude::*;

use crate::consts::{MASK_ON_VALUE, PARALLEL_PIXEL_THRESHOLD};
use crate::frame::Mask;

/// Zeroth and first-order raw moments.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

/// Area, centroid and equivalent-circle radius of the masked region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlobEstimate {
    /// Number of on pixels.
    pub area: u64,
    pub centroid_x: i64,
    pub centroid_y: i64,
    /// `floor(sqrt(area / pi))`.
    pub radius: i64,
}

impl BlobEstimate {
    pub fn is_empty(&self) -> bool {
        self.area == 0
    }
}

/// Compute the raw moments of a mask.
pub fn mask_moments(mask: &Mask) -> Moments {
    let (h, w) = mask.dim();
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        mask_moments_parallel(mask, h, w)
    } else {
        mask_moments_sequential(mask, h, w)
    }
}

/// Locate the blob described by the mask.
///
/// An empty mask yields area 0, radius 0 and the frame center as centroid.
pub fn locate_blob(mask: &Mask) -> BlobEstimate {
    let (h, w) = mask.dim();
    let m = mask_moments(mask);

    let area = (m.m00 / MASK_ON_VALUE).round() as u64;
    let radius = (area as f64 / std::f64::consts::PI).sqrt().floor() as i64;

    let (centroid_x, centroid_y) = if m.m00 == 0.0 {
        ((w / 2) as i64, (h / 2) as i64)
    } else {
        ((m.m10 / m.m00) as i64, (m.m01 / m.m00) as i64)
    };

    BlobEstimate {
        area,
        centroid_x,
        centroid_y,
        radius,
    }
}

fn row_moments(mask: &Mask, row: usize, w: usize) -> Moments {
    let mut m = Moments::default();
    for col in 0..w {
        if mask[[row, col]] {
            m.m00 += MASK_ON_VALUE;
            m.m10 += col as f64 * MASK_ON_VALUE;
            m.m01 += row as f64 * MASK_ON_VALUE;
        }
    }
    m
}

/// Row-parallel moment summation using Rayon.
fn mask_moments_parallel(mask: &Mask, h: usize, w: usize) -> Moments {
    (0..h)
        .into_par_iter()
        .map(|row| row_moments(mask, row, w))
        .reduce(Moments::default, add_moments)
}

fn mask_moments_sequential(mask: &Mask, h: usize, w: usize) -> Moments {
    (0..h)
        .map(|row| row_moments(mask, row, w))
        .fold(Moments::default(), add_moments)
}

fn add_moments(a: Moments, b: Moments) -> Moments {
    Moments {
        m00: a.m00 + b.m00,
        m10: a.m10 + b.m10,
        m01: a.m01 + b.m01,
    }
}

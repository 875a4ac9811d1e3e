use ndarray::{Array2, Axis};

use crate::frame::Mask;

/// Mask cleanup: erosion, dilation, dilation, erosion with a `kernel`x`kernel`
/// square, each stage repeated `iterations` times.
///
/// The first erode/dilate pair (opening) removes specks smaller than the
/// kernel; the second pair (closing) fills small holes.
pub fn clean_mask(mask: &Mask, kernel: usize, iterations: usize) -> Mask {
    let mut out = erode_n(mask, kernel, iterations);
    out = dilate_n(&out, kernel, iterations);
    out = dilate_n(&out, kernel, iterations);
    erode_n(&out, kernel, iterations)
}

pub fn erode_n(mask: &Mask, kernel: usize, iterations: usize) -> Mask {
    (0..iterations).fold(mask.clone(), |m, _| erode(&m, kernel))
}

pub fn dilate_n(mask: &Mask, kernel: usize, iterations: usize) -> Mask {
    (0..iterations).fold(mask.clone(), |m, _| dilate(&m, kernel))
}

/// Binary erosion: a pixel stays true only if ALL in-bounds pixels of its
/// square neighborhood are true. Out-of-bounds neighbors are ignored, so the
/// frame edge does not eat into regions touching it.
pub fn erode(mask: &Mask, kernel: usize) -> Mask {
    let radius = kernel / 2;
    let rows = sweep(mask, Axis(1), radius, true);
    sweep(&rows, Axis(0), radius, true)
}

/// Binary dilation: a pixel becomes true if ANY in-bounds pixel of its square
/// neighborhood is true.
pub fn dilate(mask: &Mask, kernel: usize) -> Mask {
    let radius = kernel / 2;
    let rows = sweep(mask, Axis(1), radius, false);
    sweep(&rows, Axis(0), radius, false)
}

/// One-dimensional min (`all = true`) or max filter of half-width `radius`
/// along `axis`. A square kernel is the composition of a row and a column sweep.
fn sweep(mask: &Mask, axis: Axis, radius: usize, all: bool) -> Mask {
    let (h, w) = mask.dim();
    let mut result = Array2::from_elem((h, w), false);
    let len = mask.len_of(axis);

    for row in 0..h {
        for col in 0..w {
            let pos = if axis == Axis(1) { col } else { row };
            let lo = pos.saturating_sub(radius);
            let hi = (pos + radius).min(len - 1);
            let mut window = (lo..=hi).map(|i| {
                if axis == Axis(1) {
                    mask[[row, i]]
                } else {
                    mask[[i, col]]
                }
            });
            result[[row, col]] = if all {
                window.all(|v| v)
            } else {
                window.any(|v| v)
            };
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_mask(size: usize, top: usize, side: usize) -> Mask {
        Array2::from_shape_fn((size, size), |(r, c)| {
            (top..top + side).contains(&r) && (top..top + side).contains(&c)
        })
    }

    #[test]
    fn single_pixel_is_removed_by_opening() {
        let mut mask = Array2::from_elem((15, 15), false);
        mask[[7, 7]] = true;
        let cleaned = clean_mask(&mask, 5, 1);
        assert!(cleaned.iter().all(|&v| !v));
    }

    #[test]
    fn dilate_grows_by_kernel_radius() {
        let mut mask = Array2::from_elem((11, 11), false);
        mask[[5, 5]] = true;
        let grown = dilate(&mask, 5);
        assert_eq!(grown.iter().filter(|&&v| v).count(), 25);
        assert!(grown[[3, 3]] && grown[[7, 7]]);
        assert!(!grown[[2, 5]]);
    }

    #[test]
    fn erode_shrinks_square() {
        let mask = square_mask(20, 5, 10);
        let eroded = erode(&mask, 5);
        assert_eq!(eroded.iter().filter(|&&v| v).count(), 36);
        assert!(eroded[[7, 7]]);
        assert!(!eroded[[6, 6]]);
    }

    #[test]
    fn full_mask_survives_erosion_at_the_edges() {
        let mask = Array2::from_elem((6, 9), true);
        assert!(erode_n(&mask, 5, 3).iter().all(|&v| v));
    }

    #[test]
    fn square_is_restored_by_cleanup() {
        let mask = square_mask(40, 10, 12);
        assert_eq!(clean_mask(&mask, 5, 2), mask);
    }

    #[test]
    fn extra_iterations_remove_larger_specks() {
        // A 6x6 block survives one 5x5 opening but not two.
        let mask = square_mask(30, 12, 6);
        assert!(clean_mask(&mask, 5, 1).iter().any(|&v| v));
        assert!(clean_mask(&mask, 5, 2).iter().all(|&v| !v));
    }
}

//! Drawing the blob marker and the center-offset bar onto a color frame.

use crate::consts::{DEFAULT_BAR_HEIGHT, DEFAULT_MARKER_COLOR, DEFAULT_MARKER_THICKNESS};
use crate::detection::BlobEstimate;
use crate::frame::ColorFrame;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerStyle {
    pub color: [u8; 3],
    /// Outline thickness of the square around the blob.
    pub thickness: u32,
    /// The offset bar spans rows `0..=bar_height`.
    pub bar_height: u32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_MARKER_COLOR,
            thickness: DEFAULT_MARKER_THICKNESS,
            bar_height: DEFAULT_BAR_HEIGHT,
        }
    }
}

/// Signed distance from the frame's horizontal center to the blob centroid.
pub fn horizontal_offset(frame_width: usize, blob: &BlobEstimate) -> i64 {
    blob.centroid_x - (frame_width / 2) as i64
}

/// Return a copy of `frame` with the blob square and the offset bar drawn on it.
pub fn annotate(frame: &ColorFrame, blob: &BlobEstimate, style: &MarkerStyle) -> ColorFrame {
    let mut out = frame.clone();
    annotate_in_place(&mut out, blob, style);
    out
}

pub fn annotate_in_place(frame: &mut ColorFrame, blob: &BlobEstimate, style: &MarkerStyle) {
    let (cx, cy, r) = (blob.centroid_x, blob.centroid_y, blob.radius);
    draw_rect_outline(frame, cx - r, cy - r, cx + r, cy + r, style.thickness, style.color);

    let center_x = (frame.width() / 2) as i64;
    fill_rect(frame, center_x, 0, cx, style.bar_height as i64, style.color);
}

/// Outline of the rectangle with corners `(x0, y0)` and `(x1, y1)`.
///
/// The stroke is centered on the edges: with thickness 2 it covers one pixel
/// outside and the edge pixel itself.
pub fn draw_rect_outline(
    frame: &mut ColorFrame,
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    thickness: u32,
    color: [u8; 3],
) {
    let (x0, x1) = (x0.min(x1), x0.max(x1));
    let (y0, y1) = (y0.min(y1), y0.max(y1));
    let t = i64::from(thickness.max(1));
    let outer = t / 2;
    let inner = t - outer;

    let (ox0, oy0, ox1, oy1) = (x0 - outer, y0 - outer, x1 + outer, y1 + outer);
    let (ix0, iy0, ix1, iy1) = (x0 + inner, y0 + inner, x1 - inner, y1 - inner);

    for_each_clipped(frame, ox0, oy0, ox1, oy1, |frame, row, col| {
        let (x, y) = (col as i64, row as i64);
        let inside_hole = x >= ix0 && x <= ix1 && y >= iy0 && y <= iy1;
        if !inside_hole {
            frame.set_pixel(row, col, color);
        }
    });
}

/// Filled rectangle between two corners, both inclusive.
pub fn fill_rect(frame: &mut ColorFrame, x0: i64, y0: i64, x1: i64, y1: i64, color: [u8; 3]) {
    let (x0, x1) = (x0.min(x1), x0.max(x1));
    let (y0, y1) = (y0.min(y1), y0.max(y1));
    for_each_clipped(frame, x0, y0, x1, y1, |frame, row, col| {
        frame.set_pixel(row, col, color);
    });
}

fn for_each_clipped(
    frame: &mut ColorFrame,
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    mut f: impl FnMut(&mut ColorFrame, usize, usize),
) {
    let (w, h) = (frame.width() as i64, frame.height() as i64);
    if w == 0 || h == 0 {
        return;
    }
    let (cx0, cx1) = (x0.max(0), x1.min(w - 1));
    let (cy0, cy1) = (y0.max(0), y1.min(h - 1));
    if cx0 > cx1 || cy0 > cy1 {
        return;
    }
    for row in cy0..=cy1 {
        for col in cx0..=cx1 {
            f(frame, row as usize, col as usize);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: [u8; 3] = [0, 0, 0];
    const RED: [u8; 3] = [255, 0, 0];

    fn blob(x: i64, y: i64, r: i64) -> BlobEstimate {
        BlobEstimate {
            area: 1,
            centroid_x: x,
            centroid_y: y,
            radius: r,
        }
    }

    #[test]
    fn outline_leaves_interior_untouched() {
        let mut frame = ColorFrame::filled(40, 40, BLACK);
        draw_rect_outline(&mut frame, 10, 10, 20, 20, 2, RED);
        assert_eq!(frame.pixel(10, 10), RED);
        assert_eq!(frame.pixel(9, 15), RED);
        assert_eq!(frame.pixel(15, 21), RED);
        assert_eq!(frame.pixel(15, 15), BLACK);
        assert_eq!(frame.pixel(11, 11), BLACK);
        assert_eq!(frame.pixel(8, 15), BLACK);
    }

    #[test]
    fn bar_runs_from_center_to_centroid() {
        let frame = ColorFrame::filled(100, 50, BLACK);
        let out = annotate(&frame, &blob(80, 30, 0), &MarkerStyle::default());
        for col in 50..=80 {
            assert_eq!(out.pixel(0, col), RED);
            assert_eq!(out.pixel(5, col), RED);
        }
        assert_eq!(out.pixel(6, 65), BLACK);
        assert_eq!(out.pixel(2, 49), BLACK);
        assert_eq!(out.pixel(2, 82), BLACK);
    }

    #[test]
    fn bar_to_the_left_of_center() {
        let frame = ColorFrame::filled(100, 50, BLACK);
        let out = annotate(&frame, &blob(10, 30, 3), &MarkerStyle::default());
        assert_eq!(out.pixel(3, 10), RED);
        assert_eq!(out.pixel(3, 50), RED);
        assert_eq!(out.pixel(3, 51), BLACK);
        assert_eq!(horizontal_offset(100, &blob(10, 30, 3)), -40);
    }

    #[test]
    fn drawing_is_clipped_to_the_frame() {
        let frame = ColorFrame::filled(20, 20, BLACK);
        let out = annotate(&frame, &blob(0, 0, 30), &MarkerStyle::default());
        assert_eq!(out.width(), 20);
        assert_eq!(out.height(), 20);
    }
}

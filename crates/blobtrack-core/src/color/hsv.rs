//! RGB to HSV conversion in the 8-bit convention used by most vision
//! libraries: hue is degrees / 2 in `[0, 180)`, saturation and value in `[0, 255]`.

use ndarray::Array3;

use crate::frame::ColorFrame;

/// Convert one RGB pixel to `[h, s, v]`.
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = rgb.map(i32::from);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = v - min;

    let s = if v == 0 {
        0
    } else {
        round_half_up(diff as f64 * 255.0 / v as f64)
    };

    if diff == 0 {
        return [0, s as u8, v as u8];
    }

    // Hue in sixths of a turn, scaled by diff.
    let sector = if v == r {
        g - b
    } else if v == g {
        b - r + 2 * diff
    } else {
        r - g + 4 * diff
    };
    let mut h = round_half_up(sector as f64 * 30.0 / diff as f64);
    if h < 0 {
        h += 180;
    }

    [h as u8, s as u8, v as u8]
}

/// Convert a whole frame. Output shape matches the input, channels in H, S, V order.
pub fn frame_to_hsv(frame: &ColorFrame) -> Array3<u8> {
    let (h, w, _) = frame.data.dim();
    let mut hsv = Array3::<u8>::zeros((h, w, 3));
    for row in 0..h {
        for col in 0..w {
            let px = rgb_to_hsv(frame.pixel(row, col));
            for (c, v) in px.into_iter().enumerate() {
                hsv[[row, col, c]] = v;
            }
        }
    }
    hsv
}

fn round_half_up(x: f64) -> i32 {
    (x + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries() {
        assert_eq!(rgb_to_hsv([255, 0, 0]), [0, 255, 255]);
        assert_eq!(rgb_to_hsv([0, 255, 0]), [60, 255, 255]);
        assert_eq!(rgb_to_hsv([0, 0, 255]), [120, 255, 255]);
    }

    #[test]
    fn grays_have_no_hue_or_saturation() {
        assert_eq!(rgb_to_hsv([0, 0, 0]), [0, 0, 0]);
        assert_eq!(rgb_to_hsv([128, 128, 128]), [0, 0, 128]);
        assert_eq!(rgb_to_hsv([255, 255, 255]), [0, 0, 255]);
    }

    #[test]
    fn magenta_side_wraps_below_180() {
        // Red with a touch of blue sits just under the wrap point.
        let [h, _, _] = rgb_to_hsv([255, 0, 40]);
        assert!(h > 170 && h < 180, "got {h}");
    }

    #[test]
    fn half_saturation() {
        let [_, s, v] = rgb_to_hsv([200, 100, 100]);
        assert_eq!(v, 200);
        assert_eq!(s, 128);
    }
}

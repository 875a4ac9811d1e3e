use blobtrack_core::frame::{ColorFrame, Mask};

/// Convert an RGB frame to an egui ColorImage.
pub fn frame_to_color_image(frame: &ColorFrame) -> egui::ColorImage {
    let h = frame.height();
    let w = frame.width();
    let mut pixels = Vec::with_capacity(h * w);

    for row in 0..h {
        for col in 0..w {
            let [r, g, b] = frame.pixel(row, col);
            pixels.push(egui::Color32::from_rgb(r, g, b));
        }
    }

    egui::ColorImage {
        size: [w, h],
        pixels,
        source_size: Default::default(),
    }
}

/// Convert a binary mask to a white-on-black ColorImage.
pub fn mask_to_color_image(mask: &Mask) -> egui::ColorImage {
    let (h, w) = mask.dim();
    let pixels = mask
        .iter()
        .map(|&on| if on { egui::Color32::WHITE } else { egui::Color32::BLACK })
        .collect();

    egui::ColorImage {
        size: [w, h],
        pixels,
        source_size: Default::default(),
    }
}

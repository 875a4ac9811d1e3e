use blobtrack_core::consts::{
    CHANNEL_MAX, HUE_MAX, IMAGE_SEQUENCE_EXTENSIONS, ITERATIONS_MAX, VIDEO_CONTAINER_EXTENSIONS,
};
use blobtrack_core::playback::PlaybackState;

use crate::app::BlobTrackApp;

/// Position the reset slider is parked at after it fires.
const RESET_REST: u8 = 1;

pub fn show(ctx: &egui::Context, app: &mut BlobTrackApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            threshold_section(ui, app);
            ui.separator();
            file_section(ui, app);
            ui.separator();
            status_section(ui, app);
        });
    });
}

fn section_header(ui: &mut egui::Ui, label: &str, status: Option<&str>) {
    ui.horizontal(|ui| {
        ui.strong(label);
        if let Some(s) = status {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.small(s);
            });
        }
    });
}

fn threshold_section(ui: &mut egui::Ui, app: &mut BlobTrackApp) {
    section_header(ui, "Threshold", Some("HSV, inclusive"));
    ui.add_space(4.0);

    let window = &mut app.window;
    ui.add(egui::Slider::new(&mut window.hue_high, 0..=HUE_MAX).text("1. HighHue"));
    ui.add(egui::Slider::new(&mut window.hue_low, 0..=HUE_MAX).text("2. LowHue"));
    ui.add(egui::Slider::new(&mut window.sat_high, 0..=CHANNEL_MAX).text("3. HighSat"));
    ui.add(egui::Slider::new(&mut window.sat_low, 0..=CHANNEL_MAX).text("4. LowSat"));
    ui.add(egui::Slider::new(&mut window.val_high, 0..=CHANNEL_MAX).text("5. HighVal"));
    ui.add(egui::Slider::new(&mut window.val_low, 0..=CHANNEL_MAX).text("6. LowVal"));
    ui.add(egui::Slider::new(&mut window.iterations, 0..=ITERATIONS_MAX).text("7. Trnsfrm"));

    let reset = ui.add(egui::Slider::new(&mut app.reset_trigger, 0..=2).text("8. RESET"));
    if reset.changed() {
        app.window.reset();
        app.reset_trigger = RESET_REST;
        tracing::info!("threshold window reset to defaults");
    }
}

fn file_section(ui: &mut egui::Ui, app: &mut BlobTrackApp) {
    section_header(ui, "Video", None);
    ui.add_space(4.0);

    if ui.button("Open video...").clicked() {
        let open_tx = app.open_tx.clone();
        let ctx = ui.ctx().clone();
        std::thread::spawn(move || {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Videos", VIDEO_CONTAINER_EXTENSIONS)
                .add_filter("SER files", &["ser"])
                .add_filter("Images", IMAGE_SEQUENCE_EXTENSIONS)
                .add_filter("All files", &["*"])
                .pick_file()
            {
                let _ = open_tx.send(path);
                ctx.request_repaint();
            }
        });
    }

    ui.label(
        app.input_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
    );

    match app.playback.source().info() {
        Some(info) => {
            ui.small(format!("{}x{}, {} frames", info.width, info.height, info.total_frames));
            ui.small(format!("{}-bit, {:?}", info.bit_depth, info.color_mode));
        }
        None if !app.playback.source().is_opened() => {
            ui.small("Unable to open video");
        }
        None => {}
    }
}

fn status_section(ui: &mut egui::Ui, app: &BlobTrackApp) {
    let state = app.playback.state();
    section_header(ui, "Playback", Some(&state.to_string()));
    ui.add_space(4.0);

    match state {
        PlaybackState::Playing => ui.small("space: pause, q: quit"),
        PlaybackState::Paused => ui.small("space: refresh mask, q: quit, any other key: continue"),
        PlaybackState::Closed => ui.small("closed"),
    };

    ui.small(format!(
        "Frame {} (loop {})",
        app.playback.frames_shown(),
        app.playback.rewinds() + 1
    ));

    if let Some(ref analysis) = app.last_analysis {
        let blob = &analysis.blob;
        if blob.is_empty() {
            ui.small("No blob");
        } else {
            ui.small(format!(
                "Blob ({}, {}) r={} area={}",
                blob.centroid_x, blob.centroid_y, blob.radius, blob.area
            ));
        }
        ui.small(format!("Offset from center: {:+}", analysis.offset_x));
    }
}

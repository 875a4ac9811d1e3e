use std::path::Path;

use blobtrack_core::detection::ThresholdWindow;
use blobtrack_core::pipeline::PlaybackConfig;
use blobtrack_core::playback::PlaybackSummary;
use console::Style;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_track_summary(
    input: &Path,
    window: &ThresholdWindow,
    config: &PlaybackConfig,
    summary: &PlaybackSummary,
) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Blob Tracking"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(13)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    println!();

    // Threshold window
    println!("  {}", s.header.apply_to("Threshold"));
    for (name, lo, hi) in [
        ("Hue", window.hue_low, window.hue_high),
        ("Saturation", window.sat_low, window.sat_high),
        ("Value", window.val_low, window.val_high),
    ] {
        println!(
            "    {:<12}{}",
            s.label.apply_to(name),
            s.value.apply_to(format!("{lo}..={hi}"))
        );
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Passes"),
        s.value.apply_to(format!(
            "{} x {}px kernel",
            window.effective_iterations(),
            config.kernel_size
        ))
    );
    println!();

    // Result
    println!("  {}", s.header.apply_to("Result"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(summary.frames_processed)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Rewinds"),
        s.value.apply_to(summary.rewinds)
    );
    match summary.last_blob {
        Some(blob) if !blob.is_empty() => {
            println!(
                "    {:<12}{}",
                s.label.apply_to("Last blob"),
                s.value.apply_to(format!(
                    "({}, {}) r={} area={}",
                    blob.centroid_x, blob.centroid_y, blob.radius, blob.area
                ))
            );
        }
        _ => {
            println!(
                "    {:<12}{}",
                s.label.apply_to("Last blob"),
                s.disabled.apply_to("none")
            );
        }
    }
    println!();
}

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use blobtrack_core::consts::{
    DEFAULT_HUE_HIGH, DEFAULT_HUE_LOW, DEFAULT_ITERATIONS, DEFAULT_SAT_HIGH, DEFAULT_SAT_LOW,
    DEFAULT_VAL_HIGH, DEFAULT_VAL_LOW, HUE_MAX, ITERATIONS_MAX,
};
use blobtrack_core::detection::ThresholdWindow;
use blobtrack_core::frame::Mask;
use blobtrack_core::io::open_source;
use blobtrack_core::pipeline::{FrameAnalysis, FrameTransformer, PlaybackConfig};
use blobtrack_core::playback::{self, Frontend, Input, Key, Playback};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use crate::summary::print_track_summary;

const MAX_PASSES: i64 = 100_000;

#[derive(Args)]
pub struct TrackArgs {
    /// Input SER file, image, or image directory
    #[arg(short, long)]
    pub input: PathBuf,

    /// Lower hue bound (0-180)
    #[arg(long, default_value_t = DEFAULT_HUE_LOW, value_parser = clap::value_parser!(u8).range(0..=HUE_MAX as i64))]
    pub hue_low: u8,

    /// Upper hue bound (0-180)
    #[arg(long, default_value_t = DEFAULT_HUE_HIGH, value_parser = clap::value_parser!(u8).range(0..=HUE_MAX as i64))]
    pub hue_high: u8,

    /// Lower saturation bound
    #[arg(long, default_value_t = DEFAULT_SAT_LOW)]
    pub sat_low: u8,

    /// Upper saturation bound
    #[arg(long, default_value_t = DEFAULT_SAT_HIGH)]
    pub sat_high: u8,

    /// Lower value bound
    #[arg(long, default_value_t = DEFAULT_VAL_LOW)]
    pub val_low: u8,

    /// Upper value bound
    #[arg(long, default_value_t = DEFAULT_VAL_HIGH)]
    pub val_high: u8,

    /// Morphology passes per cleanup stage (0-20)
    #[arg(long, default_value_t = DEFAULT_ITERATIONS, value_parser = clap::value_parser!(u8).range(0..=ITERATIONS_MAX as i64))]
    pub iterations: u8,

    /// Number of full passes over the video before stopping (1-100000)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=MAX_PASSES))]
    pub passes: u32,

    /// Playback settings (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl TrackArgs {
    fn window(&self) -> ThresholdWindow {
        ThresholdWindow {
            hue_low: self.hue_low,
            hue_high: self.hue_high,
            sat_low: self.sat_low,
            sat_high: self.sat_high,
            val_low: self.val_low,
            val_high: self.val_high,
            iterations: self.iterations,
        }
    }
}

/// Frontend without any window: never pauses, prints one line per frame and
/// quits once the requested number of frames has been shown.
struct HeadlessFrontend {
    pb: ProgressBar,
    frames_to_show: Option<usize>,
    shown: usize,
}

impl Frontend for HeadlessFrontend {
    fn poll_params(&mut self, _window: &mut ThresholdWindow) {}

    fn show_mask(&mut self, _mask: &Mask) {}

    fn show_frame(&mut self, analysis: &FrameAnalysis) {
        let blob = &analysis.blob;
        self.pb.println(format!(
            "{:>6}  {:>8}  ({:>5}, {:>5})  {:>6}  {:>+6}",
            analysis.annotated.metadata.frame_index,
            blob.area,
            blob.centroid_x,
            blob.centroid_y,
            blob.radius,
            analysis.offset_x,
        ));
        self.shown += 1;
        self.pb.inc(1);
    }

    fn wait_input(&mut self, _timeout: Duration) -> Input {
        match self.frames_to_show {
            Some(n) if self.shown >= n => Input::Key(Key::Quit),
            _ => Input::Timeout,
        }
    }
}

/// Frames shown over `passes` full loops of an `n`-frame video.
fn frames_for_passes(n: usize, passes: u32) -> usize {
    n.saturating_mul(passes.max(1) as usize)
}

pub fn run(args: &TrackArgs) -> Result<()> {
    let config = match args.config {
        Some(ref path) => PlaybackConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => PlaybackConfig::default(),
    };
    let source = open_source(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;

    let frames_to_show = source
        .frame_count()
        .map(|n| frames_for_passes(n, args.passes));
    let pb = match frames_to_show {
        Some(n) => ProgressBar::new(n as u64),
        None => ProgressBar::no_length(),
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Tracking");
    pb.println(format!(
        "{:>6}  {:>8}  {:>14}  {:>6}  {:>6}",
        "Frame", "Area", "Centroid", "Radius", "Offset"
    ));

    let mut window = args.window().clamped();
    let transformer = FrameTransformer::new(&config);
    let mut session = Playback::new(source);
    let mut frontend = HeadlessFrontend {
        pb,
        frames_to_show,
        shown: 0,
    };

    let summary = playback::run(&mut session, &transformer, &config, &mut window, &mut frontend);
    frontend.pb.finish_with_message("Done");

    print_track_summary(&args.input, &window, &config, &summary);
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        track: TrackArgs,
    }

    #[test]
    fn test_frames_for_passes_saturates() {
        assert_eq!(frames_for_passes(10, 3), 30);
        assert_eq!(frames_for_passes(10, 0), 10);
        assert_eq!(frames_for_passes(usize::MAX, 2), usize::MAX);
    }

    #[test]
    fn test_passes_range_is_enforced() {
        let ok = Harness::try_parse_from(["track", "-i", "clip.ser", "--passes", "4"]).unwrap();
        assert_eq!(ok.track.passes, 4);

        let default = Harness::try_parse_from(["track", "-i", "clip.ser"]).unwrap();
        assert_eq!(default.track.passes, 1);

        for bad in ["0", "100001", "18446744073709551615"] {
            assert!(Harness::try_parse_from(["track", "-i", "clip.ser", "--passes", bad]).is_err());
        }
    }
}

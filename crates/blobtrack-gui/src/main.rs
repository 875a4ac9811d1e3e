mod app;
mod convert;
mod panels;
mod states;

use std::path::PathBuf;

use anyhow::{Context, Result};
use blobtrack_core::pipeline::PlaybackConfig;
use clap::Parser;

#[derive(Parser)]
#[command(name = "blobtrack-gui", about = "Interactive HSV color blob tracker")]
#[command(version)]
struct Args {
    /// Video to play: SER file, image, or image directory
    #[arg(short, long = "input-video")]
    input_video: PathBuf,

    /// Playback settings (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match args.config {
        Some(ref path) => PlaybackConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => PlaybackConfig::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([320.0, 240.0])
            .with_title(app::MAIN_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        "BlobTrack",
        options,
        Box::new(move |_cc| Ok(Box::new(app::BlobTrackApp::new(&args.input_video, config)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {e}"))
}

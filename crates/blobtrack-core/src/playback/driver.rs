use std::time::Duration;

use tracing::info;

use crate::detection::{BlobEstimate, ThresholdWindow};
use crate::frame::Mask;
use crate::io::VideoSource;
use crate::pipeline::{FrameAnalysis, FrameTransformer, PlaybackConfig};

use super::state::{Input, Playback, PlaybackState, Transition};

/// The display and input side of the playback loop.
pub trait Frontend {
    /// Copy the latest user-adjusted parameters into `window`.
    fn poll_params(&mut self, window: &mut ThresholdWindow);

    /// Show the diagnostic mask.
    fn show_mask(&mut self, mask: &Mask);

    /// Show the annotated frame.
    fn show_frame(&mut self, analysis: &FrameAnalysis);

    /// Block for at most `timeout` waiting for a key.
    fn wait_input(&mut self, timeout: Duration) -> Input;

    /// False once any display surface has been closed by the user.
    fn surfaces_open(&self) -> bool {
        true
    }
}

/// Totals reported when the loop exits.
#[derive(Clone, Debug, Default)]
pub struct PlaybackSummary {
    pub frames_processed: usize,
    pub rewinds: usize,
    pub last_blob: Option<BlobEstimate>,
}

/// Drive playback until it closes: one frame and one input read per tick.
pub fn run<S: VideoSource, F: Frontend>(
    playback: &mut Playback<S>,
    transformer: &FrameTransformer,
    config: &PlaybackConfig,
    window: &mut ThresholdWindow,
    frontend: &mut F,
) -> PlaybackSummary {
    let mut summary = PlaybackSummary::default();

    loop {
        if !frontend.surfaces_open() {
            info!("display surface closed");
            playback.close();
        }

        match playback.state() {
            PlaybackState::Closed => break,
            PlaybackState::Playing => {
                frontend.poll_params(window);
                window.clamp();

                let Some(frame) = playback.acquire() else {
                    break;
                };
                let analysis = transformer.analyze(frame, window);
                frontend.show_mask(&analysis.mask);
                frontend.show_frame(&analysis);
                summary.frames_processed += 1;
                summary.last_blob = Some(analysis.blob);

                let input = frontend.wait_input(playback.wait_timeout(config));
                if playback.handle(input) == Transition::Pause {
                    refresh_mask(playback, transformer, window, frontend);
                }
            }
            PlaybackState::Paused => {
                let input = frontend.wait_input(playback.wait_timeout(config));
                if playback.handle(input) == Transition::StayPaused {
                    refresh_mask(playback, transformer, window, frontend);
                }
            }
        }
    }

    summary.rewinds = playback.rewinds();
    summary
}

/// Recompute the mask of the held frame with the latest parameters.
pub fn refresh_mask<S: VideoSource, F: Frontend>(
    playback: &Playback<S>,
    transformer: &FrameTransformer,
    window: &mut ThresholdWindow,
    frontend: &mut F,
) {
    frontend.poll_params(window);
    window.clamp();
    if let Some(frame) = playback.current_frame() {
        let mask = transformer.mask(frame, window);
        frontend.show_mask(&mask);
    }
}

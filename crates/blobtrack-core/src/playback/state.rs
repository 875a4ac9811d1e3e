use std::time::Duration;

use tracing::{info, warn};

use crate::frame::ColorFrame;
use crate::io::VideoSource;
use crate::pipeline::PlaybackConfig;

/// Playback state machine states. `Closed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Paused,
    Closed,
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Playing => write!(f, "Playing"),
            Self::Paused => write!(f, "Paused"),
            Self::Closed => write!(f, "Closed"),
        }
    }
}

/// Keys the playback loop distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Space.
    Pause,
    /// `q`.
    Quit,
    Other,
}

impl Key {
    pub fn from_char(c: char) -> Self {
        match c {
            ' ' => Self::Pause,
            'q' => Self::Quit,
            _ => Self::Other,
        }
    }
}

/// Outcome of one input read: a key, or the wait timing out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Key(Key),
    Timeout,
}

/// What the caller has to do after [`Playback::handle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Still playing: acquire and show the next frame.
    Advance,
    /// Entered the paused state: redisplay the mask of the held frame.
    Pause,
    /// Pause key while paused: redisplay the mask with current parameters.
    StayPaused,
    /// Left the paused state: acquire and show the next frame.
    Resume,
    Close,
}

/// Playback position and state over a [`VideoSource`].
///
/// The source is treated as an endless loop: once as many frames have been
/// shown as the source holds, it is rewound to the first frame. Playback only
/// closes on quit, on a closed display surface, or when no frame can be read.
pub struct Playback<S> {
    source: S,
    state: PlaybackState,
    frame: Option<ColorFrame>,
    frames_shown: usize,
    rewinds: usize,
    pause_help_shown: bool,
}

impl<S: VideoSource> Playback<S> {
    pub fn new(source: S) -> Self {
        info!("starting video");
        log_key_help();
        Self {
            source,
            state: PlaybackState::Playing,
            frame: None,
            frames_shown: 0,
            rewinds: 0,
            pause_help_shown: false,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == PlaybackState::Closed
    }

    /// The most recently acquired frame.
    pub fn current_frame(&self) -> Option<&ColorFrame> {
        self.frame.as_ref()
    }

    /// Frames shown since the last rewind.
    pub fn frames_shown(&self) -> usize {
        self.frames_shown
    }

    /// How many times the source has been rewound to its first frame.
    pub fn rewinds(&self) -> usize {
        self.rewinds
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// How long the next input read may block in the current state.
    pub fn wait_timeout(&self, config: &PlaybackConfig) -> Duration {
        match self.state {
            PlaybackState::Paused => config.pause_timeout(),
            _ => config.frame_delay(),
        }
    }

    /// Read the next frame. Only meaningful while playing.
    ///
    /// Returns `None`, and closes playback, if nothing could be grabbed.
    pub fn acquire(&mut self) -> Option<&ColorFrame> {
        if self.state != PlaybackState::Playing {
            return None;
        }
        match self.source.grab() {
            Ok(Some(frame)) => {
                self.frames_shown += 1;
                self.frame = Some(frame);
                self.frame.as_ref()
            }
            Ok(None) => {
                info!("no frame grabbed... breaking");
                self.close();
                None
            }
            Err(e) => {
                warn!("failed to read frame: {e}");
                self.close();
                None
            }
        }
    }

    /// Apply one input to the state machine.
    pub fn handle(&mut self, input: Input) -> Transition {
        match (self.state, input) {
            (PlaybackState::Closed, _) => Transition::Close,

            (_, Input::Key(Key::Quit)) => {
                info!("closing...");
                self.close();
                Transition::Close
            }

            (PlaybackState::Playing, Input::Key(Key::Pause)) => {
                self.state = PlaybackState::Paused;
                self.log_pause_help();
                Transition::Pause
            }
            (PlaybackState::Playing, _) => {
                if self.finish_frame() {
                    Transition::Advance
                } else {
                    Transition::Close
                }
            }

            (PlaybackState::Paused, Input::Key(Key::Pause)) => {
                info!("still paused, transform view refreshed");
                Transition::StayPaused
            }
            (PlaybackState::Paused, _) => {
                self.state = PlaybackState::Playing;
                self.pause_help_shown = false;
                log_key_help();
                if self.finish_frame() {
                    Transition::Resume
                } else {
                    Transition::Close
                }
            }
        }
    }

    /// Close playback, e.g. because a display surface went away.
    pub fn close(&mut self) {
        self.state = PlaybackState::Closed;
    }

    /// Loop back to the first frame once the whole source has been shown.
    fn finish_frame(&mut self) -> bool {
        let Some(total) = self.source.frame_count() else {
            return true;
        };
        if self.frames_shown < total {
            return true;
        }
        match self.source.rewind() {
            Ok(()) => {
                self.frames_shown = 0;
                self.rewinds += 1;
                info!(rewinds = self.rewinds, "end of video, restarting from the first frame");
                true
            }
            Err(e) => {
                warn!("failed to rewind video: {e}");
                self.close();
                false
            }
        }
    }

    fn log_pause_help(&mut self) {
        info!("paused");
        if !self.pause_help_shown {
            info!("adjust parameters in the 'Control' window");
            info!("press 'space' again to refresh the transform window");
            info!("press 'q' to exit, any other key to continue the video");
            self.pause_help_shown = true;
        }
    }
}

fn log_key_help() {
    info!("press 'space' to pause, 'q' to exit");
}

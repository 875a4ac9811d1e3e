//! The PLAYING / PAUSED / CLOSED playback loop.
//!
//! [`Playback`] owns the source and the state machine. [`run`] drives it with a
//! blocking [`Frontend`]; event-loop frontends (the GUI) call
//! [`Playback::acquire`] and [`Playback::handle`] themselves.

mod driver;
mod state;

pub use driver::{refresh_mask, run, Frontend, PlaybackSummary};
pub use state::{Input, Key, Playback, PlaybackState, Transition};

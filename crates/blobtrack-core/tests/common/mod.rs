#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;

use blobtrack_core::consts::SER_HEADER_SIZE;
use blobtrack_core::detection::{BlobEstimate, ThresholdWindow};
use blobtrack_core::error::{BlobTrackError, Result};
use blobtrack_core::frame::{ColorFrame, Mask, SourceInfo};
use blobtrack_core::io::VideoSource;
use blobtrack_core::pipeline::FrameAnalysis;
use blobtrack_core::playback::{Frontend, Input, Key};

/// A color inside the default threshold window (hue 175, full saturation and value).
pub const IN_RANGE_RGB: [u8; 3] = [255, 0, 40];

/// A color outside the default threshold window (pure green).
pub const OUT_OF_RANGE_RGB: [u8; 3] = [0, 255, 0];

/// Build a SER file header with configurable bit depth and color mode.
///
/// `color_id`: 0=MONO, 8=BAYER_RGGB, 9=BAYER_GRBG, 10=BAYER_GBRG, 11=BAYER_BGGR,
///             100=RGB, 101=BGR
pub fn build_ser_header_full(
    width: u32,
    height: u32,
    bit_depth: u32,
    num_frames: usize,
    color_id: i32,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SER_HEADER_SIZE);

    // Magic (14 bytes)
    buf.extend_from_slice(b"LUCAM-RECORDER");
    // LuID (4 bytes)
    buf.extend_from_slice(&0i32.to_le_bytes());
    // ColorID (4 bytes)
    buf.extend_from_slice(&color_id.to_le_bytes());
    // LittleEndian = 0 (little-endian per Siril convention)
    buf.extend_from_slice(&0i32.to_le_bytes());
    buf.extend_from_slice(&(width as i32).to_le_bytes());
    buf.extend_from_slice(&(height as i32).to_le_bytes());
    buf.extend_from_slice(&(bit_depth as i32).to_le_bytes());
    buf.extend_from_slice(&(num_frames as i32).to_le_bytes());
    // Observer (40 bytes)
    let mut observer = [0u8; 40];
    observer[..4].copy_from_slice(b"Test");
    buf.extend_from_slice(&observer);
    // Instrument (40 bytes)
    buf.extend_from_slice(&[0u8; 40]);
    // Telescope (40 bytes)
    buf.extend_from_slice(&[0u8; 40]);
    // DateTime, DateTimeUTC (8 bytes each)
    buf.extend_from_slice(&0u64.to_le_bytes());
    buf.extend_from_slice(&0u64.to_le_bytes());

    assert_eq!(buf.len(), SER_HEADER_SIZE);
    buf
}

/// Build a complete 8-bit SER file with the given raw frame data.
pub fn build_ser_with_frames(width: u32, height: u32, color_id: i32, frames: &[Vec<u8>]) -> Vec<u8> {
    let mut buf = build_ser_header_full(width, height, 8, frames.len(), color_id);
    for frame in frames {
        buf.extend_from_slice(frame);
    }
    buf
}

/// Write a SER buffer to a temporary file and return the temp file handle.
///
/// The file stays alive as long as the returned `NamedTempFile` is not dropped.
pub fn write_test_ser(data: &[u8]) -> tempfile::NamedTempFile {
    use std::io::Write;
    let mut f = tempfile::Builder::new()
        .suffix(".ser")
        .tempfile()
        .expect("create temp file");
    f.write_all(data).expect("write SER data");
    f.flush().expect("flush");
    f
}

/// Frame of `background` with a `side`x`side` square of `fill` whose top-left
/// corner is at (`left`, `top`).
pub fn frame_with_square(
    width: usize,
    height: usize,
    background: [u8; 3],
    fill: [u8; 3],
    left: usize,
    top: usize,
    side: usize,
) -> ColorFrame {
    let mut frame = ColorFrame::filled(width, height, background);
    for row in top..top + side {
        for col in left..left + side {
            frame.set_pixel(row, col, fill);
        }
    }
    frame
}

/// In-memory video. Optionally fails with an I/O error on the n-th grab.
pub struct MemorySource {
    pub frames: Vec<ColorFrame>,
    pub position: usize,
    pub grabs: usize,
    pub fail_on_grab: Option<usize>,
}

impl MemorySource {
    pub fn new(frames: Vec<ColorFrame>) -> Self {
        Self {
            frames,
            position: 0,
            grabs: 0,
            fail_on_grab: None,
        }
    }
}

impl VideoSource for MemorySource {
    fn grab(&mut self) -> Result<Option<ColorFrame>> {
        self.grabs += 1;
        if self.fail_on_grab == Some(self.grabs) {
            return Err(BlobTrackError::Io(std::io::Error::other("decoder failure")));
        }
        let Some(frame) = self.frames.get(self.position) else {
            return Ok(None);
        };
        let mut frame = frame.clone();
        frame.metadata.frame_index = self.position;
        self.position += 1;
        Ok(Some(frame))
    }

    fn rewind(&mut self) -> Result<()> {
        self.position = 0;
        Ok(())
    }

    fn frame_count(&self) -> Option<usize> {
        Some(self.frames.len())
    }

    fn info(&self) -> Option<&SourceInfo> {
        None
    }
}

/// Frontend fed from a fixed list of inputs. Quits once the script runs out.
#[derive(Default)]
pub struct ScriptedFrontend {
    pub inputs: VecDeque<Input>,
    /// Parameters handed out on every poll, if set.
    pub params: Option<ThresholdWindow>,
    pub masks_shown: usize,
    pub last_mask: Option<Mask>,
    pub blobs: Vec<BlobEstimate>,
    pub frame_indices: Vec<usize>,
    pub timeouts: Vec<Duration>,
    /// Report the surfaces closed once this many frames have been shown.
    pub close_after_frames: Option<usize>,
}

impl ScriptedFrontend {
    pub fn new(inputs: impl IntoIterator<Item = Input>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
            ..Default::default()
        }
    }
}

impl Frontend for ScriptedFrontend {
    fn poll_params(&mut self, window: &mut ThresholdWindow) {
        if let Some(params) = self.params {
            *window = params;
        }
    }

    fn show_mask(&mut self, mask: &Mask) {
        self.masks_shown += 1;
        self.last_mask = Some(mask.clone());
    }

    fn show_frame(&mut self, analysis: &FrameAnalysis) {
        self.blobs.push(analysis.blob);
        self.frame_indices.push(analysis.annotated.metadata.frame_index);
    }

    fn wait_input(&mut self, timeout: Duration) -> Input {
        self.timeouts.push(timeout);
        self.inputs.pop_front().unwrap_or(Input::Key(Key::Quit))
    }

    fn surfaces_open(&self) -> bool {
        match self.close_after_frames {
            Some(n) => self.blobs.len() < n,
            None => true,
        }
    }
}

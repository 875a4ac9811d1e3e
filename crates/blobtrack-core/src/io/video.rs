use std::path::Path;

use ndarray::Array3;
use opencv::core::{Mat, MatTraitConst, CV_8UC3};
use opencv::videoio::{self, VideoCapture, VideoCaptureTrait, VideoCaptureTraitConst};
use tracing::debug;

use crate::error::{BlobTrackError, Result};
use crate::frame::{ColorFrame, ColorMode, FrameMetadata, SourceInfo};

use super::source::VideoSource;

/// Frames decoded from a video container (mp4, mov, avi, ...) by OpenCV's
/// `VideoCapture`.
pub struct DecodedVideoSource {
    cap: VideoCapture,
    info: SourceInfo,
    /// Container frame count; `None` when the backend reports zero or less.
    frame_count: Option<usize>,
    position: usize,
}

impl DecodedVideoSource {
    pub fn open(path: &Path) -> Result<Self> {
        let name = path
            .to_str()
            .ok_or_else(|| BlobTrackError::UnsupportedFormat(path.display().to_string()))?;
        let cap = VideoCapture::from_file(name, videoio::CAP_ANY)?;
        if !cap.is_opened()? {
            return Err(BlobTrackError::Decoder(format!(
                "no backend could open {}",
                path.display()
            )));
        }

        let reported = cap.get(videoio::CAP_PROP_FRAME_COUNT)?;
        let width = cap.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32;
        let height = cap.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32;
        let frame_count = (reported >= 1.0).then_some(reported as usize);
        debug!(
            path = %path.display(),
            width,
            height,
            frames = ?frame_count,
            fps = cap.get(videoio::CAP_PROP_FPS)?,
            "opened video container"
        );

        let info = SourceInfo {
            filename: path.to_path_buf(),
            total_frames: frame_count.unwrap_or(0),
            width,
            height,
            bit_depth: 8,
            color_mode: ColorMode::RGB,
            observer: None,
            telescope: None,
            instrument: None,
        };
        Ok(Self {
            cap,
            info,
            frame_count,
            position: 0,
        })
    }
}

impl VideoSource for DecodedVideoSource {
    fn grab(&mut self) -> Result<Option<ColorFrame>> {
        let mut mat = Mat::default();
        if !self.cap.read(&mut mat)? || mat.empty() {
            return Ok(None);
        }
        let mut frame = bgr_mat_to_frame(&mat)?;
        frame.metadata = FrameMetadata {
            frame_index: self.position,
            timestamp_us: None,
        };
        self.position += 1;
        Ok(Some(frame))
    }

    fn rewind(&mut self) -> Result<()> {
        if !self.cap.set(videoio::CAP_PROP_POS_FRAMES, 0.0)? {
            return Err(BlobTrackError::Decoder("container does not support seeking".into()));
        }
        self.position = 0;
        Ok(())
    }

    fn frame_count(&self) -> Option<usize> {
        self.frame_count
    }

    fn info(&self) -> Option<&SourceInfo> {
        Some(&self.info)
    }
}

/// Copy an 8-bit, 3-channel BGR `Mat` into an RGB `ColorFrame`.
fn bgr_mat_to_frame(mat: &Mat) -> Result<ColorFrame> {
    if mat.typ() != CV_8UC3 {
        return Err(BlobTrackError::Decoder(format!(
            "expected 8-bit BGR frames, got Mat type {}",
            mat.typ()
        )));
    }
    let owned;
    let mat = if mat.is_continuous() {
        mat
    } else {
        owned = mat.try_clone()?;
        &owned
    };

    let h = mat.rows() as usize;
    let w = mat.cols() as usize;
    let bytes = mat.data_bytes()?;
    let data = Array3::from_shape_fn((h, w, 3), |(row, col, c)| {
        bytes[(row * w + col) * 3 + (2 - c)]
    });
    Ok(ColorFrame::new(data))
}

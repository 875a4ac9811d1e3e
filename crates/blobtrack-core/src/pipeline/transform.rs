use tracing::debug;

use crate::annotate::{annotate, horizontal_offset, MarkerStyle};
use crate::color::frame_to_hsv;
use crate::detection::{clean_mask, in_range, locate_blob, BlobEstimate, ThresholdWindow};
use crate::frame::{ColorFrame, Mask};

use super::config::PlaybackConfig;

/// Everything produced from one frame: the diagnostic mask, the blob estimate
/// and the annotated copy of the frame.
#[derive(Clone, Debug)]
pub struct FrameAnalysis {
    pub mask: Mask,
    pub blob: BlobEstimate,
    pub annotated: ColorFrame,
    /// Centroid x minus frame center x.
    pub offset_x: i64,
}

/// Frame → HSV → threshold mask → morphology cleanup, and the blob location
/// and annotation built on top of it.
#[derive(Clone, Debug)]
pub struct FrameTransformer {
    kernel_size: usize,
    style: MarkerStyle,
}

impl Default for FrameTransformer {
    fn default() -> Self {
        Self::new(&PlaybackConfig::default())
    }
}

impl FrameTransformer {
    pub fn new(config: &PlaybackConfig) -> Self {
        Self {
            kernel_size: config.kernel_size,
            style: config.marker_style(),
        }
    }

    /// Binary mask of the pixels inside `window`, after cleanup.
    pub fn mask(&self, frame: &ColorFrame, window: &ThresholdWindow) -> Mask {
        let hsv = frame_to_hsv(frame);
        let raw = in_range(&hsv, window);
        clean_mask(&raw, self.kernel_size, window.effective_iterations())
    }

    /// Full per-frame analysis. The mask is computed once and shared between
    /// the diagnostic view and the blob locator.
    pub fn analyze(&self, frame: &ColorFrame, window: &ThresholdWindow) -> FrameAnalysis {
        let mask = self.mask(frame, window);
        let blob = locate_blob(&mask);
        let annotated = annotate(frame, &blob, &self.style);
        let offset_x = horizontal_offset(frame.width(), &blob);

        debug!(
            frame = frame.metadata.frame_index,
            area = blob.area,
            cx = blob.centroid_x,
            cy = blob.centroid_y,
            radius = blob.radius,
            offset_x,
            "blob located"
        );

        FrameAnalysis {
            mask,
            blob,
            annotated,
            offset_x,
        }
    }
}

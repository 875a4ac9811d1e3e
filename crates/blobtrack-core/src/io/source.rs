use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{BlobTrackError, Result};
use crate::frame::{ColorFrame, ColorMode, SourceInfo};

use crate::consts::VIDEO_CONTAINER_EXTENSIONS;

use super::image_io::{is_image_file, list_image_sequence, load_color_image};
use super::ser::SerReader;

/// A sequential supply of color frames.
///
/// `grab` returns `Ok(None)` when no frame is available (end of stream or an
/// unopened source); callers rewind explicitly to loop.
pub trait VideoSource {
    fn grab(&mut self) -> Result<Option<ColorFrame>>;

    /// Seek back to the first frame.
    fn rewind(&mut self) -> Result<()>;

    /// Total frame count, when the container knows it.
    fn frame_count(&self) -> Option<usize>;

    fn is_opened(&self) -> bool {
        true
    }

    fn info(&self) -> Option<&SourceInfo>;
}

impl<S: VideoSource + ?Sized> VideoSource for Box<S> {
    fn grab(&mut self) -> Result<Option<ColorFrame>> {
        (**self).grab()
    }

    fn rewind(&mut self) -> Result<()> {
        (**self).rewind()
    }

    fn frame_count(&self) -> Option<usize> {
        (**self).frame_count()
    }

    fn is_opened(&self) -> bool {
        (**self).is_opened()
    }

    fn info(&self) -> Option<&SourceInfo> {
        (**self).info()
    }
}

/// Frames read from a SER file.
pub struct SerSource {
    reader: SerReader,
    info: SourceInfo,
    position: usize,
}

impl SerSource {
    pub fn open(path: &Path) -> Result<Self> {
        let reader = SerReader::open(path)?;
        let info = reader.source_info(path);
        Ok(Self {
            reader,
            info,
            position: 0,
        })
    }
}

impl VideoSource for SerSource {
    fn grab(&mut self) -> Result<Option<ColorFrame>> {
        if self.position >= self.reader.frame_count() {
            return Ok(None);
        }
        let frame = self.reader.read_frame(self.position)?;
        self.position += 1;
        Ok(Some(frame))
    }

    fn rewind(&mut self) -> Result<()> {
        self.position = 0;
        Ok(())
    }

    fn frame_count(&self) -> Option<usize> {
        Some(self.reader.frame_count())
    }

    fn info(&self) -> Option<&SourceInfo> {
        Some(&self.info)
    }
}

/// Frames read from still images: a sorted directory listing, or a single image
/// treated as a one-frame video.
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    info: SourceInfo,
    position: usize,
}

impl ImageSequenceSource {
    /// Open every image in `dir`, ordered by file name.
    pub fn open_dir(dir: &Path) -> Result<Self> {
        let paths = list_image_sequence(dir)?;
        Self::from_paths(dir, paths)
    }

    /// Open a single image as a one-frame video.
    pub fn open_file(path: &Path) -> Result<Self> {
        Self::from_paths(path, vec![path.to_path_buf()])
    }

    fn from_paths(origin: &Path, paths: Vec<PathBuf>) -> Result<Self> {
        let first = paths
            .first()
            .ok_or_else(|| BlobTrackError::EmptySequence(origin.display().to_string()))?;
        let first_frame = load_color_image(first)?;
        let info = SourceInfo {
            filename: origin.to_path_buf(),
            total_frames: paths.len(),
            width: first_frame.width() as u32,
            height: first_frame.height() as u32,
            bit_depth: 8,
            color_mode: ColorMode::RGB,
            observer: None,
            telescope: None,
            instrument: None,
        };
        Ok(Self {
            paths,
            info,
            position: 0,
        })
    }
}

impl VideoSource for ImageSequenceSource {
    fn grab(&mut self) -> Result<Option<ColorFrame>> {
        let Some(path) = self.paths.get(self.position) else {
            return Ok(None);
        };
        let mut frame = load_color_image(path)?;
        if frame.width() as u32 != self.info.width || frame.height() as u32 != self.info.height {
            return Err(BlobTrackError::InvalidDimensions {
                width: frame.width() as u32,
                height: frame.height() as u32,
            });
        }
        frame.metadata.frame_index = self.position;
        self.position += 1;
        Ok(Some(frame))
    }

    fn rewind(&mut self) -> Result<()> {
        self.position = 0;
        Ok(())
    }

    fn frame_count(&self) -> Option<usize> {
        Some(self.paths.len())
    }

    fn info(&self) -> Option<&SourceInfo> {
        Some(&self.info)
    }
}

/// Placeholder for an input that could not be opened. Never yields a frame.
pub struct UnopenedSource {
    pub path: PathBuf,
}

impl VideoSource for UnopenedSource {
    fn grab(&mut self) -> Result<Option<ColorFrame>> {
        Ok(None)
    }

    fn rewind(&mut self) -> Result<()> {
        Ok(())
    }

    fn frame_count(&self) -> Option<usize> {
        None
    }

    fn is_opened(&self) -> bool {
        false
    }

    fn info(&self) -> Option<&SourceInfo> {
        None
    }
}

/// Open a video source, choosing the reader from the path.
///
/// Directories are read as image sequences, `.ser` files through the SER reader,
/// video containers (mp4, mov, avi, ...) through OpenCV when the `video` feature
/// is enabled, and single still images as one-frame videos.
pub fn open_source(path: &Path) -> Result<Box<dyn VideoSource>> {
    if path.is_dir() {
        debug!(path = %path.display(), "opening image sequence");
        return Ok(Box::new(ImageSequenceSource::open_dir(path)?));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("ser") => Ok(Box::new(SerSource::open(path)?)),
        Some(e) if VIDEO_CONTAINER_EXTENSIONS.contains(&e) => open_container(path),
        _ if is_image_file(path) => Ok(Box::new(ImageSequenceSource::open_file(path)?)),
        _ => Err(BlobTrackError::UnsupportedFormat(path.display().to_string())),
    }
}

#[cfg(feature = "video")]
fn open_container(path: &Path) -> Result<Box<dyn VideoSource>> {
    debug!(path = %path.display(), "opening video container");
    Ok(Box::new(super::video::DecodedVideoSource::open(path)?))
}

#[cfg(not(feature = "video"))]
fn open_container(path: &Path) -> Result<Box<dyn VideoSource>> {
    Err(BlobTrackError::DecoderUnavailable(path.display().to_string()))
}

/// Like [`open_source`], but a failure is only reported: the returned
/// [`UnopenedSource`] lets playback start and stop on its first grab.
pub fn open_source_or_unopened(path: &Path) -> Box<dyn VideoSource> {
    match open_source(path) {
        Ok(source) => source,
        Err(e) => {
            warn!("Unable to open video at {}: {e}", path.display());
            Box::new(UnopenedSource {
                path: path.to_path_buf(),
            })
        }
    }
}

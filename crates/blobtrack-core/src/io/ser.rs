use std::fs::File;
use std::io::Read;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use memmap2::Mmap;
use ndarray::Array3;

use crate::consts::SER_HEADER_SIZE;
use crate::error::{BlobTrackError, Result};
use crate::frame::{ColorFrame, ColorMode, FrameMetadata, SourceInfo};

const SER_MAGIC: &[u8; 14] = b"LUCAM-RECORDER";

/// SER file header (178 bytes).
#[derive(Clone, Debug)]
pub struct SerHeader {
    pub color_id: i32,
    pub little_endian: bool,
    pub width: u32,
    pub height: u32,
    pub pixel_depth: u32,
    pub frame_count: u32,
    pub observer: String,
    pub instrument: String,
    pub telescope: String,
    pub date_time: u64,
    pub date_time_utc: u64,
}

impl SerHeader {
    /// Bytes per pixel plane (1 for 8-bit, 2 for 9-16 bit).
    pub fn bytes_per_pixel_plane(&self) -> usize {
        if self.pixel_depth <= 8 { 1 } else { 2 }
    }

    /// Number of planes per pixel (1 for mono/bayer, 3 for RGB/BGR).
    pub fn planes_per_pixel(&self) -> usize {
        match self.color_id {
            100 | 101 => 3,
            _ => 1,
        }
    }

    /// Total bytes per frame. `parse` rejects dimensions that would overflow.
    pub fn frame_byte_size(&self) -> usize {
        self.width as usize
            * self.height as usize
            * self.bytes_per_pixel_plane()
            * self.planes_per_pixel()
    }

    pub fn color_mode(&self) -> ColorMode {
        match self.color_id {
            0 => ColorMode::Mono,
            8 => ColorMode::BayerRGGB,
            9 => ColorMode::BayerGRBG,
            10 => ColorMode::BayerGBRG,
            11 => ColorMode::BayerBGGR,
            100 => ColorMode::RGB,
            101 => ColorMode::BGR,
            _ => ColorMode::Mono,
        }
    }

    /// Decode the fixed 178-byte header. Integer fields are always little-endian.
    fn parse(buf: &[u8]) -> Result<Self> {
        let mut cur = std::io::Cursor::new(buf);

        let mut magic = [0u8; 14];
        cur.read_exact(&mut magic)?;
        if &magic != SER_MAGIC {
            return Err(BlobTrackError::InvalidSer("missing LUCAM-RECORDER magic".into()));
        }

        let _lu_id = cur.read_i32::<LittleEndian>()?;
        let color_id = cur.read_i32::<LittleEndian>()?;
        let endian_flag = cur.read_i32::<LittleEndian>()?;
        let width = cur.read_i32::<LittleEndian>()?;
        let height = cur.read_i32::<LittleEndian>()?;
        let depth = cur.read_i32::<LittleEndian>()?;
        let frames = cur.read_i32::<LittleEndian>()?;
        let observer = read_text(&mut cur)?;
        let instrument = read_text(&mut cur)?;
        let telescope = read_text(&mut cur)?;
        let date_time = cur.read_u64::<LittleEndian>()?;
        let date_time_utc = cur.read_u64::<LittleEndian>()?;

        if width <= 0 || height <= 0 {
            return Err(BlobTrackError::InvalidDimensions {
                width: width.max(0) as u32,
                height: height.max(0) as u32,
            });
        }
        if !(1..=16).contains(&depth) {
            return Err(BlobTrackError::InvalidSer(format!("pixel depth {depth} not in 1..=16")));
        }
        if frames < 0 {
            return Err(BlobTrackError::InvalidSer(format!("frame count {frames} is negative")));
        }
        // Largest frame: 3 planes of 2 bytes.
        if (width as usize)
            .checked_mul(height as usize)
            .and_then(|p| p.checked_mul(6))
            .is_none()
        {
            return Err(BlobTrackError::InvalidSer(format!("{width}x{height} frame is too large")));
        }

        Ok(Self {
            color_id,
            // Flag 1 is big-endian; 0 is little-endian in practice (Siril convention).
            little_endian: endian_flag != 1,
            width: width as u32,
            height: height as u32,
            pixel_depth: depth as u32,
            frame_count: frames as u32,
            observer,
            instrument,
            telescope,
            date_time,
            date_time_utc,
        })
    }
}

/// Memory-mapped SER file reader.
pub struct SerReader {
    mmap: Mmap,
    pub header: SerHeader,
}

impl SerReader {
    /// Map a SER file and validate its header against the file length.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        let Some(head) = mmap.get(..SER_HEADER_SIZE) else {
            return Err(BlobTrackError::InvalidSer(format!(
                "{} bytes is too short for a SER header",
                mmap.len()
            )));
        };
        let header = SerHeader::parse(head)?;

        let needed = header
            .frame_byte_size()
            .checked_mul(header.frame_count as usize)
            .and_then(|n| n.checked_add(SER_HEADER_SIZE))
            .ok_or_else(|| BlobTrackError::InvalidSer("frame data size overflows".into()))?;
        if mmap.len() < needed {
            return Err(BlobTrackError::InvalidSer(format!(
                "truncated: {} frames need {needed} bytes, file has {}",
                header.frame_count,
                mmap.len()
            )));
        }

        Ok(Self { mmap, header })
    }

    pub fn frame_count(&self) -> usize {
        self.header.frame_count as usize
    }

    /// Get the raw bytes for a single frame (zero-copy from mmap).
    pub fn frame_raw(&self, index: usize) -> Result<&[u8]> {
        let count = self.frame_count();
        if index >= count {
            return Err(BlobTrackError::FrameIndexOutOfRange {
                index,
                total: count,
            });
        }
        let offset = SER_HEADER_SIZE + index * self.header.frame_byte_size();
        let end = offset + self.header.frame_byte_size();
        Ok(&self.mmap[offset..end])
    }

    /// Read a single frame as 8-bit RGB.
    ///
    /// Mono and Bayer data are shown as gray (no debayering); 16-bit samples are
    /// rescaled from the header's pixel depth.
    pub fn read_frame(&self, index: usize) -> Result<ColorFrame> {
        let raw = self.frame_raw(index)?;
        let h = self.header.height as usize;
        let w = self.header.width as usize;
        let decoder = SampleDecoder {
            bytes_per_sample: self.header.bytes_per_pixel_plane(),
            bit_depth: self.header.pixel_depth,
            little_endian: self.header.little_endian,
        };

        // Plane index for each output channel (R, G, B).
        let channel_planes: [usize; 3] = match self.header.color_mode() {
            ColorMode::RGB => [0, 1, 2],
            ColorMode::BGR => [2, 1, 0],
            _ => [0, 0, 0],
        };
        let planes = self.header.planes_per_pixel();

        let data = Array3::from_shape_fn((h, w, 3), |(row, col, c)| {
            let pixel_offset = (row * w + col) * planes;
            decoder.sample(raw, pixel_offset + channel_planes[c])
        });

        let mut frame = ColorFrame::new(data);
        frame.metadata = FrameMetadata {
            frame_index: index,
            timestamp_us: self.read_timestamp(index),
        };
        Ok(frame)
    }

    /// Read per-frame timestamp from the optional trailer.
    fn read_timestamp(&self, index: usize) -> Option<u64> {
        let trailer_offset =
            SER_HEADER_SIZE + self.header.frame_byte_size() * self.header.frame_count as usize;
        let ts_offset = trailer_offset + index * 8;
        if ts_offset + 8 <= self.mmap.len() {
            let bytes = &self.mmap[ts_offset..ts_offset + 8];
            Some(u64::from_le_bytes(bytes.try_into().ok()?))
        } else {
            None
        }
    }

    /// Build SourceInfo from the header.
    pub fn source_info(&self, path: &Path) -> SourceInfo {
        SourceInfo {
            filename: path.to_path_buf(),
            total_frames: self.frame_count(),
            width: self.header.width,
            height: self.header.height,
            bit_depth: self.header.pixel_depth as u8,
            color_mode: self.header.color_mode(),
            observer: non_empty(&self.header.observer),
            telescope: non_empty(&self.header.telescope),
            instrument: non_empty(&self.header.instrument),
        }
    }
}

/// Converts raw 8/16-bit samples to 8-bit.
struct SampleDecoder {
    bytes_per_sample: usize,
    bit_depth: u32,
    little_endian: bool,
}

impl SampleDecoder {
    /// Decode the `sample_index`-th sample of `raw`.
    fn sample(&self, raw: &[u8], sample_index: usize) -> u8 {
        let idx = sample_index * self.bytes_per_sample;
        if self.bytes_per_sample == 1 {
            return raw[idx];
        }
        let pair = [raw[idx], raw[idx + 1]];
        let val = if self.little_endian {
            u16::from_le_bytes(pair)
        } else {
            u16::from_be_bytes(pair)
        };
        let max_val = ((1u32 << self.bit_depth.clamp(9, 16)) - 1) as f32;
        ((val as f32).min(max_val) / max_val * 255.0).round() as u8
    }
}

/// Read one 40-byte, NUL-padded text field.
fn read_text(cur: &mut std::io::Cursor<&[u8]>) -> Result<String> {
    let mut field = [0u8; 40];
    cur.read_exact(&mut field)?;
    Ok(String::from_utf8_lossy(&field)
        .trim_end_matches('\0')
        .trim()
        .to_string())
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

use std::path::Path;

use image::{Rgb, RgbImage};

use blobtrack_core::error::BlobTrackError;
use blobtrack_core::io::image_io::{is_image_file, list_image_sequence, load_color_image};
use blobtrack_core::io::{open_source, open_source_or_unopened, ImageSequenceSource, VideoSource};

fn write_png(path: &Path, width: u32, height: u32, rgb: [u8; 3]) {
    RgbImage::from_pixel(width, height, Rgb(rgb)).save(path).unwrap();
}

#[test]
fn test_load_color_image_keeps_channels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");
    let mut img = RgbImage::from_pixel(3, 2, Rgb([1, 2, 3]));
    img.put_pixel(2, 1, Rgb([200, 100, 50]));
    img.save(&path).unwrap();

    let frame = load_color_image(&path).unwrap();
    assert_eq!(frame.width(), 3);
    assert_eq!(frame.height(), 2);
    assert_eq!(frame.pixel(0, 0), [1, 2, 3]);
    assert_eq!(frame.pixel(1, 2), [200, 100, 50]);
}

#[test]
fn test_is_image_file_case_insensitive() {
    assert!(is_image_file(Path::new("a/b/frame.PNG")));
    assert!(is_image_file(Path::new("frame.tiff")));
    assert!(!is_image_file(Path::new("video.ser")));
    assert!(!is_image_file(Path::new("notes")));
}

#[test]
fn test_sequence_sorted_by_name() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("b.png"), 2, 2, [20, 20, 20]);
    write_png(&dir.path().join("a.png"), 2, 2, [10, 10, 10]);
    std::fs::write(dir.path().join("readme.txt"), "ignored").unwrap();

    let paths = list_image_sequence(dir.path()).unwrap();
    assert_eq!(paths.len(), 2);
    assert!(paths[0].ends_with("a.png"));

    let mut source = ImageSequenceSource::open_dir(dir.path()).unwrap();
    assert_eq!(source.frame_count(), Some(2));
    assert_eq!(source.grab().unwrap().unwrap().pixel(0, 0), [10, 10, 10]);
    let second = source.grab().unwrap().unwrap();
    assert_eq!(second.pixel(0, 0), [20, 20, 20]);
    assert_eq!(second.metadata.frame_index, 1);
    assert!(source.grab().unwrap().is_none());
}

#[test]
fn test_empty_directory_rejected() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        ImageSequenceSource::open_dir(dir.path()),
        Err(BlobTrackError::EmptySequence(_))
    ));
}

#[test]
fn test_mismatched_frame_size_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("a.png"), 4, 4, [0, 0, 0]);
    write_png(&dir.path().join("b.png"), 5, 4, [0, 0, 0]);

    let mut source = ImageSequenceSource::open_dir(dir.path()).unwrap();
    assert!(source.grab().unwrap().is_some());
    assert!(matches!(
        source.grab(),
        Err(BlobTrackError::InvalidDimensions { width: 5, height: 4 })
    ));
}

#[test]
fn test_single_image_is_one_frame_video() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("still.png");
    write_png(&path, 6, 3, [9, 8, 7]);

    let mut source = open_source(&path).unwrap();
    assert_eq!(source.frame_count(), Some(1));
    let info = source.info().unwrap();
    assert_eq!((info.width, info.height), (6, 3));
    assert!(source.grab().unwrap().is_some());
    assert!(source.grab().unwrap().is_none());
    source.rewind().unwrap();
    assert!(source.grab().unwrap().is_some());
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clip.mkv");
    std::fs::write(&path, b"not a video").unwrap();

    assert!(matches!(
        open_source(&path),
        Err(BlobTrackError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_missing_file_gives_unopened_source() {
    let mut source = open_source_or_unopened(Path::new("/nonexistent/clip.ser"));
    assert!(!source.is_opened());
    assert_eq!(source.frame_count(), None);
    assert!(source.grab().unwrap().is_none());
}

use std::path::Path;

use blobtrack_core::error::BlobTrackError;
use blobtrack_core::io::{open_source, open_source_or_unopened};

#[cfg(not(feature = "video"))]
#[test]
fn test_container_without_decoder_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clip.MP4");
    std::fs::write(&path, b"not really a video").unwrap();

    match open_source(&path) {
        Err(BlobTrackError::DecoderUnavailable(p)) => assert!(p.ends_with("clip.MP4")),
        other => panic!("expected DecoderUnavailable, got {:?}", other.map(|_| ())),
    }
    assert!(!open_source_or_unopened(&path).is_opened());
}

#[test]
fn test_unknown_extension_stays_unsupported() {
    let result = open_source(Path::new("/definitely/not/here/clip.xyz"));
    assert!(matches!(result, Err(BlobTrackError::UnsupportedFormat(_))));
}

#[cfg(feature = "video")]
mod decoded {
    use opencv::core::{Mat, Scalar, Size, CV_8UC3};
    use opencv::prelude::*;
    use opencv::videoio::VideoWriter;

    use blobtrack_core::detection::ThresholdWindow;
    use blobtrack_core::pipeline::FrameTransformer;

    use super::*;

    const WIDTH: i32 = 64;
    const HEIGHT: i32 = 48;

    /// Write `frames` solid MJPG frames of the common in-range red. Returns false when no encoder
    /// backend is available on this machine.
    fn write_red_clip(path: &Path, frames: usize) -> bool {
        let fourcc = VideoWriter::fourcc('M', 'J', 'P', 'G').unwrap();
        let mut writer = VideoWriter::new(
            path.to_str().unwrap(),
            fourcc,
            10.0,
            Size::new(WIDTH, HEIGHT),
            true,
        )
        .unwrap();
        if !writer.is_opened().unwrap() {
            return false;
        }
        // BGR order of [255, 0, 40].
        let red =
            Mat::new_rows_cols_with_default(HEIGHT, WIDTH, CV_8UC3, Scalar::new(40.0, 0.0, 255.0, 0.0))
                .unwrap();
        for _ in 0..frames {
            writer.write(&red).unwrap();
        }
        writer.release().unwrap();
        true
    }

    #[test]
    fn test_decodes_generated_clip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.avi");
        if !write_red_clip(&path, 3) {
            eprintln!("no MJPG encoder available, skipping");
            return;
        }

        let mut source = open_source(&path).unwrap();
        assert!(source.is_opened());
        assert_eq!(source.frame_count(), Some(3));
        let info = source.info().unwrap();
        assert_eq!((info.width, info.height), (WIDTH as u32, HEIGHT as u32));

        let first = source.grab().unwrap().unwrap();
        assert_eq!(first.metadata.frame_index, 0);
        assert_eq!((first.width(), first.height()), (64, 48));
        let [r, g, b] = first.pixel(24, 32);
        assert!(r > 200 && g < 60 && b < 100, "expected red, got {:?}", [r, g, b]);

        let analysis = FrameTransformer::default().analyze(&first, &ThresholdWindow::default());
        assert!(analysis.blob.area > 0);

        assert!(source.grab().unwrap().is_some());
        assert!(source.grab().unwrap().is_some());
        assert!(source.grab().unwrap().is_none());

        source.rewind().unwrap();
        let again = source.grab().unwrap().unwrap();
        assert_eq!(again.metadata.frame_index, 0);
    }

    #[test]
    fn test_garbage_container_does_not_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.mp4");
        std::fs::write(&path, b"not really a video").unwrap();

        assert!(open_source(&path).is_err());
        assert!(!open_source_or_unopened(&path).is_opened());
    }
}

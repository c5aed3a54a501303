//! Encode images to a video file and stream them back.
//!
//! Tests skip when the local FFmpeg build lacks the MPEG-4 encoder.

use std::path::Path;

use framesift::{
    ColorMode, FrameStream, FramesiftError, StreamOptions, VideoEncoder, VideoEncoderOptions,
    images_to_video,
};
use image::{DynamicImage, Rgb, RgbImage};

const WIDTH: u32 = 64;
const HEIGHT: u32 = 48;

/// A horizontal gradient that shifts with `index`.
fn gradient_frames(count: u32) -> Vec<DynamicImage> {
    (0..count)
        .map(|index| {
            DynamicImage::ImageRgb8(RgbImage::from_fn(WIDTH, HEIGHT, |x, y| {
                Rgb([(x * 4 + index) as u8, (y * 5) as u8, 128])
            }))
        })
        .collect()
}

/// Write `frames` to `path`, or return `false` if no encoder is available.
fn write_or_skip(path: &Path, frames: &[DynamicImage]) -> bool {
    match images_to_video(frames, path, 12) {
        Ok(()) => true,
        Err(FramesiftError::VideoEncode(message)) => {
            eprintln!("Skipping: MPEG-4 encoder not available ({message})");
            false
        }
        Err(error) => panic!("write video: {error}"),
    }
}

#[test]
fn round_trip_preserves_count_and_size() {
    let directory = tempfile::tempdir().expect("temp dir");
    let path = directory.path().join("round_trip.mp4");
    if !write_or_skip(&path, &gradient_frames(10)) {
        return;
    }

    let frames: Vec<_> = FrameStream::open(&path, StreamOptions::new())
        .expect("open written video")
        .collect::<Result<_, _>>()
        .expect("decode");

    assert_eq!(frames.len(), 10);
    for frame in &frames {
        assert_eq!((frame.width(), frame.height()), (WIDTH, HEIGHT));
        assert_eq!(frame.channels(), 3);
    }
}

#[test]
fn skip_and_limit_over_a_real_video() {
    let directory = tempfile::tempdir().expect("temp dir");
    let path = directory.path().join("skip.mp4");
    if !write_or_skip(&path, &gradient_frames(10)) {
        return;
    }

    let options = StreamOptions::new().with_frame_skip(2).with_frame_limit(3);
    let indices: Vec<u64> = FrameStream::open(&path, options)
        .expect("open")
        .map(|frame| frame.expect("decode").index())
        .collect();
    assert_eq!(indices, vec![2, 4, 6]);
}

#[test]
fn grayscale_over_a_real_video() {
    let directory = tempfile::tempdir().expect("temp dir");
    let path = directory.path().join("gray.mp4");
    if !write_or_skip(&path, &gradient_frames(4)) {
        return;
    }

    let options = StreamOptions::new()
        .with_color_mode(ColorMode::Grayscale)
        .with_end_index(3);
    let frames: Vec<_> = FrameStream::open(&path, options)
        .expect("open")
        .collect::<Result<_, _>>()
        .expect("decode");

    assert_eq!(frames.len(), 2);
    assert!(frames.iter().all(|frame| frame.channels() == 1));
    assert!(
        frames
            .iter()
            .all(|frame| matches!(frame.image(), DynamicImage::ImageLuma8(_)))
    );
}

#[test]
fn restart_does_not_rewind_a_video_file() {
    let directory = tempfile::tempdir().expect("temp dir");
    let path = directory.path().join("restart.mp4");
    if !write_or_skip(&path, &gradient_frames(6)) {
        return;
    }

    let mut stream =
        FrameStream::open(&path, StreamOptions::new().with_frame_limit(2)).expect("open");
    assert_eq!(stream.by_ref().count(), 2);

    stream.restart();
    assert_eq!(stream.yielded_count(), 0);
    // Three raw frames were consumed by the first pass (two yielded, one
    // read to notice the limit), so at most two remain.
    assert_eq!(stream.by_ref().count(), 2);
    stream.restart();
    assert_eq!(stream.by_ref().count(), 0);
}

#[test]
fn encoder_options_are_applied() {
    let directory = tempfile::tempdir().expect("temp dir");
    let path = directory.path().join("options.avi");
    let options = VideoEncoderOptions::default().fps(5).bitrate(400_000);

    match VideoEncoder::new(options).write(&path, &gradient_frames(3)) {
        Ok(()) => {}
        Err(FramesiftError::VideoEncode(message)) => {
            eprintln!("Skipping: MPEG-4 encoder not available ({message})");
            return;
        }
        Err(error) => panic!("write video: {error}"),
    }

    ffmpeg_next::init().expect("init FFmpeg");
    let input = ffmpeg_next::format::input(&path).expect("reopen written video");
    let stream = input
        .streams()
        .best(ffmpeg_next::media::Type::Video)
        .expect("video stream");
    let rate = f64::from(stream.avg_frame_rate());
    assert!((rate - 5.0).abs() < 1e-6, "frame rate was {rate}");
}

#[test]
fn truncated_video_ends_without_hanging() {
    let directory = tempfile::tempdir().expect("temp dir");
    let path = directory.path().join("truncated.avi");
    if !write_or_skip(&path, &gradient_frames(10)) {
        return;
    }
    let full = std::fs::read(&path).expect("read written video");
    std::fs::write(&path, &full[..full.len() / 2]).expect("truncate");

    let stream = match FrameStream::open(&path, StreamOptions::new()) {
        Ok(stream) => stream,
        Err(FramesiftError::SourceOpen { .. }) => return,
        Err(error) => panic!("unexpected open error: {error}"),
    };

    let results: Vec<_> = stream.collect();
    assert!(results.len() <= 10);
    // A decode error, if any, is the last item of the pass.
    if let Some(position) = results.iter().position(Result::is_err) {
        assert_eq!(position, results.len() - 1);
        assert!(matches!(
            results[position],
            Err(FramesiftError::VideoDecode(_) | FramesiftError::Ffmpeg(_))
        ));
    }
}

//! FrameStream selection tests over in-memory sources.

use framesift::{
    ColorMode, FrameSource, FrameStream, FramesiftError, MemorySource, StreamOptions,
};
use image::{DynamicImage, Rgb, RgbImage};

/// `count` 4x2 frames; raw frame `n` (1-based) has every pixel set to `n`.
fn numbered_source(count: u8) -> MemorySource {
    MemorySource::new((1..=count).map(|n| {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 2, Rgb([n, n, n])))
    }))
}

/// Raw frame numbers of the yielded frames, read back from pixel values.
fn yielded_numbers(stream: &mut FrameStream<MemorySource>) -> Vec<u8> {
    stream
        .map(|frame| frame.expect("in-memory frames never fail").image().to_rgb8()[(0, 0)][0])
        .collect()
}

fn indices(stream: FrameStream<MemorySource>) -> Vec<u64> {
    stream.map(|frame| frame.expect("decode").index()).collect()
}

// ── construction ───────────────────────────────────────────────────

#[test]
fn zero_frame_skip_is_rejected() {
    let result = FrameStream::from_source(
        numbered_source(3),
        StreamOptions::new().with_frame_skip(0),
    );
    match result {
        Err(FramesiftError::InvalidConfig(message)) => {
            assert!(message.contains("frame_skip"), "{message}");
        }
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

#[test]
fn default_options() {
    let options = StreamOptions::default();
    assert_eq!(options.color_mode, ColorMode::Color);
    assert_eq!(options.frame_limit, None);
    assert_eq!(options.frame_skip, 1);
    assert_eq!(options.start_index, 0);
    assert_eq!(options.end_index, None);
}

// ── selection ──────────────────────────────────────────────────────

#[test]
fn default_options_yield_every_frame() {
    let stream = FrameStream::from_source(numbered_source(10), StreamOptions::new())
        .expect("valid options");
    assert_eq!(indices(stream), (1..=10).collect::<Vec<_>>());
}

#[test]
fn skip_two_with_limit_three() {
    let options = StreamOptions::new()
        .with_frame_skip(2)
        .with_start_index(0)
        .with_frame_limit(3);
    let mut stream = FrameStream::from_source(numbered_source(10), options).expect("valid");

    assert_eq!(yielded_numbers(&mut stream), vec![2, 4, 6]);
    assert_eq!(stream.yielded_count(), 3);
    // The limit is noticed on the read after the third yield.
    assert_eq!(stream.decoded_count(), 7);
}

#[test]
fn end_index_is_exclusive() {
    let options = StreamOptions::new().with_end_index(5);
    let stream = FrameStream::from_source(numbered_source(10), options).expect("valid");
    assert_eq!(indices(stream), vec![1, 2, 3, 4]);
}

#[test]
fn start_index_compares_the_decoded_index() {
    let options = StreamOptions::new().with_start_index(5);
    let stream = FrameStream::from_source(numbered_source(10), options).expect("valid");
    assert_eq!(indices(stream), vec![5, 6, 7, 8, 9, 10]);
}

#[test]
fn start_index_combines_with_skip_modulus() {
    // 5 is the first eligible index but fails `5 % 3`, so 6 comes first.
    let options = StreamOptions::new().with_start_index(5).with_frame_skip(3);
    let stream = FrameStream::from_source(numbered_source(12), options).expect("valid");
    assert_eq!(indices(stream), vec![6, 9, 12]);
}

#[test]
fn start_skip_end_and_limit_together() {
    let options = StreamOptions::new()
        .with_start_index(3)
        .with_frame_skip(2)
        .with_end_index(20)
        .with_frame_limit(4);
    let stream = FrameStream::from_source(numbered_source(30), options).expect("valid");
    assert_eq!(indices(stream), vec![4, 6, 8, 10]);
}

#[test]
fn zero_frame_limit_means_no_limit() {
    let options = StreamOptions::new().with_frame_limit(0);
    let stream = FrameStream::from_source(numbered_source(5), options).expect("valid");
    assert_eq!(indices(stream), vec![1, 2, 3, 4, 5]);
}

#[test]
fn zero_frame_limit_still_honours_skip_and_end() {
    let options = StreamOptions::new()
        .with_frame_limit(0)
        .with_frame_skip(2)
        .with_end_index(8);
    let stream = FrameStream::from_source(numbered_source(10), options).expect("valid");
    assert_eq!(indices(stream), vec![2, 4, 6]);
}

#[test]
fn exhausted_source_ends_the_stream() {
    let options = StreamOptions::new().with_frame_skip(4);
    let mut stream = FrameStream::from_source(numbered_source(10), options).expect("valid");
    assert_eq!(yielded_numbers(&mut stream), vec![4, 8]);
    assert_eq!(stream.source().remaining(), 0);
}

#[test]
fn start_index_beyond_the_source_yields_nothing() {
    let options = StreamOptions::new().with_start_index(1_000_000_000);
    let stream = FrameStream::from_source(numbered_source(10), options).expect("valid");
    assert!(indices(stream).is_empty());
}

#[test]
fn stream_is_fused_after_ending() {
    let mut stream =
        FrameStream::from_source(numbered_source(2), StreamOptions::new()).expect("valid");
    assert_eq!(stream.by_ref().count(), 2);
    assert!(stream.next().is_none());
    assert!(stream.next().is_none());
}

// ── colour conversion ──────────────────────────────────────────────

#[test]
fn color_mode_yields_three_channels() {
    let mut stream =
        FrameStream::from_source(numbered_source(1), StreamOptions::new()).expect("valid");
    let frame = stream.next().expect("one frame").expect("decode");
    assert_eq!(frame.channels(), 3);
    assert_eq!((frame.width(), frame.height()), (4, 2));
    assert!(matches!(frame.image(), DynamicImage::ImageRgb8(_)));
}

#[test]
fn grayscale_mode_yields_one_channel() {
    let options = StreamOptions::new().with_color_mode(ColorMode::Grayscale);
    let mut stream = FrameStream::from_source(numbered_source(3), options).expect("valid");
    for frame in stream.by_ref() {
        let frame = frame.expect("decode");
        assert_eq!(frame.channels(), 1);
        assert_eq!(frame.color_mode(), ColorMode::Grayscale);
        let DynamicImage::ImageLuma8(gray) = frame.into_image() else {
            panic!("expected a luma image");
        };
        assert_eq!(gray.dimensions(), (4, 2));
    }
    assert_eq!(stream.yielded_count(), 3);
}

// ── passes ─────────────────────────────────────────────────────────

#[test]
fn restart_resets_counters_but_not_the_source() {
    let options = StreamOptions::new().with_frame_limit(3);
    let mut stream = FrameStream::from_source(numbered_source(10), options).expect("valid");

    assert_eq!(yielded_numbers(&mut stream), vec![1, 2, 3]);
    // Frame 4 was read to notice the limit and is gone.
    assert_eq!(stream.source().remaining(), 6);

    stream.restart();
    assert_eq!(stream.decoded_count(), 0);
    assert_eq!(stream.yielded_count(), 0);

    // The second pass picks up at raw frame 5 but counts from 1 again.
    let second: Vec<_> = stream
        .by_ref()
        .map(|frame| frame.expect("decode"))
        .map(|frame| (frame.index(), frame.image().to_rgb8()[(0, 0)][0]))
        .collect();
    assert_eq!(second, vec![(1, 5), (2, 6), (3, 7)]);
}

// ── failures ───────────────────────────────────────────────────────

#[test]
fn read_failure_is_reported_once_then_the_stream_ends() {
    let source = numbered_source(10).failing_at(3);
    let mut stream = FrameStream::from_source(source, StreamOptions::new()).expect("valid");

    assert!(stream.next().expect("frame 1").is_ok());
    assert!(stream.next().expect("frame 2").is_ok());
    let error = stream.next().expect("an error").expect_err("read 3 fails");
    assert!(matches!(error, FramesiftError::VideoDecode(_)), "{error}");
    assert!(error.to_string().contains("read 3"), "{error}");
    assert!(stream.next().is_none());
    assert_eq!(stream.yielded_count(), 2);
}

#[test]
fn read_failure_while_skipping_is_still_reported() {
    let source = numbered_source(10).failing_at(3);
    let options = StreamOptions::new().with_frame_skip(5);
    let mut stream = FrameStream::from_source(source, options).expect("valid");

    assert!(matches!(
        stream.next(),
        Some(Err(FramesiftError::VideoDecode(_)))
    ));
    assert!(stream.next().is_none());
}

#[test]
fn failing_source_does_not_consume_a_frame_on_the_failed_read() {
    let mut source = numbered_source(4).failing_at(2);
    assert!(matches!(source.read_raw(), Ok(Some(_))));
    assert!(source.read_raw().is_err());
    assert_eq!(source.remaining(), 3);
    assert!(matches!(source.read_raw(), Ok(Some(_))));
}

//! Video encoder: turn a sequence of images back into a video file.
//!
//! [`VideoEncoder`] encodes same-sized [`DynamicImage`] values into a video
//! container (MP4, MKV, AVI, ...) using FFmpeg. The frame size is taken from
//! the first image; every other image must match it.
//!
//! # Example
//!
//! ```no_run
//! use framesift::{FrameStream, FramesiftError, StreamOptions, VideoEncoder, VideoEncoderOptions};
//!
//! let frames = FrameStream::open("input.mp4", StreamOptions::new().with_frame_skip(4))?
//!     .map(|frame| frame.map(|frame| frame.into_image()))
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! VideoEncoder::new(VideoEncoderOptions::default().fps(6)).write("timelapse.mp4", &frames)?;
//! # Ok::<(), FramesiftError>(())
//! ```

use std::path::Path;

use ffmpeg_next::codec::Id;
use ffmpeg_next::codec::context::Context as CodecContext;
use ffmpeg_next::encoder::Video as OpenedVideoEncoder;
use ffmpeg_next::format::context::Output;
use ffmpeg_next::format::{Flags as FormatFlags, Pixel};
use ffmpeg_next::frame::Video as VideoFrame;
use ffmpeg_next::software::scaling::{Context as ScalingContext, Flags as ScalingFlags};
use ffmpeg_next::{Packet, Rational};
use image::DynamicImage;

use crate::error::FramesiftError;

/// Options for the video encoder.
#[derive(Debug, Clone)]
#[must_use]
pub struct VideoEncoderOptions {
    /// Frames per second of the output (default: 12).
    pub fps: u32,
    /// Codec to use. Default is MPEG-4 Part 2 (`mp4v`).
    pub codec: VideoCodec,
    /// Target bitrate in bits per second. `None` leaves the encoder default.
    pub bitrate: Option<usize>,
}

impl Default for VideoEncoderOptions {
    fn default() -> Self {
        Self {
            fps: 12,
            codec: VideoCodec::Mpeg4,
            bitrate: None,
        }
    }
}

impl VideoEncoderOptions {
    /// Set the frame rate. Clamped to a minimum of 1.
    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = fps.max(1);
        self
    }

    /// Set the codec.
    pub fn codec(mut self, codec: VideoCodec) -> Self {
        self.codec = codec;
        self
    }

    /// Set the target bitrate in bits per second.
    pub fn bitrate(mut self, bitrate: usize) -> Self {
        self.bitrate = Some(bitrate);
        self
    }
}

/// Supported output video codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoCodec {
    /// MPEG-4 Part 2, the `mp4v` FourCC.
    #[default]
    Mpeg4,
    /// H.264 / AVC.
    H264,
    /// H.265 / HEVC.
    H265,
}

impl VideoCodec {
    fn to_codec_id(self) -> Id {
        match self {
            VideoCodec::Mpeg4 => Id::MPEG4,
            VideoCodec::H264 => Id::H264,
            VideoCodec::H265 => Id::HEVC,
        }
    }
}

/// Encodes a sequence of images into a video file.
#[derive(Debug, Clone)]
pub struct VideoEncoder {
    options: VideoEncoderOptions,
}

impl VideoEncoder {
    /// Create a new video encoder with the given options.
    pub fn new(options: VideoEncoderOptions) -> Self {
        Self { options }
    }

    /// Encode `frames` into `path`. The container is inferred from the
    /// file extension.
    ///
    /// All frames are checked against the first frame's size before the
    /// output file is created. Encoder and muxer are released on every
    /// return path.
    ///
    /// # Errors
    ///
    /// - [`FramesiftError::VideoWrite`] if `frames` is empty or on muxing
    ///   and I/O failures.
    /// - [`FramesiftError::ShapeMismatch`] if a frame differs in size from
    ///   the first.
    /// - [`FramesiftError::VideoEncode`] if the codec is unavailable or
    ///   rejects a frame.
    pub fn write<P: AsRef<Path>>(
        &self,
        path: P,
        frames: &[DynamicImage],
    ) -> Result<(), FramesiftError> {
        let path = path.as_ref();
        log::info!(
            "Writing {} frames to {:?} (codec={:?}, fps={})",
            frames.len(),
            path,
            self.options.codec,
            self.options.fps,
        );

        let (width, height) = check_frame_sizes(frames)?;
        let fps = encoder_frame_rate(self.options.fps)?;

        ffmpeg_next::init().map_err(|error| {
            FramesiftError::VideoEncode(format!("FFmpeg initialisation failed: {error}"))
        })?;

        let encoder_time_base = Rational::new(1, fps);
        let codec_id = self.options.codec.to_codec_id();
        let target_pixel = Pixel::YUV420P;

        let mut output = ffmpeg_next::format::output(path)
            .map_err(|error| FramesiftError::VideoWrite(format!("cannot open output: {error}")))?;

        let needs_global_header = output.format().flags().contains(FormatFlags::GLOBAL_HEADER);

        let encoder_codec = ffmpeg_next::encoder::find(codec_id).ok_or_else(|| {
            FramesiftError::VideoEncode(format!("codec {codec_id:?} not available"))
        })?;

        let mut stream = output
            .add_stream(encoder_codec)
            .map_err(|error| FramesiftError::VideoWrite(format!("cannot add stream: {error}")))?;
        let stream_index = stream.index();

        let mut encoder = CodecContext::from_parameters(stream.parameters())
            .and_then(|context| context.encoder().video())
            .map_err(|error| {
                FramesiftError::VideoEncode(format!("cannot create video encoder: {error}"))
            })?;

        encoder.set_width(width);
        encoder.set_height(height);
        encoder.set_format(target_pixel);
        encoder.set_time_base(encoder_time_base);
        encoder.set_frame_rate(Some(Rational::new(fps, 1)));
        if let Some(bitrate) = self.options.bitrate {
            encoder.set_bit_rate(bitrate);
        }

        if needs_global_header {
            // SAFETY: the context is exclusively owned and not yet opened.
            unsafe {
                (*encoder.as_mut_ptr()).flags |=
                    ffmpeg_sys_next::AV_CODEC_FLAG_GLOBAL_HEADER as i32;
            }
        }

        let mut opened_encoder = encoder
            .open_as(encoder_codec)
            .map_err(|error| FramesiftError::VideoEncode(format!("cannot open encoder: {error}")))?;
        stream.set_parameters(&opened_encoder);

        output
            .write_header()
            .map_err(|error| FramesiftError::VideoWrite(format!("cannot write header: {error}")))?;

        // The muxer may adjust the stream time base while writing the header.
        let stream_time_base = output
            .stream(stream_index)
            .map(|stream| stream.time_base())
            .ok_or_else(|| FramesiftError::VideoWrite("output stream disappeared".to_string()))?;

        let mut scaler = ScalingContext::get(
            Pixel::RGB24,
            width,
            height,
            target_pixel,
            width,
            height,
            ScalingFlags::BILINEAR,
        )
        .map_err(|error| FramesiftError::VideoWrite(format!("cannot create scaler: {error}")))?;

        let mut muxer = PacketMuxer {
            output: &mut output,
            stream_index,
            encoder_time_base,
            stream_time_base,
        };

        for (frame_index, image) in frames.iter().enumerate() {
            let rgb = image.to_rgb8();
            let mut source_frame = VideoFrame::new(Pixel::RGB24, width, height);
            crate::utilities::buffer_to_frame(rgb.as_raw(), &mut source_frame, width, 3);

            let mut encoded_frame = VideoFrame::empty();
            scaler
                .run(&source_frame, &mut encoded_frame)
                .map_err(|error| FramesiftError::VideoWrite(format!("scaling failed: {error}")))?;
            encoded_frame.set_pts(Some(frame_index as i64));

            opened_encoder.send_frame(&encoded_frame).map_err(|error| {
                FramesiftError::VideoEncode(format!("send_frame failed: {error}"))
            })?;
            muxer.drain(&mut opened_encoder)?;
        }

        opened_encoder
            .send_eof()
            .map_err(|error| FramesiftError::VideoEncode(format!("send_eof failed: {error}")))?;
        muxer.drain(&mut opened_encoder)?;

        output
            .write_trailer()
            .map_err(|error| FramesiftError::VideoWrite(format!("cannot write trailer: {error}")))?;

        log::debug!("Finished writing {}", path.display());
        Ok(())
    }
}

/// Encode `images` into `path` at `fps` frames per second with the
/// default codec.
///
/// # Errors
///
/// Same as [`VideoEncoder::write`].
pub fn images_to_video<P: AsRef<Path>>(
    images: &[DynamicImage],
    path: P,
    fps: u32,
) -> Result<(), FramesiftError> {
    VideoEncoder::new(VideoEncoderOptions::default().fps(fps)).write(path, images)
}

/// Return the common `(width, height)` of `frames`.
fn check_frame_sizes(frames: &[DynamicImage]) -> Result<(u32, u32), FramesiftError> {
    let first = frames
        .first()
        .ok_or_else(|| FramesiftError::VideoWrite("no frames to write".to_string()))?;
    let expected = (first.width(), first.height());

    match frames
        .iter()
        .enumerate()
        .find(|(_, frame)| (frame.width(), frame.height()) != expected)
    {
        Some((index, frame)) => Err(FramesiftError::ShapeMismatch {
            index,
            expected,
            found: (frame.width(), frame.height()),
        }),
        None => Ok(expected),
    }
}

/// Frame rate as FFmpeg's signed rational component. Zero is raised to one.
fn encoder_frame_rate(fps: u32) -> Result<i32, FramesiftError> {
    i32::try_from(fps.max(1)).map_err(|_| {
        FramesiftError::VideoEncode(format!("frame rate {fps} is too large for the encoder"))
    })
}

/// Moves encoded packets from an encoder into the output container.
struct PacketMuxer<'a> {
    output: &'a mut Output,
    stream_index: usize,
    encoder_time_base: Rational,
    stream_time_base: Rational,
}

impl PacketMuxer<'_> {
    fn drain(&mut self, encoder: &mut OpenedVideoEncoder) -> Result<(), FramesiftError> {
        let mut packet = Packet::empty();
        while encoder.receive_packet(&mut packet).is_ok() {
            packet.set_stream(self.stream_index);
            packet.rescale_ts(self.encoder_time_base, self.stream_time_base);
            packet.write_interleaved(&mut *self.output).map_err(|error| {
                FramesiftError::VideoWrite(format!("write packet failed: {error}"))
            })?;
        }
        Ok(())
    }
}

//! Raw frame sources.
//!
//! A [`FrameSource`] is the narrow boundary between a
//! [`FrameStream`](crate::FrameStream) and whatever produces raw frames.
//! The stream pulls raw frames one at a time and only asks the source to
//! colour-convert the frames it actually yields, so discarded frames never
//! pay for conversion.
//!
//! Two sources ship with the crate:
//!
//! - [`VideoFileSource`] demuxes and decodes a video file through FFmpeg.
//! - [`MemorySource`] replays images that are already in memory.

use std::{
    collections::VecDeque,
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
};

use ffmpeg_next::{
    Error as FfmpegError, Packet,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    error::EAGAIN,
    format::context::Input,
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::{DynamicImage, GrayImage, RgbImage};

use crate::configuration::ColorMode;
use crate::error::FramesiftError;

/// A pull-based producer of raw frames.
///
/// `read_raw` returns `Ok(None)` once the source is exhausted; calling it
/// again after that must keep returning `Ok(None)`.
pub trait FrameSource {
    /// The undecorated frame type produced by this source.
    type Raw;

    /// Pull the next raw frame, or `None` when no frames remain.
    fn read_raw(&mut self) -> Result<Option<Self::Raw>, FramesiftError>;

    /// Convert a raw frame into an image in the requested colour space.
    fn convert(&mut self, raw: Self::Raw, mode: ColorMode)
    -> Result<DynamicImage, FramesiftError>;
}

/// FFmpeg-backed source reading the best video stream of a file.
///
/// The demuxer and decoder are owned by this value and released when it
/// is dropped. The source cannot be rewound: once a frame has been read it
/// will not be produced again.
pub struct VideoFileSource {
    input_context: Input,
    decoder: VideoDecoder,
    video_stream_index: usize,
    scaler: Option<ScalingContext>,
    eof_sent: bool,
    path: PathBuf,
}

impl Debug for VideoFileSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoFileSource")
            .field("path", &self.path)
            .field("video_stream_index", &self.video_stream_index)
            .field("width", &self.decoder.width())
            .field("height", &self.decoder.height())
            .field("eof_sent", &self.eof_sent)
            .finish_non_exhaustive()
    }
}

impl VideoFileSource {
    /// Open a video file and prepare a decoder for its best video stream.
    ///
    /// # Errors
    ///
    /// Returns [`FramesiftError::SourceOpen`] if FFmpeg cannot open the file
    /// or build a decoder, and [`FramesiftError::NoVideoStream`] if the
    /// container holds no video.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FramesiftError> {
        let path = path.as_ref().to_path_buf();
        log::debug!("Opening video source: {}", path.display());

        ffmpeg_next::init().map_err(|error| FramesiftError::SourceOpen {
            path: path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| FramesiftError::SourceOpen {
                path: path.clone(),
                reason: error.to_string(),
            })?;

        let stream = input_context
            .streams()
            .best(Type::Video)
            .ok_or(FramesiftError::NoVideoStream)?;
        let video_stream_index = stream.index();

        let decoder = CodecContext::from_parameters(stream.parameters())
            .and_then(|context| context.decoder().video())
            .map_err(|error| FramesiftError::SourceOpen {
                path: path.clone(),
                reason: format!("cannot open video decoder: {error}"),
            })?;

        log::debug!(
            "Video stream {} ready ({}x{}, {:?})",
            video_stream_index,
            decoder.width(),
            decoder.height(),
            decoder.format()
        );

        Ok(Self {
            input_context,
            decoder,
            video_stream_index,
            scaler: None,
            eof_sent: false,
            path,
        })
    }

    /// Path the source was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return a scaler from the raw frame's layout to `mode`, rebuilding the
    /// cached one if the stream changed size or format.
    fn scaler_for(
        &mut self,
        raw: &VideoFrame,
        mode: ColorMode,
    ) -> Result<&mut ScalingContext, FramesiftError> {
        let target = mode.to_ffmpeg_pixel();
        let reusable = self.scaler.as_ref().is_some_and(|scaler| {
            let input = scaler.input();
            input.format == raw.format()
                && input.width == raw.width()
                && input.height == raw.height()
                && scaler.output().format == target
        });

        if !reusable {
            let scaler = ScalingContext::get(
                raw.format(),
                raw.width(),
                raw.height(),
                target,
                raw.width(),
                raw.height(),
                ScalingFlags::BILINEAR,
            )?;
            self.scaler = Some(scaler);
        }

        self.scaler
            .as_mut()
            .ok_or_else(|| FramesiftError::VideoDecode("scaler unavailable".to_string()))
    }
}

impl FrameSource for VideoFileSource {
    type Raw = VideoFrame;

    fn read_raw(&mut self) -> Result<Option<VideoFrame>, FramesiftError> {
        loop {
            let mut decoded = VideoFrame::empty();
            match self.decoder.receive_frame(&mut decoded) {
                Ok(()) => return Ok(Some(decoded)),
                // Decoder wants more input, or has been fully drained.
                Err(FfmpegError::Other { errno }) if errno == EAGAIN => {}
                Err(FfmpegError::Eof) => {}
                Err(error) => {
                    return Err(FramesiftError::VideoDecode(format!(
                        "receive_frame failed on {}: {error}",
                        self.path.display()
                    )));
                }
            }

            // Decoder is drained and no more packets remain.
            if self.eof_sent {
                return Ok(None);
            }

            let mut packet = Packet::empty();
            match packet.read(&mut self.input_context) {
                Ok(()) => {
                    if packet.stream() == self.video_stream_index {
                        self.decoder.send_packet(&packet).map_err(|error| {
                            FramesiftError::VideoDecode(format!("send_packet failed: {error}"))
                        })?;
                    }
                }
                Err(FfmpegError::Eof) => {
                    self.decoder.send_eof().map_err(|error| {
                        FramesiftError::VideoDecode(format!("send_eof failed: {error}"))
                    })?;
                    self.eof_sent = true;
                }
                Err(error) => {
                    return Err(FramesiftError::VideoDecode(format!(
                        "reading {} failed: {error}",
                        self.path.display()
                    )));
                }
            }
        }
    }

    fn convert(
        &mut self,
        raw: VideoFrame,
        mode: ColorMode,
    ) -> Result<DynamicImage, FramesiftError> {
        let (width, height) = (raw.width(), raw.height());
        let mut scaled = VideoFrame::empty();
        self.scaler_for(&raw, mode)?.run(&raw, &mut scaled)?;

        let buffer = crate::utilities::frame_to_buffer(
            &scaled,
            width,
            height,
            mode.channels() as usize,
        );

        match mode {
            ColorMode::Color => RgbImage::from_raw(width, height, buffer)
                .map(DynamicImage::ImageRgb8)
                .ok_or_else(|| {
                    FramesiftError::VideoDecode(
                        "Failed to construct RGB image from decoded frame data".to_string(),
                    )
                }),
            ColorMode::Grayscale => GrayImage::from_raw(width, height, buffer)
                .map(DynamicImage::ImageLuma8)
                .ok_or_else(|| {
                    FramesiftError::VideoDecode(
                        "Failed to construct grayscale image from decoded frame data".to_string(),
                    )
                }),
        }
    }
}

/// A source that replays in-memory images in order.
///
/// Useful for applying the same skip/limit/range selection to frames that
/// have already been decoded, and for exercising streams without a video
/// file.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    frames: VecDeque<DynamicImage>,
    reads: u64,
    fail_on_read: Option<u64>,
}

impl MemorySource {
    /// Create a source yielding `frames` front to back.
    pub fn new<I>(frames: I) -> Self
    where
        I: IntoIterator<Item = DynamicImage>,
    {
        Self {
            frames: frames.into_iter().collect(),
            reads: 0,
            fail_on_read: None,
        }
    }

    /// Make the `read`-th call to [`read_raw`](FrameSource::read_raw)
    /// (1-based) fail with [`FramesiftError::VideoDecode`], the way a
    /// corrupt packet would. The failed read consumes no frame.
    #[must_use]
    pub fn failing_at(mut self, read: u64) -> Self {
        self.fail_on_read = Some(read);
        self
    }

    /// Number of frames not yet read.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for MemorySource {
    type Raw = DynamicImage;

    fn read_raw(&mut self) -> Result<Option<DynamicImage>, FramesiftError> {
        self.reads += 1;
        if self.fail_on_read == Some(self.reads) {
            return Err(FramesiftError::VideoDecode(format!(
                "in-memory source failed on read {}",
                self.reads
            )));
        }
        Ok(self.frames.pop_front())
    }

    fn convert(
        &mut self,
        raw: DynamicImage,
        mode: ColorMode,
    ) -> Result<DynamicImage, FramesiftError> {
        Ok(match mode {
            ColorMode::Color => DynamicImage::ImageRgb8(raw.into_rgb8()),
            ColorMode::Grayscale => DynamicImage::ImageLuma8(raw.into_luma8()),
        })
    }
}

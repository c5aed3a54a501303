//! Frame stream configuration.
//!
//! [`StreamOptions`] is a builder describing which decoded frames a
//! [`FrameStream`](crate::FrameStream) hands back and in which colour
//! space. Options are fixed once the stream is constructed.
//!
//! # Example
//!
//! ```
//! use framesift::{ColorMode, StreamOptions};
//!
//! // Every 5th frame, grayscale, at most 100 of them, starting at frame 30.
//! let options = StreamOptions::new()
//!     .with_color_mode(ColorMode::Grayscale)
//!     .with_frame_skip(5)
//!     .with_frame_limit(100)
//!     .with_start_index(30);
//! assert!(options.validate().is_ok());
//! ```

use ffmpeg_next::format::Pixel;

use crate::error::FramesiftError;

/// Colour space of the frames yielded by a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMode {
    /// 8-bit RGB, three channels. This is the default.
    #[default]
    Color,
    /// 8-bit luma, one channel.
    Grayscale,
}

impl ColorMode {
    /// Number of channels in a frame of this mode.
    pub fn channels(self) -> u8 {
        match self {
            ColorMode::Color => 3,
            ColorMode::Grayscale => 1,
        }
    }

    /// Map to the FFmpeg pixel format the decoder output is scaled into.
    pub(crate) fn to_ffmpeg_pixel(self) -> Pixel {
        match self {
            ColorMode::Color => Pixel::RGB24,
            ColorMode::Grayscale => Pixel::GRAY8,
        }
    }
}

/// Selection and conversion settings for a [`FrameStream`](crate::FrameStream).
///
/// Indices are *decoded* indices: 1-based counts of frames pulled from the
/// source, incremented for every frame whether or not it is yielded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct StreamOptions {
    /// Colour space of yielded frames.
    pub color_mode: ColorMode,
    /// Maximum number of frames yielded per pass. `None` and `Some(0)` both
    /// mean no cap.
    pub frame_limit: Option<u64>,
    /// Yield only frames whose decoded index is a multiple of this value.
    /// `1` keeps every frame.
    pub frame_skip: u64,
    /// Frames whose decoded index is below this value are discarded.
    pub start_index: u64,
    /// The pass ends once the decoded index reaches this value.
    pub end_index: Option<u64>,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Color,
            frame_limit: None,
            frame_skip: 1,
            start_index: 0,
            end_index: None,
        }
    }
}

impl StreamOptions {
    /// Create options that yield every decoded frame in colour.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the colour space of yielded frames.
    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    /// Cap the number of frames yielded per pass.
    ///
    /// A limit of zero disables the cap, the same as never setting one.
    pub fn with_frame_limit(mut self, limit: u64) -> Self {
        self.frame_limit = Some(limit);
        self
    }

    /// Keep only every `skip`-th decoded frame.
    ///
    /// Zero is accepted here but rejected when the stream is built.
    pub fn with_frame_skip(mut self, skip: u64) -> Self {
        self.frame_skip = skip;
        self
    }

    /// Discard frames with a decoded index below `index`.
    pub fn with_start_index(mut self, index: u64) -> Self {
        self.start_index = index;
        self
    }

    /// End the pass when the decoded index reaches `index` (exclusive).
    pub fn with_end_index(mut self, index: u64) -> Self {
        self.end_index = Some(index);
        self
    }

    /// Check the options for values that cannot describe a frame selection.
    ///
    /// # Errors
    ///
    /// Returns [`FramesiftError::InvalidConfig`] when `frame_skip` is zero.
    pub fn validate(&self) -> Result<(), FramesiftError> {
        if self.frame_skip == 0 {
            return Err(FramesiftError::InvalidConfig(
                "frame_skip must be greater than zero".to_string(),
            ));
        }
        if self.end_index.is_some_and(|end| end <= self.start_index) {
            log::warn!(
                "end_index {:?} is not past start_index {}; the stream will be empty",
                self.end_index,
                self.start_index
            );
        }
        Ok(())
    }

    /// Returns `true` once the pass must end, before any filtering.
    pub(crate) fn is_exhausted(&self, decoded_count: u64, yielded_count: u64) -> bool {
        let limit_reached = self
            .frame_limit
            .filter(|&limit| limit > 0)
            .is_some_and(|limit| yielded_count >= limit);
        let end_reached = self.end_index.is_some_and(|end| decoded_count >= end);
        limit_reached || end_reached
    }

    /// Returns `true` if the frame at `decoded_count` should be discarded.
    pub(crate) fn skips(&self, decoded_count: u64) -> bool {
        decoded_count % self.frame_skip != 0 || decoded_count < self.start_index
    }
}

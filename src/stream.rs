//! Lazy, filtered frame streaming.
//!
//! [`FrameStream`] implements [`Iterator`] and pulls raw frames from its
//! [`FrameSource`] on demand. Each call to [`next()`](Iterator::next)
//! reads until a frame passes the skip/start filters, the pass ends, or
//! the source runs dry; only the frame that is finally yielded gets
//! colour-converted.
//!
//! # Example
//!
//! ```no_run
//! use framesift::{ColorMode, FrameStream, StreamOptions};
//!
//! let options = StreamOptions::new()
//!     .with_color_mode(ColorMode::Grayscale)
//!     .with_frame_skip(10)
//!     .with_frame_limit(25);
//!
//! let stream = FrameStream::open("input.mp4", options)?;
//! for frame in stream {
//!     let frame = frame?;
//!     frame.image().save(format!("frame_{:05}.png", frame.index()))?;
//! }
//! # Ok::<(), framesift::FramesiftError>(())
//! ```
//!
//! # Passes
//!
//! The selection counters belong to a *pass*. [`FrameStream::restart`]
//! starts a new pass by resetting them, but it does not rewind the source:
//! a [`VideoFileSource`] continues from wherever the previous pass stopped
//! reading.

use std::path::Path;

use crate::configuration::StreamOptions;
use crate::error::FramesiftError;
use crate::frame::Frame;
use crate::source::{FrameSource, VideoFileSource};

/// A lazy iterator over selected, colour-converted frames.
///
/// The stream exclusively owns its source. Dropping the stream, whether
/// after exhausting it or part-way through, releases the source.
#[derive(Debug)]
pub struct FrameStream<S: FrameSource = VideoFileSource> {
    source: S,
    options: StreamOptions,
    decoded_count: u64,
    yielded_count: u64,
    done: bool,
}

impl FrameStream<VideoFileSource> {
    /// Open a video file and stream its frames with `options`.
    ///
    /// The file is opened eagerly, so an unreadable path fails here rather
    /// than on the first pull.
    ///
    /// # Errors
    ///
    /// - [`FramesiftError::InvalidConfig`] if `options.frame_skip` is zero.
    /// - [`FramesiftError::SourceOpen`] if the file cannot be opened.
    /// - [`FramesiftError::NoVideoStream`] if it contains no video.
    pub fn open<P: AsRef<Path>>(path: P, options: StreamOptions) -> Result<Self, FramesiftError> {
        options.validate()?;
        let source = VideoFileSource::open(path)?;
        Ok(Self::with_validated(source, options))
    }
}

impl<S: FrameSource> FrameStream<S> {
    /// Stream frames from an arbitrary source.
    ///
    /// # Errors
    ///
    /// Returns [`FramesiftError::InvalidConfig`] if `options.frame_skip` is
    /// zero.
    pub fn from_source(source: S, options: StreamOptions) -> Result<Self, FramesiftError> {
        options.validate()?;
        Ok(Self::with_validated(source, options))
    }

    fn with_validated(source: S, options: StreamOptions) -> Self {
        log::debug!("Creating frame stream with {options:?}");
        Self {
            source,
            options,
            decoded_count: 0,
            yielded_count: 0,
            done: false,
        }
    }

    /// Begin a new pass: reset the decoded and yielded counters.
    ///
    /// The underlying source is not rewound.
    pub fn restart(&mut self) {
        log::debug!(
            "Restarting frame stream after {} decoded / {} yielded frames",
            self.decoded_count,
            self.yielded_count
        );
        self.decoded_count = 0;
        self.yielded_count = 0;
        self.done = false;
    }

    /// Frames pulled from the source during the current pass.
    pub fn decoded_count(&self) -> u64 {
        self.decoded_count
    }

    /// Frames returned to the caller during the current pass.
    pub fn yielded_count(&self) -> u64 {
        self.yielded_count
    }

    /// The options this stream was built with.
    pub fn options(&self) -> &StreamOptions {
        &self.options
    }

    /// Borrow the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Consume the stream and return its source.
    pub fn into_source(self) -> S {
        self.source
    }

    fn finish(&mut self) -> Option<Result<Frame, FramesiftError>> {
        log::debug!(
            "Frame stream finished ({} decoded, {} yielded)",
            self.decoded_count,
            self.yielded_count
        );
        self.done = true;
        None
    }
}

impl<S: FrameSource> Iterator for FrameStream<S> {
    type Item = Result<Frame, FramesiftError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let raw = match self.source.read_raw() {
                Ok(raw) => raw,
                Err(error) => {
                    log::warn!("Frame read failed after {} frames: {error}", self.decoded_count);
                    self.done = true;
                    return Some(Err(error));
                }
            };
            self.decoded_count += 1;

            if self
                .options
                .is_exhausted(self.decoded_count, self.yielded_count)
            {
                return self.finish();
            }

            // An empty source can never produce a frame that passes the
            // filters, so it ends the pass whether or not this index would
            // have been skipped.
            let Some(raw) = raw else {
                return self.finish();
            };

            if self.options.skips(self.decoded_count) {
                continue;
            }

            let color_mode = self.options.color_mode;
            return match self.source.convert(raw, color_mode) {
                Ok(image) => {
                    self.yielded_count += 1;
                    Some(Ok(Frame::new(self.decoded_count, image, color_mode)))
                }
                Err(error) => {
                    self.done = true;
                    Some(Err(error))
                }
            };
        }
    }
}

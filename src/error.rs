//! Error types for the `framesift` crate.
//!
//! This module defines [`FramesiftError`], the unified error type returned by
//! all fallible operations in the crate. Errors carry enough context (paths,
//! frame indices, dimensions, upstream messages) to diagnose a failure
//! without extra logging at the call site.
//!
//! Reaching the end of a [`FrameStream`](crate::FrameStream) is not an
//! error: the iterator simply returns `None`.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `framesift` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FramesiftError {
    /// The video source could not be opened.
    #[error("Failed to open video source at {path}: {reason}")]
    SourceOpen {
        /// Path that was passed to [`crate::FrameStream::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The opened container has no video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// Stream options that can never produce a meaningful sequence.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Arguments that do not fit together (e.g. layout and image counts).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A video frame could not be read or decoded mid-stream.
    #[error("Failed to decode video frame: {0}")]
    VideoDecode(String),

    /// The encoder could not be found, opened, or fed.
    #[error("Video encoding error: {0}")]
    VideoEncode(String),

    /// Muxing or writing the output container failed.
    #[error("Video write error: {0}")]
    VideoWrite(String),

    /// An image passed to the encoder differs in size from the first one.
    #[error(
        "Frame {index} is {}x{} but the sequence started at {}x{}",
        .found.0, .found.1, .expected.0, .expected.1
    )]
    ShapeMismatch {
        /// Position of the offending image in the input slice.
        index: usize,
        /// `(width, height)` of the first image.
        expected: (u32, u32),
        /// `(width, height)` of the offending image.
        found: (u32, u32),
    },

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    Ffmpeg(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// An error from the `image` crate.
    #[error("Image processing error: {0}")]
    Image(#[from] ImageError),

    /// A title font could not be parsed.
    #[error("Invalid font data: {0}")]
    Font(String),
}

impl From<FfmpegError> for FramesiftError {
    fn from(error: FfmpegError) -> Self {
        FramesiftError::Ffmpeg(error.to_string())
    }
}

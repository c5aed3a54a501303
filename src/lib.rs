//! # framesift
//!
//! Small helpers for video and image batch inspection: stream a filtered
//! subset of a video's frames, write images back out as a video, and lay
//! out sets of images on a near-square grid.
//!
//! Decoding and encoding go through FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate; frames are
//! handed out as [`image::DynamicImage`] values.
//!
//! ## Quick Start
//!
//! ### Stream Every 10th Frame
//!
//! ```no_run
//! use framesift::{FrameStream, StreamOptions};
//!
//! let options = StreamOptions::new().with_frame_skip(10).with_frame_limit(50);
//! for frame in FrameStream::open("input.mp4", options)? {
//!     let frame = frame?;
//!     println!("frame {} is {}x{}", frame.index(), frame.width(), frame.height());
//! }
//! # Ok::<(), framesift::FramesiftError>(())
//! ```
//!
//! ### Write Images as a Video
//!
//! ```no_run
//! let images = vec![image::open("a.png")?, image::open("b.png")?];
//! framesift::images_to_video(&images, "out.mp4", 12)?;
//! # Ok::<(), framesift::FramesiftError>(())
//! ```
//!
//! ### Near-Square Grids
//!
//! ```
//! let shape = framesift::squarish_grid(12);
//! assert_eq!((shape.rows, shape.cols), (3, 4));
//! ```
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod configuration;
pub mod encode;
pub mod error;
pub mod ffmpeg;
pub mod frame;
pub mod grid;
pub mod layout;
pub mod render;
pub mod source;
pub mod stream;
mod utilities;

pub use configuration::{ColorMode, StreamOptions};
pub use encode::{VideoCodec, VideoEncoder, VideoEncoderOptions, images_to_video};
pub use error::FramesiftError;
pub use ffmpeg::{FfmpegLogLevel, get_ffmpeg_log_level, set_ffmpeg_log_level};
pub use frame::Frame;
pub use grid::{GridShape, squarish_grid};
pub use layout::{Arrangement, InspectionLayout, LayoutCell};
pub use render::{ContactSheet, plot_cropped_images};
pub use source::{FrameSource, MemorySource, VideoFileSource};
pub use stream::FrameStream;

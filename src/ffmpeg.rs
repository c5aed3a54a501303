//! FFmpeg console verbosity.
//!
//! FFmpeg prints its own diagnostics to stderr independently of the Rust
//! [`log`](https://crates.io/crates/log) facade used by this crate. Decoding
//! a long video can be noisy, so these helpers let callers quiet FFmpeg
//! without depending on `ffmpeg-next` themselves.
//!
//! ```no_run
//! use framesift::FfmpegLogLevel;
//!
//! framesift::set_ffmpeg_log_level(FfmpegLogLevel::Error);
//! ```

use ffmpeg_next::util::log::Level;

/// FFmpeg's own log verbosity, from silent to most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FfmpegLogLevel {
    /// No output at all.
    Quiet,
    /// Unrecoverable errors only.
    Fatal,
    /// Recoverable errors.
    Error,
    /// Warnings (FFmpeg's default).
    Warning,
    /// Informational messages.
    Info,
    /// Debugging output.
    Debug,
}

impl From<FfmpegLogLevel> for Level {
    fn from(level: FfmpegLogLevel) -> Self {
        match level {
            FfmpegLogLevel::Quiet => Level::Quiet,
            FfmpegLogLevel::Fatal => Level::Fatal,
            FfmpegLogLevel::Error => Level::Error,
            FfmpegLogLevel::Warning => Level::Warning,
            FfmpegLogLevel::Info => Level::Info,
            FfmpegLogLevel::Debug => Level::Debug,
        }
    }
}

/// Set FFmpeg's console verbosity. Does not affect `log` output.
pub fn set_ffmpeg_log_level(level: FfmpegLogLevel) {
    log::debug!("Setting FFmpeg log level to {level:?}");
    ffmpeg_next::util::log::set_level(level.into());
}

/// Current FFmpeg console verbosity, if it maps onto a [`FfmpegLogLevel`].
///
/// Levels this crate does not expose (`panic`, `verbose`, `trace`) are
/// reported as the nearest neighbour.
pub fn get_ffmpeg_log_level() -> Option<FfmpegLogLevel> {
    let level = ffmpeg_next::util::log::get_level().ok()?;
    Some(match level {
        Level::Quiet => FfmpegLogLevel::Quiet,
        Level::Panic | Level::Fatal => FfmpegLogLevel::Fatal,
        Level::Error => FfmpegLogLevel::Error,
        Level::Warning => FfmpegLogLevel::Warning,
        Level::Info | Level::Verbose => FfmpegLogLevel::Info,
        Level::Debug | Level::Trace => FfmpegLogLevel::Debug,
    })
}

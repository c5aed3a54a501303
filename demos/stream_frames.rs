//! Stream a filtered subset of a video's frames and save them as PNGs.
//!
//! Usage:
//!   cargo run --example stream_frames -- <input_file> [skip] [limit] [gray]

use std::error::Error;

use framesift::{ColorMode, FfmpegLogLevel, FrameStream, StreamOptions};

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let input_path = args.next().unwrap_or_else(|| "input.mp4".to_string());
    let skip: u64 = args.next().and_then(|value| value.parse().ok()).unwrap_or(10);
    let limit: u64 = args.next().and_then(|value| value.parse().ok()).unwrap_or(5);
    let color_mode = match args.next().as_deref() {
        Some("gray") => ColorMode::Grayscale,
        _ => ColorMode::Color,
    };

    framesift::set_ffmpeg_log_level(FfmpegLogLevel::Error);

    let options = StreamOptions::new()
        .with_frame_skip(skip)
        .with_frame_limit(limit)
        .with_color_mode(color_mode);
    let mut stream = FrameStream::open(&input_path, options)?;

    println!("Saving every {skip}th frame of {input_path} (at most {limit})...");
    for frame in stream.by_ref() {
        let frame = frame?;
        let output_path = format!("frame_{:05}.png", frame.index());
        frame.image().save(&output_path)?;
        println!(
            "  {output_path}: {}x{}, {} channel(s)",
            frame.width(),
            frame.height(),
            frame.channels(),
        );
    }

    println!(
        "Done: {} frames decoded, {} saved",
        stream.decoded_count(),
        stream.yielded_count()
    );
    Ok(())
}

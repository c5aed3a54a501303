//! Encode a directory of same-sized images into a video.
//!
//! Images are read in file-name order.
//!
//! Usage:
//!   cargo run --example images_to_video -- <image_dir> [output.mp4] [fps]

use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let image_dir = args.next().unwrap_or_else(|| ".".to_string());
    let output_path = args.next().unwrap_or_else(|| "output.mp4".to_string());
    let fps: u32 = args.next().and_then(|value| value.parse().ok()).unwrap_or(12);

    let mut paths: Vec<_> = std::fs::read_dir(&image_dir)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| {
            path.extension()
                .and_then(|extension| extension.to_str())
                .is_some_and(|extension| matches!(extension, "png" | "jpg" | "jpeg"))
        })
        .collect();
    paths.sort();

    println!("Reading {} images from {image_dir}...", paths.len());
    let images = paths
        .iter()
        .map(image::open)
        .collect::<Result<Vec<_>, _>>()?;

    framesift::images_to_video(&images, &output_path, fps)?;
    println!("Wrote {output_path} at {fps} fps");
    Ok(())
}

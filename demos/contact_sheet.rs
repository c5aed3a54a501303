//! Lay out frames of a video on a near-square grid with titles.
//!
//! Usage:
//!   cargo run --example contact_sheet -- <input_file> [count] [font.ttf]

use std::error::Error;

use framesift::{ContactSheet, FrameStream, StreamOptions, plot_cropped_images};

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let input_path = args.next().unwrap_or_else(|| "input.mp4".to_string());
    let count: u64 = args.next().and_then(|value| value.parse().ok()).unwrap_or(12);
    let font_path = args.next();

    let images = FrameStream::open(&input_path, StreamOptions::new().with_frame_limit(count))?
        .map(|frame| frame.map(|frame| frame.into_image()))
        .collect::<Result<Vec<_>, _>>()?;

    // Stand-in statistic: pixel area of each frame.
    let areas: Vec<u64> = images
        .iter()
        .map(|image| u64::from(image.width()) * u64::from(image.height()))
        .collect();

    let mut sheet = ContactSheet::new();
    if let Some(font_path) = font_path {
        sheet = sheet.with_font_file(font_path)?;
    }

    let grid = framesift::squarish_grid(images.len());
    println!("Laying out {} frames on a {grid} grid...", images.len());
    let canvas = plot_cropped_images(&images, &areas, &sheet)?;

    let output_path = "contact_sheet.png";
    canvas.save(output_path)?;
    println!(
        "Saved {output_path} ({}x{})",
        canvas.width(),
        canvas.height()
    );
    Ok(())
}

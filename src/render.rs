//! Contact-sheet rendering.
//!
//! [`ContactSheet`] turns an [`InspectionLayout`] and its images into a
//! single RGB canvas. The canvas is created per call and returned to the
//! caller; no drawing state outlives [`ContactSheet::render`].
//!
//! Titles are drawn only when a font has been supplied, since the crate
//! ships no font of its own.
//!
//! # Example
//!
//! ```no_run
//! use framesift::{ContactSheet, plot_cropped_images};
//!
//! let crops = vec![image::open("a.png")?, image::open("b.png")?];
//! let sheet = ContactSheet::new().with_font_file("DejaVuSans.ttf")?;
//! let canvas = plot_cropped_images(&crops, &[412, 388], &sheet)?;
//! canvas.save("crops.png")?;
//! # Ok::<(), framesift::FramesiftError>(())
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::{DynamicImage, Rgb, RgbImage, imageops, imageops::FilterType};
use imageproc::drawing::{draw_text_mut, text_size};

use crate::error::FramesiftError;
use crate::layout::InspectionLayout;

const DEFAULT_DPI: f32 = 100.0;
const DEFAULT_TITLE_SCALE: f32 = 18.0;
const CELL_MARGIN: u32 = 6;

/// Renders [`InspectionLayout`]s onto an RGB canvas.
///
/// Grayscale images are drawn with a gray colour map; colour images as-is.
/// Each image is scaled to fit its cell while keeping its aspect ratio.
pub struct ContactSheet {
    dpi: f32,
    font: Option<FontVec>,
    title_scale: f32,
    title_color: Rgb<u8>,
    background: Rgb<u8>,
}

impl Debug for ContactSheet {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ContactSheet")
            .field("dpi", &self.dpi)
            .field("has_font", &self.font.is_some())
            .field("title_scale", &self.title_scale)
            .field("title_color", &self.title_color)
            .field("background", &self.background)
            .finish()
    }
}

impl Default for ContactSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactSheet {
    /// Create a renderer at 100 dpi with a white background and no titles.
    pub fn new() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            font: None,
            title_scale: DEFAULT_TITLE_SCALE,
            title_color: Rgb([0, 0, 0]),
            background: Rgb([255, 255, 255]),
        }
    }

    /// Pixels per figure inch. Clamped to a minimum of 1.
    #[must_use]
    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi.max(1.0);
        self
    }

    /// Draw titles with `font`.
    #[must_use]
    pub fn with_font(mut self, font: FontVec) -> Self {
        self.font = Some(font);
        self
    }

    /// Draw titles with a TrueType/OpenType font read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`FramesiftError::Io`] if the file cannot be read and
    /// [`FramesiftError::Font`] if it is not a usable font.
    pub fn with_font_file<P: AsRef<Path>>(self, path: P) -> Result<Self, FramesiftError> {
        let data = std::fs::read(path.as_ref())?;
        let font =
            FontVec::try_from_vec(data).map_err(|error| FramesiftError::Font(error.to_string()))?;
        log::debug!("Loaded title font from {}", path.as_ref().display());
        Ok(self.with_font(font))
    }

    /// Title text height in pixels.
    #[must_use]
    pub fn with_title_scale(mut self, scale: f32) -> Self {
        self.title_scale = scale;
        self
    }

    /// Title text colour.
    #[must_use]
    pub fn with_title_color(mut self, color: Rgb<u8>) -> Self {
        self.title_color = color;
        self
    }

    /// Canvas colour behind and between images.
    #[must_use]
    pub fn with_background(mut self, color: Rgb<u8>) -> Self {
        self.background = color;
        self
    }

    /// Draw `images` into the cells of `layout`.
    ///
    /// `images[i]` goes to the cell whose `index` is `i`.
    ///
    /// # Errors
    ///
    /// Returns [`FramesiftError::InvalidInput`] if the number of images
    /// differs from the number of cells in the layout.
    pub fn render(
        &self,
        layout: &InspectionLayout,
        images: &[DynamicImage],
    ) -> Result<RgbImage, FramesiftError> {
        if layout.len() != images.len() {
            return Err(FramesiftError::InvalidInput(format!(
                "layout has {} cells but {} images were given",
                layout.len(),
                images.len()
            )));
        }

        let (figure_width, figure_height) = layout.figure_size();
        let canvas_width = ((figure_width * self.dpi).round() as u32).max(1);
        let canvas_height = ((figure_height * self.dpi).round() as u32).max(1);
        let mut canvas = RgbImage::from_pixel(canvas_width, canvas_height, self.background);

        let shape = layout.shape();
        if shape.rows == 0 || shape.cols == 0 {
            return Ok(canvas);
        }

        let cell_width = canvas_width / shape.cols as u32;
        let cell_height = canvas_height / shape.rows as u32;
        let scale = PxScale::from(self.title_scale);
        let line_height = (self.title_scale * 1.2).ceil() as u32;

        log::debug!(
            "Rendering {} images on a {}x{} canvas ({}x{} px cells)",
            images.len(),
            canvas_width,
            canvas_height,
            cell_width,
            cell_height
        );

        for cell in layout.cells() {
            let cell_x = cell.col as u32 * cell_width;
            let cell_y = cell.row as u32 * cell_height;

            let title_height = match &self.font {
                Some(_) => cell.title.lines().count() as u32 * line_height,
                None => 0,
            };
            let box_width = cell_width.saturating_sub(2 * CELL_MARGIN);
            let box_height = cell_height.saturating_sub(2 * CELL_MARGIN + title_height);

            if let Some(font) = &self.font {
                for (line_index, line) in cell.title.lines().enumerate() {
                    let (text_width, _) = text_size(scale, font, line);
                    let x = cell_x + cell_width.saturating_sub(text_width) / 2;
                    let y = cell_y + CELL_MARGIN + line_index as u32 * line_height;
                    draw_text_mut(
                        &mut canvas,
                        self.title_color,
                        x as i32,
                        y as i32,
                        scale,
                        font,
                        line,
                    );
                }
            }

            if box_width == 0 || box_height == 0 {
                log::warn!("Cell for image {} is too small to draw into", cell.index);
                continue;
            }

            let image = &images[cell.index];
            let (fit_width, fit_height) =
                fit_within(image.width(), image.height(), box_width, box_height);
            let scaled = image
                .resize_exact(fit_width, fit_height, FilterType::Triangle)
                .to_rgb8();

            let x = cell_x + CELL_MARGIN + (box_width - fit_width) / 2;
            let y = cell_y + CELL_MARGIN + title_height + (box_height - fit_height) / 2;
            imageops::overlay(&mut canvas, &scaled, i64::from(x), i64::from(y));
        }

        Ok(canvas)
    }
}

/// Lay out cropped images by their areas and render them with `sheet`.
///
/// `areas[i]` is the area statistic of `images[i]`, shown in its title.
///
/// # Errors
///
/// Returns [`FramesiftError::InvalidInput`] if `images` and `areas` differ
/// in length.
pub fn plot_cropped_images(
    images: &[DynamicImage],
    areas: &[u64],
    sheet: &ContactSheet,
) -> Result<RgbImage, FramesiftError> {
    if images.len() != areas.len() {
        return Err(FramesiftError::InvalidInput(format!(
            "{} images but {} areas",
            images.len(),
            areas.len()
        )));
    }
    let layout = InspectionLayout::new(areas);
    sheet.render(&layout, images)
}

/// Largest size with the source aspect ratio that fits the box.
fn fit_within(width: u32, height: u32, box_width: u32, box_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (box_width, box_height);
    }
    let scale = (box_width as f64 / width as f64).min(box_height as f64 / height as f64);
    let fit_width = ((width as f64 * scale).round() as u32).clamp(1, box_width);
    let fit_height = ((height as f64 * scale).round() as u32).clamp(1, box_height);
    (fit_width, fit_height)
}

//! Decoded, colour-converted frames.

use image::DynamicImage;

use crate::configuration::ColorMode;

/// A frame yielded by a [`FrameStream`](crate::FrameStream).
///
/// The pixel data is an [`image::DynamicImage`]: `ImageRgb8` in
/// [`ColorMode::Color`] and `ImageLuma8` in [`ColorMode::Grayscale`].
#[derive(Debug, Clone)]
pub struct Frame {
    index: u64,
    image: DynamicImage,
    color_mode: ColorMode,
}

impl Frame {
    pub(crate) fn new(index: u64, image: DynamicImage, color_mode: ColorMode) -> Self {
        Self {
            index,
            image,
            color_mode,
        }
    }

    /// The 1-based decoded index of this frame within its pass.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Channel depth: 3 for colour, 1 for grayscale.
    pub fn channels(&self) -> u8 {
        self.color_mode.channels()
    }

    /// Colour space of the pixel data.
    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// Borrow the pixel data.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Take ownership of the pixel data.
    pub fn into_image(self) -> DynamicImage {
        self.image
    }
}

//! Inspection layouts for sets of cropped images.
//!
//! An [`InspectionLayout`] is a plain description of how a set of images
//! should be arranged for visual inspection: the grid shape, the figure
//! size, and which cell each image lands in along with its title. It holds
//! no drawing state; hand it to a renderer such as
//! [`ContactSheet`](crate::ContactSheet) to produce pixels.
//!
//! # Example
//!
//! ```
//! use framesift::{GridShape, InspectionLayout};
//!
//! let layout = InspectionLayout::new(&[120, 80, 95, 40, 310, 12]);
//! assert_eq!(layout.shape(), GridShape::new(2, 3));
//! assert_eq!(layout.cells()[4].title, "Img 4\nArea: 310");
//! ```

use crate::grid::{GridShape, squarish_grid};

/// Figure width, and base height, in inches.
const FIGURE_BASE_INCHES: f32 = 12.0;

/// Extra figure height per row once a strip is stacked vertically.
const STACKED_ROW_INCHES: f32 = 2.0;

/// Strips longer than this are stacked vertically instead of laid out in
/// a single row.
const MAX_STRIP_LENGTH: usize = 10;

/// How the items are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    /// A `rows × cols` grid filled row-major.
    Grid,
    /// A single horizontal row.
    Row,
    /// A single vertical column.
    Column,
}

/// One image's place in an [`InspectionLayout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutCell {
    /// Position of the image in the input set.
    pub index: usize,
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub col: usize,
    /// Caption shown above the image.
    pub title: String,
}

/// Arrangement of a set of cropped images, their cells and titles.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionLayout {
    shape: GridShape,
    arrangement: Arrangement,
    figure_size: (f32, f32),
    cells: Vec<LayoutCell>,
}

impl InspectionLayout {
    /// Lay out one image per entry of `areas`, titling each with its index
    /// and area.
    ///
    /// The grid comes from [`squarish_grid`]. A degenerate single-row or
    /// single-column result is shown as a horizontal strip when it has at
    /// most ten images, and as a vertical stack with a taller figure
    /// otherwise.
    pub fn new(areas: &[u64]) -> Self {
        let titles = areas
            .iter()
            .enumerate()
            .map(|(index, area)| format!("Img {index}\nArea: {area}"));
        Self::with_titles(titles)
    }

    /// Lay out one image per title.
    pub fn with_titles<I>(titles: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let titles: Vec<String> = titles.into_iter().map(Into::into).collect();
        let count = titles.len();
        let natural = squarish_grid(count);

        let (shape, arrangement, figure_size) = if natural.rows == 1 || natural.cols == 1 {
            let length = natural.rows.max(natural.cols);
            if length > MAX_STRIP_LENGTH {
                (
                    GridShape::new(length, 1),
                    Arrangement::Column,
                    (
                        FIGURE_BASE_INCHES,
                        FIGURE_BASE_INCHES + STACKED_ROW_INCHES * length as f32,
                    ),
                )
            } else {
                (
                    GridShape::new(1, length),
                    Arrangement::Row,
                    (FIGURE_BASE_INCHES, FIGURE_BASE_INCHES),
                )
            }
        } else {
            (
                natural,
                Arrangement::Grid,
                (FIGURE_BASE_INCHES, FIGURE_BASE_INCHES),
            )
        };

        let cells = titles
            .into_iter()
            .enumerate()
            .map(|(index, title)| LayoutCell {
                index,
                row: index / shape.cols,
                col: index % shape.cols,
                title,
            })
            .collect();

        log::debug!("Laid out {count} images as a {shape} {arrangement:?}");

        Self {
            shape,
            arrangement,
            figure_size,
            cells,
        }
    }

    /// Override the figure size, in inches.
    #[must_use]
    pub fn with_figure_size(mut self, width: f32, height: f32) -> Self {
        self.figure_size = (width, height);
        self
    }

    /// The grid the cells are placed on.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// How the grid is arranged.
    pub fn arrangement(&self) -> Arrangement {
        self.arrangement
    }

    /// Figure `(width, height)` in inches.
    pub fn figure_size(&self) -> (f32, f32) {
        self.figure_size
    }

    /// One cell per image, in input order. Grid cells beyond the image
    /// count have no entry and stay empty.
    pub fn cells(&self) -> &[LayoutCell] {
        &self.cells
    }

    /// Number of images laid out.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if there are no images.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

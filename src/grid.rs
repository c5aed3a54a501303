//! Near-square grid shapes.
//!
//! [`squarish_grid`] picks a `(rows, cols)` pair for laying out `n` items
//! from the divisors of `n`, so that a count with a good factorisation
//! fills its grid exactly and a prime count falls back to a single column.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// A grid of `rows × cols` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl GridShape {
    /// Create a shape from explicit dimensions.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }

    /// Returns `true` if every one of `count` items gets its own cell.
    pub fn covers(&self, count: usize) -> bool {
        self.cells() >= count
    }

    /// Swap rows and columns.
    pub fn transposed(self) -> Self {
        Self {
            rows: self.cols,
            cols: self.rows,
        }
    }
}

impl From<(usize, usize)> for GridShape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self { rows, cols }
    }
}

impl Display for GridShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Compute a near-square grid for `count` items.
///
/// The divisors of `count` in `2..count` are sorted in descending order:
///
/// - none (0, 1, and primes): `(count, 1)`, a single column;
/// - exactly one divisor `d`: `(d, d)`. This happens only when `count` is
///   the square of a prime, so the grid is exactly filled;
/// - otherwise the two divisors straddling the middle of the list, with
///   the smaller one as `rows`. When `count` is a perfect square the middle
///   divisor is its root and the grid has spare cells (16 → 4×8).
///
/// ```
/// use framesift::{GridShape, squarish_grid};
///
/// assert_eq!(squarish_grid(12), GridShape::new(3, 4));
/// assert_eq!(squarish_grid(7), GridShape::new(7, 1));
/// assert_eq!(squarish_grid(4), GridShape::new(2, 2));
/// ```
pub fn squarish_grid(count: usize) -> GridShape {
    let divisors: Vec<usize> = (2..count).rev().filter(|d| count % d == 0).collect();

    match divisors.as_slice() {
        [] => GridShape::new(count, 1),
        [only] => GridShape::new(*only, *only),
        _ => {
            let middle = divisors.len() / 2;
            GridShape::new(divisors[middle], divisors[middle - 1])
        }
    }
}

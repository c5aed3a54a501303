//! Near-square grid shape tests.

use framesift::{GridShape, squarish_grid};

fn has_proper_divisor(count: usize) -> bool {
    (2..count).any(|d| count % d == 0)
}

#[test]
fn documented_shapes() {
    assert_eq!(squarish_grid(12), GridShape::new(3, 4));
    assert_eq!(squarish_grid(7), GridShape::new(7, 1));
    assert_eq!(squarish_grid(4), GridShape::new(2, 2));
}

#[test]
fn covers_or_falls_back_to_a_single_column() {
    for count in [1, 2, 3, 4, 6, 7, 8, 9, 12, 13, 17, 100] {
        let shape = squarish_grid(count);
        if has_proper_divisor(count) {
            assert!(
                shape.covers(count),
                "{count} items do not fit a {shape} grid"
            );
        } else {
            assert_eq!(shape, GridShape::new(count, 1), "count {count}");
        }
    }
}

#[test]
fn prime_squares_fill_their_grid_exactly() {
    for (count, root) in [(4, 2), (9, 3), (25, 5), (49, 7)] {
        let shape = squarish_grid(count);
        assert_eq!(shape, GridShape::new(root, root));
        assert_eq!(shape.cells(), count);
    }
}

#[test]
fn perfect_squares_with_many_divisors_leave_spare_cells() {
    // Divisors of 16 in 2..16, descending: [8, 4, 2].
    assert_eq!(squarish_grid(16), GridShape::new(4, 8));
    // Divisors of 100: [50, 25, 20, 10, 5, 4, 2].
    assert_eq!(squarish_grid(100), GridShape::new(10, 20));
}

#[test]
fn small_counts() {
    assert_eq!(squarish_grid(0), GridShape::new(0, 1));
    assert_eq!(squarish_grid(1), GridShape::new(1, 1));
    assert_eq!(squarish_grid(2), GridShape::new(2, 1));
    assert_eq!(squarish_grid(6), GridShape::new(2, 3));
    assert_eq!(squarish_grid(8), GridShape::new(2, 4));
}

#[test]
fn repeated_calls_agree() {
    for count in 0..200 {
        assert_eq!(squarish_grid(count), squarish_grid(count));
    }
}

#[test]
fn shape_helpers() {
    let shape = GridShape::from((3, 5));
    assert_eq!(shape.cells(), 15);
    assert!(shape.covers(15));
    assert!(!shape.covers(16));
    assert_eq!(shape.transposed(), GridShape::new(5, 3));
    assert_eq!(shape.to_string(), "3x5");
}

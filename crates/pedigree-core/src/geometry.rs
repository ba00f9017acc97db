//! Grid geometry for pedigree layouts.
//!
//! Pedigree layouts are computed on an integer cell grid rather than in pixel
//! space; a renderer later decides how large a cell is.
//!
//! # Overview
//!
//! - [`Rectangle`] - A block of cells given by its top-left cell and its size
//! - [`GridBounds`] - The extent of a layout grid
//!
//! # Coordinate System
//!
//! ```text
//!   (0,0) ────────► +x  (column, generation)
//!     │
//!     │
//!     ▼
//!    +y  (row, sibling position)
//! ```
//!
//! Columns `0` and `xmax` are gutters reserved for navigation cells, so a grid
//! with bounds `(xmax, ymax)` has `xmax + 1` physical columns.

/// A rectangular block of grid cells.
///
/// # Examples
///
/// ```
/// # use pedigree_core::geometry::Rectangle;
/// let a = Rectangle::new(1, 3, 1, 3);
/// let b = Rectangle::new(1, 6, 1, 3);
///
/// assert_eq!(a.right(), 2);
/// assert_eq!(a.bottom(), 6);
/// assert!(!a.overlaps(&b));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rectangle {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Rectangle {
    /// Creates a new rectangle from its top-left cell and its size in cells
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the leftmost column
    pub fn x(self) -> i32 {
        self.x
    }

    /// Returns the topmost row
    pub fn y(self) -> i32 {
        self.y
    }

    /// Returns the width in columns
    pub fn width(self) -> i32 {
        self.width
    }

    /// Returns the height in rows
    pub fn height(self) -> i32 {
        self.height
    }

    /// Returns the first column past the right edge
    pub fn right(self) -> i32 {
        self.x + self.width
    }

    /// Returns the first row past the bottom edge
    pub fn bottom(self) -> i32 {
        self.y + self.height
    }

    /// Returns a copy moved by the given number of columns and rows
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Returns a copy with columns and rows exchanged
    pub fn transpose(self) -> Self {
        Self {
            x: self.y,
            y: self.x,
            width: self.height,
            height: self.width,
        }
    }

    /// Checks whether two rectangles share at least one cell.
    ///
    /// Rectangles that merely touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Checks whether the rectangle lies within `[0, xmax) × [0, ymax)`
    pub fn is_within(&self, bounds: GridBounds) -> bool {
        self.x >= 0 && self.y >= 0 && self.right() <= bounds.xmax && self.bottom() <= bounds.ymax
    }
}

/// The extent of a layout grid in cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GridBounds {
    xmax: i32,
    ymax: i32,
}

impl GridBounds {
    pub fn new(xmax: i32, ymax: i32) -> Self {
        Self { xmax, ymax }
    }

    /// Returns the column of the parent navigation gutter
    pub fn xmax(self) -> i32 {
        self.xmax
    }

    /// Returns the number of rows
    pub fn ymax(self) -> i32 {
        self.ymax
    }

    /// Returns the bounds with columns and rows exchanged
    pub fn transpose(self) -> Self {
        Self {
            xmax: self.ymax,
            ymax: self.xmax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_rectangles_do_not_overlap() {
        let a = Rectangle::new(0, 0, 2, 2);
        assert!(!a.overlaps(&Rectangle::new(2, 0, 2, 2)));
        assert!(!a.overlaps(&Rectangle::new(0, 2, 2, 2)));
        assert!(a.overlaps(&Rectangle::new(1, 1, 2, 2)));
    }

    #[test]
    fn test_is_within() {
        let bounds = GridBounds::new(4, 8);
        assert!(Rectangle::new(3, 7, 1, 1).is_within(bounds));
        assert!(!Rectangle::new(3, 7, 2, 1).is_within(bounds));
        assert!(!Rectangle::new(-1, 0, 1, 1).is_within(bounds));
    }

    #[test]
    fn test_transpose() {
        let r = Rectangle::new(1, 5, 2, 3);
        assert_eq!(r.transpose(), Rectangle::new(5, 1, 3, 2));
        assert_eq!(r.transpose().transpose(), r);
        assert_eq!(GridBounds::new(10, 32).transpose(), GridBounds::new(32, 10));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn rectangle_strategy() -> impl Strategy<Value = Rectangle> {
        (-50i32..50, -50i32..50, 1i32..20, 1i32..20)
            .prop_map(|(x, y, w, h)| Rectangle::new(x, y, w, h))
    }

    /// Overlap should be symmetric: a overlaps b iff b overlaps a.
    fn check_overlap_is_symmetric(a: Rectangle, b: Rectangle) -> Result<(), TestCaseError> {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        Ok(())
    }

    /// Translating preserves size and translating back restores the rectangle.
    fn check_translate_roundtrip(r: Rectangle, dx: i32, dy: i32) -> Result<(), TestCaseError> {
        let moved = r.translate(dx, dy);
        prop_assert_eq!(moved.width(), r.width());
        prop_assert_eq!(moved.height(), r.height());
        prop_assert_eq!(moved.translate(-dx, -dy), r);
        Ok(())
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in rectangle_strategy(), b in rectangle_strategy()) {
            check_overlap_is_symmetric(a, b)?;
        }

        #[test]
        fn translate_roundtrip(r in rectangle_strategy(), dx in -30i32..30, dy in -30i32..30) {
            check_translate_roundtrip(r, dx, dy)?;
        }
    }
}

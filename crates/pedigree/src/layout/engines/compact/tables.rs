//! Fixed cell tables for compact pedigrees.
//!
//! Coordinates are in table space, before the one-cell navigation gutter is
//! added on the left and top. Boxes are three columns wide; a line spans one
//! column and is given as `[x, y, height]`.

use pedigree_core::geometry::{GridBounds, Rectangle};

/// Cells of one slot.
#[derive(Debug, Clone, Copy)]
pub struct Entry {
    person: [i32; 4],
    lines: Option<([i32; 3], [i32; 3])>,
    label: Option<[i32; 4]>,
}

impl Entry {
    pub fn person(&self) -> Rectangle {
        rect(self.person)
    }

    /// Returns the father and mother line cells, if the slot has parents in
    /// the table
    pub fn lines(&self) -> Option<(Rectangle, Rectangle)> {
        self.lines.map(|(father, mother)| (line(father), line(mother)))
    }

    pub fn label(&self) -> Option<Rectangle> {
        self.label.map(rect)
    }
}

fn rect([x, y, width, height]: [i32; 4]) -> Rectangle {
    Rectangle::new(x, y, width, height)
}

fn line([x, y, height]: [i32; 3]) -> Rectangle {
    Rectangle::new(x, y, 1, height)
}

const fn leaf(x: i32, y: i32, width: i32, height: i32) -> Entry {
    Entry {
        person: [x, y, width, height],
        lines: None,
        label: None,
    }
}

const fn branch(person: [i32; 4], father: [i32; 3], mother: [i32; 3], label: [i32; 4]) -> Entry {
    Entry {
        person,
        lines: Some((father, mother)),
        label: Some(label),
    }
}

/// Returns the table for `depth` generations, indexed by slot
pub fn entries(depth: usize) -> Option<&'static [Entry]> {
    match depth {
        2 => Some(&DEPTH_2),
        3 => Some(&DEPTH_3),
        4 => Some(&DEPTH_4),
        5 => Some(&DEPTH_5),
        _ => None,
    }
}

/// Returns the grid extent of a `depth` generation table, gutters included
pub fn bounds(depth: usize) -> Option<GridBounds> {
    let ymax = match depth {
        2 => 10,
        3 => 14,
        4 => 16,
        5 => 32,
        _ => return None,
    };
    Some(GridBounds::new(2 * depth as i32 + 2, ymax))
}

const DEPTH_2: [Entry; 3] = [
    branch([0, 3, 3, 3], [1, 0, 3], [1, 6, 3], [3, 3, 2, 3]),
    leaf(2, 0, 3, 3),
    leaf(2, 6, 3, 3),
];

const DEPTH_3: [Entry; 7] = [
    branch([0, 4, 3, 5], [1, 1, 3], [1, 9, 3], [3, 5, 2, 3]),
    branch([2, 1, 3, 3], [3, 0, 1], [3, 4, 1], [5, 1, 2, 3]),
    branch([2, 9, 3, 3], [3, 8, 1], [3, 12, 1], [5, 9, 2, 3]),
    leaf(4, 0, 3, 1),
    leaf(4, 4, 3, 1),
    leaf(4, 8, 3, 1),
    leaf(4, 12, 3, 1),
];

const DEPTH_4: [Entry; 15] = [
    branch([0, 5, 3, 5], [1, 2, 3], [1, 10, 3], [3, 6, 2, 3]),
    branch([2, 2, 3, 3], [3, 1, 1], [3, 5, 1], [5, 3, 2, 1]),
    branch([2, 10, 3, 3], [3, 9, 1], [3, 13, 1], [5, 11, 2, 1]),
    branch([4, 1, 3, 1], [5, 0, 1], [5, 2, 1], [7, 1, 2, 1]),
    branch([4, 5, 3, 1], [5, 4, 1], [5, 6, 1], [7, 5, 2, 1]),
    branch([4, 9, 3, 1], [5, 8, 1], [5, 10, 1], [7, 9, 2, 1]),
    branch([4, 13, 3, 1], [5, 12, 1], [5, 14, 1], [7, 13, 2, 1]),
    leaf(6, 0, 3, 1),
    leaf(6, 2, 3, 1),
    leaf(6, 4, 3, 1),
    leaf(6, 6, 3, 1),
    leaf(6, 8, 3, 1),
    leaf(6, 10, 3, 1),
    leaf(6, 12, 3, 1),
    leaf(6, 14, 3, 1),
];

const DEPTH_5: [Entry; 31] = [
    branch([0, 10, 3, 11], [1, 5, 5], [1, 21, 5], [3, 13, 2, 5]),
    branch([2, 5, 3, 5], [3, 2, 3], [3, 10, 3], [5, 6, 2, 3]),
    branch([2, 21, 3, 5], [3, 18, 3], [3, 26, 3], [5, 22, 2, 3]),
    branch([4, 2, 3, 3], [5, 1, 1], [5, 5, 1], [7, 3, 2, 1]),
    branch([4, 10, 3, 3], [5, 9, 1], [5, 13, 1], [7, 11, 2, 1]),
    branch([4, 18, 3, 3], [5, 17, 1], [5, 21, 1], [7, 19, 2, 1]),
    branch([4, 26, 3, 3], [5, 25, 1], [5, 29, 1], [7, 27, 2, 1]),
    branch([6, 1, 3, 1], [7, 0, 1], [7, 2, 1], [9, 1, 2, 1]),
    branch([6, 5, 3, 1], [7, 4, 1], [7, 6, 1], [9, 5, 2, 1]),
    branch([6, 9, 3, 1], [7, 8, 1], [7, 10, 1], [9, 9, 2, 1]),
    branch([6, 13, 3, 1], [7, 12, 1], [7, 14, 1], [9, 13, 2, 1]),
    branch([6, 17, 3, 1], [7, 16, 1], [7, 18, 1], [9, 17, 2, 1]),
    branch([6, 21, 3, 1], [7, 20, 1], [7, 22, 1], [9, 21, 2, 1]),
    branch([6, 25, 3, 1], [7, 24, 1], [7, 26, 1], [9, 25, 2, 1]),
    branch([6, 29, 3, 1], [7, 28, 1], [7, 30, 1], [9, 29, 2, 1]),
    leaf(8, 0, 3, 1),
    leaf(8, 2, 3, 1),
    leaf(8, 4, 3, 1),
    leaf(8, 6, 3, 1),
    leaf(8, 8, 3, 1),
    leaf(8, 10, 3, 1),
    leaf(8, 12, 3, 1),
    leaf(8, 14, 3, 1),
    leaf(8, 16, 3, 1),
    leaf(8, 18, 3, 1),
    leaf(8, 20, 3, 1),
    leaf(8, 22, 3, 1),
    leaf(8, 24, 3, 1),
    leaf(8, 26, 3, 1),
    leaf(8, 28, 3, 1),
    leaf(8, 30, 3, 1),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        for depth in 2..=5 {
            assert_eq!(entries(depth).unwrap().len(), (1 << depth) - 1);
        }
        assert!(entries(1).is_none());
        assert!(entries(6).is_none());
        assert!(bounds(6).is_none());
    }

    #[test]
    fn test_only_inner_generations_have_lines() {
        for depth in 2..=5 {
            let table = entries(depth).unwrap();
            for (index, entry) in table.iter().enumerate() {
                assert_eq!(entry.lines().is_some(), index < table.len() / 2);
                assert_eq!(entry.label().is_some(), index < table.len() / 2);
            }
        }
    }

    #[test]
    fn test_lines_touch_parent_boxes() {
        for depth in 2..=5 {
            let table = entries(depth).unwrap();
            for (index, entry) in table.iter().enumerate().take(table.len() / 2) {
                let (father, mother) = entry.lines().unwrap();
                let father_box = table[2 * index + 1].person();
                let mother_box = table[2 * index + 2].person();

                assert_eq!(father.right(), father_box.x());
                assert_eq!(mother.right(), mother_box.x());
                assert!(father.y() <= father_box.y() && father.bottom() > father_box.y());
                assert!(mother.y() < mother_box.bottom() && mother.bottom() >= mother_box.bottom());
            }
        }
    }
}

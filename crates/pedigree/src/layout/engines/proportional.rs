//! Proportional pedigree layout engine
//!
//! Generation `L` occupies column `2L + 1`; the columns in between hold the
//! connector lines. Each generation divides the rows evenly among its `2^L`
//! slots, so slot `i` with offset `i + 1 - 2^L` owns a band of `delta` rows and
//! its box is centred in that band:
//!
//! ```text
//!   col:  0   1   2   3   4   5
//!             .       .   ┌─┐ F
//!             .       ┌───┤ │
//!   root ──── ┌─┐ ────┤   └─┘
//!             └─┘     │   ┌─┐ M
//!                     └───┤ │
//!                         └─┘
//! ```
//!
//! The expanded spread doubles every band to leave a free row between father
//! and mother for the marriage label, and trims the tree to the generations
//! that hold anyone unless placeholders are shown. Placeholders fill every
//! empty slot of an expanded tree; standard trees never show them.

use log::debug;

use pedigree_core::{
    chart::TreeStyle,
    geometry::{GridBounds, Rectangle},
};

use crate::{
    error::PedigreeError,
    layout::{
        Connector, LayoutOptions, LayoutResult, LineStyle, PersonBox, engines::PedigreeEngine,
    },
    tree::{AncestorTree, father_index, level, mother_index},
};

/// Vertical spread of the proportional layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spread {
    /// One band per slot; deepest generation boxes are a single row
    Standard,
    /// Bands twice as high; all boxes three rows
    Expanded,
}

/// Proportional layout engine implementation
pub struct Engine {
    spread: Spread,
    options: LayoutOptions,
}

impl Engine {
    /// Create a new proportional layout engine
    pub fn new(spread: Spread) -> Self {
        Self {
            spread,
            options: LayoutOptions::default(),
        }
    }

    /// Set the display switches
    pub fn set_options(&mut self, options: LayoutOptions) -> &mut Self {
        self.options = options;
        self
    }

    fn style(&self) -> TreeStyle {
        match self.spread {
            Spread::Standard => TreeStyle::Standard,
            Spread::Expanded => TreeStyle::Expanded,
        }
    }

    /// Number of generations actually laid out
    fn effective_depth(&self, tree: &AncestorTree, depth: usize) -> usize {
        match self.spread {
            Spread::Expanded if !self.options.show_unknown_placeholders => {
                depth.min(tree.observed_depth()).max(1)
            }
            Spread::Standard | Spread::Expanded => depth,
        }
    }

    /// Only the expanded spread leaves room for unknown ancestors
    fn shows_placeholders(&self) -> bool {
        self.spread == Spread::Expanded && self.options.show_unknown_placeholders
    }

    fn bounds(&self, depth: usize) -> GridBounds {
        let columns = 2 * depth as i32;
        match self.spread {
            Spread::Standard => GridBounds::new(columns, 1 << depth),
            Spread::Expanded => GridBounds::new(columns, 2 << depth),
        }
    }

    /// Rows owned by one slot of generation `level`
    fn delta(&self, depth: usize, level: u32) -> i32 {
        let delta = (1 << depth) >> level;
        match self.spread {
            Spread::Standard => delta,
            Spread::Expanded => delta * 2,
        }
    }

    fn is_deepest(&self, depth: usize, level: u32) -> bool {
        self.spread == Spread::Standard && level as usize + 1 == depth
    }

    fn box_rect(&self, index: usize, depth: usize) -> Rectangle {
        let level = level(index);
        let delta = self.delta(depth, level);
        let centre = delta / 2 + offset(index, level) * delta;
        let x = 2 * level as i32 + 1;

        if self.is_deepest(depth, level) {
            Rectangle::new(x, centre, 1, 1)
        } else {
            Rectangle::new(x, centre - 1, 1, 3)
        }
    }

    /// Cell joining `child` with both parents, from the top of the father's
    /// box to the bottom of the mother's box
    fn connector_cell(&self, child: usize, depth: usize) -> Rectangle {
        let mother = mother_index(child);
        let level = level(mother);
        let delta = self.delta(depth, level);
        let y = offset(mother, level) * delta - delta / 2 - 1;
        let x = 2 * level as i32;

        if self.is_deepest(depth, level) {
            Rectangle::new(x, y + 1, 1, delta + 1)
        } else {
            Rectangle::new(x, y, 1, delta + 3)
        }
    }

    /// Cell for the marriage of the parents of `child`: in the parents'
    /// column, on the free row between father and mother
    fn marriage_label_rect(&self, child: usize, depth: usize) -> Rectangle {
        let level = level(child);
        let delta = self.delta(depth, level);
        let centre = delta / 2 + offset(child, level) * delta;
        let x = 2 * level as i32 + 3;

        // The first two generations of deep standard trees have room to spare.
        if self.spread == Spread::Standard && level < 2 && depth > 4 {
            Rectangle::new(x, centre - 2, 1, 5)
        } else {
            Rectangle::new(x, centre, 1, 1)
        }
    }
}

/// Position of `index` among the slots of its generation
fn offset(index: usize, level: u32) -> i32 {
    (index + 1 - (1 << level)) as i32
}

impl PedigreeEngine for Engine {
    fn calculate(&self, tree: &AncestorTree, depth: usize) -> Result<LayoutResult, PedigreeError> {
        let style = self.style();
        if !style.supports_depth(depth) {
            return Err(PedigreeError::InvalidDepth { style, depth });
        }

        let depth = self.effective_depth(tree, depth);
        debug!(style:% = style, depth; "Proportional layout");

        let mut layout = LayoutResult::new(style, depth, self.bounds(depth));
        let slot_count = (1 << depth) - 1;

        for index in 0..slot_count {
            let person = tree.slot(index).map(|slot| slot.person());
            if person.is_some() || self.shows_placeholders() {
                layout.boxes.insert(
                    index,
                    PersonBox {
                        rect: self.box_rect(index, depth),
                        person,
                    },
                );
            }
        }

        // Only slots below the last generation have parents inside the layout.
        for child in 0..slot_count / 2 {
            let Some(slot) = tree.slot(child) else {
                continue;
            };

            let line_to = |parent: usize| {
                layout
                    .boxes
                    .contains_key(&parent)
                    .then(|| LineStyle::for_parent(tree.slot(parent)))
            };
            let father = line_to(father_index(child));
            let mother = line_to(mother_index(child));

            if father.is_some() || mother.is_some() {
                layout.connectors.insert(
                    child,
                    Connector::Joined {
                        cell: self.connector_cell(child, depth),
                        father,
                        mother,
                    },
                );
            }

            if self.options.show_marriage_labels && slot.family().is_some() {
                layout
                    .marriage_labels
                    .insert(child, self.marriage_label_rect(child, depth));
            }
        }

        Ok(layout.finish(tree))
    }
}

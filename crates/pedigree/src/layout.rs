//! Pedigree grid layout.
//!
//! A [`LayoutResult`] is the hand-off between the layout engines and a
//! renderer. It is computed in the canonical orientation (root on the left,
//! generations advancing rightward) and holds only grid cells and slot
//! indices; [`orientation`](crate::orientation) maps it to one of the four
//! physical directions.
//!
//! All maps are keyed by slot index and ordered, so two layouts of the same
//! tree compare equal.

mod engines;

use std::collections::BTreeMap;

use log::{info, trace};

use pedigree_core::{
    ancestry::{AncestorSlot, PersonRef},
    chart::TreeStyle,
    geometry::{GridBounds, Rectangle},
};

pub use engines::{EngineBuilder, PedigreeEngine};

use crate::{error::PedigreeError, tree::AncestorTree};

/// Display switches shared by all engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Reserve a cell for the marriage of each person's parents
    pub show_marriage_labels: bool,
    /// Emit placeholder boxes for unknown ancestors
    pub show_unknown_placeholders: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            show_marriage_labels: true,
            show_unknown_placeholders: true,
        }
    }
}

/// How a connector line is stroked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    /// Birth relation
    Solid,
    /// Any other relation, or a line to an unknown ancestor
    Dashed,
}

impl LineStyle {
    /// Returns the style of the line leading to `parent`; unknown parents are dashed
    pub fn for_parent(parent: Option<&AncestorSlot>) -> Self {
        match parent {
            Some(slot) if slot.relation().is_birth() => Self::Solid,
            _ => Self::Dashed,
        }
    }
}

/// One line of a connector with its own cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub cell: Rectangle,
    pub style: LineStyle,
}

/// Lines joining a person's box to the boxes of their parents.
///
/// A side is `None` when no box, not even a placeholder, was emitted for that
/// parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    /// One cell spanning from the father's box to the mother's box, with the
    /// child's line entering on its left edge.
    Joined {
        cell: Rectangle,
        father: Option<LineStyle>,
        mother: Option<LineStyle>,
    },
    /// Separate cells for the father and the mother line.
    Split {
        father: Option<Link>,
        mother: Option<Link>,
    },
}

/// A box emitted for a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonBox {
    pub rect: Rectangle,
    /// `None` for placeholder boxes standing in for an unknown ancestor
    pub person: Option<PersonRef>,
}

impl PersonBox {
    pub fn is_placeholder(&self) -> bool {
        self.person.is_none()
    }
}

/// A navigation control cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationCell {
    pub rect: Rectangle,
    /// The person the control leads to, when known
    pub target: Option<PersonRef>,
}

/// Cells reserved for navigating away from the root: to a child of the root
/// in the left gutter, to the father and mother in the right gutter.
///
/// Parent cells are three rows high, centred on the quarter and
/// three-quarter rows, and shrink on grids too small to hold them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub child: NavigationCell,
    pub father: NavigationCell,
    pub mother: NavigationCell,
}

impl Navigation {
    fn new(tree: &AncestorTree, bounds: GridBounds) -> Option<Self> {
        tree.root()?;
        let xmax = bounds.xmax();
        let ymax = bounds.ymax();
        let height = (ymax / 2).clamp(1, 3);
        let target = |index| tree.slot(index).map(AncestorSlot::person);

        Some(Self {
            child: NavigationCell {
                rect: Rectangle::new(0, ymax / 2, 1, 1),
                target: None,
            },
            father: NavigationCell {
                rect: Rectangle::new(xmax, ymax / 4 - height / 2, 1, height),
                target: target(1),
            },
            mother: NavigationCell {
                rect: Rectangle::new(xmax, ymax * 3 / 4 - height / 2, 1, height),
                target: target(2),
            },
        })
    }
}

/// Layout of one pedigree on the cell grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutResult {
    pub(crate) style: TreeStyle,
    pub(crate) depth: usize,
    pub(crate) bounds: GridBounds,
    pub(crate) boxes: BTreeMap<usize, PersonBox>,
    pub(crate) connectors: BTreeMap<usize, Connector>,
    pub(crate) marriage_labels: BTreeMap<usize, Rectangle>,
    pub(crate) navigation: Option<Navigation>,
}

impl LayoutResult {
    fn new(style: TreeStyle, depth: usize, bounds: GridBounds) -> Self {
        Self {
            style,
            depth,
            bounds,
            boxes: BTreeMap::new(),
            connectors: BTreeMap::new(),
            marriage_labels: BTreeMap::new(),
            navigation: None,
        }
    }

    pub fn style(&self) -> TreeStyle {
        self.style
    }

    /// Returns the number of generations laid out, after any trimming
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Returns the boxes keyed by slot
    pub fn boxes(&self) -> &BTreeMap<usize, PersonBox> {
        &self.boxes
    }

    /// Returns the connectors keyed by the slot of the child they lead from
    pub fn connectors(&self) -> &BTreeMap<usize, Connector> {
        &self.connectors
    }

    /// Returns the marriage-label cells keyed by the slot of the child
    pub fn marriage_labels(&self) -> &BTreeMap<usize, Rectangle> {
        &self.marriage_labels
    }

    pub fn navigation(&self) -> Option<&Navigation> {
        self.navigation.as_ref()
    }

    /// Iterates over every rectangle that must not overlap another: person
    /// boxes and marriage labels.
    pub fn rectangles(&self) -> impl Iterator<Item = Rectangle> + '_ {
        self.boxes
            .values()
            .map(|person_box| person_box.rect)
            .chain(self.marriage_labels.values().copied())
    }

    fn finish(mut self, tree: &AncestorTree) -> Self {
        self.navigation = Navigation::new(tree, self.bounds);
        self
    }
}

/// Compute the layout of the first `depth` generations of `tree`.
///
/// # Errors
///
/// Returns [`PedigreeError::InvalidDepth`] when `style` has no layout for
/// `depth` generations (the compact style only covers 2 to 5); no layout work
/// is done in that case.
pub fn compute_layout(
    tree: &AncestorTree,
    depth: usize,
    style: TreeStyle,
    options: LayoutOptions,
) -> Result<LayoutResult, PedigreeError> {
    if !style.supports_depth(depth) {
        return Err(PedigreeError::InvalidDepth { style, depth });
    }

    let mut engines = EngineBuilder::new().with_options(options);
    let layout = engines.engine(style).calculate(tree, depth)?;

    info!(
        style:% = style,
        depth = layout.depth,
        boxes = layout.boxes.len(),
        connectors = layout.connectors.len();
        "Layout calculated"
    );
    trace!(layout:?; "Computed layout");

    Ok(layout)
}

#[cfg(test)]
mod tests {
    use pedigree_core::ancestry::ChildRelation;

    use super::*;

    #[test]
    fn test_line_style_for_parent() {
        let birth = AncestorSlot::new(PersonRef::new("F"), ChildRelation::Birth, true);
        let adopted = AncestorSlot::new(PersonRef::new("M"), ChildRelation::Adopted, true);

        assert_eq!(LineStyle::for_parent(Some(&birth)), LineStyle::Solid);
        assert_eq!(LineStyle::for_parent(Some(&adopted)), LineStyle::Dashed);
        assert_eq!(LineStyle::for_parent(None), LineStyle::Dashed);
    }
}

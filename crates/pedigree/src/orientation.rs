//! Mapping canonical layout cells to a physical orientation.
//!
//! Engines lay pedigrees out with generations as columns and the root in the
//! leftmost column. The canonical grid is `xmax + 1` columns wide, the extra
//! column holding the parent navigation cells, and `ymax` rows high.
//!
//! - [`Direction::Right`] is the identity.
//! - [`Direction::Left`] mirrors the columns so the root ends up on the right.
//! - [`Direction::Down`] swaps the axes: generations become rows.
//! - [`Direction::Up`] mirrors, then swaps, so the root sits at the bottom.
//!
//! Every function here is pure; [`inverse`] undoes [`place`] for the same
//! bounds and direction.

use pedigree_core::{
    chart::Direction,
    geometry::{GridBounds, Rectangle},
};

use crate::layout::{Connector, Link};

/// Number of canonical columns, navigation column included
fn columns(bounds: GridBounds) -> i32 {
    bounds.xmax() + 1
}

fn mirror(rect: Rectangle, bounds: GridBounds) -> Rectangle {
    Rectangle::new(
        columns(bounds) - rect.right(),
        rect.y(),
        rect.width(),
        rect.height(),
    )
}

/// Map a canonical cell to its physical position.
pub fn place(rect: Rectangle, bounds: GridBounds, direction: Direction) -> Rectangle {
    match direction {
        Direction::Right => rect,
        Direction::Left => mirror(rect, bounds),
        Direction::Down => rect.transpose(),
        Direction::Up => mirror(rect, bounds).transpose(),
    }
}

/// Map a physical cell back to the canonical grid.
///
/// `bounds` are the canonical bounds, as passed to [`place`].
pub fn inverse(rect: Rectangle, bounds: GridBounds, direction: Direction) -> Rectangle {
    match direction {
        Direction::Right => rect,
        Direction::Left => mirror(rect, bounds),
        Direction::Down => rect.transpose(),
        Direction::Up => mirror(rect.transpose(), bounds),
    }
}

/// Map every cell of a connector.
pub fn place_connector(connector: Connector, bounds: GridBounds, direction: Direction) -> Connector {
    let place_link = |link: Link| Link {
        cell: place(link.cell, bounds, direction),
        style: link.style,
    };

    match connector {
        Connector::Joined {
            cell,
            father,
            mother,
        } => Connector::Joined {
            cell: place(cell, bounds, direction),
            father,
            mother,
        },
        Connector::Split { father, mother } => Connector::Split {
            father: father.map(place_link),
            mother: mother.map(place_link),
        },
    }
}

/// Returns the physical grid extent, navigation column included
pub fn place_bounds(bounds: GridBounds, direction: Direction) -> GridBounds {
    let canvas = GridBounds::new(columns(bounds), bounds.ymax());
    if direction.is_vertical() {
        canvas.transpose()
    } else {
        canvas
    }
}

/// Map a point given in canonical cell units, such as the end of a line.
pub fn place_point(x: f32, y: f32, bounds: GridBounds, direction: Direction) -> (f32, f32) {
    let mirrored = columns(bounds) as f32 - x;
    match direction {
        Direction::Right => (x, y),
        Direction::Left => (mirrored, y),
        Direction::Down => (y, x),
        Direction::Up => (y, mirrored),
    }
}

//! Chart options selecting a layout algorithm and an orientation.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::Deserialize;

/// Layout algorithm of a pedigree chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeStyle {
    /// Boxes spread proportionally over the rows (default)
    #[default]
    Standard,
    /// Hand-tuned literal position tables, depths 2 to 5 only
    Compact,
    /// Proportional spread with room for marriage labels, trimmed to the
    /// generations actually known
    Expanded,
}

impl TreeStyle {
    /// Depths the [`TreeStyle::Compact`] tables exist for
    pub const COMPACT_DEPTHS: [usize; 4] = [2, 3, 4, 5];

    /// Checks whether this style can lay out a pedigree of `depth` generations
    pub fn supports_depth(self, depth: usize) -> bool {
        match self {
            Self::Compact => Self::COMPACT_DEPTHS.contains(&depth),
            Self::Standard | Self::Expanded => (1..=9).contains(&depth),
        }
    }
}

impl FromStr for TreeStyle {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "compact" => Ok(Self::Compact),
            "expanded" => Ok(Self::Expanded),
            _ => Err("Unsupported tree style"),
        }
    }
}

impl From<TreeStyle> for &'static str {
    fn from(val: TreeStyle) -> Self {
        match val {
            TreeStyle::Standard => "standard",
            TreeStyle::Compact => "compact",
            TreeStyle::Expanded => "expanded",
        }
    }
}

impl Display for TreeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// Physical orientation of a pedigree chart.
///
/// Layouts are computed with the root on the left and generations advancing
/// to the right, which is [`Direction::Right`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Root at the top, generations advance downward
    Down,
    /// Root at the bottom, generations advance upward
    Up,
    /// Root on the left, generations advance rightward (default)
    #[default]
    Right,
    /// Root on the right, generations advance leftward
    Left,
}

impl Direction {
    /// Checks whether generations advance along the vertical axis
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Down | Self::Up)
    }

    /// Checks whether the generation axis runs against the canonical one
    pub fn is_reversed(self) -> bool {
        matches!(self, Self::Up | Self::Left)
    }
}

impl FromStr for Direction {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "down" => Ok(Self::Down),
            "up" => Ok(Self::Up),
            "right" => Ok(Self::Right),
            "left" => Ok(Self::Left),
            _ => Err("Unsupported direction"),
        }
    }
}

impl From<Direction> for &'static str {
    fn from(val: Direction) -> Self {
        match val {
            Direction::Down => "down",
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Left => "left",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

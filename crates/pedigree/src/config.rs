//! Configuration types for pedigree charts.
//!
//! This module provides configuration structures that control how pedigrees
//! are built, laid out and styled. All types implement [`serde::Deserialize`]
//! for loading from TOML files; every field is optional and falls back to its
//! default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Depth, [`TreeStyle`], [`Direction`] and display switches.
//! - [`StyleConfig`] - Visual options used by the SVG renderer.
//!
//! # Example
//!
//! ```
//! # use pedigree::config::AppConfig;
//! let config: AppConfig = toml::from_str(r#"
//!     [layout]
//!     max_depth = 4
//!     style = "compact"
//! "#).unwrap();
//! assert_eq!(config.layout().max_depth(), 4);
//! assert!(config.layout().show_marriage_labels());
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use pedigree_core::chart::{Direction, TreeStyle};

use crate::{color::Color, error::PedigreeError, layout::LayoutOptions, tree::MAX_DEPTH};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the layout configuration for command-line overrides.
    pub fn layout_mut(&mut self) -> &mut LayoutConfig {
        &mut self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks the configuration for values no pedigree can be built with.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::DepthOutOfRange`] for a depth outside 1..=9,
    /// [`PedigreeError::InvalidDepth`] for a depth the configured style has
    /// no layout for, and [`PedigreeError::Config`] for an unparsable color.
    pub fn validate(&self) -> Result<(), PedigreeError> {
        self.layout.validate()?;
        self.style.background_color().map_err(PedigreeError::Config)?;
        Ok(())
    }
}

/// Layout configuration section.
///
/// Defaults: five generations, standard style, root on the left, marriage
/// labels and placeholders shown.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    max_depth: usize,
    style: TreeStyle,
    direction: Direction,
    show_marriage_labels: bool,
    show_unknown_placeholders: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            style: TreeStyle::default(),
            direction: Direction::default(),
            show_marriage_labels: true,
            show_unknown_placeholders: true,
        }
    }
}

impl LayoutConfig {
    /// Returns the number of generations to build and lay out.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn style(&self) -> TreeStyle {
        self.style
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn show_marriage_labels(&self) -> bool {
        self.show_marriage_labels
    }

    pub fn show_unknown_placeholders(&self) -> bool {
        self.show_unknown_placeholders
    }

    /// Returns the display switches handed to the layout engines.
    pub fn options(&self) -> LayoutOptions {
        LayoutOptions {
            show_marriage_labels: self.show_marriage_labels,
            show_unknown_placeholders: self.show_unknown_placeholders,
        }
    }

    pub fn set_max_depth(&mut self, max_depth: usize) -> &mut Self {
        self.max_depth = max_depth;
        self
    }

    pub fn set_style(&mut self, style: TreeStyle) -> &mut Self {
        self.style = style;
        self
    }

    pub fn set_direction(&mut self, direction: Direction) -> &mut Self {
        self.direction = direction;
        self
    }

    pub fn set_show_marriage_labels(&mut self, show: bool) -> &mut Self {
        self.show_marriage_labels = show;
        self
    }

    pub fn set_show_unknown_placeholders(&mut self, show: bool) -> &mut Self {
        self.show_unknown_placeholders = show;
        self
    }

    /// Checks the depth against the tree builder and the configured style.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::DepthOutOfRange`] or [`PedigreeError::InvalidDepth`].
    pub fn validate(&self) -> Result<(), PedigreeError> {
        if !(1..=MAX_DEPTH).contains(&self.max_depth) {
            return Err(PedigreeError::DepthOutOfRange(self.max_depth));
        }
        if !self.style.supports_depth(self.max_depth) {
            return Err(PedigreeError::InvalidDepth {
                style: self.style,
                depth: self.max_depth,
            });
        }
        Ok(())
    }
}

/// Visual styling configuration for rendered charts.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] for charts, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Width of one grid cell in pixels.
    #[serde(default)]
    cell_width: Option<f32>,

    /// Height of one grid cell in pixels.
    #[serde(default)]
    cell_height: Option<f32>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn cell_width(&self) -> Option<f32> {
        self.cell_width
    }

    pub fn cell_height(&self) -> Option<f32> {
        self.cell_height
    }
}

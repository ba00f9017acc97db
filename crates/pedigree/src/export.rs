//! Rendering of laid-out pedigrees.
//!
//! This module provides the [`Renderer`] trait that turns an
//! [`AncestorTree`] and its [`LayoutResult`] into an output format. It is the
//! final stage of the pipeline:
//!
//! ```text
//! Ancestry data
//!     ↓ build
//! AncestorTree
//!     ↓ layout
//! LayoutResult (canonical grid)
//!     ↓ render (this module, through the orientation transform)
//! Output document
//! ```
//!
//! Display strings come from a [`LabelSource`], so renderers never touch the
//! ancestry data directly.
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! # Error Handling
//!
//! Render operations return [`Error`], which converts into
//! [`PedigreeError::Export`] at the crate boundary.
//!
//! [`PedigreeError::Export`]: crate::PedigreeError::Export

/// SVG export backend.
pub mod svg;

use std::{fs, path::Path};

use pedigree_core::{
    ancestry::{FamilyRef, PersonRef},
    chart::Direction,
};

use crate::{layout::LayoutResult, tree::AncestorTree};

/// Display strings for people and marriages.
pub trait LabelSource {
    /// Returns the text shown in a person's box
    fn person_label(&self, person: PersonRef) -> Option<String>;

    /// Returns the text shown in the marriage cell of a family
    fn marriage_label(&self, family: FamilyRef) -> Option<String>;
}

/// Abstraction for pedigree rendering backends.
///
/// See the [`svg`] module for the built-in SVG implementation.
pub trait Renderer {
    /// Renders `layout` of `tree` in the physical `direction`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the layout cannot be converted to the
    /// target format.
    fn render(
        &mut self,
        tree: &AncestorTree,
        layout: &LayoutResult,
        direction: Direction,
        labels: &dyn LabelSource,
    ) -> Result<String, Error>;

    /// Renders like [`Renderer::render`] and writes the document to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing the output fails.
    fn render_to_file(
        &mut self,
        tree: &AncestorTree,
        layout: &LayoutResult,
        direction: Direction,
        labels: &dyn LabelSource,
        path: &Path,
    ) -> Result<(), Error> {
        let document = self.render(tree, layout, direction, labels)?;
        fs::write(path, document).map_err(Error::Io)
    }
}

/// Errors that can occur during rendering.
///
/// This type is converted into [`PedigreeError::Export`] at the crate
/// boundary via the [`From`] implementation in [`crate::error`].
///
/// [`PedigreeError::Export`]: crate::PedigreeError::Export
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

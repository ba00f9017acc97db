//! Layout engine factory module
//!
//! This module selects the layout engine for a [`TreeStyle`]. Standard and
//! expanded pedigrees share the proportional engine with a different vertical
//! spread; compact pedigrees are read from fixed position tables.
//!
//! The module uses a builder pattern for creating and configuring layout engines.

mod compact;
mod proportional;

use std::collections::HashMap;

use pedigree_core::chart::TreeStyle;

use crate::{
    error::PedigreeError,
    layout::{LayoutOptions, LayoutResult},
    tree::AncestorTree,
};

/// Trait defining the interface for pedigree layout engines
pub trait PedigreeEngine {
    /// Calculate the layout of the first `depth` generations of `tree`
    ///
    /// # Errors
    /// Returns `PedigreeError::InvalidDepth` if the engine has no layout for `depth`.
    fn calculate(&self, tree: &AncestorTree, depth: usize) -> Result<LayoutResult, PedigreeError>;
}

/// Builder for creating and configuring layout engines.
#[derive(Default)]
pub struct EngineBuilder {
    // Cache for reusing engines with the same configuration
    engines: HashMap<TreeStyle, Box<dyn PedigreeEngine>>,

    options: LayoutOptions,
}

impl EngineBuilder {
    /// Create a new engine builder with default engine cache and configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display switches passed to every engine
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Get the engine for the specified tree style with configured options
    pub fn engine(&mut self, style: TreeStyle) -> &dyn PedigreeEngine {
        let engine = self.engines.entry(style).or_insert_with(|| {
            let engine: Box<dyn PedigreeEngine> = match style {
                TreeStyle::Standard => {
                    let mut e = proportional::Engine::new(proportional::Spread::Standard);
                    e.set_options(self.options);
                    Box::new(e)
                }
                TreeStyle::Expanded => {
                    let mut e = proportional::Engine::new(proportional::Spread::Expanded);
                    e.set_options(self.options);
                    Box::new(e)
                }
                TreeStyle::Compact => {
                    let mut e = compact::Engine::new();
                    e.set_options(self.options);
                    Box::new(e)
                }
            };
            engine
        });
        // Dereference to avoid returning reference to temporary
        &**engine
    }
}

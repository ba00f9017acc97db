//! Pedigree - ancestor charts laid out on a cell grid.
//!
//! Builds the pedigree of a person from any [`AncestryProvider`], lays it out
//! in one of three [`TreeStyle`](chart::TreeStyle)s, maps it to one of four
//! [`Direction`](chart::Direction)s and renders it to SVG.

pub mod color;
pub mod config;
pub mod database;
pub mod export;
pub mod layout;
pub mod orientation;
pub mod tree;

mod error;

pub use pedigree_core::{ancestry, chart, geometry, identifier};

pub use error::PedigreeError;

use log::{debug, info, warn};

use ancestry::{AncestryProvider, PersonRef};
use config::AppConfig;
use export::{LabelSource, Renderer};
use layout::LayoutResult;
use tree::{AncestorTree, AncestorTreeBuilder};

/// Builder for constructing, laying out and rendering pedigrees.
///
/// # Examples
///
/// ```rust
/// use pedigree::{PedigreeBuilder, ancestry::PersonRef, database::AncestryDatabase};
///
/// let db = AncestryDatabase::from_toml(r#"
///     [[person]]
///     id = "child"
///     parent_families = ["F"]
///
///     [[person]]
///     id = "father"
///
///     [[family]]
///     id = "F"
///     father = "father"
///
///     [[family.child]]
///     id = "child"
/// "#).expect("valid database");
///
/// let builder = PedigreeBuilder::default();
/// let tree = builder.build_tree(PersonRef::new("child"), &db)
///     .expect("depth in range");
/// let layout = builder.compute_layout(&tree)
///     .expect("standard layout");
/// let people = layout.boxes().values().filter(|b| !b.is_placeholder());
/// assert_eq!(people.count(), 2);
///
/// let svg = builder.render_svg(&db, PersonRef::new("child"))
///     .expect("Failed to render");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Default)]
pub struct PedigreeBuilder {
    config: AppConfig,
}

impl PedigreeBuilder {
    /// Create a new pedigree builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Build the pedigree of `root` with the configured depth.
    ///
    /// Ancestry loops are not errors: they end up as
    /// [`Diagnostic`](tree::Diagnostic)s on the returned tree.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::DepthOutOfRange`] if the configured depth is
    /// outside 1..=9.
    pub fn build_tree<P>(&self, root: PersonRef, provider: &P) -> Result<AncestorTree, PedigreeError>
    where
        P: AncestryProvider + ?Sized,
    {
        let builder = AncestorTreeBuilder::new(provider, self.config.layout().max_depth())?;
        Ok(builder.build(root))
    }

    /// Lay out every generation of `tree` with the configured style.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::InvalidDepth`] if the configured style has no
    /// layout for the depth of `tree`.
    pub fn compute_layout(&self, tree: &AncestorTree) -> Result<LayoutResult, PedigreeError> {
        let layout = self.config.layout();
        layout::compute_layout(tree, tree.depth(), layout.style(), layout.options())
    }

    /// Build, lay out and render the pedigree of `root` to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::UnknownPerson`] if `source` has no label for
    /// `root`, and any error of [`Self::build_tree`], [`Self::compute_layout`]
    /// or the renderer.
    pub fn render_svg<P>(&self, source: &P, root: PersonRef) -> Result<String, PedigreeError>
    where
        P: AncestryProvider + LabelSource,
    {
        self.config.validate()?;
        if source.person_label(root).is_none() {
            return Err(PedigreeError::UnknownPerson(root));
        }

        let tree = self.build_tree(root, source)?;
        for diagnostic in tree.diagnostics() {
            warn!(diagnostic:% = diagnostic; "Pedigree truncated");
        }

        let layout = self.compute_layout(&tree)?;
        debug!(rectangles = layout.rectangles().count(); "Rendering pedigree");

        let mut renderer = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .build()?;
        let svg = renderer.render(&tree, &layout, self.config.layout().direction(), source)?;

        info!(root:% = root; "Pedigree rendered successfully");
        Ok(svg)
    }
}

//! CLI logic for the pedigree chart tool.
//!
//! Loads a configuration and an ancestry database, then renders the pedigree
//! of one person to an SVG file.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use pedigree::{
    PedigreeBuilder, PedigreeError, ancestry::PersonRef, database::AncestryDatabase,
};

/// Run the pedigree CLI application
///
/// The root person is `--root` when given, otherwise the home person of the
/// database.
///
/// # Errors
///
/// Returns `PedigreeError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Database errors, or a database without a usable root person
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), PedigreeError> {
    info!(
        database_path = args.database,
        output_path = args.output;
        "Processing pedigree"
    );

    let app_config = config::resolve_config(args)?;

    let database = AncestryDatabase::from_path(&args.database)?;
    let root = match &args.root {
        Some(root) => PersonRef::new(root),
        None => database.home_person().ok_or_else(|| {
            PedigreeError::Database(
                "No root person given and the database has no home person".to_string(),
            )
        })?,
    };

    let builder = PedigreeBuilder::new(app_config);
    let svg = builder.render_svg(&database, root)?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}

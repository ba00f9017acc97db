//! Error adapter for converting PedigreeError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use pedigree::{PedigreeError, chart::TreeStyle};

/// Adapter giving a [`PedigreeError`] an error code and help text.
pub struct ErrorAdapter<'a>(pub &'a PedigreeError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            PedigreeError::Io(_) => "pedigree::io",
            PedigreeError::Config(_) => "pedigree::config",
            PedigreeError::Database(_) => "pedigree::database",
            PedigreeError::UnknownPerson(_) => "pedigree::unknown_person",
            PedigreeError::DepthOutOfRange(_) => "pedigree::depth",
            PedigreeError::InvalidDepth { .. } => "pedigree::invalid_depth",
            PedigreeError::Export(_) => "pedigree::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            PedigreeError::DepthOutOfRange(_) => {
                "choose between 1 and 9 generations with --depth".to_string()
            }
            PedigreeError::InvalidDepth { style, .. } => {
                let depths = TreeStyle::COMPACT_DEPTHS
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("the {style} style supports {depths} generations; try --style standard")
            }
            PedigreeError::UnknownPerson(_) => {
                "pass the id of a person listed in the database with --root".to_string()
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Wrap a [`PedigreeError`] for rendering by miette.
pub fn to_reportable(err: &PedigreeError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}

#[cfg(test)]
mod tests {
    use pedigree::ancestry::PersonRef;

    use super::*;

    fn code_of(err: &PedigreeError) -> String {
        to_reportable(err).code().unwrap().to_string()
    }

    #[test]
    fn test_codes() {
        assert_eq!(
            code_of(&PedigreeError::Database("broken".to_string())),
            "pedigree::database"
        );
        assert_eq!(
            code_of(&PedigreeError::DepthOutOfRange(12)),
            "pedigree::depth"
        );
        assert_eq!(
            code_of(&PedigreeError::UnknownPerson(PersonRef::new("x"))),
            "pedigree::unknown_person"
        );
    }

    #[test]
    fn test_invalid_depth_help() {
        let err = PedigreeError::InvalidDepth {
            style: TreeStyle::Compact,
            depth: 7,
        };
        let adapter = to_reportable(&err);
        assert_eq!(
            adapter.to_string(),
            "The compact tree style cannot lay out 7 generations"
        );
        let help = adapter.help().unwrap().to_string();
        assert!(help.contains("2, 3, 4, 5"));
    }

    #[test]
    fn test_no_help_for_io() {
        let err = PedigreeError::Io(std::io::Error::other("disk full"));
        assert!(to_reportable(&err).help().is_none());
        assert!(to_reportable(&err).labels().is_none());
    }
}

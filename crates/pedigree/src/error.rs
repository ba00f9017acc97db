//! Error types for pedigree operations.
//!
//! This module provides the main error type [`PedigreeError`]. Recoverable
//! conditions met while walking the ancestry, such as a person being their own
//! ancestor, are not errors; they are reported as
//! [`Diagnostic`](crate::tree::Diagnostic)s on the built tree.

use std::io;

use thiserror::Error;

use pedigree_core::{ancestry::PersonRef, chart::TreeStyle};

/// The main error type for pedigree operations.
#[derive(Debug, Error)]
pub enum PedigreeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Unknown person: {0}")]
    UnknownPerson(PersonRef),

    #[error("Tree depth {0} is outside the supported range 1..=9")]
    DepthOutOfRange(usize),

    #[error("The {style} tree style cannot lay out {depth} generations")]
    InvalidDepth { style: TreeStyle, depth: usize },

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for PedigreeError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_depth_message() {
        let err = PedigreeError::InvalidDepth {
            style: TreeStyle::Compact,
            depth: 6,
        };
        assert_eq!(
            err.to_string(),
            "The compact tree style cannot lay out 6 generations"
        );
    }
}

//! Pedigree Core Types and Definitions
//!
//! This crate provides the foundational types shared by the pedigree tree
//! builder, its layout engines and renderers. It includes:
//!
//! - **Identifiers**: Interned record handles ([`identifier::Id`])
//! - **Geometry**: Grid cells and bounds ([`geometry`] module)
//! - **Ancestry**: Slots, relations and the data-source capability ([`ancestry`] module)
//! - **Chart**: Tree style and orientation options ([`chart`] module)

pub mod ancestry;
pub mod chart;
pub mod geometry;
pub mod identifier;

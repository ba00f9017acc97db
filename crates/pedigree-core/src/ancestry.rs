//! Ancestry data model shared by the tree builder, the layout engines and
//! ancestry data sources.
//!
//! # Overview
//!
//! - [`PersonRef`] / [`FamilyRef`] - Opaque record handles
//! - [`ChildRelation`] - How a child relates to one of its parents
//! - [`Family`] - A parent family as seen from one of its children
//! - [`AncestorSlot`] - One populated position of a pedigree
//! - [`AncestryProvider`] - The read-only capability a pedigree is built from

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::identifier::Id;

/// Handle of a person record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct PersonRef(Id);

impl PersonRef {
    pub fn new(handle: &str) -> Self {
        Self(Id::new(handle))
    }

    /// Returns the underlying identifier
    pub fn id(self) -> Id {
        self.0
    }
}

impl fmt::Display for PersonRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PersonRef {
    fn from(handle: &str) -> Self {
        Self::new(handle)
    }
}

/// Handle of a family record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct FamilyRef(Id);

impl FamilyRef {
    pub fn new(handle: &str) -> Self {
        Self(Id::new(handle))
    }

    /// Returns the underlying identifier
    pub fn id(self) -> Id {
        self.0
    }
}

impl fmt::Display for FamilyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FamilyRef {
    fn from(handle: &str) -> Self {
        Self::new(handle)
    }
}

/// Relation of a child to one of its parents.
///
/// Only [`ChildRelation::Birth`] is drawn as a solid connector line; every
/// other kind is drawn dashed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChildRelation {
    #[default]
    Birth,
    Adopted,
    Stepchild,
    Sponsored,
    Foster,
    Unknown,
}

impl ChildRelation {
    /// Returns `true` for the default biological relation
    pub fn is_birth(self) -> bool {
        self == Self::Birth
    }
}

impl fmt::Display for ChildRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Birth => "birth",
            Self::Adopted => "adopted",
            Self::Stepchild => "stepchild",
            Self::Sponsored => "sponsored",
            Self::Foster => "foster",
            Self::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// A child's relations to the father and to the mother of a family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChildRelations {
    pub father: ChildRelation,
    pub mother: ChildRelation,
}

/// A parent family: the union a child was born into (or joined).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Family {
    handle: FamilyRef,
    father: Option<PersonRef>,
    mother: Option<PersonRef>,
}

impl Family {
    pub fn new(handle: FamilyRef, father: Option<PersonRef>, mother: Option<PersonRef>) -> Self {
        Self {
            handle,
            father,
            mother,
        }
    }

    pub fn handle(&self) -> FamilyRef {
        self.handle
    }

    pub fn father(&self) -> Option<PersonRef> {
        self.father
    }

    pub fn mother(&self) -> Option<PersonRef> {
        self.mother
    }
}

/// One populated position of a pedigree.
///
/// Slots are addressed like a binary heap: the root is slot `0`, the father
/// of slot `i` is slot `2i + 1` and the mother is slot `2i + 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AncestorSlot {
    person: PersonRef,
    relation: ChildRelation,
    family: Option<FamilyRef>,
    alive: bool,
}

impl AncestorSlot {
    pub fn new(person: PersonRef, relation: ChildRelation, alive: bool) -> Self {
        Self {
            person,
            relation,
            family: None,
            alive,
        }
    }

    /// Sets the parent family this person was found in
    pub fn with_family(mut self, family: FamilyRef) -> Self {
        self.family = Some(family);
        self
    }

    pub fn person(&self) -> PersonRef {
        self.person
    }

    /// Returns the relation of this person's child (the slot below) to this person
    pub fn relation(&self) -> ChildRelation {
        self.relation
    }

    /// Returns this person's own parent family, if one was resolved
    pub fn family(&self) -> Option<FamilyRef> {
        self.family
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

/// Raised by an [`AncestryProvider`] when a person turns out to be their own
/// ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{person} was found to be their own ancestor")]
pub struct LoopDetected {
    pub person: PersonRef,
}

/// Read-only ancestry capability a pedigree is built from.
///
/// Lookup misses are never errors: a missing family, parent or relation simply
/// means the ancestor is unknown.
pub trait AncestryProvider {
    /// Returns the first known parent family of `person`
    fn parent_family(&self, person: PersonRef) -> Option<Family>;

    /// Returns the relations of `child` to the parents of `family`, or `None`
    /// when the family does not list `child`
    fn child_relations(&self, family: &Family, child: PersonRef) -> Option<ChildRelations>;

    /// Estimates whether `person` is still alive.
    ///
    /// # Errors
    ///
    /// Returns [`LoopDetected`] when the estimate walked into an ancestry loop
    /// through `person`.
    fn is_probably_alive(&self, person: PersonRef) -> Result<bool, LoopDetected>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_birth_is_birth() {
        assert!(ChildRelation::Birth.is_birth());
        assert!(!ChildRelation::Adopted.is_birth());
        assert!(!ChildRelation::Unknown.is_birth());
        assert!(ChildRelations::default().father.is_birth());
    }

    #[test]
    fn test_slot_family() {
        let slot = AncestorSlot::new(PersonRef::new("I1"), ChildRelation::Foster, true);
        assert_eq!(slot.family(), None);

        let slot = slot.with_family(FamilyRef::new("F1"));
        assert_eq!(slot.family(), Some(FamilyRef::new("F1")));
        assert_eq!(slot.relation(), ChildRelation::Foster);
    }

    #[test]
    fn test_loop_detected_message() {
        let err = LoopDetected {
            person: PersonRef::new("I7"),
        };
        assert_eq!(err.to_string(), "I7 was found to be their own ancestor");
    }
}

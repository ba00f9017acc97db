//! Ancestor tree construction.
//!
//! [`AncestorTreeBuilder`] walks the parents-of relation of an
//! [`AncestryProvider`] from a root person and fills a fixed-size,
//! heap-indexed array of [`AncestorSlot`]s: the root is slot `0`, the father of
//! slot `i` is slot `2i + 1` and the mother slot `2i + 2`.
//!
//! Recursion is bounded by the requested depth. A person reported to be their
//! own ancestor ends the walk on that branch and is recorded as a
//! [`Diagnostic`] instead of failing the whole build.

use std::fmt;

use log::{debug, info, trace, warn};

use pedigree_core::ancestry::{AncestorSlot, AncestryProvider, ChildRelation, PersonRef};

use crate::error::PedigreeError;

/// Deepest pedigree that can be built (511 slots).
pub const MAX_DEPTH: usize = 9;

/// Returns the slot of the father of `index`
pub fn father_index(index: usize) -> usize {
    2 * index + 1
}

/// Returns the slot of the mother of `index`
pub fn mother_index(index: usize) -> usize {
    2 * index + 2
}

/// Returns the slot of the child of `index`, or `None` for the root
pub fn child_index(index: usize) -> Option<usize> {
    (index > 0).then(|| (index - 1) / 2)
}

/// Returns the generation of `index`, counting the root as generation `0`
pub fn level(index: usize) -> u32 {
    (index + 1).ilog2()
}

/// A recoverable condition met while building a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// The person in `slot` was found to be their own ancestor; the walk
    /// stopped there.
    AncestryLoop { slot: usize, person: PersonRef },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AncestryLoop { person, .. } => write!(
                f,
                "Relationship loop detected: {person} was found to be their own ancestor"
            ),
        }
    }
}

/// A built pedigree: the slot array plus what was learned building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorTree {
    slots: Vec<Option<AncestorSlot>>,
    depth: usize,
    observed_depth: usize,
    diagnostics: Vec<Diagnostic>,
}

impl AncestorTree {
    /// Returns the requested number of generations
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the number of generations that actually hold a person
    pub fn observed_depth(&self) -> usize {
        self.observed_depth
    }

    /// Returns all `2^depth - 1` slots
    pub fn slots(&self) -> &[Option<AncestorSlot>] {
        &self.slots
    }

    /// Returns the slot at `index`; indices past the end are empty
    pub fn slot(&self, index: usize) -> Option<&AncestorSlot> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn is_populated(&self, index: usize) -> bool {
        self.slot(index).is_some()
    }

    pub fn root(&self) -> Option<&AncestorSlot> {
        self.slot(0)
    }

    /// Returns the number of populated slots below `limit`
    pub fn populated_count(&self, limit: usize) -> usize {
        self.slots.iter().take(limit).flatten().count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Builds [`AncestorTree`]s from an ancestry provider.
///
/// # Examples
///
/// ```
/// use pedigree::{database::AncestryDatabase, tree::AncestorTreeBuilder};
/// use pedigree_core::ancestry::PersonRef;
///
/// let db = AncestryDatabase::from_toml(r#"
///     [[person]]
///     id = "I1"
///     name = "Ada"
/// "#).expect("valid database");
///
/// let tree = AncestorTreeBuilder::new(&db, 3)
///     .expect("depth in range")
///     .build(PersonRef::new("I1"));
/// assert_eq!(tree.populated_count(7), 1);
/// ```
pub struct AncestorTreeBuilder<'a, P: AncestryProvider + ?Sized> {
    provider: &'a P,
    max_depth: usize,
}

impl<'a, P: AncestryProvider + ?Sized> AncestorTreeBuilder<'a, P> {
    /// Create a builder reading from `provider`.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::DepthOutOfRange`] unless `1 <= max_depth <= 9`.
    pub fn new(provider: &'a P, max_depth: usize) -> Result<Self, PedigreeError> {
        if !(1..=MAX_DEPTH).contains(&max_depth) {
            return Err(PedigreeError::DepthOutOfRange(max_depth));
        }
        Ok(Self {
            provider,
            max_depth,
        })
    }

    /// Build the pedigree of `root`.
    pub fn build(&self, root: PersonRef) -> AncestorTree {
        info!(root:% = root, max_depth = self.max_depth; "Building ancestor tree");

        let mut walk = Walk {
            provider: self.provider,
            max_depth: self.max_depth,
            slots: vec![None; (1 << self.max_depth) - 1],
            observed_depth: 0,
            diagnostics: Vec::new(),
        };
        walk.visit(root, 0, 1, ChildRelation::Birth);

        let tree = AncestorTree {
            slots: walk.slots,
            depth: self.max_depth,
            observed_depth: walk.observed_depth,
            diagnostics: walk.diagnostics,
        };

        debug!(
            populated = tree.populated_count(tree.slots.len()),
            observed_depth = tree.observed_depth,
            diagnostics = tree.diagnostics.len();
            "Ancestor tree built"
        );
        trace!(tree:?; "Built ancestor tree");

        tree
    }
}

/// Mutable state of one build.
struct Walk<'a, P: AncestryProvider + ?Sized> {
    provider: &'a P,
    max_depth: usize,
    slots: Vec<Option<AncestorSlot>>,
    observed_depth: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<P: AncestryProvider + ?Sized> Walk<'_, P> {
    /// Place `person` at `index` (generation `depth`, 1-based) and recurse
    /// into their parents.
    fn visit(&mut self, person: PersonRef, index: usize, depth: usize, relation: ChildRelation) {
        if depth > self.max_depth {
            return;
        }
        self.observed_depth = self.observed_depth.max(depth);

        let alive = match self.provider.is_probably_alive(person) {
            Ok(alive) => alive,
            Err(err) => {
                warn!(slot = index, person:% = person; "{err}");
                self.diagnostics
                    .push(Diagnostic::AncestryLoop { slot: index, person });
                self.slots[index] = Some(AncestorSlot::new(person, relation, false));
                return;
            }
        };

        let slot = AncestorSlot::new(person, relation, alive);

        let Some(family) = self.provider.parent_family(person) else {
            self.slots[index] = Some(slot);
            return;
        };
        let Some(relations) = self.provider.child_relations(&family, person) else {
            trace!(person:% = person, family:% = family.handle(); "Family does not list child");
            self.slots[index] = Some(slot);
            return;
        };

        self.slots[index] = Some(slot.with_family(family.handle()));

        if let Some(father) = family.father() {
            self.visit(father, father_index(index), depth + 1, relations.father);
        }
        if let Some(mother) = family.mother() {
            self.visit(mother, mother_index(index), depth + 1, relations.mother);
        }
    }
}

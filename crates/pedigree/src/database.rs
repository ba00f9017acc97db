//! In-memory ancestry database.
//!
//! [`AncestryDatabase`] holds people and families loaded from TOML and serves
//! them to the tree builder through [`AncestryProvider`] and to renderers
//! through [`LabelSource`].
//!
//! ```toml
//! reference_year = 2024
//! home_person = "I1"
//!
//! [[person]]
//! id = "I1"
//! name = "Ada"
//! birth_year = 1815
//! death_year = 1852
//! parent_families = ["F1"]
//!
//! [[family]]
//! id = "F1"
//! father = "I2"
//! mother = "I3"
//! marriage_year = 1815
//!
//! [[family.child]]
//! id = "I1"
//! mother_relation = "birth"
//! ```

use std::{
    collections::HashSet,
    fs,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use indexmap::IndexMap;
use log::{debug, info, trace};
use serde::Deserialize;

use pedigree_core::ancestry::{
    AncestryProvider, ChildRelation, ChildRelations, Family, FamilyRef, LoopDetected, PersonRef,
};

use crate::{error::PedigreeError, export::LabelSource};

/// People born longer ago than this are assumed dead.
const MAX_AGE: i32 = 110;

/// A person record.
#[derive(Debug, Clone, Deserialize)]
pub struct Person {
    id: PersonRef,
    #[serde(default)]
    name: String,
    #[serde(default)]
    birth_year: Option<i32>,
    #[serde(default)]
    death_year: Option<i32>,
    /// Families this person is a child of, preferred first
    #[serde(default)]
    parent_families: Vec<FamilyRef>,
}

impl Person {
    pub fn id(&self) -> PersonRef {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_year(&self) -> Option<i32> {
        self.birth_year
    }

    pub fn death_year(&self) -> Option<i32> {
        self.death_year
    }

    pub fn parent_families(&self) -> &[FamilyRef] {
        &self.parent_families
    }
}

/// A child entry of a family with the child's relation to each parent.
#[derive(Debug, Clone, Copy, Deserialize)]
struct ChildEntry {
    id: PersonRef,
    #[serde(default)]
    father_relation: ChildRelation,
    #[serde(default)]
    mother_relation: ChildRelation,
}

/// A family record.
#[derive(Debug, Clone, Deserialize)]
pub struct FamilyRecord {
    id: FamilyRef,
    #[serde(default)]
    father: Option<PersonRef>,
    #[serde(default)]
    mother: Option<PersonRef>,
    #[serde(default)]
    marriage_year: Option<i32>,
    #[serde(default, rename = "child")]
    children: Vec<ChildEntry>,
}

impl FamilyRecord {
    pub fn id(&self) -> FamilyRef {
        self.id
    }

    pub fn marriage_year(&self) -> Option<i32> {
        self.marriage_year
    }

    /// Returns the parents as the tree builder sees them
    pub fn family(&self) -> Family {
        Family::new(self.id, self.father, self.mother)
    }

    /// Returns the listed children in order
    pub fn children(&self) -> impl Iterator<Item = PersonRef> + '_ {
        self.children.iter().map(|child| child.id)
    }

    fn parents(&self) -> impl Iterator<Item = PersonRef> {
        self.father.into_iter().chain(self.mother)
    }
}

/// On-disk shape of a database file.
#[derive(Debug, Deserialize)]
struct DatabaseFile {
    #[serde(default)]
    reference_year: Option<i32>,
    #[serde(default)]
    home_person: Option<PersonRef>,
    #[serde(default, rename = "person")]
    persons: Vec<Person>,
    #[serde(default, rename = "family")]
    families: Vec<FamilyRecord>,
}

/// People and families indexed by handle, in file order.
#[derive(Debug, Clone)]
pub struct AncestryDatabase {
    persons: IndexMap<PersonRef, Person>,
    families: IndexMap<FamilyRef, FamilyRecord>,
    reference_year: i32,
    home_person: Option<PersonRef>,
}

impl AncestryDatabase {
    /// Parse a database from TOML source.
    ///
    /// The reference year for age estimates defaults to the current year.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::Database`] if the source is not a valid
    /// database, a handle is used twice, or a record refers to a person or
    /// family that does not exist.
    pub fn from_toml(source: &str) -> Result<Self, PedigreeError> {
        let file: DatabaseFile =
            toml::from_str(source).map_err(|err| PedigreeError::Database(err.to_string()))?;

        let mut persons = IndexMap::with_capacity(file.persons.len());
        for person in file.persons {
            let id = person.id;
            if persons.insert(id, person).is_some() {
                return Err(PedigreeError::Database(format!(
                    "Person `{id}` is defined more than once"
                )));
            }
        }

        let mut families = IndexMap::with_capacity(file.families.len());
        for family in file.families {
            let id = family.id;
            if families.insert(id, family).is_some() {
                return Err(PedigreeError::Database(format!(
                    "Family `{id}` is defined more than once"
                )));
            }
        }

        let database = Self {
            persons,
            families,
            reference_year: file.reference_year.unwrap_or_else(current_year),
            home_person: file.home_person,
        };
        database.check_references()?;

        info!(
            persons = database.persons.len(),
            families = database.families.len(),
            reference_year = database.reference_year;
            "Ancestry database loaded"
        );
        Ok(database)
    }

    /// Read and parse a database file.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::Io`] if the file cannot be read, otherwise as
    /// [`AncestryDatabase::from_toml`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PedigreeError> {
        let path = path.as_ref();
        debug!(path = path.display().to_string(); "Reading ancestry database");
        let source = fs::read_to_string(path)?;
        Self::from_toml(&source)
    }

    fn check_references(&self) -> Result<(), PedigreeError> {
        if let Some(home) = self.home_person {
            if !self.persons.contains_key(&home) {
                return Err(PedigreeError::Database(format!(
                    "Home person `{home}` is not defined"
                )));
            }
        }

        for person in self.persons.values() {
            if let Some(family) = person
                .parent_families
                .iter()
                .find(|family| !self.families.contains_key(*family))
            {
                return Err(PedigreeError::Database(format!(
                    "Person `{}` refers to unknown family `{family}`",
                    person.id
                )));
            }
        }

        for family in self.families.values() {
            if let Some(person) = family
                .parents()
                .chain(family.children())
                .find(|person| !self.persons.contains_key(person))
            {
                return Err(PedigreeError::Database(format!(
                    "Family `{}` refers to unknown person `{person}`",
                    family.id
                )));
            }
        }

        Ok(())
    }

    pub fn person(&self, person: PersonRef) -> Option<&Person> {
        self.persons.get(&person)
    }

    pub fn family(&self, family: FamilyRef) -> Option<&FamilyRecord> {
        self.families.get(&family)
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Returns the person charts start from when no root is given
    pub fn home_person(&self) -> Option<PersonRef> {
        self.home_person
    }

    /// Iterates over all people in file order
    pub fn persons(&self) -> impl Iterator<Item = &Person> {
        self.persons.values()
    }

    /// Checks whether `person` shows up among their own ancestors, following
    /// every parent family.
    fn is_own_ancestor(&self, person: PersonRef) -> bool {
        let mut visited = HashSet::new();
        let mut pending = vec![person];

        while let Some(current) = pending.pop() {
            let Some(record) = self.persons.get(&current) else {
                continue;
            };
            let parents = record
                .parent_families
                .iter()
                .filter_map(|family| self.families.get(family))
                .flat_map(FamilyRecord::parents);

            for parent in parents {
                if parent == person {
                    return true;
                }
                if visited.insert(parent) {
                    pending.push(parent);
                }
            }
        }

        false
    }
}

impl AncestryProvider for AncestryDatabase {
    fn parent_family(&self, person: PersonRef) -> Option<Family> {
        let family = self.persons.get(&person)?.parent_families.first()?;
        self.families.get(family).map(FamilyRecord::family)
    }

    fn child_relations(&self, family: &Family, child: PersonRef) -> Option<ChildRelations> {
        let entry = self
            .families
            .get(&family.handle())?
            .children
            .iter()
            .find(|entry| entry.id == child)?;

        Some(ChildRelations {
            father: entry.father_relation,
            mother: entry.mother_relation,
        })
    }

    fn is_probably_alive(&self, person: PersonRef) -> Result<bool, LoopDetected> {
        if self.is_own_ancestor(person) {
            return Err(LoopDetected { person });
        }

        let Some(record) = self.persons.get(&person) else {
            return Ok(true);
        };

        let alive = match (record.death_year, record.birth_year) {
            (Some(_), _) => false,
            // An age too large to represent is certainly past the limit.
            (None, Some(birth)) => self
                .reference_year
                .checked_sub(birth)
                .is_some_and(|age| age <= MAX_AGE),
            (None, None) => true,
        };
        trace!(person:% = person, alive; "Estimated whether alive");
        Ok(alive)
    }
}

impl LabelSource for AncestryDatabase {
    fn person_label(&self, person: PersonRef) -> Option<String> {
        let record = self.persons.get(&person)?;
        let name = if record.name.is_empty() {
            person.to_string()
        } else {
            record.name.clone()
        };

        let label = match (record.birth_year, record.death_year) {
            (None, None) => name,
            (birth, death) => format!(
                "{name} ({}-{})",
                birth.map(|year| year.to_string()).unwrap_or_default(),
                death.map(|year| year.to_string()).unwrap_or_default()
            ),
        };
        Some(label)
    }

    fn marriage_label(&self, family: FamilyRef) -> Option<String> {
        let year = self.families.get(&family)?.marriage_year?;
        Some(format!("m. {year}"))
    }
}

/// Approximate calendar year from the system clock
fn current_year() -> i32 {
    const SECONDS_PER_YEAR: u64 = 31_556_952;
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    1970 + (elapsed / SECONDS_PER_YEAR) as i32
}

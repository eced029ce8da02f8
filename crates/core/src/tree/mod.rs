//! Transformation of a validated [`RecordGraph`] into a [`FamilyTree`].
//!
//! The build runs in three phases, each finishing before the next starts:
//! 1. [`IdRemapper`] numbers every individual and relation.
//! 2. [`families::build_family`] turns each relation into a [`Family`].
//! 3. [`individuals::build_individual`] turns each person into an
//!    [`Individual`], copying in every family it belongs to together with its
//!    role from [`roles::resolve_role`].
//!
//! Fatal problems are returned as [`TransformError`](crate::error::TransformError).
//! Recoverable ones are logged and collected as [`Diagnostic`]s.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TransformResult;
use crate::model::{Family, FamilyTree};
use crate::raw::{RawIndividual, RecordGraph};

pub mod families;
pub mod individuals;
pub mod remap;
pub mod roles;

pub use families::build_family;
pub use individuals::build_individual;
pub use remap::IdRemapper;
pub use roles::resolve_role;

/// Raw individuals keyed by their source id.
pub type IndividualIndex<'a> = HashMap<&'a str, &'a RawIndividual>;

/// Built families keyed by their remapped id.
pub type FamilyIndex<'a> = HashMap<&'a str, &'a Family>;

/// A recoverable data inconsistency found while building the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// An individual lists a relation that did not produce a family.
    /// `family_id` is `None` when the relation id was never registered.
    MissingFamilyReference {
        individual_id: String,
        raw_family_id: String,
        family_id: Option<String>,
    },
    /// An individual lists a family that does not list them back.
    UnknownRole { individual_id: String, family_id: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingFamilyReference { individual_id, raw_family_id, family_id } => {
                write!(
                    f,
                    "couldn't find family for individual {individual_id}: relation id={raw_family_id}, family id={}",
                    family_id.as_deref().unwrap_or("-")
                )
            }
            Diagnostic::UnknownRole { individual_id, family_id } => {
                write!(f, "individual {individual_id} holds no position in family {family_id}")
            }
        }
    }
}

/// Sink for recoverable problems. Every report is also logged as a warning.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
        self.entries.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

/// Result of a full build: the tree plus whatever was skipped along the way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeBuild {
    pub tree: FamilyTree,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs the three build phases over one record graph.
pub struct FamilyTreeBuilder<'a> {
    graph: &'a RecordGraph,
    remapper: IdRemapper,
    people: IndividualIndex<'a>,
}

impl<'a> FamilyTreeBuilder<'a> {
    pub fn new(graph: &'a RecordGraph) -> Self {
        let mut people = IndividualIndex::with_capacity(graph.individuals.len());
        for individual in &graph.individuals {
            people.entry(individual.id.as_str()).or_insert(individual);
        }
        Self { graph, remapper: IdRemapper::new(graph), people }
    }

    pub fn remapper(&self) -> &IdRemapper {
        &self.remapper
    }

    pub fn build_families(&self) -> TransformResult<Vec<Family>> {
        self.graph
            .relations
            .iter()
            .map(|relation| build_family(relation, &self.remapper, &self.people))
            .collect()
    }

    pub fn build(&self) -> TransformResult<TreeBuild> {
        let families = self.build_families()?;
        log::debug!("built {} families", families.len());

        let mut diagnostics = Diagnostics::default();
        let individuals = {
            let mut family_index = FamilyIndex::with_capacity(families.len());
            for family in &families {
                family_index.entry(family.family_id.as_str()).or_insert(family);
            }
            self.graph
                .individuals
                .iter()
                .map(|raw| build_individual(raw, &self.remapper, &family_index, &mut diagnostics))
                .collect::<TransformResult<Vec<_>>>()?
        };
        log::debug!("built {} individuals", individuals.len());

        Ok(TreeBuild {
            tree: FamilyTree { individuals, families },
            diagnostics: diagnostics.into_vec(),
        })
    }
}

/// Build the family tree for `graph`, logging recoverable problems.
pub fn build_family_tree(graph: &RecordGraph) -> TransformResult<FamilyTree> {
    Ok(FamilyTreeBuilder::new(graph).build()?.tree)
}

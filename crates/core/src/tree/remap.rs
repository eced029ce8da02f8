use std::collections::HashMap;

use crate::error::{EntityKind, TransformError, TransformResult};
use crate::raw::RecordGraph;

/// Lookup tables from raw source ids to short sequential ids.
///
/// Individuals become `I1, I2, ...` and relations `F1, F2, ...`, both in
/// strict input order. Tables are filled once and never change afterwards.
#[derive(Debug, Clone, Default)]
pub struct IdRemapper {
    individuals: HashMap<String, String>,
    families: HashMap<String, String>,
}

impl IdRemapper {
    /// Register every individual and relation of `graph`.
    pub fn new(graph: &RecordGraph) -> Self {
        Self::from_ids(
            graph.individuals.iter().map(|i| i.id.as_str()),
            graph.relations.iter().map(|f| f.id.as_str()),
        )
    }

    pub fn from_ids<'a>(
        individual_ids: impl IntoIterator<Item = &'a str>,
        family_ids: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            individuals: assign_ids(individual_ids, EntityKind::Individual),
            families: assign_ids(family_ids, EntityKind::Family),
        }
    }

    pub fn remap_individual(&self, raw_id: &str) -> TransformResult<&str> {
        lookup(&self.individuals, raw_id, EntityKind::Individual)
    }

    pub fn remap_family(&self, raw_id: &str) -> TransformResult<&str> {
        lookup(&self.families, raw_id, EntityKind::Family)
    }

    pub fn individual_count(&self) -> usize {
        self.individuals.len()
    }

    pub fn family_count(&self) -> usize {
        self.families.len()
    }
}

fn lookup<'a>(
    table: &'a HashMap<String, String>,
    raw_id: &str,
    kind: EntityKind,
) -> TransformResult<&'a str> {
    table.get(raw_id).map(String::as_str).ok_or_else(|| TransformError::lookup(kind, raw_id))
}

/// Number ids in encounter order. A repeated raw id keeps its first mapping
/// and does not consume a sequence number, so new ids stay unique and dense.
fn assign_ids<'a>(
    raw_ids: impl IntoIterator<Item = &'a str>,
    kind: EntityKind,
) -> HashMap<String, String> {
    let mut table = HashMap::new();
    for raw_id in raw_ids {
        if table.contains_key(raw_id) {
            log::debug!("duplicate {kind} id {raw_id}; keeping its first mapping");
            continue;
        }
        let new_id = format!("{}{}", kind.id_prefix(), table.len() + 1);
        table.insert(raw_id.to_string(), new_id);
    }
    table
}

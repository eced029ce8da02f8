//! Derived family-tree entities handed to renderers.
//!
//! Everything here is plain data: fully resolved, serializable, and free of
//! references back into the raw record graph. Cross-links between people and
//! families are expressed only through the remapped `I<n>` / `F<n>` ids.

use serde::{Deserialize, Serialize};

/// Position name used by the source format for a family's children.
pub const CHILDREN_POSITION: &str = "Children";

/// Role reported for an individual found in the [`CHILDREN_POSITION`].
pub const CHILD_ROLE: &str = "Child";

/// Role reported when an individual is not listed in any position of a family.
pub const UNKNOWN_ROLE: &str = "Unknown";

/// Placeholder used for a birth/death date or place that the record omits.
pub const UNKNOWN_EVENT_FIELD: &str = "Unknown";

/// Birth or death information of an individual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    pub date: String,
    pub location: String,
}

/// Projection of an individual as it appears inside a family position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualInFamily {
    pub individual_id: String,
    pub names: Vec<String>,
}

/// A named role slot within a family (e.g. `Husband`, `Wife`, `Children`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyPosition {
    pub name: String,
    pub individuals: Vec<IndividualInFamily>,
}

impl FamilyPosition {
    pub fn contains(&self, individual_id: &str) -> bool {
        self.individuals.iter().any(|member| member.individual_id == individual_id)
    }
}

/// A family unit built from one raw relation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Family {
    pub family_id: String,
    pub family_name: String,
    pub positions: Vec<FamilyPosition>,
    pub descriptions: Vec<String>,
}

impl Family {
    /// Iterate over every member id across all positions, in position order.
    pub fn member_ids(&self) -> impl Iterator<Item = &str> {
        self.positions
            .iter()
            .flat_map(|position| position.individuals.iter().map(|m| m.individual_id.as_str()))
    }
}

/// A value copy of a [`Family`] annotated with one individual's role in it.
///
/// Serializes flat, i.e. with the family fields next to
/// `position_of_individual`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMembership {
    #[serde(flatten)]
    pub family: Family,
    pub position_of_individual: String,
}

/// A person built from one raw individual record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Individual {
    pub individual_id: String,
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<EventInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death: Option<EventInfo>,
    pub families: Vec<FamilyMembership>,
}

impl Individual {
    /// First name entry, if any. Renderers use it as the display name.
    pub fn primary_name(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }
}

/// Output of one transformation run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FamilyTree {
    pub individuals: Vec<Individual>,
    pub families: Vec<Family>,
}

impl FamilyTree {
    pub fn individual(&self, individual_id: &str) -> Option<&Individual> {
        self.individuals.iter().find(|i| i.individual_id == individual_id)
    }

    pub fn family(&self, family_id: &str) -> Option<&Family> {
        self.families.iter().find(|f| f.family_id == family_id)
    }
}

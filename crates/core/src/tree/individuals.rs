//! Individual Builder: one [`Individual`] per raw person record.

use crate::error::TransformResult;
use crate::model::{
    EventInfo, Family, FamilyMembership, Individual, UNKNOWN_EVENT_FIELD, UNKNOWN_ROLE,
};
use crate::raw::{RawEvent, RawIndividual};
use crate::tree::roles::resolve_role;
use crate::tree::{Diagnostic, Diagnostics, FamilyIndex, IdRemapper};

/// Remove repeated names, keeping the first occurrence of each.
pub fn dedup_names(names: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !unique.contains(name) {
            unique.push(name.clone());
        }
    }
    unique
}

/// Birth/death info with `Unknown` standing in for a missing date or place.
pub fn event_info(event: &RawEvent) -> EventInfo {
    EventInfo {
        date: event.date.clone().unwrap_or_else(|| UNKNOWN_EVENT_FIELD.to_string()),
        location: event.place.clone().unwrap_or_else(|| UNKNOWN_EVENT_FIELD.to_string()),
    }
}

/// Build an individual and attach a role-annotated copy of every family it
/// belongs to.
///
/// `families` must already hold every built family. A relation id that does
/// not lead to a built family is reported to `diagnostics` and skipped.
pub fn build_individual(
    raw: &RawIndividual,
    remapper: &IdRemapper,
    families: &FamilyIndex<'_>,
    diagnostics: &mut Diagnostics,
) -> TransformResult<Individual> {
    let individual_id = remapper.remap_individual(&raw.id)?.to_string();

    let mut memberships = Vec::with_capacity(raw.relations.len());
    for raw_family_id in &raw.relations {
        let family_id = match remapper.remap_family(raw_family_id) {
            Ok(family_id) => family_id,
            Err(_) => {
                diagnostics.report(Diagnostic::MissingFamilyReference {
                    individual_id: individual_id.clone(),
                    raw_family_id: raw_family_id.clone(),
                    family_id: None,
                });
                continue;
            }
        };

        let Some(family) = families.get(family_id) else {
            diagnostics.report(Diagnostic::MissingFamilyReference {
                individual_id: individual_id.clone(),
                raw_family_id: raw_family_id.clone(),
                family_id: Some(family_id.to_string()),
            });
            continue;
        };

        let role = resolve_role(&individual_id, family);
        if role == UNKNOWN_ROLE {
            diagnostics.report(Diagnostic::UnknownRole {
                individual_id: individual_id.clone(),
                family_id: family.family_id.clone(),
            });
        }

        memberships.push(FamilyMembership {
            family: Family::clone(family),
            position_of_individual: role.to_string(),
        });
    }

    Ok(Individual {
        individual_id,
        names: dedup_names(&raw.full_names),
        birth: raw.birth.as_ref().map(event_info),
        death: raw.death.as_ref().map(event_info),
        families: memberships,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_seen_order() {
        let names: Vec<String> = ["Ann Lee", "Anne Lee", "Ann Lee"].map(String::from).to_vec();
        assert_eq!(dedup_names(&names), vec!["Ann Lee".to_string(), "Anne Lee".to_string()]);
    }

    #[test]
    fn event_info_defaults_missing_fields() {
        let info = event_info(&RawEvent { date: Some("1900".into()), place: None });
        assert_eq!(info.date, "1900");
        assert_eq!(info.location, "Unknown");
    }
}

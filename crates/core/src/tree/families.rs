//! Family Builder: one [`Family`] per raw relation record.

use crate::error::{EntityKind, TransformError, TransformResult};
use crate::model::{Family, FamilyPosition, IndividualInFamily, CHILDREN_POSITION};
use crate::raw::{RawEvent, RawFamily, RawPosition};
use crate::tree::individuals::dedup_names;
use crate::tree::{IdRemapper, IndividualIndex};

/// Role key that leads the synthesized family name.
pub const HUSBAND_ROLE: &str = "Husband";

/// Separator between surnames in a synthesized family name.
pub const FAMILY_NAME_SEPARATOR: &str = " and ";

/// Text rendered for a marriage date or place that the record omits.
///
/// Matches what existing reports produced for such records.
pub const MISSING_MARRIAGE_FIELD: &str = "undefined";

/// Build a family from its raw record.
///
/// Fails with [`TransformError::Lookup`] when a position references an
/// individual that does not exist.
pub fn build_family(
    raw: &RawFamily,
    remapper: &IdRemapper,
    people: &IndividualIndex<'_>,
) -> TransformResult<Family> {
    let family_id = remapper.remap_family(&raw.id)?.to_string();

    let positions = raw
        .positions
        .iter()
        .map(|position| build_position(position, remapper, people))
        .collect::<TransformResult<Vec<_>>>()?;

    let descriptions = raw.marriage.iter().map(marriage_description).collect();

    Ok(Family { family_id, family_name: family_name(raw, people), positions, descriptions })
}

/// Join the surnames of every non-child member with `" and "`, husband first.
///
/// Members without a surname, or that cannot be found, are skipped; a family
/// with no usable surname gets an empty name.
pub fn family_name(raw: &RawFamily, people: &IndividualIndex<'_>) -> String {
    let mut roles: Vec<&RawPosition> =
        raw.positions.iter().filter(|position| position.role != CHILDREN_POSITION).collect();
    roles.sort_by_key(|position| position.role != HUSBAND_ROLE);

    roles
        .iter()
        .flat_map(|position| position.member_ids.iter())
        .filter_map(|raw_id| people.get(raw_id.as_str()))
        .filter_map(|individual| individual.surname.as_deref())
        .collect::<Vec<_>>()
        .join(FAMILY_NAME_SEPARATOR)
}

pub fn marriage_description(event: &RawEvent) -> String {
    format!(
        "Marriage date is {} at {}",
        event.date.as_deref().unwrap_or(MISSING_MARRIAGE_FIELD),
        event.place.as_deref().unwrap_or(MISSING_MARRIAGE_FIELD),
    )
}

fn build_position(
    raw: &RawPosition,
    remapper: &IdRemapper,
    people: &IndividualIndex<'_>,
) -> TransformResult<FamilyPosition> {
    let individuals = raw
        .member_ids
        .iter()
        .map(|raw_id| -> TransformResult<IndividualInFamily> {
            let individual = people
                .get(raw_id.as_str())
                .ok_or_else(|| TransformError::lookup(EntityKind::Individual, raw_id.as_str()))?;
            Ok(IndividualInFamily {
                individual_id: remapper.remap_individual(&individual.id)?.to_string(),
                names: dedup_names(&individual.full_names),
            })
        })
        .collect::<TransformResult<Vec<_>>>()?;

    Ok(FamilyPosition { name: raw.role.clone(), individuals })
}

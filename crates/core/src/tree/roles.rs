use crate::model::{Family, CHILDREN_POSITION, CHILD_ROLE, UNKNOWN_ROLE};

/// Role of `individual_id` within `family`.
///
/// Returns the name of the first position listing the individual, with
/// `Children` reported as `Child`, or `Unknown` when no position lists them.
pub fn resolve_role<'a>(individual_id: &str, family: &'a Family) -> &'a str {
    match family.positions.iter().find(|position| position.contains(individual_id)) {
        Some(position) if position.name == CHILDREN_POSITION => CHILD_ROLE,
        Some(position) => position.name.as_str(),
        None => UNKNOWN_ROLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FamilyPosition, IndividualInFamily};

    fn member(id: &str) -> IndividualInFamily {
        IndividualInFamily { individual_id: id.to_string(), names: vec![] }
    }

    #[test]
    fn first_matching_position_wins() {
        let family = Family {
            family_id: "F1".into(),
            family_name: String::new(),
            positions: vec![
                FamilyPosition { name: "Husband".into(), individuals: vec![member("I1")] },
                FamilyPosition { name: "Children".into(), individuals: vec![member("I1")] },
            ],
            descriptions: vec![],
        };
        assert_eq!(resolve_role("I1", &family), "Husband");
    }
}

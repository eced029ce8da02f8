//! Typed view of the loosely-shaped record graph produced by a GEDCOM parser.
//!
//! The parser output is a JSON-like graph with two collections, `Individuals`
//! and `Relations`. Any field may hold a bare value or a list of values. This
//! module validates that graph once and normalizes every scalar-or-list field
//! into a `Vec`, so the tree builders never branch on shape.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::{TransformError, TransformResult};

pub const INDIVIDUALS_KEY: &str = "Individuals";
pub const RELATIONS_KEY: &str = "Relations";

pub const ID_KEY: &str = "Id";
pub const FULLNAME_KEY: &str = "Fullname";
pub const SURNAME_KEY: &str = "Surname";
pub const BIRTH_KEY: &str = "Birth";
pub const DEATH_KEY: &str = "Death";
pub const MARRIAGE_KEY: &str = "Marriage";
pub const DATE_KEY: &str = "Date";
pub const ORIGINAL_KEY: &str = "Original";
pub const PLACE_KEY: &str = "Place";
pub const VALUE_KEY: &str = "Value";

/// Date and place of a raw event sub-record (birth, death, marriage).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEvent {
    /// The date exactly as written in the source (`Date.Original`).
    pub date: Option<String>,
    pub place: Option<String>,
}

/// A person record, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawIndividual {
    pub id: String,
    /// Full names in source order, duplicates kept.
    pub full_names: Vec<String>,
    pub surname: Option<String>,
    pub birth: Option<RawEvent>,
    pub death: Option<RawEvent>,
    /// Raw ids of the relation records this person participates in.
    pub relations: Vec<String>,
}

/// One role key of a relation record and the raw ids listed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPosition {
    pub role: String,
    pub member_ids: Vec<String>,
}

/// A family/relation record, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFamily {
    pub id: String,
    /// Every key except `Id` and `Marriage`, in source key order.
    pub positions: Vec<RawPosition>,
    /// First marriage entry. `Some(RawEvent::default())` when the key is
    /// present but carries nothing usable.
    pub marriage: Option<RawEvent>,
}

/// The two record collections, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordGraph {
    pub individuals: Vec<RawIndividual>,
    pub relations: Vec<RawFamily>,
}

impl RecordGraph {
    /// Validate a parsed record graph.
    ///
    /// A record repeating an earlier record's id is logged and skipped.
    pub fn from_value(value: &Value) -> TransformResult<Self> {
        let root = value
            .as_object()
            .ok_or_else(|| TransformError::malformed("record graph", "expected an object"))?;

        let individuals = one_or_many(root.get(INDIVIDUALS_KEY))
            .into_iter()
            .map(RawIndividual::from_value)
            .collect::<TransformResult<Vec<_>>>()?;
        let relations = one_or_many(root.get(RELATIONS_KEY))
            .into_iter()
            .map(RawFamily::from_value)
            .collect::<TransformResult<Vec<_>>>()?;

        Ok(Self {
            individuals: keep_first_by_id(individuals, "individual", |i| i.id.as_str()),
            relations: keep_first_by_id(relations, "relation", |f| f.id.as_str()),
        })
    }

    /// Parse and validate a record graph serialized as JSON.
    pub fn from_json_str(body: &str) -> TransformResult<Self> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| TransformError::malformed("record graph", e.to_string()))?;
        Self::from_value(&value)
    }
}

impl RawIndividual {
    pub fn from_value(value: &Value) -> TransformResult<Self> {
        let record = as_record(value, "individual")?;
        let id = record_id(record, "individual")?;

        let full_names = extract_full_names(&id, record.get(FULLNAME_KEY))?;
        let surname = one_or_many(record.get(SURNAME_KEY)).into_iter().find_map(Value::as_str);
        let birth = first_event(record.get(BIRTH_KEY));
        let death = first_event(record.get(DEATH_KEY));
        let relations = string_list(record.get(RELATIONS_KEY), "individual", &id)?;

        Ok(Self { id, full_names, surname: surname.map(str::to_string), birth, death, relations })
    }
}

impl RawFamily {
    pub fn from_value(value: &Value) -> TransformResult<Self> {
        let record = as_record(value, "relation")?;
        let id = record_id(record, "relation")?;

        let mut positions = Vec::new();
        let mut marriage = None;
        for (key, field) in record {
            match key.as_str() {
                ID_KEY => continue,
                MARRIAGE_KEY => {
                    marriage = Some(first_event(Some(field)).unwrap_or_default());
                }
                _ => positions.push(RawPosition {
                    role: key.clone(),
                    member_ids: string_list(Some(field), "relation", &id)?,
                }),
            }
        }

        Ok(Self { id, positions, marriage })
    }
}

/// Normalize a scalar-or-list field into a list. Absent and `null` fields
/// become empty lists.
pub fn one_or_many(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(other) => vec![other],
    }
}

/// Extract the display strings of a `Fullname` field.
///
/// Each entry is either a plain string or an object carrying a string
/// `Value`. Anything else fails with [`TransformError::Extraction`].
pub fn extract_full_names(individual_id: &str, field: Option<&Value>) -> TransformResult<Vec<String>> {
    one_or_many(field)
        .into_iter()
        .map(|entry| match entry {
            Value::String(name) => Ok(name.clone()),
            Value::Object(obj) => match obj.get(VALUE_KEY) {
                Some(Value::String(name)) => Ok(name.clone()),
                _ => Err(extraction_error(individual_id, entry)),
            },
            _ => Err(extraction_error(individual_id, entry)),
        })
        .collect()
}

fn extraction_error(individual_id: &str, entry: &Value) -> TransformError {
    TransformError::Extraction { individual: individual_id.to_string(), entry: entry.to_string() }
}

fn as_record<'a>(value: &'a Value, record: &'static str) -> TransformResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| TransformError::malformed(record, format!("expected an object, got {value}")))
}

fn record_id(record: &Map<String, Value>, kind: &'static str) -> TransformResult<String> {
    match record.get(ID_KEY) {
        Some(Value::String(id)) => Ok(id.clone()),
        _ => Err(TransformError::malformed(kind, "missing string `Id` field")),
    }
}

fn string_list(field: Option<&Value>, kind: &'static str, id: &str) -> TransformResult<Vec<String>> {
    one_or_many(field)
        .into_iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                TransformError::malformed(
                    kind,
                    format!("{id}: expected an identifier string, got {item}"),
                )
            })
        })
        .collect()
}

/// Read the first entry of an event field.
///
/// An absent or falsy field (`null`, `""`, `false`, `0`) yields `None`. An
/// empty list, or a first entry that is not an object (e.g. GEDCOM `1 BIRT Y`),
/// yields an event with no date and no place.
fn first_event(field: Option<&Value>) -> Option<RawEvent> {
    let field = field.filter(|value| !is_falsy(value))?;
    let Some(event) = one_or_many(Some(field)).into_iter().next().and_then(Value::as_object) else {
        return Some(RawEvent::default());
    };

    let date = match event.get(DATE_KEY) {
        Some(Value::String(date)) => Some(date.clone()),
        Some(Value::Object(date)) => {
            date.get(ORIGINAL_KEY).and_then(Value::as_str).map(str::to_string)
        }
        _ => None,
    };
    let place = event.get(PLACE_KEY).and_then(Value::as_str).map(str::to_string);

    Some(RawEvent { date, place })
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::String(text) => text.is_empty(),
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Drop records whose id was already seen, keeping the first occurrence.
fn keep_first_by_id<T>(records: Vec<T>, kind: &str, id: impl Fn(&T) -> &str) -> Vec<T> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            let first = seen.insert(id(record).to_string());
            if !first {
                log::warn!("skipping {kind} record with duplicate id {}", id(record));
            }
            first
        })
        .collect()
}

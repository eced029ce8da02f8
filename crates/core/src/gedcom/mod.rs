//! GEDCOM 5.5.1 reader producing the loosely-shaped record graph.
//!
//! Lines are folded into a node tree by level, then `INDI` and `FAM` records
//! are projected onto the JSON record graph understood by [`crate::raw`]. The
//! projection mirrors common GEDCOM-to-JSON converters: a field seen once is
//! stored as a bare value, a field seen several times becomes a list.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};

use crate::error::{GedcomError, GedcomResult};
use crate::raw::{
    BIRTH_KEY, DATE_KEY, DEATH_KEY, FULLNAME_KEY, ID_KEY, INDIVIDUALS_KEY, MARRIAGE_KEY,
    ORIGINAL_KEY, PLACE_KEY, RELATIONS_KEY, SURNAME_KEY,
};

/// One GEDCOM line split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GedcomLine<'a> {
    pub level: usize,
    pub xref: Option<&'a str>,
    pub tag: &'a str,
    pub value: Option<&'a str>,
}

/// A GEDCOM record or sub-record with its nested lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GedcomNode {
    pub xref: Option<String>,
    pub tag: String,
    pub value: Option<String>,
    pub children: Vec<GedcomNode>,
}

impl GedcomNode {
    fn child(&self, tag: &str) -> Option<&GedcomNode> {
        self.children.iter().find(|c| c.tag == tag)
    }

    fn child_value(&self, tag: &str) -> Option<&str> {
        self.child(tag).and_then(|c| c.value.as_deref()).filter(|v| !v.is_empty())
    }
}

/// Split one line into level, optional cross-reference id, tag and value.
pub fn parse_line(line_no: usize, text: &str) -> GedcomResult<GedcomLine<'_>> {
    let syntax = |reason: &str| GedcomError::Syntax { line: line_no, reason: reason.to_string() };

    let text = text.trim_end_matches(['\r', '\n']).trim_start();
    let (level, rest) = split_token(text);
    let level: usize = level.parse().map_err(|_| syntax("expected a numeric level"))?;

    let (first, rest) = split_token(rest.trim_start_matches(' '));
    let (xref, tag, rest) = if first.len() > 1 && first.starts_with('@') && first.ends_with('@') {
        let (tag, rest) = split_token(rest.trim_start_matches(' '));
        (Some(first), tag, rest)
    } else {
        (None, first, rest)
    };
    if tag.is_empty() {
        return Err(syntax("missing tag"));
    }

    let value = if rest.is_empty() { None } else { Some(rest) };
    Ok(GedcomLine { level, xref, tag, value })
}

fn split_token(s: &str) -> (&str, &str) {
    match s.find(' ') {
        Some(i) => (&s[..i], &s[i + 1..]),
        None => (s, ""),
    }
}

/// Fold GEDCOM text into its level-0 records.
///
/// `CONC` and `CONT` lines are merged into their parent's value.
pub fn parse_nodes(text: &str) -> GedcomResult<Vec<GedcomNode>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut roots = Vec::new();
    let mut open: Vec<GedcomNode> = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        if raw_line.trim().is_empty() {
            continue;
        }
        let line = parse_line(index + 1, raw_line)?;
        if line.level > open.len() {
            return Err(GedcomError::Syntax {
                line: index + 1,
                reason: format!("level {} follows level {}", line.level, open.len().saturating_sub(1)),
            });
        }
        close_to(&mut open, &mut roots, line.level);

        if matches!(line.tag, "CONC" | "CONT") {
            if let Some(parent) = open.last_mut() {
                let value = parent.value.get_or_insert_with(String::new);
                if line.tag == "CONT" {
                    value.push('\n');
                }
                value.push_str(line.value.unwrap_or_default());
                continue;
            }
        }

        open.push(GedcomNode {
            xref: line.xref.map(str::to_string),
            tag: line.tag.to_string(),
            value: line.value.map(str::to_string),
            children: Vec::new(),
        });
    }
    close_to(&mut open, &mut roots, 0);

    Ok(roots)
}

/// Pop open nodes until only `depth` remain, attaching each to its parent.
fn close_to(open: &mut Vec<GedcomNode>, roots: &mut Vec<GedcomNode>, depth: usize) {
    while open.len() > depth {
        let Some(node) = open.pop() else { break };
        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}

/// Read GEDCOM text into a record graph with `Individuals` and `Relations`.
pub fn read_record_graph(text: &str) -> GedcomResult<Value> {
    let mut individuals = Vec::new();
    let mut relations = Vec::new();

    for node in parse_nodes(text)? {
        let Some(xref) = node.xref.as_deref() else { continue };
        match node.tag.as_str() {
            "INDI" => individuals.push(individual_record(xref, &node)),
            "FAM" => relations.push(family_record(xref, &node)),
            _ => {}
        }
    }

    log::info!("read {} individuals and {} relations", individuals.len(), relations.len());
    Ok(json!({ INDIVIDUALS_KEY: individuals, RELATIONS_KEY: relations }))
}

/// Read a GEDCOM file from disk into a record graph.
pub fn load_gedcom(path: &Path) -> Result<Value> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read GEDCOM file {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);
    read_record_graph(&text)
        .with_context(|| format!("Failed to parse GEDCOM file {}", path.display()))
}

fn individual_record(xref: &str, node: &GedcomNode) -> Value {
    let mut record = Map::new();
    record.insert(ID_KEY.to_string(), Value::String(xref.to_string()));

    for child in &node.children {
        match child.tag.as_str() {
            "NAME" => {
                let raw_name = child.value.as_deref().unwrap_or_default();
                push_field(&mut record, FULLNAME_KEY, Value::String(display_name(raw_name)));
                let surname = child
                    .child_value("SURN")
                    .map(str::to_string)
                    .or_else(|| slashed_surname(raw_name));
                if let Some(surname) = surname {
                    record.entry(SURNAME_KEY).or_insert(Value::String(surname));
                }
                if let Some(given) = child.child_value("GIVN") {
                    record.entry("Givenname").or_insert(Value::String(given.to_string()));
                }
            }
            "SEX" => {
                if let Some(sex) = child.value.as_deref() {
                    record.insert("Sex".to_string(), Value::String(sex.to_string()));
                }
            }
            "BIRT" => push_field(&mut record, BIRTH_KEY, event_record(child)),
            "DEAT" => push_field(&mut record, DEATH_KEY, event_record(child)),
            "FAMS" | "FAMC" => {
                if let Some(family) = child.value.as_deref() {
                    push_field(&mut record, RELATIONS_KEY, Value::String(family.to_string()));
                }
            }
            _ => {}
        }
    }

    Value::Object(record)
}

fn family_record(xref: &str, node: &GedcomNode) -> Value {
    let mut record = Map::new();
    record.insert(ID_KEY.to_string(), Value::String(xref.to_string()));

    for child in &node.children {
        let key = match child.tag.as_str() {
            "HUSB" => "Husband",
            "WIFE" => "Wife",
            "CHIL" => "Children",
            "MARR" => {
                push_field(&mut record, MARRIAGE_KEY, event_record(child));
                continue;
            }
            _ => continue,
        };
        if let Some(member) = child.value.as_deref() {
            push_field(&mut record, key, Value::String(member.to_string()));
        }
    }

    Value::Object(record)
}

fn event_record(node: &GedcomNode) -> Value {
    let mut event = Map::new();
    if let Some(date) = node.child_value("DATE") {
        event.insert(DATE_KEY.to_string(), json!({ ORIGINAL_KEY: date }));
    }
    if let Some(place) = node.child_value("PLAC") {
        event.insert(PLACE_KEY.to_string(), Value::String(place.to_string()));
    }
    Value::Object(event)
}

/// Store a bare value the first time, switch to a list on repeats.
fn push_field(record: &mut Map<String, Value>, key: &str, value: Value) {
    match record.get_mut(key) {
        None => {
            record.insert(key.to_string(), value);
        }
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

/// `John /Smith/` -> `John Smith`.
fn display_name(raw: &str) -> String {
    raw.replace('/', " ").split_whitespace().collect::<Vec<_>>().join(" ")
}

fn slashed_surname(raw: &str) -> Option<String> {
    let start = raw.find('/')?;
    let rest = &raw[start + 1..];
    let end = rest.find('/').unwrap_or(rest.len());
    let surname = rest[..end].trim();
    (!surname.is_empty()).then(|| surname.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_with_xref() {
        let line = parse_line(1, "0 @I1@ INDI").unwrap();
        assert_eq!(line.level, 0);
        assert_eq!(line.xref, Some("@I1@"));
        assert_eq!(line.tag, "INDI");
        assert_eq!(line.value, None);
    }

    #[test]
    fn parse_line_keeps_inner_spaces_in_value() {
        let line = parse_line(3, "1 NAME John  /Smith/\r").unwrap();
        assert_eq!(line.tag, "NAME");
        assert_eq!(line.value, Some("John  /Smith/"));
    }

    #[test]
    fn parse_line_skips_repeated_delimiters_before_tag() {
        let line = parse_line(4, "1  NAME John /Smith/").unwrap();
        assert_eq!(line.tag, "NAME");
        assert_eq!(line.value, Some("John /Smith/"));

        let line = parse_line(5, "0  @I7@   INDI").unwrap();
        assert_eq!(line.xref, Some("@I7@"));
        assert_eq!(line.tag, "INDI");
        assert_eq!(line.value, None);
    }

    #[test]
    fn parse_line_rejects_bad_level() {
        assert!(matches!(parse_line(7, "X NAME Foo"), Err(GedcomError::Syntax { line: 7, .. })));
    }

    #[test]
    fn names_drop_slashes() {
        assert_eq!(display_name("John /Smith/"), "John Smith");
        assert_eq!(slashed_surname("John /Smith/"), Some("Smith".to_string()));
        assert_eq!(slashed_surname("John //"), None);
        assert_eq!(slashed_surname("John"), None);
    }

    #[test]
    fn push_field_switches_to_list_on_repeat() {
        let mut record = Map::new();
        push_field(&mut record, "Relations", json!("@F1@"));
        assert_eq!(record["Relations"], json!("@F1@"));
        push_field(&mut record, "Relations", json!("@F2@"));
        push_field(&mut record, "Relations", json!("@F3@"));
        assert_eq!(record["Relations"], json!(["@F1@", "@F2@", "@F3@"]));
    }
}

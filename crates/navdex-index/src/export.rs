//! Serialization back to the record schema.
//!
//! Entries serialize as `[title, link, children]` with `null` for a missing
//! link and for an empty child list, which is the shape the loader accepts.
//! [`NavIndex::to_script`] reproduces the generated script layout.

use std::fmt::Write as _;

use serde::de::Error as _;
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::entry::{Link, NavEntry};
use crate::index::NavIndex;

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Serialize for NavEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let children = (!self.children.is_empty()).then_some(self.children.as_slice());
        let mut record = serializer.serialize_tuple(3)?;
        record.serialize_element(&self.title)?;
        record.serialize_element(&self.link)?;
        record.serialize_element(&children)?;
        record.end()
    }
}

impl Serialize for NavIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries())
    }
}

impl<'de> Deserialize<'de> for NavIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(D::Error::custom)
    }
}

impl NavIndex {
    /// Convert to the record schema as a JSON value.
    #[must_use]
    pub fn to_records(&self) -> Value {
        Value::Array(self.entries().iter().map(entry_to_value).collect())
    }

    /// Render the generated script form (`var <variable> = [ ... ];`).
    #[must_use]
    pub fn to_script(&self, variable: &str) -> String {
        let mut out = format!("var {variable} =\n[\n");
        write_records(&mut out, self.entries(), 4);
        out.push_str("];\n");
        out
    }

    /// Render an indented plain-text outline.
    #[must_use]
    pub fn to_outline(&self) -> String {
        let mut out = String::new();
        for (entry, depth) in self.traverse() {
            let indent = "  ".repeat(depth);
            match &entry.link {
                Some(link) => {
                    let _ = writeln!(out, "{indent}{} ({link})", entry.title);
                }
                None => {
                    let _ = writeln!(out, "{indent}{}", entry.title);
                }
            }
        }
        out
    }
}

fn entry_to_value(entry: &NavEntry) -> Value {
    let link = entry
        .link
        .as_ref()
        .map_or(Value::Null, |link| Value::String(link.to_string()));
    let children = if entry.children.is_empty() {
        Value::Null
    } else {
        Value::Array(entry.children.iter().map(entry_to_value).collect())
    };
    Value::Array(vec![Value::String(entry.title.clone()), link, children])
}

fn write_records(out: &mut String, entries: &[NavEntry], indent: usize) {
    let pad = " ".repeat(indent);
    for (position, entry) in entries.iter().enumerate() {
        let link = entry
            .link
            .as_ref()
            .map_or(Value::Null, |link| Value::String(link.to_string()));
        let _ = write!(
            out,
            "{pad}[ {}, {link}, ",
            Value::String(entry.title.clone())
        );

        if entry.children.is_empty() {
            out.push_str("null ]");
        } else {
            out.push_str("[\n");
            write_records(out, &entry.children, indent + 2);
            let _ = write!(out, "{pad}] ]");
        }

        if position + 1 < entries.len() {
            out.push(',');
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const FIXTURE: &str = include_str!("../fixtures/index.js");

    #[test]
    fn test_to_records_shape() {
        let index = NavIndex::from_entries(vec![
            NavEntry::leaf("A", "a.html").with_children(vec![NavEntry::leaf("A1", "a.html#1")]),
            NavEntry::new("Sin enlace", None),
        ]);

        assert_eq!(
            index.to_records(),
            json!([
                ["A", "a.html", [["A1", "a.html#1", null]]],
                ["Sin enlace", null, null]
            ])
        );
    }

    #[test]
    fn test_serialize_matches_to_records() {
        let index = NavIndex::load(FIXTURE).unwrap();

        let serialized = serde_json::to_value(&index).unwrap();

        assert_eq!(serialized, index.to_records());
    }

    #[test]
    fn test_records_round_trip() {
        let index = NavIndex::load(FIXTURE).unwrap();

        let reloaded = NavIndex::from_value(index.to_records()).unwrap();

        assert_eq!(reloaded, index);
    }

    #[test]
    fn test_json_string_round_trip() {
        let index = NavIndex::load(FIXTURE).unwrap();

        let text = serde_json::to_string_pretty(&index).unwrap();
        let reloaded = NavIndex::load(&text).unwrap();

        assert_eq!(reloaded, index);
    }

    #[test]
    fn test_deserialize_validates() {
        let index: NavIndex = serde_json::from_str(r#"[["A", "a.html", null]]"#).unwrap();
        assert_eq!(index.len(), 1);

        let err = serde_json::from_str::<NavIndex>(r#"[[null, "a.html", null]]"#).unwrap_err();
        assert!(err.to_string().contains("missing title"));
    }

    #[test]
    fn test_to_script_reproduces_generated_layout() {
        let index = NavIndex::load(FIXTURE).unwrap();

        let script = index.to_script("index");

        assert_eq!(script.trim_end(), FIXTURE.trim_end());
    }

    #[test]
    fn test_to_script_escapes_strings() {
        let index = NavIndex::from_entries(vec![NavEntry::leaf(r#"Dice "hola""#, "a.html")]);

        let script = index.to_script("navtree");

        assert_eq!(
            script,
            "var navtree =\n[\n    [ \"Dice \\\"hola\\\"\", \"a.html\", null ]\n];\n"
        );
        assert_eq!(NavIndex::load(&script).unwrap(), index);
    }

    #[test]
    fn test_to_script_empty() {
        assert_eq!(
            NavIndex::default().to_script("index"),
            "var index =\n[\n];\n"
        );
    }

    #[test]
    fn test_to_outline() {
        let index = NavIndex::from_entries(vec![NavEntry::group(
            "Grupo",
            vec![NavEntry::leaf("A", "a.html#x")],
        )]);

        assert_eq!(index.to_outline(), "Grupo\n  A (a.html#x)\n");
    }
}

//! Index loading and schema validation.
//!
//! Accepts two source forms:
//! - a bare JSON array of `[title, link, children]` records
//! - the generated script form `var index = [ ... ];`, optionally preceded
//!   by comments (license banners)
//!
//! The script body is JSON-compatible (double-quoted strings, `null`), so it
//! is parsed with `serde_json` after the declaration is stripped. Text after
//! the bracket closing the array (`;`, trailing comments, further
//! declarations) is ignored.
//!
//! Trees may be at most [`MAX_DEPTH`] levels deep. Every level costs two
//! nested arrays, and `serde_json` stops at 128 nested values.

use serde_json::Value;

use crate::entry::{Link, NavEntry};
use crate::error::{Location, MalformedIndexError};

/// Maximum number of entry levels in an index.
pub const MAX_DEPTH: usize = 63;

/// Array nesting needed for [`MAX_DEPTH`] levels: the root array plus a
/// record and a children array per level.
const MAX_NESTING: usize = 2 * MAX_DEPTH + 1;

/// Split source into the optional variable name and the array literal.
pub(crate) fn split_declaration(
    source: &str,
) -> Result<(Option<&str>, &str), MalformedIndexError> {
    let rest = skip_comments(source);
    if rest.starts_with('[') {
        return Ok((None, array_literal(rest)?));
    }

    let Some(after_keyword) = ["var", "let", "const"]
        .iter()
        .find_map(|keyword| strip_keyword(rest, keyword))
    else {
        // Not a declaration either; let the JSON parser report the syntax error
        return Ok((None, rest.trim_end()));
    };

    let (name, body) = after_keyword
        .split_once('=')
        .ok_or(MalformedIndexError::MissingArray)?;
    let name = name.trim();
    let body = body.trim_start();

    if name.is_empty() || !body.starts_with('[') {
        return Err(MalformedIndexError::MissingArray);
    }

    Ok((Some(name), array_literal(body)?))
}

/// Cut `text` (starting with `[`) at the bracket closing the array.
///
/// Brackets inside string literals are skipped. Unbalanced input is
/// returned whole so the JSON parser reports it.
fn array_literal(text: &str) -> Result<&str, MalformedIndexError> {
    let mut nesting = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (pos, byte) in text.bytes().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                nesting += 1;
                if nesting > MAX_NESTING {
                    return Err(MalformedIndexError::TooDeep { limit: MAX_DEPTH });
                }
            }
            b']' | b'}' => {
                nesting = nesting.saturating_sub(1);
                if nesting == 0 {
                    return Ok(&text[..=pos]);
                }
            }
            _ => {}
        }
    }

    Ok(text.trim_end())
}

/// Strip `keyword` followed by whitespace.
fn strip_keyword<'a>(source: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = source.strip_prefix(keyword)?;
    rest.starts_with(char::is_whitespace).then_some(rest)
}

/// Skip leading whitespace, `//` line comments and `/* */` block comments.
fn skip_comments(mut source: &str) -> &str {
    loop {
        source = source.trim_start();
        if let Some(rest) = source.strip_prefix("//") {
            source = rest.split_once('\n').map_or("", |(_, tail)| tail);
        } else if let Some(rest) = source.strip_prefix("/*") {
            source = rest.split_once("*/").map_or("", |(_, tail)| tail);
        } else {
            return source;
        }
    }
}

/// Parse and validate the array literal into root entries.
pub(crate) fn parse_entries(body: &str) -> Result<Vec<NavEntry>, MalformedIndexError> {
    let value: Value = serde_json::from_str(body)?;
    entries_from_value(value)
}

/// Validate an already-parsed JSON value into root entries.
pub(crate) fn entries_from_value(value: Value) -> Result<Vec<NavEntry>, MalformedIndexError> {
    match value {
        Value::Array(items) => entries_from_items(items, &Location::root()),
        other => Err(MalformedIndexError::RootNotArray {
            found: kind(&other),
        }),
    }
}

fn entries_from_items(
    items: Vec<Value>,
    parent: &Location,
) -> Result<Vec<NavEntry>, MalformedIndexError> {
    if !items.is_empty() && parent.indices().len() >= MAX_DEPTH {
        return Err(MalformedIndexError::TooDeep { limit: MAX_DEPTH });
    }
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| entry_from_value(item, parent.child(index)))
        .collect()
}

fn entry_from_value(value: Value, location: Location) -> Result<NavEntry, MalformedIndexError> {
    let fields = match value {
        Value::Array(fields) => fields,
        other => {
            return Err(MalformedIndexError::NotARecord {
                found: kind(&other),
                location,
            });
        }
    };

    let [title, link, children] = match <[Value; 3]>::try_from(fields) {
        Ok(fields) => fields,
        Err(fields) => {
            return Err(MalformedIndexError::WrongArity {
                arity: fields.len(),
                location,
            });
        }
    };

    let title = match title {
        Value::String(title) if title.trim().is_empty() => {
            return Err(MalformedIndexError::EmptyTitle { location });
        }
        Value::String(title) => title,
        Value::Null => return Err(MalformedIndexError::MissingTitle { location }),
        other => {
            return Err(MalformedIndexError::TitleNotString {
                found: kind(&other),
                location,
            });
        }
    };

    let link = match link {
        Value::Null => None,
        Value::String(link) if link.is_empty() => {
            return Err(MalformedIndexError::EmptyLink { location });
        }
        Value::String(link) => Some(Link::parse(&link)),
        other => {
            return Err(MalformedIndexError::LinkNotString {
                found: kind(&other),
                location,
            });
        }
    };

    let children = match children {
        Value::Null => Vec::new(),
        Value::Array(items) => entries_from_items(items, &location)?,
        other => {
            return Err(MalformedIndexError::ChildrenNotArray {
                found: kind(&other),
                location,
            });
        }
    };

    Ok(NavEntry {
        title,
        link,
        children,
    })
}

/// Human-readable JSON value kind for error messages.
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

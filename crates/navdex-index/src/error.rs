//! Error types for index loading.

use std::fmt;
use std::path::PathBuf;

/// Position of an entry in the tree, as child indices from the root.
///
/// Displayed as `[3][1]` (second child of the fourth root entry). The empty
/// location refers to the index root itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location(Vec<usize>);

impl Location {
    /// Location of the index root.
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Location of the `index`-th child of this location.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Self(indices)
    }

    /// Child indices from the root.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Nesting depth (0 for root entries).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("root");
        }
        for index in &self.0 {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}

impl From<Vec<usize>> for Location {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

/// The input is not a well-formed ordered tree of `[title, link, children]`
/// records.
#[derive(Debug, thiserror::Error)]
pub enum MalformedIndexError {
    /// Not parseable as a JSON-compatible literal.
    #[error("Invalid index syntax: {0}")]
    Syntax(#[from] serde_json::Error),
    /// Script form without an array literal after `=`.
    #[error("Expected `var <name> = [...]` declaration")]
    MissingArray,
    /// Entries nested deeper than the supported limit.
    #[error("Index is nested deeper than {limit} levels")]
    TooDeep { limit: usize },
    /// Top-level value is not an array.
    #[error("Index root must be an array, found {found}")]
    RootNotArray { found: &'static str },
    /// Entry is not an array.
    #[error("Entry {location}: expected [title, link, children] record, found {found}")]
    NotARecord {
        location: Location,
        found: &'static str,
    },
    /// Entry array does not have exactly three fields.
    #[error("Entry {location}: expected 3 fields, found {arity}")]
    WrongArity { location: Location, arity: usize },
    /// Title is `null`.
    #[error("Entry {location}: missing title")]
    MissingTitle { location: Location },
    /// Title is neither a string nor `null`.
    #[error("Entry {location}: title must be a string, found {found}")]
    TitleNotString {
        location: Location,
        found: &'static str,
    },
    /// Title is an empty or whitespace-only string.
    #[error("Entry {location}: title cannot be empty")]
    EmptyTitle { location: Location },
    /// Link is neither a string nor `null`.
    #[error("Entry {location}: link must be a string or null, found {found}")]
    LinkNotString {
        location: Location,
        found: &'static str,
    },
    /// Link is an empty string.
    #[error("Entry {location}: link cannot be empty")]
    EmptyLink { location: Location },
    /// Children field is neither an array nor `null`.
    #[error("Entry {location}: children must be an array or null, found {found}")]
    ChildrenNotArray {
        location: Location,
        found: &'static str,
    },
}

impl MalformedIndexError {
    /// Location of the offending entry, if the error concerns one.
    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        match self {
            Self::Syntax(_)
            | Self::MissingArray
            | Self::TooDeep { .. }
            | Self::RootNotArray { .. } => None,
            Self::NotARecord { location, .. }
            | Self::WrongArity { location, .. }
            | Self::MissingTitle { location }
            | Self::TitleNotString { location, .. }
            | Self::EmptyTitle { location }
            | Self::LinkNotString { location, .. }
            | Self::EmptyLink { location }
            | Self::ChildrenNotArray { location, .. } => Some(location),
        }
    }
}

/// Error returned when loading an index from a file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Index file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Index file content is malformed.
    #[error("{}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: MalformedIndexError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        assert_eq!(Location::root().to_string(), "root");
        assert_eq!(Location::root().child(3).child(1).to_string(), "[3][1]");
    }

    #[test]
    fn test_location_depth() {
        assert_eq!(Location::root().child(0).depth(), 0);
        assert_eq!(Location::from(vec![1, 2, 0]).depth(), 2);
    }

    #[test]
    fn test_error_message_includes_location() {
        let err = MalformedIndexError::MissingTitle {
            location: Location::from(vec![0, 2]),
        };

        assert_eq!(err.to_string(), "Entry [0][2]: missing title");
        assert_eq!(err.location(), Some(&Location::from(vec![0, 2])));
    }

    #[test]
    fn test_root_errors_have_no_location() {
        let err = MalformedIndexError::RootNotArray { found: "an object" };

        assert!(err.location().is_none());
    }
}

//! Navigation index with read-only traversal and lookups.
//!
//! # Architecture
//!
//! The index owns its root entries and every entry owns its children, so the
//! tree is acyclic by construction. After loading nothing is mutated; all
//! queries borrow the tree and any number of readers may share it.
//!
//! Lookups walk the tree in pre-order and return the first match. Duplicate
//! links are allowed (see [`crate::lint`] for reporting them).

use std::collections::HashSet;
use std::path::Path;

use crate::entry::NavEntry;
use crate::error::{LoadError, Location, MalformedIndexError};
use crate::load;

/// Ordered navigation tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavIndex {
    entries: Vec<NavEntry>,
}

impl NavIndex {
    /// Load an index from source text.
    ///
    /// Accepts a JSON array of `[title, link, children]` records or the
    /// generated script form `var index = [ ... ];`.
    ///
    /// # Example
    ///
    /// ```
    /// use navdex_index::NavIndex;
    ///
    /// let index = NavIndex::load(r#"var index = [["Guide", "guide.html", null]];"#)?;
    /// assert_eq!(index.entries()[0].title, "Guide");
    /// # Ok::<(), navdex_index::MalformedIndexError>(())
    /// ```
    pub fn load(source: &str) -> Result<Self, MalformedIndexError> {
        let (variable, body) = load::split_declaration(source)?;
        let entries = load::parse_entries(body)?;
        let index = Self { entries };
        tracing::debug!(
            variable = variable.unwrap_or("-"),
            entries = index.len(),
            depth = index.depth(),
            "Loaded navigation index"
        );
        Ok(index)
    }

    /// Validate an already-parsed JSON value as an index.
    pub fn from_value(value: serde_json::Value) -> Result<Self, MalformedIndexError> {
        Ok(Self {
            entries: load::entries_from_value(value)?,
        })
    }

    /// Read and load an index file.
    pub fn load_file(path: &Path) -> Result<Self, LoadError> {
        let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load(&source).map_err(|source| LoadError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build an index from root entries.
    #[must_use]
    pub fn from_entries(entries: Vec<NavEntry>) -> Self {
        Self { entries }
    }

    /// Root entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// Total number of entries at all levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.traverse().count()
    }

    /// True if the index has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of levels (0 for an empty index, 1 if only roots exist).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.traverse()
            .map(|(_, depth)| depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// Pre-order depth-first traversal yielding `(entry, depth)`.
    ///
    /// Roots have depth 0. Children are visited in stored order. Each call
    /// starts a fresh traversal.
    #[must_use]
    pub fn traverse(&self) -> Traverse<'_> {
        Traverse::new(&self.entries)
    }

    /// Like [`traverse`](Self::traverse) but yields the entry's location.
    #[must_use]
    pub fn traverse_with_location(&self) -> TraverseWithLocation<'_> {
        TraverseWithLocation::new(&self.entries)
    }

    /// Find the first entry (in pre-order) whose link equals `link`.
    #[must_use]
    pub fn find_by_link(&self, link: &str) -> Option<&NavEntry> {
        self.traverse()
            .map(|(entry, _)| entry)
            .find(|entry| entry.has_link(link))
    }

    /// Find the first entry (in pre-order) with the given title.
    #[must_use]
    pub fn find_by_title(&self, title: &str) -> Option<&NavEntry> {
        self.traverse()
            .map(|(entry, _)| entry)
            .find(|entry| entry.title == title)
    }

    /// Chain of entries from a root to the first entry linking to `link`.
    ///
    /// The last element is the matched entry. Returns `None` if no entry
    /// has that link.
    #[must_use]
    pub fn breadcrumbs(&self, link: &str) -> Option<Vec<&NavEntry>> {
        let (_, location) = self
            .traverse_with_location()
            .find(|(entry, _)| entry.has_link(link))?;

        let mut trail = Vec::with_capacity(location.indices().len());
        let mut level = self.entries.as_slice();
        for &index in location.indices() {
            let entry = level.get(index)?;
            trail.push(entry);
            level = &entry.children;
        }
        Some(trail)
    }

    /// Distinct page paths (links without fragment) in pre-order.
    #[must_use]
    pub fn pages(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.traverse()
            .filter_map(|(entry, _)| entry.link.as_ref())
            .map(crate::Link::page)
            .filter(|page| !page.is_empty() && seen.insert(*page))
            .collect()
    }
}

/// Pre-order iterator over `(entry, depth)`.
///
/// Returned by [`NavIndex::traverse`].
pub struct Traverse<'a> {
    stack: Vec<(&'a NavEntry, usize)>,
}

impl<'a> Traverse<'a> {
    fn new(roots: &'a [NavEntry]) -> Self {
        Self {
            stack: roots.iter().rev().map(|entry| (entry, 0)).collect(),
        }
    }
}

impl<'a> Iterator for Traverse<'a> {
    type Item = (&'a NavEntry, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (entry, depth) = self.stack.pop()?;
        self.stack
            .extend(entry.children.iter().rev().map(|child| (child, depth + 1)));
        Some((entry, depth))
    }
}

/// Pre-order iterator over `(entry, location)`.
///
/// Returned by [`NavIndex::traverse_with_location`].
pub struct TraverseWithLocation<'a> {
    stack: Vec<(&'a NavEntry, Location)>,
}

impl<'a> TraverseWithLocation<'a> {
    fn new(roots: &'a [NavEntry]) -> Self {
        let root = Location::root();
        Self {
            stack: roots
                .iter()
                .enumerate()
                .rev()
                .map(|(index, entry)| (entry, root.child(index)))
                .collect(),
        }
    }
}

impl<'a> Iterator for TraverseWithLocation<'a> {
    type Item = (&'a NavEntry, Location);

    fn next(&mut self) -> Option<Self::Item> {
        let (entry, location) = self.stack.pop()?;
        self.stack.extend(
            entry
                .children
                .iter()
                .enumerate()
                .rev()
                .map(|(index, child)| (child, location.child(index))),
        );
        Some((entry, location))
    }
}

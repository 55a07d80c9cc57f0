//! Navigation entry and link types.

use std::fmt;

/// Link target of a navigation entry.
///
/// Either a page path (`Interfaz.html`) or an anchor-qualified path
/// (`Interfaz.html#Iteradores`). The text is split at the first `#`; the
/// [`Display`](fmt::Display) impl reproduces the original string exactly.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Link {
    page: String,
    fragment: Option<String>,
}

impl Link {
    /// Parse a link from its textual form.
    ///
    /// Never fails: any string is a valid link. Emptiness is checked by the
    /// loader, which owns the schema rules.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('#') {
            Some((page, fragment)) => Self {
                page: page.to_owned(),
                fragment: Some(fragment.to_owned()),
            },
            None => Self {
                page: raw.to_owned(),
                fragment: None,
            },
        }
    }

    /// Page path without the fragment (e.g., `Aliasing.html`).
    #[must_use]
    pub fn page(&self) -> &str {
        &self.page
    }

    /// In-page fragment identifier, if any (e.g., `sec-aliasing`).
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// True if the link points to a section within a page.
    #[must_use]
    pub fn is_anchor(&self) -> bool {
        self.fragment.is_some()
    }

    /// Compare against the textual form without allocating.
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        match &self.fragment {
            None => self.page == raw,
            Some(fragment) => raw
                .split_once('#')
                .is_some_and(|(page, frag)| page == self.page && frag == fragment),
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.page)?;
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

impl From<&str> for Link {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// Navigation item in the table of contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavEntry {
    /// Display title (never empty in a loaded index).
    pub title: String,
    /// Link target. `None` for group headers without their own page.
    pub link: Option<Link>,
    /// Child entries in display order.
    pub children: Vec<NavEntry>,
}

impl NavEntry {
    /// Create an entry with an optional link and no children.
    #[must_use]
    pub fn new(title: impl Into<String>, link: Option<Link>) -> Self {
        Self {
            title: title.into(),
            link,
            children: Vec::new(),
        }
    }

    /// Create a linked entry without children.
    #[must_use]
    pub fn leaf(title: impl Into<String>, link: &str) -> Self {
        Self::new(title, Some(Link::parse(link)))
    }

    /// Create a group header with no link.
    #[must_use]
    pub fn group(title: impl Into<String>, children: Vec<NavEntry>) -> Self {
        Self::new(title, None).with_children(children)
    }

    /// Replace the link.
    #[must_use]
    pub fn with_link(mut self, link: &str) -> Self {
        self.link = Some(Link::parse(link));
        self
    }

    /// Replace the children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<NavEntry>) -> Self {
        self.children = children;
        self
    }

    /// True if the entry has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// True if the entry's link equals `raw`.
    #[must_use]
    pub fn has_link(&self, raw: &str) -> bool {
        self.link.as_ref().is_some_and(|link| link.matches(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_parse_page_only() {
        let link = Link::parse("Castellano.html");

        assert_eq!(link.page(), "Castellano.html");
        assert_eq!(link.fragment(), None);
        assert!(!link.is_anchor());
    }

    #[test]
    fn test_link_parse_anchor() {
        let link = Link::parse("Aliasing.html#sec-aliasing");

        assert_eq!(link.page(), "Aliasing.html");
        assert_eq!(link.fragment(), Some("sec-aliasing"));
        assert!(link.is_anchor());
    }

    #[test]
    fn test_link_splits_at_first_hash() {
        let link = Link::parse("a.html#b#c");

        assert_eq!(link.page(), "a.html");
        assert_eq!(link.fragment(), Some("b#c"));
        assert_eq!(link.to_string(), "a.html#b#c");
    }

    #[test]
    fn test_link_display_preserves_trailing_hash() {
        assert_eq!(Link::parse("a.html#").to_string(), "a.html#");
        assert_eq!(Link::parse("#top").to_string(), "#top");
    }

    #[test]
    fn test_link_matches() {
        let link = Link::parse("Interfaz.html#Iteradores");

        assert!(link.matches("Interfaz.html#Iteradores"));
        assert!(!link.matches("Interfaz.html"));
        assert!(!link.matches("Interfaz.html#iteradores"));

        let page = Link::parse("Interfaz.html");
        assert!(page.matches("Interfaz.html"));
        assert!(!page.matches("Interfaz.html#"));
    }

    #[test]
    fn test_entry_builders() {
        let entry = NavEntry::leaf("Enunciado", "Enunciado.html")
            .with_children(vec![NavEntry::leaf("Intro", "Enunciado.html#intro")]);

        assert_eq!(entry.title, "Enunciado");
        assert!(entry.has_link("Enunciado.html"));
        assert_eq!(entry.children.len(), 1);
        assert!(!entry.is_leaf());
    }

    #[test]
    fn test_group_has_no_link() {
        let group = NavEntry::group("Anexos", vec![NavEntry::leaf("A", "a.html")]);

        assert!(group.link.is_none());
        assert!(!group.has_link(""));
    }
}

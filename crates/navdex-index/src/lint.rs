//! Quality checks over a loaded index.
//!
//! Loading only enforces the record schema. Lint reports conventions the
//! schema allows but renderers handle poorly: repeated links, pages without
//! an `.html` suffix, anchors into pages that have no entry of their own and
//! leaves that lead nowhere.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Location;
use crate::index::NavIndex;

/// How a lint rule is reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Rule disabled.
    Allow,
    /// Reported as a warning.
    #[default]
    Warn,
    /// Reported as an error.
    Deny,
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow" => Ok(Self::Allow),
            "warn" => Ok(Self::Warn),
            "deny" => Ok(Self::Deny),
            other => Err(format!("unknown lint level '{other}'")),
        }
    }
}

/// Per-rule levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LintOptions {
    /// Same link used by more than one entry.
    pub duplicate_links: Level,
    /// Page path not ending in `.html`.
    pub html_suffix: Level,
    /// Anchor link whose page has no plain entry.
    pub orphan_fragments: Level,
    /// Entry with neither link nor children.
    pub unlinked_leaves: Level,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            duplicate_links: Level::Warn,
            html_suffix: Level::Warn,
            orphan_fragments: Level::Allow,
            unlinked_leaves: Level::Warn,
        }
    }
}

/// Lint rule identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    DuplicateLink,
    HtmlSuffix,
    OrphanFragment,
    UnlinkedLeaf,
}

impl Rule {
    /// Rule name as shown in reports.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::DuplicateLink => "duplicate-link",
            Self::HtmlSuffix => "html-suffix",
            Self::OrphanFragment => "orphan-fragment",
            Self::UnlinkedLeaf => "unlinked-leaf",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Finding severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Single lint result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Rule that produced the finding.
    pub rule: Rule,
    /// Severity derived from the rule level.
    pub severity: Severity,
    /// Location of the offending entry.
    #[serde(serialize_with = "serialize_location")]
    pub location: Location,
    /// Entry title for display.
    pub title: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} \"{}\": {} [{}]",
            match self.severity {
                Severity::Warning => "warning:",
                Severity::Error => "error:",
            },
            self.location,
            self.title,
            self.message,
            self.rule
        )
    }
}

fn serialize_location<S: serde::Serializer>(
    location: &Location,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(location)
}

/// Run all enabled rules over the index.
///
/// Findings are returned in pre-order of the entries they concern.
#[must_use]
pub fn lint(index: &NavIndex, options: &LintOptions) -> Vec<Finding> {
    let plain_pages: HashSet<&str> = index
        .traverse()
        .filter_map(|(entry, _)| entry.link.as_ref())
        .filter(|link| !link.is_anchor())
        .map(crate::Link::page)
        .collect();

    let mut first_seen: HashMap<String, Location> = HashMap::new();
    let mut findings = Vec::new();

    for (entry, location) in index.traverse_with_location() {
        let mut report = |rule: Rule, level: Level, message: String| {
            let severity = match level {
                Level::Allow => return,
                Level::Warn => Severity::Warning,
                Level::Deny => Severity::Error,
            };
            findings.push(Finding {
                rule,
                severity,
                location: location.clone(),
                title: entry.title.clone(),
                message,
            });
        };

        let Some(link) = &entry.link else {
            if entry.children.is_empty() {
                report(
                    Rule::UnlinkedLeaf,
                    options.unlinked_leaves,
                    "entry has no link and no children".to_owned(),
                );
            }
            continue;
        };

        let raw = link.to_string();
        if let Some(first) = first_seen.get(&raw) {
            report(
                Rule::DuplicateLink,
                options.duplicate_links,
                format!("link '{raw}' already used by entry {first}"),
            );
        } else {
            first_seen.insert(raw.clone(), location.clone());
        }

        let page = link.page();
        if !page.is_empty() && !page.ends_with(".html") {
            report(
                Rule::HtmlSuffix,
                options.html_suffix,
                format!("page '{page}' does not end in .html"),
            );
        }

        if link.is_anchor() && !page.is_empty() && !plain_pages.contains(page) {
            report(
                Rule::OrphanFragment,
                options.orphan_fragments,
                format!("no entry links to page '{page}' itself"),
            );
        }
    }

    tracing::debug!(findings = findings.len(), "Linted navigation index");
    findings
}

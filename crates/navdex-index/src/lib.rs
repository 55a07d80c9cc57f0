//! Navigation index for generated documentation sites.
//!
//! This crate provides:
//! - [`NavIndex`]: ordered tree of [`NavEntry`] items loaded from
//!   `[title, link, children]` records
//! - Pre-order traversal and link/title lookups
//! - Export back to records, the generated script form, or a text outline
//! - [`lint`]: convention checks over a loaded index
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use navdex_index::NavIndex;
//!
//! let index = NavIndex::load(r#"
//! var index =
//! [
//!     [ "Aliasing", "Aliasing.html", [
//!       [ "Los aspectos de aliasing", "Aliasing.html#sec-aliasing", null ]
//!     ] ]
//! ];"#)?;
//!
//! let entry = index.find_by_link("Aliasing.html#sec-aliasing").unwrap();
//! assert_eq!(entry.title, "Los aspectos de aliasing");
//!
//! for (entry, depth) in index.traverse() {
//!     println!("{}{}", "  ".repeat(depth), entry.title);
//! }
//! # Ok(())
//! # }
//! ```

mod entry;
mod error;
mod export;
mod index;
pub mod lint;
mod load;

pub use entry::{Link, NavEntry};
pub use error::{LoadError, Location, MalformedIndexError};
pub use index::{NavIndex, Traverse, TraverseWithLocation};
pub use lint::{Finding, Level, LintOptions, Severity, lint};
pub use load::MAX_DEPTH;

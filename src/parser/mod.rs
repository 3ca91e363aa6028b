//! Parsing of the dpkg status file.
//!
//! The status file is a sequence of RFC822-style stanzas separated by blank lines:
//!
//! ```text
//! Package: libc6
//! Status: install ok installed
//! Depends: libgcc1
//! Description: GNU C Library: Shared libraries
//!  Contains the standard libraries that are used by nearly all programs on
//!  the system.
//!
//! Package: libgcc1
//! ...
//! ```
//!
//! [`split_stanzas`] divides the raw content into stanza texts, and the functions in
//! [`fields`] extract the fields dpkg-index cares about from each stanza.
//! [`parse_stanza`] combines the field parsers into a [`PackageRecord`].

pub mod fields;

pub use fields::{parse_dependencies, parse_description, parse_name};

use crate::core::Result;
use crate::models::PackageRecord;

/// Separator between stanzas.
const STANZA_SEPARATOR: &str = "\n\n";

/// Iterator over the non-empty stanzas of a status file.
///
/// Created by [`split_stanzas`]. The iterator is lazy and `Clone`, so a second pass
/// over the same content starts from a clone rather than re-splitting.
#[derive(Debug, Clone)]
pub struct Stanzas<'a> {
    blocks: std::str::Split<'a, &'static str>,
}

impl<'a> Iterator for Stanzas<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.blocks.by_ref().map(str::trim).find(|block| !block.is_empty())
    }
}

/// Split raw status file content into trimmed, non-empty stanza texts.
///
/// # Examples
///
/// ```rust
/// use dpkg_index::parser::split_stanzas;
///
/// let content = "Package: a\nDescription: A\n\n\n\nPackage: b\nDescription: B\n";
/// let stanzas: Vec<&str> = split_stanzas(content).collect();
/// assert_eq!(stanzas, ["Package: a\nDescription: A", "Package: b\nDescription: B"]);
/// ```
#[must_use]
pub fn split_stanzas(content: &str) -> Stanzas<'_> {
    Stanzas {
        blocks: content.split(STANZA_SEPARATOR),
    }
}

/// Build a [`PackageRecord`] from one stanza.
///
/// # Errors
///
/// Propagates the first failing field parser: a missing `Package` or `Description`
/// field, or a malformed `Depends` entry.
pub fn parse_stanza(stanza: &str) -> Result<PackageRecord> {
    Ok(PackageRecord {
        name: parse_name(stanza)?,
        description: parse_description(stanza)?,
        dependencies: parse_dependencies(stanza)?,
    })
}

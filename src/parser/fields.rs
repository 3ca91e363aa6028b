//! Field extraction from a single stanza.
//!
//! Each parser looks at one stanza's text and pulls out one field. Field names are
//! matched at the start of a line, so `Pre-Depends:` never satisfies `Depends:` and
//! `Original-Package:`-style keys never satisfy `Package:`.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::{DpkgError, Result};
use crate::models::Dependency;

static PACKAGE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Package:[ \t]*(\S[^\r\n]*)").expect("Package pattern is valid")
});

static DEPENDS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Depends:[ \t]*([^\r\n]*)").expect("Depends pattern is valid")
});

/// Extract the package name from the first `Package:` line.
///
/// # Errors
///
/// [`DpkgError::MissingField`] when no line carries a non-empty `Package:` value.
///
/// # Examples
///
/// ```rust
/// use dpkg_index::parser::parse_name;
///
/// let name = parse_name("Package: libws-commons-util-java\nStatus: install ok installed").unwrap();
/// assert_eq!(name, "libws-commons-util-java");
/// ```
pub fn parse_name(stanza: &str) -> Result<String> {
    PACKAGE_LINE
        .captures(stanza)
        .and_then(|caps| caps.get(1))
        .map(|value| value.as_str().trim_end().to_string())
        .ok_or(DpkgError::MissingField {
            field: "Package",
        })
}

/// Extract the description, folding in its continuation lines.
///
/// The first line's value is followed by every immediately following line that
/// starts with a space or tab. Continuation lines are kept verbatim (leading
/// whitespace included) and joined with `\n`.
///
/// # Errors
///
/// [`DpkgError::MissingField`] when the stanza has no `Description:` line.
///
/// # Examples
///
/// ```rust
/// use dpkg_index::parser::parse_description;
///
/// let stanza = "Package: tcpd\nDescription: Wietse Venema's TCP wrapper utilities\n Wietse Venema's network logger.\n .\n Also known as TCPD.\nOriginal-Maintainer: Marco d'Itri";
/// let description = parse_description(stanza).unwrap();
/// assert_eq!(
///     description,
///     "Wietse Venema's TCP wrapper utilities\n Wietse Venema's network logger.\n .\n Also known as TCPD."
/// );
/// ```
pub fn parse_description(stanza: &str) -> Result<String> {
    let mut lines = stanza.lines();

    let first = lines
        .by_ref()
        .find_map(|line| line.strip_prefix("Description:"))
        .ok_or(DpkgError::MissingField {
            field: "Description",
        })?;

    let mut description = first.trim().to_string();
    for line in lines.take_while(|line| line.starts_with([' ', '\t'])) {
        description.push('\n');
        description.push_str(line.trim_end_matches('\r'));
    }

    Ok(description)
}

/// Extract the `Depends:` entries.
///
/// Entries are comma separated; each may list pipe-separated alternatives. Version
/// constraints such as `(>= 2.2.5)` are dropped, only names are kept. The result is
/// deduplicated by principal name, first occurrence wins.
///
/// A stanza without a `Depends:` line yields an empty list.
///
/// # Errors
///
/// [`DpkgError::InvalidDependencyFormat`] when an entry or one of its alternatives
/// contains no package name (`"a, , b"`, `"a |"`, `"(>= 1.0)"`).
///
/// # Examples
///
/// ```rust
/// use dpkg_index::parser::parse_dependencies;
///
/// let deps = parse_dependencies("Package: x\nDepends: libc6 (>= 2.2.5), dpkg (>= 1.15.4) | install-info").unwrap();
/// assert_eq!(deps[0].main, "libc6");
/// assert!(deps[0].alternatives.is_empty());
/// assert_eq!(deps[1].main, "dpkg");
/// assert_eq!(deps[1].alternatives, ["install-info"]);
/// ```
pub fn parse_dependencies(stanza: &str) -> Result<Vec<Dependency>> {
    let Some(line) = DEPENDS_LINE.captures(stanza).and_then(|caps| caps.get(1)) else {
        return Ok(Vec::new());
    };

    let line = line.as_str().trim();
    if line.is_empty() {
        return Ok(Vec::new());
    }

    let mut dependencies: Vec<Dependency> = Vec::new();
    for entry in line.split(',') {
        let dependency = parse_entry(entry)?;
        if !dependencies.iter().any(|existing| existing.main == dependency.main) {
            dependencies.push(dependency);
        }
    }

    Ok(dependencies)
}

/// Parse one comma-separated entry into its principal name and alternatives.
fn parse_entry(entry: &str) -> Result<Dependency> {
    let invalid = || DpkgError::InvalidDependencyFormat {
        entry: entry.to_string(),
    };

    let mut names = entry.split('|').map(bare_name);

    let main = names.next().flatten().ok_or_else(invalid)?;
    let alternatives = names.map(|name| name.ok_or_else(invalid)).collect::<Result<Vec<_>>>()?;

    Ok(Dependency::new(main, alternatives))
}

/// `"libc6 (>= 2.2.5)"` -> `"libc6"`; `None` when nothing precedes the constraint.
fn bare_name(token: &str) -> Option<String> {
    let name = token.trim().split(|c: char| c.is_whitespace() || c == '(').next()?;
    (!name.is_empty()).then(|| name.to_string())
}

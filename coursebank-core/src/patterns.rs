//! Field patterns shared by course construction and catalog validation
//!
//! Every validator is a pure predicate. Compiled regexes are cached on first use.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CatalogError, Result};

/// Marker written at the end of a record for an active course
pub const ACTIVE_MARKER: &str = "active";

/// Marker written at the end of a record for an inactive course
pub const INACTIVE_MARKER: &str = "inactive";

/// Three uppercase letters followed by four uppercase letters or digits
static CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{3}[0-9A-Z]{4}$").expect("code pattern is a valid regex"));

/// Composite record pattern.
///
/// The title runs from the first quote after the code to the last quote on the
/// line, and either quote character may open or close it. An optional trailing
/// lowercase word is the active-state marker.
pub static RECORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^\s*(?P<code>\S+)\s+['"](?P<title>.*)['"]\s+(?P<credits>\S+)(?P<prerequisites>(?:\s+\S+)*?)(?:\s+(?P<active>[a-z]+))?\s*$"#,
    )
    .expect("record pattern is a valid regex")
});

pub fn is_valid_code(s: &str) -> bool {
    CODE.is_match(s)
}

/// A title is valid when it has visible content and no line break
pub fn is_valid_title(s: &str) -> bool {
    !s.trim().is_empty() && !s.contains(['\n', '\r'])
}

pub fn is_valid_credits(n: i64) -> bool {
    n > 0
}

pub fn is_valid_prerequisite_list<S: AsRef<str>>(list: &[S]) -> bool {
    list.iter().all(|p| is_valid_code(p.as_ref()))
}

/// Parse a textual credit count into a positive integer
pub fn parse_credits(s: &str) -> Result<u32> {
    s.trim()
        .parse::<i64>()
        .ok()
        .filter(|n| is_valid_credits(*n))
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| CatalogError::InvalidCredits(s.to_string()))
}

/// Map an active-state marker to the flag it denotes
pub fn parse_active_marker(s: &str) -> Result<bool> {
    match s {
        ACTIVE_MARKER => Ok(true),
        INACTIVE_MARKER => Ok(false),
        other => Err(CatalogError::InvalidActiveFlag(other.to_string())),
    }
}

pub fn active_marker(active: bool) -> &'static str {
    if active {
        ACTIVE_MARKER
    } else {
        INACTIVE_MARKER
    }
}

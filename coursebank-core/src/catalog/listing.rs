//! Listing and searching

use regex::RegexBuilder;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::Catalog;
use crate::course::Course;
use crate::error::{CatalogError, Result};

/// Field used to order listed courses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Code,
    Title,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "code" => Ok(SortKey::Code),
            "title" => Ok(SortKey::Title),
            other => Err(format!(
                "Unknown sort key '{other}' (expected 'code' or 'title')"
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Code => write!(f, "code"),
            SortKey::Title => write!(f, "title"),
        }
    }
}

/// Filtering and ordering shared by listing and searching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListOptions {
    /// Also show inactive courses
    pub include_inactive: bool,
    pub sort_key: SortKey,
}

impl Catalog {
    /// Visible courses, sorted by the chosen key (stable)
    pub fn list(&self, options: ListOptions) -> Vec<&Course> {
        let mut courses: Vec<&Course> = self
            .courses
            .iter()
            .filter(|c| options.include_inactive || c.is_active())
            .collect();
        match options.sort_key {
            SortKey::Code => courses.sort_by(|a, b| a.compare_to(b)),
            SortKey::Title => courses.sort_by(|a, b| a.title().cmp(b.title())),
        }
        courses
    }

    /// Visible courses whose default rendering matches `pattern`, ignoring case
    pub fn search(&self, pattern: &str, options: ListOptions) -> Result<Vec<&Course>> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| CatalogError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;

        let mut found = self.list(options);
        found.retain(|c| regex.is_match(&c.to_string()));
        debug!(pattern, matches = found.len(), "Searched catalog");
        Ok(found)
    }
}

/// Format each course on its own newline-terminated line.
///
/// Returns `None` when there is nothing to show.
pub fn render_listing(
    courses: &[&Course],
    template: Option<&str>,
    separator: &str,
) -> Option<String> {
    if courses.is_empty() {
        return None;
    }
    let mut out = String::new();
    for course in courses {
        out.push_str(&course.format(template, separator));
        out.push('\n');
    }
    Some(out)
}

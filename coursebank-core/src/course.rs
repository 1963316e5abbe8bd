//! The course entity
//!
//! Every field is fixed at construction except the active flag, which only
//! changes through [`Course::activate`] and [`Course::deactivate`].

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use crate::error::{CatalogError, Result};
use crate::patterns;

/// Separator placed between prerequisites when rendering a course
pub const DEFAULT_PREREQUISITE_SEPARATOR: &str = ":";

/// Marker appended to the code of an inactive course in listings
const INACTIVE_SUFFIX: &str = "?";

/// One course of the catalog
#[derive(Debug, Clone, Serialize)]
pub struct Course {
    code: String,
    title: String,
    credits: u32,
    prerequisites: Vec<String>,
    active: bool,
}

/// Course fields in their textual form, as read from a record or the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFields {
    pub code: String,
    pub title: String,
    pub credits: String,
    pub prerequisites: Vec<String>,
    /// Active-state marker; `None` means active
    pub active: Option<String>,
}

impl Course {
    /// Create an active course
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        credits: i64,
        prerequisites: Vec<String>,
    ) -> Result<Self> {
        Self::with_status(code, title, credits, prerequisites, true)
    }

    /// Create a course with an explicit active flag
    pub fn with_status(
        code: impl Into<String>,
        title: impl Into<String>,
        credits: i64,
        prerequisites: Vec<String>,
        active: bool,
    ) -> Result<Self> {
        let code = code.into();
        let title = title.into();
        check_code(&code)?;
        check_title(&title)?;
        let credits = u32::try_from(credits)
            .ok()
            .filter(|n| patterns::is_valid_credits(i64::from(*n)))
            .ok_or_else(|| CatalogError::InvalidCredits(credits.to_string()))?;
        check_prerequisites(&prerequisites)?;

        Ok(Self {
            code,
            title,
            credits,
            prerequisites,
            active,
        })
    }

    /// Create a course from textual fields
    pub fn from_fields(fields: CourseFields) -> Result<Self> {
        check_code(&fields.code)?;
        check_title(&fields.title)?;
        let credits = patterns::parse_credits(&fields.credits)?;
        check_prerequisites(&fields.prerequisites)?;
        let active = fields
            .active
            .as_deref()
            .map(patterns::parse_active_marker)
            .transpose()?
            .unwrap_or(true);

        Ok(Self {
            code: fields.code,
            title: fields.title,
            credits,
            prerequisites: fields.prerequisites,
            active,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn credits(&self) -> u32 {
        self.credits
    }

    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether `code` appears among this course's direct prerequisites
    pub fn requires(&self, code: &str) -> bool {
        self.prerequisites.iter().any(|p| p == code)
    }

    /// Order courses by code
    pub fn compare_to(&self, other: &Course) -> Ordering {
        self.code.cmp(&other.code)
    }

    /// Make an active course inactive
    pub fn deactivate(&mut self) -> Result<()> {
        if !self.active {
            return Err(CatalogError::AlreadyInactive(self.code.clone()));
        }
        self.active = false;
        Ok(())
    }

    /// Make an inactive course active again
    pub fn activate(&mut self) -> Result<()> {
        if self.active {
            return Err(CatalogError::AlreadyActive(self.code.clone()));
        }
        self.active = true;
        Ok(())
    }

    /// Render the course.
    ///
    /// Without a template, yields `CODE[?] "TITLE     " (PREREQS)`, the title
    /// padded to ten characters and `?` marking an inactive course. A template
    /// may use the placeholders:
    ///   - `%S`: code
    ///   - `%T`: title
    ///   - `%C`: number of credits
    ///   - `%P`: prerequisites joined by `separator`
    ///   - `%A`: `?` when inactive, nothing otherwise
    ///
    /// Any other `%` sequence is copied as is.
    pub fn format(&self, template: Option<&str>, separator: &str) -> String {
        let Some(template) = template else {
            return format!(
                "{}{} \"{:<10}\" ({})",
                self.code,
                self.inactive_suffix(),
                self.title,
                self.prerequisites.join(separator)
            );
        };

        let mut out = String::with_capacity(template.len() + self.title.len());
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.peek() {
                Some('S') => out.push_str(&self.code),
                Some('T') => out.push_str(&self.title),
                Some('C') => out.push_str(&self.credits.to_string()),
                Some('P') => out.push_str(&self.prerequisites.join(separator)),
                Some('A') => out.push_str(self.inactive_suffix()),
                _ => {
                    out.push('%');
                    continue;
                }
            }
            chars.next();
        }
        out
    }

    fn inactive_suffix(&self) -> &'static str {
        if self.active {
            ""
        } else {
            INACTIVE_SUFFIX
        }
    }
}

/// Two courses are equal when every field matches; prerequisite order is ignored
impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        if self.code != other.code
            || self.title != other.title
            || self.credits != other.credits
            || self.active != other.active
            || self.prerequisites.len() != other.prerequisites.len()
        {
            return false;
        }
        let mut ours: Vec<&String> = self.prerequisites.iter().collect();
        let mut theirs: Vec<&String> = other.prerequisites.iter().collect();
        ours.sort();
        theirs.sort();
        ours == theirs
    }
}

impl Eq for Course {}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(None, DEFAULT_PREREQUISITE_SEPARATOR))
    }
}

fn check_code(code: &str) -> Result<()> {
    if !patterns::is_valid_code(code) {
        return Err(CatalogError::InvalidCode(code.to_string()));
    }
    Ok(())
}

fn check_title(title: &str) -> Result<()> {
    if !patterns::is_valid_title(title) {
        return Err(CatalogError::InvalidTitle(title.to_string()));
    }
    Ok(())
}

fn check_prerequisites(prerequisites: &[String]) -> Result<()> {
    if !patterns::is_valid_prerequisite_list(prerequisites) {
        let bad = prerequisites
            .iter()
            .filter(|p| !patterns::is_valid_code(p))
            .cloned()
            .collect();
        return Err(CatalogError::InvalidPrerequisiteFormat(bad));
    }
    Ok(())
}

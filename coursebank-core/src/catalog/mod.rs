//! Course catalog - the in-memory collection and its operations
//!
//! A catalog holds courses in insertion order and guarantees that no two
//! courses share a code. Sorting only happens when courses are presented.
//!
//! # Overview
//!
//! - Lookup, insertion (with prerequisite validation) and removal
//! - Activation state transitions by code
//! - Listing and searching, see [`ListOptions`]
//! - Credit totals and prerequisite closure
//!
//! Every mutating operation validates first, so a failed call leaves the
//! catalog untouched.

mod listing;
mod prerequisites;

pub use listing::{render_listing, ListOptions, SortKey};

use tracing::{debug, info};

use crate::course::Course;
use crate::error::{CatalogError, Result};
use crate::patterns;
use crate::record;

/// What to do when removing a course that others list as a prerequisite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalPolicy {
    /// Remove anyway; dependents keep a dangling reference
    #[default]
    Permissive,
    /// Refuse with [`CatalogError::PrerequisiteInUse`]
    Strict,
}

/// The ordered set of courses for one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already-persisted courses.
    ///
    /// Only code uniqueness is enforced: dangling or inactive prerequisite
    /// references are legitimate persisted state.
    pub fn from_courses(courses: Vec<Course>) -> Result<Self> {
        let mut catalog = Self::new();
        for course in courses {
            if catalog.contains(course.code()) {
                return Err(CatalogError::DuplicateCourse(course.code().to_string()));
            }
            catalog.courses.push(course);
        }
        Ok(catalog)
    }

    /// Parse depot lines into a catalog
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_courses(record::parse_lines(lines)?)
    }

    /// Render every course as a record, in catalog order
    pub fn to_records(&self) -> String {
        record::render_lines(&self.courses)
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.courses.iter().any(|c| c.code() == code)
    }

    pub fn find_by_code(&self, code: &str) -> Result<&Course> {
        debug!(code, "Looking up course");
        self.courses
            .iter()
            .find(|c| c.code() == code)
            .ok_or_else(|| CatalogError::CourseNotFound(code.to_string()))
    }

    fn find_mut(&mut self, code: &str) -> Result<&mut Course> {
        self.courses
            .iter_mut()
            .find(|c| c.code() == code)
            .ok_or_else(|| CatalogError::CourseNotFound(code.to_string()))
    }

    /// Check that `candidate` may join the catalog.
    ///
    /// Its code must be new and every prerequisite must name an active course
    /// already present. Returns the candidate unchanged.
    pub fn validate_for_insertion(&self, candidate: Course) -> Result<Course> {
        if self.contains(candidate.code()) {
            return Err(CatalogError::DuplicateCourse(candidate.code().to_string()));
        }

        for code in candidate.prerequisites() {
            let reason = if !patterns::is_valid_code(code) {
                "not a valid course code"
            } else {
                match self.courses.iter().find(|c| c.code() == code) {
                    None => "no such course in the catalog",
                    Some(course) if !course.is_active() => "course is inactive",
                    Some(_) => continue,
                }
            };
            return Err(CatalogError::InvalidPrerequisite {
                code: code.clone(),
                reason: reason.to_string(),
            });
        }

        Ok(candidate)
    }

    /// Validate and append a new course
    pub fn insert(&mut self, candidate: Course) -> Result<()> {
        let course = self.validate_for_insertion(candidate)?;
        info!(code = course.code(), "Adding course");
        self.courses.push(course);
        Ok(())
    }

    /// Remove a course, leaving dependents untouched
    pub fn remove(&mut self, code: &str) -> Result<Course> {
        self.remove_with(code, RemovalPolicy::Permissive)
    }

    pub fn remove_with(&mut self, code: &str, policy: RemovalPolicy) -> Result<Course> {
        let index = self
            .courses
            .iter()
            .position(|c| c.code() == code)
            .ok_or_else(|| CatalogError::CourseNotFound(code.to_string()))?;

        let dependents: Vec<String> = self
            .dependents_of(code)
            .into_iter()
            .map(|c| c.code().to_string())
            .collect();
        if !dependents.is_empty() {
            if policy == RemovalPolicy::Strict {
                return Err(CatalogError::PrerequisiteInUse {
                    code: code.to_string(),
                    dependents,
                });
            }
            debug!(code, ?dependents, "Removing a course that others still require");
        }

        info!(code, "Removing course");
        Ok(self.courses.remove(index))
    }

    /// Courses listing `code` as a direct prerequisite
    pub fn dependents_of(&self, code: &str) -> Vec<&Course> {
        self.courses.iter().filter(|c| c.requires(code)).collect()
    }

    pub fn deactivate(&mut self, code: &str) -> Result<()> {
        self.find_mut(code)?.deactivate()?;
        info!(code, "Deactivated course");
        Ok(())
    }

    pub fn activate(&mut self, code: &str) -> Result<()> {
        self.find_mut(code)?.activate()?;
        info!(code, "Reactivated course");
        Ok(())
    }

    /// Sum the credits of the given courses; the first unknown code aborts
    pub fn total_credits<S: AsRef<str>>(&self, codes: &[S]) -> Result<u64> {
        codes.iter().try_fold(0u64, |total, code| {
            let course = self.find_by_code(code.as_ref())?;
            Ok(total + u64::from(course.credits()))
        })
    }
}

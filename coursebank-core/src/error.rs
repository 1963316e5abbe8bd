//! Catalog error types with clear, actionable messages

use thiserror::Error;

/// Every way a course, a record or a catalog operation can be rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Code does not match three uppercase letters followed by four alphanumerics
    #[error("Invalid course code: '{0}' (expected 3 uppercase letters and 4 uppercase letters or digits, e.g. INF1120)")]
    InvalidCode(String),

    #[error("Invalid title: '{0}' (must be non-empty and fit on one line)")]
    InvalidTitle(String),

    #[error("Invalid number of credits: '{0}' (must be a positive integer)")]
    InvalidCredits(String),

    /// At least one prerequisite is not shaped like a course code
    #[error("Invalid prerequisite format: {}", .0.join(" "))]
    InvalidPrerequisiteFormat(Vec<String>),

    #[error("Invalid active flag: '{0}' (expected 'active' or 'inactive')")]
    InvalidActiveFlag(String),

    #[error("A course with code {0} already exists")]
    DuplicateCourse(String),

    /// Prerequisite rejected against the catalog (malformed, missing or inactive)
    #[error("Invalid prerequisite {code}: {reason}")]
    InvalidPrerequisite { code: String, reason: String },

    #[error("No course with code {0}")]
    CourseNotFound(String),

    #[error("Course {0} is already active")]
    AlreadyActive(String),

    #[error("Course {0} is already inactive")]
    AlreadyInactive(String),

    #[error("Malformed record: '{0}'")]
    MalformedRecord(String),

    /// The prerequisite graph loops back on itself; the path ends where it started
    #[error("Prerequisite cycle detected: {}", .0.join(" -> "))]
    PrerequisiteCycle(Vec<String>),

    /// Strict removal refused because other courses still depend on this one
    #[error("Course {code} is a prerequisite of {}", .dependents.join(", "))]
    PrerequisiteInUse {
        code: String,
        dependents: Vec<String>,
    },

    #[error("Invalid search pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A record error while loading a depot, with its 1-based line number
    #[error("Line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: Box<CatalogError>,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

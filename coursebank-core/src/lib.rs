//! coursebank core - course entities, records and catalog operations
//!
//! The core knows nothing about files or the command line. It turns record
//! lines into [`Course`] values, validates them against a [`Catalog`], and
//! renders results as strings.

pub mod catalog;
pub mod course;
pub mod error;
pub mod patterns;
pub mod record;

pub use catalog::{render_listing, Catalog, ListOptions, RemovalPolicy, SortKey};
pub use course::{Course, CourseFields, DEFAULT_PREREQUISITE_SEPARATOR};
pub use error::{CatalogError, Result};

//! Prerequisite resolution

use std::collections::BTreeSet;
use tracing::{debug, warn};

use super::Catalog;
use crate::course::Course;
use crate::error::{CatalogError, Result};

impl Catalog {
    /// The prerequisites recorded on the course, as stored
    pub fn direct_prerequisites(&self, code: &str) -> Result<&[String]> {
        Ok(self.find_by_code(code)?.prerequisites())
    }

    /// Every course required, directly or not, before `code`.
    ///
    /// The course itself is excluded; the result is sorted and free of
    /// duplicates. Fails on a reference to a course no longer in the catalog
    /// and on a cycle in the prerequisite graph.
    pub fn transitive_prerequisites(&self, code: &str) -> Result<Vec<String>> {
        let root = self.find_by_code(code)?;
        let mut path = vec![root.code().to_string()];
        let mut closure = BTreeSet::new();

        self.expand(root, &mut path, &mut closure)?;

        debug!(code, count = closure.len(), "Computed prerequisite closure");
        Ok(closure.into_iter().collect())
    }

    /// Depth-first expansion; `path` holds the courses being expanded
    fn expand(
        &self,
        course: &Course,
        path: &mut Vec<String>,
        closure: &mut BTreeSet<String>,
    ) -> Result<()> {
        for code in course.prerequisites() {
            if let Some(start) = path.iter().position(|c| c == code) {
                let mut cycle = path[start..].to_vec();
                cycle.push(code.clone());
                return Err(CatalogError::PrerequisiteCycle(cycle));
            }
            // Already fully expanded through another branch
            if closure.contains(code) {
                continue;
            }

            let prerequisite = self.find_by_code(code).inspect_err(|_| {
                warn!(
                    course = course.code(),
                    missing = code.as_str(),
                    "Dangling prerequisite reference"
                );
            })?;

            path.push(code.clone());
            self.expand(prerequisite, path, closure)?;
            path.pop();
            closure.insert(code.clone());
        }
        Ok(())
    }
}

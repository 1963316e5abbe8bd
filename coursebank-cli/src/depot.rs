//! Depot file management
//!
//! The depot is a text file holding one course record per line. Every save
//! first copies the previous file to `<depot>.bak`.

use anyhow::{bail, Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use coursebank_core::Catalog;

/// Depot used when neither --depot nor COURSEBANK_DEPOT is given
pub const DEFAULT_DEPOT: &str = ".cours.txt";

/// The catalog file on disk
#[derive(Debug, Clone)]
pub struct Depot {
    path: PathBuf,
}

impl Depot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Location of the backup copy written before each save
    pub fn backup_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".bak");
        PathBuf::from(name)
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create an empty depot.
    ///
    /// An existing depot is only replaced when `force` is set.
    pub fn init(&self, force: bool) -> Result<()> {
        if self.exists() && !force {
            bail!(
                "The file '{}' already exists.\nTo replace it, run 'coursebank init --force'.",
                self.path.display()
            );
        }

        fs::write(&self.path, "")
            .with_context(|| format!("Failed to create depot {}", self.path.display()))?;
        info!(path = %self.path.display(), "Initialized depot");
        Ok(())
    }

    /// Read and parse every record of the depot
    pub fn load(&self) -> Result<Catalog> {
        if !self.exists() {
            bail!(
                "The file '{}' does not exist.\nRun 'coursebank init' to create it.",
                self.path.display()
            );
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read depot {}", self.path.display()))?;
        let catalog = Catalog::from_lines(content.lines())
            .with_context(|| format!("Invalid depot {}", self.path.display()))?;

        debug!(path = %self.path.display(), courses = catalog.len(), "Loaded depot");
        Ok(catalog)
    }

    /// Back up the current file, then write the catalog in its place
    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        if self.exists() {
            let backup = self.backup_path();
            fs::copy(&self.path, &backup).with_context(|| {
                format!("Failed to back up depot to {}", backup.display())
            })?;
        }

        fs::write(&self.path, catalog.to_records())
            .with_context(|| format!("Failed to write depot {}", self.path.display()))?;

        debug!(path = %self.path.display(), courses = catalog.len(), "Saved depot");
        Ok(())
    }
}

//! Catalog commands
//!
//! Each command owns its parsed arguments and receives the loaded catalog
//! plus an explicit stdin reader. It hands back the resulting catalog and the
//! text to print, if any.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::io::{BufRead, Read};
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};
use tracing::debug;

use coursebank_core::{
    record, render_listing, Catalog, Course, CourseFields, ListOptions, RemovalPolicy, SortKey,
    DEFAULT_PREREQUISITE_SEPARATOR,
};

/// Result of running a command against the catalog
#[derive(Debug)]
pub struct Outcome {
    /// Catalog to persist
    pub catalog: Catalog,
    /// Text for stdout, already newline-terminated
    pub output: Option<String>,
}

impl Outcome {
    fn new(catalog: Catalog, output: Option<String>) -> Self {
        Self { catalog, output }
    }
}

/// Common trait for all command handlers
pub trait CommandHandler {
    /// Run the command
    fn execute(&self, catalog: Catalog, input: &mut dyn BufRead) -> Result<Outcome>;

    /// Get command name for logging
    fn name(&self) -> &'static str;
}

/// Commands that operate on a loaded catalog
#[derive(Subcommand, Debug)]
pub enum CatalogCommand {
    /// Add a course (prerequisites must exist and be active).
    /// Without arguments, reads one record per line from stdin
    Add(AddCommand),

    /// Remove courses. Without arguments, reads codes from stdin
    Remove(RemoveCommand),

    /// Make an active course inactive (it can no longer be a new prerequisite)
    Deactivate(DeactivateCommand),

    /// Make an inactive course active again
    Reactivate(ReactivateCommand),

    /// List courses in ascending code order
    List(ListCommand),

    /// Find courses whose description matches a pattern
    Find(FindCommand),

    /// Total number of credits of the given courses
    Credits(CreditsCommand),

    /// List the prerequisites of a course (direct ones by default)
    Prereqs(PrereqsCommand),
}

impl CatalogCommand {
    fn handler(&self) -> &dyn CommandHandler {
        match self {
            CatalogCommand::Add(c) => c,
            CatalogCommand::Remove(c) => c,
            CatalogCommand::Deactivate(c) => c,
            CatalogCommand::Reactivate(c) => c,
            CatalogCommand::List(c) => c,
            CatalogCommand::Find(c) => c,
            CatalogCommand::Credits(c) => c,
            CatalogCommand::Prereqs(c) => c,
        }
    }

    pub fn name(&self) -> &'static str {
        self.handler().name()
    }

    pub fn execute(&self, catalog: Catalog, input: &mut dyn BufRead) -> Result<Outcome> {
        let handler = self.handler();
        debug!(command = handler.name(), "Executing command");
        handler.execute(catalog, input)
    }
}

/// Filtering and ordering options for list and find
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Include inactive courses
    #[clap(long)]
    pub all: bool,

    /// Sort key (code, title)
    #[clap(long, default_value_t = SortKey::Code)]
    pub sort: SortKey,
}

impl FilterArgs {
    fn options(&self) -> ListOptions {
        ListOptions {
            include_inactive: self.all,
            sort_key: self.sort,
        }
    }
}

/// Output options for list and find
#[derive(Args, Debug, Clone)]
pub struct DisplayArgs {
    /// Output template: %S code, %T title, %C credits, %P prerequisites, %A inactive marker
    #[clap(long)]
    pub format: Option<String>,

    /// Separator placed between prerequisites
    #[clap(long, default_value = DEFAULT_PREREQUISITE_SEPARATOR)]
    pub separator: String,

    /// Output results as JSON
    #[clap(long, conflicts_with_all = ["table", "format"])]
    pub json: bool,

    /// Display results in a table
    #[clap(short, long, conflicts_with = "format")]
    pub table: bool,
}

/// Table row for listed courses
#[derive(Tabled)]
struct CourseRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Credits")]
    credits: u32,
    #[tabled(rename = "Prerequisites")]
    prerequisites: String,
    #[tabled(rename = "Active")]
    active: String,
}

impl DisplayArgs {
    fn render(&self, courses: &[&Course]) -> Result<Option<String>> {
        if self.json {
            let json = serde_json::to_string_pretty(courses)?;
            return Ok(Some(format!("{json}\n")));
        }

        if self.table {
            if courses.is_empty() {
                return Ok(None);
            }
            let rows: Vec<CourseRow> = courses
                .iter()
                .map(|c| CourseRow {
                    code: c.code().to_string(),
                    title: c.title().to_string(),
                    credits: c.credits(),
                    prerequisites: c.prerequisites().join(&self.separator),
                    active: if c.is_active() { "yes" } else { "no" }.to_string(),
                })
                .collect();
            let table = Table::new(&rows)
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()))
                .to_string();
            return Ok(Some(format!("{table}\n")));
        }

        Ok(render_listing(courses, self.format.as_deref(), &self.separator))
    }
}

#[derive(Args, Debug)]
pub struct AddCommand {
    /// Course code, e.g. INF1120
    #[clap(requires_all = ["title", "credits"])]
    pub code: Option<String>,

    /// Course title
    pub title: Option<String>,

    /// Number of credits
    pub credits: Option<String>,

    /// Codes of the prerequisite courses
    pub prerequisites: Vec<String>,
}

impl CommandHandler for AddCommand {
    fn execute(&self, mut catalog: Catalog, input: &mut dyn BufRead) -> Result<Outcome> {
        let Some(code) = &self.code else {
            for (index, line) in input.lines().enumerate() {
                let line = line.context("Failed to read courses from stdin")?;
                if line.trim().is_empty() {
                    continue;
                }
                // New courses start active; a trailing marker is read as a prerequisite
                let mut fields = record::parse_fields(&line)
                    .with_context(|| format!("stdin line {}", index + 1))?;
                fields.prerequisites.extend(fields.active.take());
                let course = Course::from_fields(fields)
                    .with_context(|| format!("stdin line {}", index + 1))?;
                catalog
                    .insert(course)
                    .with_context(|| format!("stdin line {}", index + 1))?;
            }
            return Ok(Outcome::new(catalog, None));
        };

        let course = Course::from_fields(CourseFields {
            code: code.clone(),
            title: self.title.clone().unwrap_or_default(),
            credits: self.credits.clone().unwrap_or_default(),
            prerequisites: self.prerequisites.clone(),
            active: None,
        })?;
        catalog.insert(course)?;
        Ok(Outcome::new(catalog, None))
    }

    fn name(&self) -> &'static str {
        "add"
    }
}

#[derive(Args, Debug)]
pub struct RemoveCommand {
    /// Codes of the courses to remove
    pub codes: Vec<String>,

    /// Refuse to remove a course that other courses still require
    #[clap(long)]
    pub strict: bool,
}

impl CommandHandler for RemoveCommand {
    fn execute(&self, mut catalog: Catalog, input: &mut dyn BufRead) -> Result<Outcome> {
        let codes = if self.codes.is_empty() {
            let mut buffer = String::new();
            input
                .read_to_string(&mut buffer)
                .context("Failed to read course codes from stdin")?;
            buffer.split_whitespace().map(String::from).collect()
        } else {
            self.codes.clone()
        };

        let policy = if self.strict {
            RemovalPolicy::Strict
        } else {
            RemovalPolicy::Permissive
        };
        for code in &codes {
            catalog.remove_with(code, policy)?;
        }
        Ok(Outcome::new(catalog, None))
    }

    fn name(&self) -> &'static str {
        "remove"
    }
}

#[derive(Args, Debug)]
pub struct DeactivateCommand {
    /// Course code
    pub code: String,
}

impl CommandHandler for DeactivateCommand {
    fn execute(&self, mut catalog: Catalog, _input: &mut dyn BufRead) -> Result<Outcome> {
        catalog.deactivate(&self.code)?;
        Ok(Outcome::new(catalog, None))
    }

    fn name(&self) -> &'static str {
        "deactivate"
    }
}

#[derive(Args, Debug)]
pub struct ReactivateCommand {
    /// Course code
    pub code: String,
}

impl CommandHandler for ReactivateCommand {
    fn execute(&self, mut catalog: Catalog, _input: &mut dyn BufRead) -> Result<Outcome> {
        catalog.activate(&self.code)?;
        Ok(Outcome::new(catalog, None))
    }

    fn name(&self) -> &'static str {
        "reactivate"
    }
}

#[derive(Args, Debug)]
pub struct ListCommand {
    #[clap(flatten)]
    pub filter: FilterArgs,

    #[clap(flatten)]
    pub display: DisplayArgs,
}

impl CommandHandler for ListCommand {
    fn execute(&self, catalog: Catalog, _input: &mut dyn BufRead) -> Result<Outcome> {
        let output = {
            let courses = catalog.list(self.filter.options());
            self.display.render(&courses)?
        };
        Ok(Outcome::new(catalog, output))
    }

    fn name(&self) -> &'static str {
        "list"
    }
}

#[derive(Args, Debug)]
pub struct FindCommand {
    /// Regular expression matched case-insensitively against each course line
    pub pattern: String,

    #[clap(flatten)]
    pub filter: FilterArgs,

    #[clap(flatten)]
    pub display: DisplayArgs,
}

impl CommandHandler for FindCommand {
    fn execute(&self, catalog: Catalog, _input: &mut dyn BufRead) -> Result<Outcome> {
        let output = {
            let courses = catalog.search(&self.pattern, self.filter.options())?;
            self.display.render(&courses)?
        };
        Ok(Outcome::new(catalog, output))
    }

    fn name(&self) -> &'static str {
        "find"
    }
}

#[derive(Args, Debug)]
pub struct CreditsCommand {
    /// Course codes
    pub codes: Vec<String>,
}

impl CommandHandler for CreditsCommand {
    fn execute(&self, catalog: Catalog, _input: &mut dyn BufRead) -> Result<Outcome> {
        let total = catalog.total_credits(&self.codes)?;
        Ok(Outcome::new(catalog, Some(format!("{total}\n"))))
    }

    fn name(&self) -> &'static str {
        "credits"
    }
}

#[derive(Args, Debug)]
pub struct PrereqsCommand {
    /// Course code
    pub code: String,

    /// Include indirect prerequisites
    #[clap(long)]
    pub all: bool,
}

impl CommandHandler for PrereqsCommand {
    fn execute(&self, catalog: Catalog, _input: &mut dyn BufRead) -> Result<Outcome> {
        let mut prerequisites = if self.all {
            catalog.transitive_prerequisites(&self.code)?
        } else {
            catalog.direct_prerequisites(&self.code)?.to_vec()
        };
        prerequisites.sort();
        prerequisites.dedup();

        let output = if prerequisites.is_empty() {
            None
        } else {
            Some(format!("{}\n", prerequisites.join("\n")))
        };
        Ok(Outcome::new(catalog, output))
    }

    fn name(&self) -> &'static str {
        "prereqs"
    }
}

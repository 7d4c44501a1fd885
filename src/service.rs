//! Map service entity and its textual renderings.
//!
//! A `MapService` ties a published service to the map document that created
//! it, its location in the server folder hierarchy, and the databases and
//! feature classes it reads from.

use std::collections::BTreeMap;
use std::fmt;

/// Output density for service renderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Name, URL, source document, and every database and feature class.
    #[default]
    Full,
    /// Name and URL only.
    Quiet,
    /// URL only.
    VeryQuiet,
}

/// Info about one published map service.
///
/// Immutable after construction. Database keys are unique and iterate in
/// ascending order; feature class lists are sorted when rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapService {
    /// Service short name, e.g. `MyMap` for a `MyMap.MapServer` definition.
    pub name: String,
    /// Relative URL of the service, e.g. `Folder1/MyMap`. No leading slash.
    pub url: String,
    /// Path of the map document that created the service.
    pub document: String,
    /// Database key to the feature class names used from that database.
    pub databases: BTreeMap<String, Vec<String>>,
}

impl MapService {
    pub fn new(
        document: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        databases: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            document: document.into(),
            databases,
        }
    }

    /// Test (by name only) whether the service uses a featureclass.
    pub fn uses_feature(&self, name: &str) -> bool {
        let needle = name.to_uppercase();
        self.databases
            .values()
            .flatten()
            .any(|fc| fc.to_uppercase().contains(&needle))
    }

    /// Test (by name only) whether the service uses a database (gdb, folder,
    /// sde instance, etc.).
    pub fn uses_database(&self, name: &str) -> bool {
        let needle = name.to_uppercase();
        self.databases
            .keys()
            .any(|db| db.to_uppercase().contains(&needle))
    }

    /// Render at the given verbosity.
    pub fn render(&self, verbosity: Verbosity) -> String {
        match verbosity {
            Verbosity::Full => self.to_string(),
            Verbosity::Quiet => format!("{} ({})", self.name, self.url),
            Verbosity::VeryQuiet => self.url.clone(),
        }
    }

    /// CSV rendering: one line for the service and its first database, then
    /// one `,,,<db>` continuation line per remaining database. Feature class
    /// detail is omitted.
    pub fn to_csv(&self) -> String {
        let mut keys = self.databases.keys();
        let first = keys.next().map(String::as_str).unwrap_or_default();
        let mut output = format!("{},{},{},{}", self.name, self.url, self.document, first);
        for db in keys {
            output.push_str("\n,,,");
            output.push_str(db);
        }
        output
    }

    /// Markdown rendering. Backslashes are doubled so Windows paths survive
    /// a Markdown formatter.
    pub fn to_markdown(&self) -> String {
        let mut lines = vec![format!("## {} ({})\n", self.name, self.url)];
        lines.push(format!("**{}**\n", self.document.replace('\\', "\\\\")));
        for (db, features) in &self.databases {
            lines.push(format!("- {}", db.replace('\\', "\\\\")));
            for fc in sorted(features) {
                lines.push(format!("    + {}", fc));
            }
            lines.push(String::new());
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Full rendering: title, underline, source document, then every database
/// with its feature classes, one blank line after each database block.
impl fmt::Display for MapService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!("{} ({})", self.name, self.url);
        let underline = "-".repeat(title.chars().count());
        let mut lines = vec![title, underline, format!(" {}", self.document)];
        for (db, features) in &self.databases {
            lines.push(format!(" - {}", db));
            for fc in sorted(features) {
                lines.push(format!("   + {}", fc));
            }
            lines.push(String::new());
        }
        lines.push(String::new());
        f.write_str(&lines.join("\n"))
    }
}

fn sorted(features: &[String]) -> Vec<&String> {
    let mut features: Vec<&String> = features.iter().collect();
    features.sort();
    features
}

//! Database addressing.

use crate::error::{SpannerError, SpannerResult};
use std::fmt;

/// Fully-qualified location of a Spanner database.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatabasePath {
    pub project: String,
    pub instance: String,
    pub database: String,
}

impl DatabasePath {
    /// Build a path from tool arguments.
    ///
    /// Components are trimmed; an empty component is rejected with an error
    /// naming the missing argument.
    pub fn new(project: &str, instance: &str, database: &str) -> SpannerResult<Self> {
        Ok(Self {
            project: required("project", project)?,
            instance: required("instance", instance)?,
            database: required("database", database)?,
        })
    }
}

fn required(field: &str, value: &str) -> SpannerResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SpannerError::invalid_input(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

impl fmt::Display for DatabasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "projects/{}/instances/{}/databases/{}",
            self.project, self.instance, self.database
        )
    }
}

//! Assignment source assembly
//!
//! Variables can come from a vars file, piped stdin and inline `--set`
//! overrides. They are joined with the record separator in that order, so a
//! later source overrides an earlier one through store upsert.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::config::Delimiters;
use crate::Error;

/// The raw assignment sources of one run
#[derive(Debug, Clone, Default)]
pub struct Sources {
    /// Contents of the vars file
    pub vars_file: Option<String>,
    /// Contents piped on stdin
    pub stdin: Option<String>,
    /// Inline records, in command-line order
    pub overrides: Vec<String>,
}

impl Sources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vars file contents
    pub fn with_vars_file(mut self, contents: impl Into<String>) -> Self {
        self.vars_file = Some(contents.into());
        self
    }

    /// Set the piped stdin contents
    pub fn with_stdin(mut self, contents: impl Into<String>) -> Self {
        self.stdin = Some(contents.into());
        self
    }

    /// Append an inline override record
    ///
    /// The record is written in the configured syntax, e.g. `key=value` with
    /// the default assignment operator.
    pub fn with_override(mut self, record: impl Into<String>) -> Self {
        self.overrides.push(record.into());
        self
    }

    /// Join all present sources with the record separator
    ///
    /// Returns the empty string when no source is present.
    pub fn assemble(&self, delimiters: &Delimiters) -> String {
        let parts: Vec<&str> = self
            .vars_file
            .iter()
            .chain(self.stdin.iter())
            .chain(self.overrides.iter())
            .map(String::as_str)
            .collect();

        debug!(
            vars_file = self.vars_file.is_some(),
            stdin = self.stdin.is_some(),
            overrides = self.overrides.len(),
            "assembling assignment sources"
        );
        parts.join(delimiters.separator())
    }
}

/// Read a whole file, reporting the path on failure
pub fn read_file(path: &Path) -> Result<String, Error> {
    std::fs::read_to_string(path).map_err(|source| Error::UnreadableSource {
        path: path.to_path_buf(),
        source,
    })
}

/// Read all of a reader, reporting `label` as the path on failure
pub fn read_all(mut reader: impl Read, label: &str) -> Result<String, Error> {
    let mut buffer = String::new();
    reader
        .read_to_string(&mut buffer)
        .map_err(|source| Error::UnreadableSource {
            path: label.into(),
            source,
        })?;
    Ok(buffer)
}

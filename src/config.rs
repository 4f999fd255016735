//! Pipeline configuration
//!
//! Delimiters and the trailing-pair policy are plain values threaded into
//! the tokenizer and parser. They can be built in code or loaded from a TOML
//! file:
//!
//! ```toml
//! separator = ";"
//! assignment = ":"
//! lenient = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default record separator
pub const DEFAULT_SEPARATOR: &str = "\n";

/// Default assignment operator
pub const DEFAULT_ASSIGNMENT: &str = "=";

/// Errors that can occur when building or loading a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{which} delimiter must not be empty")]
    EmptyDelimiter { which: &'static str },

    #[error("separator and assignment delimiters must differ (both are {delimiter:?})")]
    IdenticalDelimiters { delimiter: String },

    #[error("Failed to read config file '{}': {source}", path.display())]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// The record separator and assignment operator used by the tokenizer
///
/// Both are non-empty and distinct; [`Delimiters::new`] enforces this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    separator: String,
    assignment: String,
}

impl Delimiters {
    pub fn new(
        separator: impl Into<String>,
        assignment: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let separator = separator.into();
        let assignment = assignment.into();

        if separator.is_empty() {
            return Err(ConfigError::EmptyDelimiter { which: "separator" });
        }
        if assignment.is_empty() {
            return Err(ConfigError::EmptyDelimiter {
                which: "assignment",
            });
        }
        if separator == assignment {
            return Err(ConfigError::IdenticalDelimiters {
                delimiter: separator,
            });
        }

        Ok(Self {
            separator,
            assignment,
        })
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn assignment(&self) -> &str {
        &self.assignment
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            assignment: DEFAULT_ASSIGNMENT.to_string(),
        }
    }
}

/// How the parser treats keys that never receive a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingPair {
    /// Reject a dangling key at end of input, two keys in a row, and a value
    /// with no key
    #[default]
    Strict,
    /// Drop incomplete pairs and keep going
    Lenient,
}

/// Configuration for the assignment parsing pipeline
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Record separator and assignment operator
    pub delimiters: Delimiters,
    /// Handling of incomplete pairs
    pub trailing: TrailingPair,
}

/// TOML structure for deserializing config files
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    separator: Option<String>,
    assignment: Option<String>,
    lenient: Option<bool>,
}

impl Config {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delimiters
    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    /// Set the trailing-pair policy
    pub fn with_trailing(mut self, trailing: TrailingPair) -> Self {
        self.trailing = trailing;
        self
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    ///
    /// Missing keys fall back to the defaults.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;

        let delimiters = Delimiters::new(
            parsed
                .separator
                .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
            parsed
                .assignment
                .unwrap_or_else(|| DEFAULT_ASSIGNMENT.to_string()),
        )?;
        let trailing = if parsed.lenient.unwrap_or(false) {
            TrailingPair::Lenient
        } else {
            TrailingPair::Strict
        };

        Ok(Self {
            delimiters,
            trailing,
        })
    }
}

/// Decode `\n`, `\r`, `\t` and `\\` in a delimiter given on the command line
///
/// Any other backslash sequence is kept as written.
pub fn decode_escapes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

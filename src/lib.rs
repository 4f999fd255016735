//! varsub - variable substitution for text templates
//!
//! This library parses `key=value` assignment sources into a variable store
//! and renders templates by replacing `{{ key }}` placeholders.
//!
//! # Example
//!
//! ```rust
//! use varsub::render;
//!
//! let out = render("Hello {{ name }}!", "name=World").unwrap();
//! assert_eq!(out, "Hello World!");
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod parser;
pub mod renderer;
pub mod sources;
pub mod store;

use std::path::PathBuf;

use thiserror::Error;

pub use config::{Config, ConfigError, Delimiters, TrailingPair};
pub use error::{ParseError, RenderError, Span};
pub use parser::parse_variables;
pub use sources::Sources;
pub use store::{Variable, VariableStore};

/// Errors that can occur during the substitution pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// No template was given, or it is empty
    #[error("no template found")]
    MissingTemplate,

    /// A source file or stream could not be read
    #[error("failed to read '{}': {source}", path.display())]
    UnreadableSource {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Error while parsing assignments
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error while rendering the template
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Render a template against an assignment source with default configuration
pub fn render(template: &str, vars: &str) -> Result<String, Error> {
    render_with_config(template, vars, &Config::default())
}

/// Render a template against an assignment source with custom configuration
///
/// # Example
///
/// ```rust
/// use varsub::{render_with_config, Config, Delimiters};
///
/// let config = Config::new().with_delimiters(Delimiters::new(";", ":").unwrap());
/// let out = render_with_config("{{a}}-{{b}}", "a:1;b:2", &config).unwrap();
/// assert_eq!(out, "1-2");
/// ```
pub fn render_with_config(template: &str, vars: &str, config: &Config) -> Result<String, Error> {
    if template.is_empty() {
        return Err(Error::MissingTemplate);
    }

    let store = parse_variables(vars, config)?;
    let output = renderer::render(&store, template)?;
    Ok(output)
}

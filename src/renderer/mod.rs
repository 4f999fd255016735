//! Template renderer
//!
//! This module scans a template for `{{ key }}` placeholders and substitutes
//! values from a [`VariableStore`](crate::store::VariableStore).

pub mod lexer;
mod substitute;

pub use substitute::{placeholders, render};

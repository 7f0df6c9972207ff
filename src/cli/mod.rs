//! CLI support for jpath
//!
//! Provides programmatic access to the `jpath` command so other tools can
//! embed it.

mod check;
mod docs;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] crate::EvalError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    #[error("Unknown category: '{0}'\nRun 'jpath docs' to see available categories.")]
    UnknownCategory(String),
}

//! Evaluate a path against JSON input

use log::debug;

use super::CliError;
use crate::JsonPath;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The path expression to evaluate
    pub path: String,
    /// JSON input string
    pub input: Option<String>,
    /// Fail when a field, index or slice selects nothing
    pub strict: bool,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// The path compiled into this many filters
    SyntaxValid { filters: usize },
    /// Every matched node, in match order, as a JSON array
    Success(serde_json::Value),
}

/// Execute a jpath check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let path = JsonPath::compile(&options.path)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid {
            filters: path.filters().len(),
        });
    }

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let document: serde_json::Value = serde_json::from_str(json_str)?;

    let matches = path
        .evaluate(&document, options.strict)
        .map(|node| node.cloned())
        .collect::<Result<Vec<_>, _>>()?;

    debug!("'{}' matched {} node(s)", path, matches.len());

    Ok(CheckResult::Success(serde_json::Value::Array(matches)))
}

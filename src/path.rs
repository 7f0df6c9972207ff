use std::{fmt, str::FromStr};

use serde_json::Value;
use thiserror::Error;

use crate::{
    ast::PathFilter,
    evaluator::{EvalError, Evaluator, Nodes},
    parser::{CompileOptions, ParseError, Parser},
};

/// Either half of a compile-and-evaluate call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// A compiled path expression.
///
/// Compile once, then evaluate against as many documents as needed; the
/// filter chain is never modified after compilation.
///
/// # Examples
///
/// ```
/// use jpath::JsonPath;
/// use serde_json::json;
///
/// let doc = json!({
///     "store": {
///         "book": [
///             {"title": "Sayings of the Century", "price": 8.95},
///             {"title": "Moby Dick", "price": 8.99},
///             {"title": "The Lord of the Rings", "price": 22.99}
///         ]
///     }
/// });
///
/// let path = JsonPath::compile("$.store.book[?(@.price < 10)].title").unwrap();
/// let titles = path.select_all(&doc).unwrap();
/// assert_eq!(titles, vec!["Sayings of the Century", "Moby Dick"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPath {
    expression: String,
    filters: Vec<PathFilter>,
}

impl JsonPath {
    /// Compiles an expression with default options.
    pub fn compile(expression: &str) -> Result<Self, ParseError> {
        Self::compile_with(expression, CompileOptions::default())
    }

    pub fn compile_with(expression: &str, options: CompileOptions) -> Result<Self, ParseError> {
        let filters = Parser::with_options(expression, options).parse()?;

        Ok(JsonPath {
            expression: expression.to_string(),
            filters,
        })
    }

    /// The source text this path was compiled from
    pub fn as_str(&self) -> &str {
        &self.expression
    }

    /// The compiled filter chain
    pub fn filters(&self) -> &[PathFilter] {
        &self.filters
    }

    /// Lazily evaluates the path against `root`.
    pub fn evaluate<'f, 'v: 'f>(
        &'f self,
        root: &'v Value,
        error_when_no_match: bool,
    ) -> Nodes<'f, 'v> {
        Evaluator::new(error_when_no_match).evaluate(&self.filters, root)
    }

    /// Every match, treating absent values as an empty result.
    pub fn select_all<'v>(&self, root: &'v Value) -> Result<Vec<&'v Value>, EvalError> {
        self.evaluate(root, false).collect()
    }

    /// At most one match.
    ///
    /// Returns [`EvalError::MultipleMatches`] if the path selects more than
    /// one node.
    pub fn select_one<'v>(
        &self,
        root: &'v Value,
        error_when_no_match: bool,
    ) -> Result<Option<&'v Value>, EvalError> {
        let mut nodes = self.evaluate(root, error_when_no_match);

        let first = nodes.next().transpose()?;
        if first.is_some() && nodes.next().transpose()?.is_some() {
            return Err(EvalError::MultipleMatches);
        }

        Ok(first)
    }
}

impl FromStr for JsonPath {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JsonPath::compile(s)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

/// Path selection directly on a [`serde_json::Value`].
///
/// # Examples
///
/// ```
/// use jpath::JsonPathExt;
/// use serde_json::json;
///
/// let doc = json!({"a": {"b": [1, 2, 3]}});
/// assert_eq!(doc.select_token("$.a.b[1]").unwrap(), Some(&json!(2)));
/// assert_eq!(doc.select_tokens("$..b[1:]").unwrap(), vec![&json!(2), &json!(3)]);
/// ```
pub trait JsonPathExt {
    /// The single node at `path`, if any.
    fn select_token(&self, path: &str) -> Result<Option<&Value>, Error>;

    /// Every node matching `path`.
    fn select_tokens(&self, path: &str) -> Result<Vec<&Value>, Error>;
}

impl JsonPathExt for Value {
    fn select_token(&self, path: &str) -> Result<Option<&Value>, Error> {
        let path = JsonPath::compile(path)?;
        let node = path.select_one(self, false)?;
        Ok(node)
    }

    fn select_tokens(&self, path: &str) -> Result<Vec<&Value>, Error> {
        let path = JsonPath::compile(path)?;
        let nodes = path.select_all(self)?;
        Ok(nodes)
    }
}

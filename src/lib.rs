//! Compile JSONPath expressions once, evaluate them lazily against any
//! number of [`serde_json::Value`] documents.
//!
//! ```
//! use jpath::JsonPath;
//! use serde_json::json;
//!
//! let doc = json!({"a": {"b": {"a": 1}}});
//! let path = JsonPath::compile("$..a").unwrap();
//!
//! let found = path.select_all(&doc).unwrap();
//! assert_eq!(found, vec![&json!({"b": {"a": 1}}), &json!(1)]);
//! ```
pub mod ast;
pub mod cursor;
pub mod evaluator;
pub mod node;
pub mod parser;
pub mod path;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{PathFilter, QueryExpression, QueryOperator};
pub use evaluator::{EvalError, Evaluator, NodeResult, Nodes};
pub use parser::{CompileOptions, ParseError, ParseErrorKind, Parser};
pub use path::{Error, JsonPath, JsonPathExt};
pub use value::Literal;

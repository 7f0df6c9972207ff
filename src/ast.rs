//! # JSONPath - Compiled Filter Chain
//!
//! This module defines the data a path expression compiles into. The compiler
//! never touches a document and the evaluator never re-reads text; the filter
//! chain defined here is the only thing that passes between them.
//!
//! ## Architecture Overview
//!
//! - **[filters]** - The closed set of path filters (field, scan, index, slice, query)
//! - **[operators]** - Comparison operators usable inside a query indexer
//! - **[query]** - Query expressions: a relative path, an operator and a literal
//!
//! ## Quick Start
//!
//! ```text
//! $.store.book[?(@.price < 10)].title
//! ```
//!
//! compiles to the chain:
//!
//! ```text
//! Field("store") -> Field("book") -> Query([@.price < 10]) -> Field("title")
//! ```
//!
//! ## Core Concepts
//!
//! ### Filters Are Data
//!
//! A chain is built once and is read-only afterwards, so one compiled path can
//! be evaluated against any number of documents, from any number of threads.
//!
//! ### Wildcards
//!
//! The literal token `*` compiles to the wildcard form of a filter, which is a
//! filter whose name or index is `None`:
//!
//! ```text
//! $.*      -> Field(None)
//! $..*     -> Scan(None)
//! $[*]     -> ArrayIndex(None)
//! ```
//!
//! ### Relative Paths
//!
//! Inside a query indexer, `@` refers to the child under test. Everything that
//! follows `@` is compiled into its own chain with the same grammar:
//!
//! ```text
//! $[?(@.tags[0] == 'new')]
//! ```
pub mod filters;
pub mod operators;
pub mod query;

pub use filters::PathFilter;
pub use operators::QueryOperator;
pub use query::QueryExpression;

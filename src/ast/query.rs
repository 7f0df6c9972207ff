use crate::{
    ast::{PathFilter, QueryOperator},
    value::Literal,
};

/// A single condition inside a query indexer.
///
/// `path` is relative to the child under test (`@`). `value` is `None` exactly
/// when the operator is [`QueryOperator::Exists`].
#[derive(Debug, Clone, PartialEq)]
pub struct QueryExpression {
    /// Relative path rooted at `@`
    pub path: Vec<PathFilter>,

    /// Comparison to perform on the nodes the path selects
    pub operator: QueryOperator,

    /// Literal right-hand side
    pub value: Option<Literal>,
}

impl QueryExpression {
    /// An existence test on a relative path.
    pub fn exists(path: Vec<PathFilter>) -> Self {
        QueryExpression {
            path,
            operator: QueryOperator::Exists,
            value: None,
        }
    }

    /// A comparison between a relative path and a literal.
    pub fn compare(path: Vec<PathFilter>, operator: QueryOperator, value: Literal) -> Self {
        QueryExpression {
            path,
            operator,
            value: Some(value),
        }
    }
}

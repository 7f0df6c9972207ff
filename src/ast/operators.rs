use std::cmp::Ordering;

/// Operators of a query expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOperator {
    /// No operator: `@.name` holds when the relative path matches anything
    Exists,
    /// Equal (`==`)
    Equals,
    /// Not equal (`!=` or `<>`)
    NotEquals,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessThanOrEquals,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterThanOrEquals,
}

impl QueryOperator {
    /// Whether an ordering between a node and a literal satisfies this operator.
    ///
    /// `None` means the two sides are not comparable. Only `!=` holds then.
    pub fn accepts(self, ordering: Option<Ordering>) -> bool {
        match self {
            QueryOperator::Exists => true,
            QueryOperator::Equals => ordering == Some(Ordering::Equal),
            QueryOperator::NotEquals => ordering != Some(Ordering::Equal),
            QueryOperator::LessThan => ordering == Some(Ordering::Less),
            QueryOperator::LessThanOrEquals => {
                matches!(ordering, Some(Ordering::Less | Ordering::Equal))
            }
            QueryOperator::GreaterThan => ordering == Some(Ordering::Greater),
            QueryOperator::GreaterThanOrEquals => {
                matches!(ordering, Some(Ordering::Greater | Ordering::Equal))
            }
        }
    }

    /// The source text of the operator
    pub fn symbol(self) -> &'static str {
        match self {
            QueryOperator::Exists => "",
            QueryOperator::Equals => "==",
            QueryOperator::NotEquals => "!=",
            QueryOperator::LessThan => "<",
            QueryOperator::LessThanOrEquals => "<=",
            QueryOperator::GreaterThan => ">",
            QueryOperator::GreaterThanOrEquals => ">=",
        }
    }
}

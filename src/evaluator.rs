use std::iter;

use log::trace;
use serde_json::Value;
use thiserror::Error;

use crate::{
    ast::{PathFilter, QueryExpression, QueryOperator},
    node,
    value::kind_name,
};

/// Errors that can occur while applying a filter chain to a document.
///
/// Everything except [`EvalError::ZeroStep`] and
/// [`EvalError::MultipleMatches`] is a "no match" error and is only raised
/// when the caller asked for `error_when_no_match`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Named member missing from an object
    #[error("Property '{0}' does not exist on object")]
    MissingProperty(String),

    /// Member access on something that is not an object
    #[error("Property '{name}' not valid on {kind}")]
    PropertyNotValid { name: String, kind: &'static str },

    /// Index past either end of an array
    #[error("Index {0} outside the bounds of array")]
    IndexOutOfBounds(i64),

    /// Index access on something that is not an array
    #[error("Index {index} not valid on {kind}")]
    IndexNotValid { index: String, kind: &'static str },

    /// Slice that selects nothing
    #[error("Array slice of {start} to {end} returned no results")]
    EmptySlice { start: i64, end: i64 },

    /// Slice applied to something that is not an array
    #[error("Array slice is not valid on {0}")]
    SliceNotValid(&'static str),

    /// Slice step of zero in a hand-built filter chain
    #[error("Slice step cannot be zero")]
    ZeroStep,

    /// More than one node matched where at most one was expected
    #[error("Path returned multiple tokens")]
    MultipleMatches,
}

impl EvalError {
    /// Whether this error only reports an absent match.
    pub fn is_no_match(&self) -> bool {
        !matches!(self, EvalError::ZeroStep | EvalError::MultipleMatches)
    }
}

pub type NodeResult<'v> = Result<&'v Value, EvalError>;

/// One boxed stage of the pipeline: borrows the chain for `'f` and yields
/// nodes of a document that lives for `'v`.
type Stage<'f, 'v> = Box<dyn Iterator<Item = NodeResult<'v>> + 'f>;

/// Lazy sequence of matched nodes.
///
/// Nodes are references into the evaluated document. The sequence ends right
/// after the first error it yields.
pub struct Nodes<'f, 'v> {
    inner: Stage<'f, 'v>,
    failed: bool,
}

impl<'v> Iterator for Nodes<'_, 'v> {
    type Item = NodeResult<'v>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let item = self.inner.next()?;
        if item.is_err() {
            self.failed = true;
        }
        Some(item)
    }
}

/// Applies filter chains to documents.
///
/// The evaluator holds no state besides the no-match policy, so one instance
/// can be shared freely.
///
/// # Examples
///
/// ```
/// use jpath::{Evaluator, Parser};
/// use serde_json::json;
///
/// let filters = Parser::new("$.items[-1]").parse().unwrap();
/// let doc = json!({"items": [1, 2, 3]});
///
/// let nodes: Vec<_> = Evaluator::new(false)
///     .evaluate(&filters, &doc)
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(nodes, vec![&json!(3)]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    error_when_no_match: bool,
}

impl Evaluator {
    /// Creates an evaluator.
    ///
    /// With `error_when_no_match` set, a field, index or slice that selects
    /// nothing yields an [`EvalError`] instead of an empty result. Scans and
    /// queries never raise no-match errors.
    pub fn new(error_when_no_match: bool) -> Self {
        Evaluator {
            error_when_no_match,
        }
    }

    pub fn error_when_no_match(&self) -> bool {
        self.error_when_no_match
    }

    /// Threads `root` through every filter of the chain.
    ///
    /// Nothing is evaluated until the returned sequence is consumed.
    pub fn evaluate<'f, 'v: 'f>(
        &self,
        filters: &'f [PathFilter],
        root: &'v Value,
    ) -> Nodes<'f, 'v> {
        let mut current: Stage<'f, 'v> = Box::new(iter::once(Ok(root)));

        for filter in filters {
            let evaluator = *self;
            trace!("queueing {} filter", filter.kind());

            current = Box::new(current.flat_map(move |item| match item {
                Ok(node) => evaluator.apply(filter, node),
                Err(e) => fail(e),
            }));
        }

        Nodes {
            inner: current,
            failed: false,
        }
    }

    fn apply<'f, 'v: 'f>(self, filter: &'f PathFilter, node: &'v Value) -> Stage<'f, 'v> {
        match filter {
            PathFilter::Field(name) => self.field(name.as_deref(), node),
            PathFilter::Scan(name) => scan(name.as_deref(), node),
            PathFilter::ArrayIndex(index) => self.array_index(*index, node),
            PathFilter::ArrayMultiIndex(indexes) => self.multi_index(indexes, node),
            PathFilter::ArraySlice { start, end, step } => self.slice(*start, *end, *step, node),
            PathFilter::Query(expressions) => query(expressions, node),
        }
    }

    fn no_match<'f, 'v: 'f>(self, error: impl FnOnce() -> EvalError) -> Stage<'f, 'v> {
        if self.error_when_no_match {
            let error = error();
            trace!("no match: {}", error);
            fail(error)
        } else {
            Box::new(iter::empty())
        }
    }

    fn field<'f, 'v: 'f>(self, name: Option<&'f str>, node: &'v Value) -> Stage<'f, 'v> {
        match (node, name) {
            (Value::Object(obj), Some(name)) => match obj.get(name) {
                Some(value) => Box::new(iter::once(Ok(value))),
                None => self.no_match(|| EvalError::MissingProperty(name.to_string())),
            },
            (Value::Object(_) | Value::Array(_), None) => Box::new(node::children(node).map(Ok)),
            (_, name) => self.no_match(|| EvalError::PropertyNotValid {
                name: name.unwrap_or("*").to_string(),
                kind: kind_name(node),
            }),
        }
    }

    fn array_index<'f, 'v: 'f>(self, index: Option<i64>, node: &'v Value) -> Stage<'f, 'v> {
        match (node, index) {
            (Value::Array(arr), None) => Box::new(arr.iter().map(Ok)),
            (Value::Array(arr), Some(index)) => match node::element(arr, index) {
                Some(value) => Box::new(iter::once(Ok(value))),
                None => self.no_match(|| EvalError::IndexOutOfBounds(index)),
            },
            (_, index) => self.no_match(|| EvalError::IndexNotValid {
                index: index.map_or_else(|| "*".to_string(), |i| i.to_string()),
                kind: kind_name(node),
            }),
        }
    }

    fn multi_index<'f, 'v: 'f>(self, indexes: &'f [i64], node: &'v Value) -> Stage<'f, 'v> {
        Box::new(
            indexes
                .iter()
                .flat_map(move |index| self.array_index(Some(*index), node)),
        )
    }

    fn slice<'f, 'v: 'f>(
        self,
        start: Option<i64>,
        end: Option<i64>,
        step: Option<i64>,
        node: &'v Value,
    ) -> Stage<'f, 'v> {
        let Value::Array(arr) = node else {
            return self.no_match(|| EvalError::SliceNotValid(kind_name(node)));
        };

        let step = step.unwrap_or(1);
        if step == 0 {
            return fail(EvalError::ZeroStep);
        }

        let bounds = SliceBounds::new(arr.len(), start, end, step);
        if !bounds.in_range(bounds.start) {
            return self.no_match(|| EvalError::EmptySlice {
                start: bounds.start,
                end: bounds.stop,
            });
        }

        Box::new(
            iter::successors(Some(bounds.start), move |i| i.checked_add(bounds.step))
                .take_while(move |i| bounds.in_range(*i))
                .filter_map(move |i| usize::try_from(i).ok().and_then(|i| arr.get(i)))
                .map(Ok),
        )
    }
}

/// Start and stop of a slice after defaults, negative indexes and clamping.
///
/// `stop` is exclusive. For a backward slice a stop of -1 means "run through
/// index 0".
#[derive(Debug, Clone, Copy)]
struct SliceBounds {
    start: i64,
    stop: i64,
    step: i64,
}

impl SliceBounds {
    fn new(len: usize, start: Option<i64>, end: Option<i64>, step: i64) -> Self {
        let len = i64::try_from(len).unwrap_or(i64::MAX);
        let forward = step > 0;

        let mut from = start.unwrap_or(if forward { 0 } else { len - 1 });
        let mut stop = end.unwrap_or(if forward { len } else { -1 });

        if start.is_some_and(|s| s < 0) {
            from += len;
        }
        if end.is_some_and(|e| e < 0) {
            stop += len;
        }

        if forward {
            from = from.clamp(0, len);
        } else {
            from = from.min(len - 1);
        }
        stop = stop.clamp(-1, len);

        SliceBounds {
            start: from,
            stop,
            step,
        }
    }

    fn in_range(&self, index: i64) -> bool {
        if self.step > 0 {
            index < self.stop
        } else {
            index > self.stop
        }
    }
}

fn fail<'f, 'v: 'f>(error: EvalError) -> Stage<'f, 'v> {
    Box::new(iter::once(Err(error)))
}

fn scan<'f, 'v: 'f>(name: Option<&'f str>, node: &'v Value) -> Stage<'f, 'v> {
    match name {
        None => Box::new(
            iter::once(Ok(node)).chain(node::descendants(node).map(|(_, value)| Ok(value))),
        ),
        Some(name) => Box::new(
            node::descendants(node)
                .filter(move |(key, _)| *key == Some(name))
                .map(|(_, value)| Ok(value)),
        ),
    }
}

fn query<'f, 'v: 'f>(
    expressions: &'f [QueryExpression],
    node: &'v Value,
) -> Stage<'f, 'v> {
    Box::new(
        node::children(node)
            .filter(move |child| expressions.iter().all(|e| is_match(e, child)))
            .map(Ok),
    )
}

/// Tests one query expression against a candidate node.
///
/// The relative path is evaluated without no-match errors. A comparison holds
/// if any scalar the path selects satisfies it.
pub fn is_match(expression: &QueryExpression, node: &Value) -> bool {
    let mut candidates = Evaluator::new(false)
        .evaluate(&expression.path, node)
        .filter_map(Result::ok);

    if expression.operator == QueryOperator::Exists {
        return candidates.next().is_some();
    }

    let Some(literal) = &expression.value else {
        return false;
    };

    candidates.any(|candidate| {
        !matches!(candidate, Value::Object(_) | Value::Array(_))
            && expression.operator.accepts(literal.compare_to(candidate))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn indices(len: usize, start: Option<i64>, end: Option<i64>, step: i64) -> Vec<i64> {
        let bounds = SliceBounds::new(len, start, end, step);
        iter::successors(Some(bounds.start), |i| Some(i + step))
            .take_while(|i| bounds.in_range(*i))
            .collect()
    }

    #[test]
    fn test_slice_bounds_defaults() {
        assert_eq!(indices(4, None, None, 1), vec![0, 1, 2, 3]);
        assert_eq!(indices(4, None, None, -1), vec![3, 2, 1, 0]);
        assert_eq!(indices(4, None, None, 2), vec![0, 2]);
    }

    #[test]
    fn test_slice_bounds_clamped() {
        assert_eq!(indices(3, Some(-10), Some(10), 1), vec![0, 1, 2]);
        assert_eq!(indices(3, Some(10), None, -1), vec![2, 1, 0]);
        assert_eq!(indices(3, Some(-10), None, -1), Vec::<i64>::new());
        assert_eq!(indices(0, None, None, 1), Vec::<i64>::new());
    }

    #[test]
    fn test_is_match_ignores_containers() {
        let expression = QueryExpression::compare(
            vec![PathFilter::Field(Some("a".into()))],
            QueryOperator::NotEquals,
            crate::Literal::Integer(1),
        );
        assert!(!is_match(&expression, &json!({"a": [2]})));
        assert!(is_match(&expression, &json!({"a": 2})));
        assert!(!is_match(&expression, &json!({"b": 2})));
    }

    #[test]
    fn test_nodes_fuse_after_error() {
        let filters = vec![PathFilter::Field(Some("missing".into()))];
        let doc = json!([{"missing": 1}, {}, {"missing": 3}]);
        let wildcard = vec![PathFilter::ArrayIndex(None), filters[0].clone()];

        let results: Vec<_> = Evaluator::new(true).evaluate(&wildcard, &doc).collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(EvalError::MissingProperty(_))));
    }
}

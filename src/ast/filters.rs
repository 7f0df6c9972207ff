use crate::ast::QueryExpression;

/// One step of a compiled path.
///
/// A path is an ordered list of filters applied left to right; each one turns
/// the current sequence of nodes into the next.
#[derive(Debug, Clone, PartialEq)]
pub enum PathFilter {
    /// Named child of an object, or every child when `None`
    ///
    /// # Examples
    /// ```text
    /// $.name        // Field(Some("name"))
    /// $['a b']      // Field(Some("a b"))
    /// $.*           // Field(None)
    /// ```
    Field(Option<String>),

    /// Recursive descent
    ///
    /// Visits the input node and all of its descendants in document order and
    /// selects every object member called `name`, or every visited node when
    /// `None`.
    ///
    /// # Examples
    /// ```text
    /// $..author     // Scan(Some("author"))
    /// $..*          // Scan(None)
    /// ```
    Scan(Option<String>),

    /// Array element, or every element when `None`
    ///
    /// Negative indexes count from the end.
    ///
    /// # Examples
    /// ```text
    /// $[0]          // ArrayIndex(Some(0))
    /// $[-1]         // ArrayIndex(Some(-1))
    /// $[*]          // ArrayIndex(None)
    /// ```
    ArrayIndex(Option<i64>),

    /// Several array elements, in the listed order
    ///
    /// # Example
    /// ```text
    /// $[3,0]        // ArrayMultiIndex([3, 0])
    /// ```
    ArrayMultiIndex(Vec<i64>),

    /// Python-style slice
    ///
    /// # Examples
    /// ```text
    /// $[1:3]        // start 1, end 3
    /// $[-1:]        // last element
    /// $[::-1]       // whole array, reversed
    /// ```
    ArraySlice {
        start: Option<i64>,
        end: Option<i64>,
        step: Option<i64>,
    },

    /// Children of an array or object for which every expression holds
    ///
    /// # Example
    /// ```text
    /// $.book[?(@.price < 10)]
    /// ```
    Query(Vec<QueryExpression>),
}

impl PathFilter {
    /// Builds a `Field` or `Scan` filter from a bare member name.
    ///
    /// The literal `*` becomes the wildcard form.
    pub fn member(name: &str, scan: bool) -> Self {
        let name = if name == "*" {
            None
        } else {
            Some(name.to_string())
        };

        if scan {
            PathFilter::Scan(name)
        } else {
            PathFilter::Field(name)
        }
    }

    /// Short name used in log output and diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            PathFilter::Field(_) => "field",
            PathFilter::Scan(_) => "scan",
            PathFilter::ArrayIndex(_) => "array index",
            PathFilter::ArrayMultiIndex(_) => "array multi-index",
            PathFilter::ArraySlice { .. } => "array slice",
            PathFilter::Query(_) => "query",
        }
    }
}

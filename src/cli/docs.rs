//! Reference documentation for the jpath CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Indexers,
    Queries,
    Evaluation,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" => Some(Self::Syntax),
            "indexers" | "indexer" | "arrays" | "array" => Some(Self::Indexers),
            "queries" | "query" | "filters" => Some(Self::Queries),
            "evaluation" | "eval" | "strict" => Some(Self::Evaluation),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"JPATH DOCUMENTATION

jpath selects nodes from a JSON document with a path expression such as
$.store.book[0].title or $..book[?(@.price < 10)].

DOCUMENTATION CATEGORIES

  syntax        Root, member access, wildcards and recursive descent
  indexers      Bracket indexers: quoted names, indexes, lists and slices
  queries       Query indexers [?(...)], operators and literals
  evaluation    Match order, missing values and --strict

QUICK REFERENCE

  $                 Root document
  $.name            Member
  $['a b']          Quoted member
  $.*               Every child
  $..name           Every descendant member called name
  $[0]  $[-1]       Array element
  $[0,2]            Several elements
  $[1:3]  $[::-1]   Slice
  $[?(@.x > 1)]     Query

Run 'jpath doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Indexers) => Ok(INDEXERS_DOC),
        Some(DocCategory::Queries) => Ok(QUERIES_DOC),
        Some(DocCategory::Evaluation) => Ok(EVALUATION_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Paths and Members

ROOT
  $
    The whole document. A path may also start directly with a member
    name or an indexer: `store.book` and `[0]` are valid paths.

MEMBER ACCESS
  $.name
    Member of an object. Names run until the next `.`, `[`, `(` or space.

    Example:
      Input:  {"user": {"name": "Alice"}}
      Path:   $.user.name
      Output: ["Alice"]

WILDCARD
  $.*
    Every member value of an object, or every element of an array.

RECURSIVE DESCENT
  $..name
    Every member called `name`, at any depth, in document order.

  $..*
    The starting node and every node below it.

    Example:
      Input:  {"a": {"b": {"a": 1}}}
      Path:   $..a
      Output: [{"b": {"a": 1}}, 1]
"#;

const INDEXERS_DOC: &str = r#"INDEXERS - Brackets

Indexers use [ ] or ( ). The closer must match the opener.

QUOTED MEMBER
  $['name with spaces']
    Escapes: \' for a quote, \\ for a backslash. Nothing else.

    Example:
      Input:  {"it's": 1}
      Path:   $['it\'s']
      Output: [1]

INDEX
  $[0]        First element
  $[-1]       Last element
  $[*]        Every element

INDEX LIST
  $[3,0]
    Elements in the listed order; repeats are allowed.

SLICE
  $[start:end:step]
    Any part may be left out. Negative start/end count from the end.
    A negative step walks backwards. A step of 0 is rejected.

      $[1:3]      Elements 1 and 2
      $[-2:]      Last two elements
      $[::2]      Every other element
      $[::-1]     Reversed
"#;

const QUERIES_DOC: &str = r#"QUERIES - Filtering Children

  $[?(expression)]
    Selects the children (array elements or member values) for which the
    expression holds. `@` is the child under test.

EXISTENCE
  $[?(@.isbn)]
    Children that have an `isbn` member.

COMPARISON
  $[?(@.price < 10)]

  Operators:  ==  !=  <>  <  <=  >  >=
  Literals:   'text'  42  -1.5  2e3  true  false  null

  Numbers compare numerically, strings ordinally, booleans as booleans.
  Comparing different types is never an error: it is simply false
  (except != which is true).

SEVERAL EXPRESSIONS
  $[?(@.a == 1 && @.b == 2)]
    All expressions must hold.
"#;

const EVALUATION_DOC: &str = r#"EVALUATION - Results and Missing Values

ORDER
  Matches come out in document order for wildcards, descent and queries,
  and in listed order for index lists and slices.

MISSING VALUES
  By default a member or index that does not exist selects nothing.

  --strict
    Fail instead, naming the member or index that was missing.
    Recursive descent and queries never fail for lack of matches.

    Example:
      Input:  {"a": 1}
      Path:   $.b
      Output: []                        (default)
      Error:  Property 'b' does not exist on object   (--strict)
"#;

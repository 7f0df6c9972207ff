use log::debug;
use thiserror::Error;

use crate::{
    ast::{PathFilter, QueryExpression, QueryOperator},
    cursor::Cursor,
    value::Literal,
};

/// Query expressions nested deeper than this are rejected by default.
pub const DEFAULT_MAX_DEPTH: usize = 32;

const OPERATORS: [(&str, QueryOperator); 7] = [
    ("==", QueryOperator::Equals),
    ("!=", QueryOperator::NotEquals),
    ("<>", QueryOperator::NotEquals),
    ("<=", QueryOperator::LessThanOrEquals),
    ("<", QueryOperator::LessThan),
    (">=", QueryOperator::GreaterThanOrEquals),
    (">", QueryOperator::GreaterThan),
];

/// Settings that affect compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// How many query indexers may be nested inside each other
    pub max_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A path expression that does not follow the grammar.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at position {position}")]
pub struct ParseError {
    /// What went wrong
    pub kind: ParseErrorKind,
    /// Character offset where it was detected
    pub position: usize,
}

/// Reasons a path expression fails to compile.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("Unexpected character while parsing path: '{0}'")]
    UnexpectedCharacter(char),

    #[error("Unexpected character while parsing path indexer: '{0}'")]
    UnexpectedIndexerCharacter(char),

    #[error("Unexpected character while parsing path query: '{0}'")]
    UnexpectedQueryCharacter(char),

    #[error("Unexpected character following indexer: '{0}'")]
    UnexpectedAfterIndexer(char),

    #[error("Path ended with open indexer")]
    OpenIndexer,

    #[error("Path ended with open query")]
    OpenQuery,

    #[error("Array index expected")]
    IndexExpected,

    #[error("Invalid array index '{0}'")]
    InvalidIndex(String),

    #[error("Empty path indexer")]
    EmptyIndexer,

    #[error("Unknown escape character: \\{0}")]
    UnknownEscape(char),

    #[error("Could not read query operator")]
    InvalidOperator,

    #[error("Could not read query value")]
    InvalidValue,

    #[error("Slice step cannot be zero")]
    ZeroStep,

    #[error("Query nesting exceeds maximum depth of {0}")]
    TooDeep(usize),
}

/// Compiles a path expression into a filter chain.
///
/// The parser works directly on characters: the grammar is small but
/// context-sensitive (a `.` means something different inside a quoted name,
/// an operator character ends a relative path only inside a query), so there
/// is no separate tokenizing pass.
///
/// # Examples
///
/// ```
/// use jpath::{Parser, PathFilter};
///
/// let filters = Parser::new("$.store.book[0]").parse().unwrap();
/// assert_eq!(
///     filters,
///     vec![
///         PathFilter::Field(Some("store".into())),
///         PathFilter::Field(Some("book".into())),
///         PathFilter::ArrayIndex(Some(0)),
///     ]
/// );
/// ```
pub struct Parser {
    cursor: Cursor,
    options: CompileOptions,
    depth: usize,
}

impl Parser {
    pub fn new(expression: &str) -> Self {
        Self::with_options(expression, CompileOptions::default())
    }

    pub fn with_options(expression: &str, options: CompileOptions) -> Self {
        Parser {
            cursor: Cursor::new(expression),
            options,
            depth: 0,
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        self.error_at(kind, self.cursor.position())
    }

    fn error_at(&self, kind: ParseErrorKind, position: usize) -> ParseError {
        ParseError { kind, position }
    }

    /// Current character, or `kind` if the input is exhausted.
    fn ensure_length(&self, kind: ParseErrorKind) -> Result<char, ParseError> {
        self.cursor.current_char().ok_or_else(|| self.error(kind))
    }

    /// Parse a complete path expression
    pub fn parse(mut self) -> Result<Vec<PathFilter>, ParseError> {
        let mut filters = Vec::new();

        if self.cursor.is_empty() {
            return Ok(filters);
        }

        self.cursor.skip_whitespace();
        let mut part_start = self.cursor.position();

        if self.cursor.current_char() == Some('$') {
            self.cursor.advance();

            match self.cursor.current_char() {
                Some('.') | Some('[') => part_start = self.cursor.position(),
                Some(' ') | None => {
                    let after_root = self.cursor.position();
                    self.cursor.skip_whitespace();
                    if self.cursor.at_end() {
                        return Ok(filters);
                    }
                    return Err(self.error_at(ParseErrorKind::UnexpectedCharacter(' '), after_root));
                }
                Some(ch) => return Err(self.error(ParseErrorKind::UnexpectedCharacter(ch))),
            }
        }

        if !self.parse_path(&mut filters, part_start, false)? {
            let last = self.cursor.position();

            self.cursor.skip_whitespace();

            if !self.cursor.at_end()
                && let Some(ch) = self.cursor.char_at(last)
            {
                return Err(self.error_at(ParseErrorKind::UnexpectedCharacter(ch), last));
            }
        }

        debug!(
            "compiled path '{}' into {} filter(s)",
            self.cursor.slice(0, self.cursor.len()),
            filters.len()
        );

        Ok(filters)
    }

    /// Parse a sequence of path segments into `filters`.
    ///
    /// Stops at end of input, at a closing `]`/`)`, at a space, or (when
    /// `query` is set) at the first character of a comparison operator.
    /// Returns whether the whole input was consumed.
    fn parse_path(
        &mut self,
        filters: &mut Vec<PathFilter>,
        part_start: usize,
        query: bool,
    ) -> Result<bool, ParseError> {
        let mut part_start = part_start;
        let mut scan = false;
        let mut following_indexer = false;

        while let Some(ch) = self.cursor.current_char() {
            match ch {
                '[' | '(' => {
                    if self.cursor.position() > part_start {
                        self.push_member(filters, part_start, scan);
                        scan = false;
                    }

                    let indexer = self.parse_indexer(ch)?;
                    filters.push(indexer);

                    self.cursor.advance(); // consume the closer
                    part_start = self.cursor.position();
                    following_indexer = true;
                }
                ']' | ')' | ' ' => break,
                '.' => {
                    if self.cursor.position() > part_start {
                        self.push_member(filters, part_start, scan);
                        scan = false;
                    }

                    if self.cursor.peek_char(1) == Some('.') {
                        scan = true;
                        self.cursor.advance();
                    }

                    self.cursor.advance();
                    part_start = self.cursor.position();
                    following_indexer = false;
                }
                '=' | '<' | '!' | '>' if query => break,
                _ => {
                    if following_indexer {
                        return Err(self.error(ParseErrorKind::UnexpectedAfterIndexer(ch)));
                    }

                    self.cursor.advance();
                }
            }
        }

        if self.cursor.position() > part_start {
            self.push_member(filters, part_start, scan);
        }

        Ok(self.cursor.at_end())
    }

    fn push_member(&self, filters: &mut Vec<PathFilter>, part_start: usize, scan: bool) {
        let member = self.cursor.slice(part_start, self.cursor.position());
        filters.push(PathFilter::member(member.trim_end_matches(' '), scan));
    }

    /// Parse an indexer. The cursor is on the opening bracket and is left on
    /// the matching closer.
    fn parse_indexer(&mut self, open: char) -> Result<PathFilter, ParseError> {
        self.cursor.advance();

        let close = if open == '[' { ']' } else { ')' };

        self.ensure_length(ParseErrorKind::OpenIndexer)?;
        self.cursor.skip_whitespace();

        match self.ensure_length(ParseErrorKind::OpenIndexer)? {
            '\'' => self.parse_quoted_field(close),
            '?' => self.parse_query(close),
            _ => self.parse_array_indexer(close),
        }
    }

    fn parse_quoted_field(&mut self, close: char) -> Result<PathFilter, ParseError> {
        let start = self.cursor.position();
        let name = self.read_quoted(ParseErrorKind::OpenIndexer)?;

        if name.is_empty() {
            return Err(self.error_at(ParseErrorKind::EmptyIndexer, start));
        }

        self.cursor.skip_whitespace();

        let ch = self.ensure_length(ParseErrorKind::OpenIndexer)?;
        if ch != close {
            return Err(self.error(ParseErrorKind::UnexpectedIndexerCharacter(ch)));
        }

        Ok(PathFilter::Field(Some(name)))
    }

    /// Read a single-quoted string. Only `\'` and `\\` are escapes.
    fn read_quoted(&mut self, unterminated: ParseErrorKind) -> Result<String, ParseError> {
        let mut result = String::new();
        self.cursor.advance(); // Consume opening quote

        while let Some(ch) = self.cursor.current_char() {
            match ch {
                '\'' => {
                    self.cursor.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.cursor.advance(); // Consume backslash
                    match self.cursor.current_char() {
                        Some('\'') => result.push('\''),
                        Some('\\') => result.push('\\'),
                        Some(other) => {
                            return Err(self.error(ParseErrorKind::UnknownEscape(other)));
                        }
                        None => break,
                    }
                    self.cursor.advance();
                }
                _ => {
                    result.push(ch);
                    self.cursor.advance();
                }
            }
        }

        Err(self.error(unterminated))
    }

    fn parse_array_indexer(&mut self, close: char) -> Result<PathFilter, ParseError> {
        let mut start = self.cursor.position();
        let mut end: Option<usize> = None;
        let mut indexes: Option<Vec<i64>> = None;
        let mut colon_count = 0;
        let mut slice: [Option<i64>; 3] = [None; 3];

        while let Some(ch) = self.cursor.current_char() {
            let position = self.cursor.position();

            if ch == ' ' {
                end = Some(position);
                self.cursor.skip_whitespace();
                continue;
            }

            let token_end = end.unwrap_or(position);

            if ch == close {
                if let Some(mut indexes) = indexes {
                    indexes.push(self.read_index(start, token_end)?);
                    return Ok(PathFilter::ArrayMultiIndex(indexes));
                }

                if colon_count > 0 {
                    if token_end > start {
                        slice[colon_count] = Some(self.read_index(start, token_end)?);
                    }
                    return self.finish_slice(slice);
                }

                return Ok(PathFilter::ArrayIndex(Some(self.read_index(start, token_end)?)));
            }

            match ch {
                ',' => {
                    if colon_count > 0 {
                        return Err(self.error(ParseErrorKind::UnexpectedIndexerCharacter(ch)));
                    }

                    let index = self.read_index(start, token_end)?;
                    indexes.get_or_insert_with(Vec::new).push(index);

                    self.cursor.advance();
                    self.cursor.skip_whitespace();
                    start = self.cursor.position();
                    end = None;
                }
                '*' => {
                    if indexes.is_some() || colon_count > 0 || token_end > start {
                        return Err(self.error(ParseErrorKind::UnexpectedIndexerCharacter(ch)));
                    }

                    self.cursor.advance();
                    self.ensure_length(ParseErrorKind::OpenIndexer)?;
                    self.cursor.skip_whitespace();

                    let next = self.ensure_length(ParseErrorKind::OpenIndexer)?;
                    if next != close {
                        return Err(self.error(ParseErrorKind::UnexpectedIndexerCharacter(next)));
                    }

                    return Ok(PathFilter::ArrayIndex(None));
                }
                ':' => {
                    if indexes.is_some() || colon_count == 2 {
                        return Err(self.error(ParseErrorKind::UnexpectedIndexerCharacter(ch)));
                    }

                    if token_end > start {
                        slice[colon_count] = Some(self.read_index(start, token_end)?);
                    }

                    colon_count += 1;

                    self.cursor.advance();
                    self.cursor.skip_whitespace();
                    start = self.cursor.position();
                    end = None;
                }
                c if c.is_ascii_digit() || c == '-' => {
                    // a digit after whitespace inside one token
                    if end.is_some() {
                        return Err(self.error(ParseErrorKind::UnexpectedIndexerCharacter(c)));
                    }

                    self.cursor.advance();
                }
                c => return Err(self.error(ParseErrorKind::UnexpectedIndexerCharacter(c))),
            }
        }

        Err(self.error(ParseErrorKind::OpenIndexer))
    }

    fn read_index(&self, start: usize, end: usize) -> Result<i64, ParseError> {
        if end <= start {
            return Err(self.error_at(ParseErrorKind::IndexExpected, start));
        }

        let text = self.cursor.slice(start, end);
        text.parse::<i64>()
            .map_err(|_| self.error_at(ParseErrorKind::InvalidIndex(text.clone()), start))
    }

    fn finish_slice(&self, slice: [Option<i64>; 3]) -> Result<PathFilter, ParseError> {
        let [start, end, step] = slice;

        if step == Some(0) {
            return Err(self.error(ParseErrorKind::ZeroStep));
        }

        Ok(PathFilter::ArraySlice { start, end, step })
    }

    fn parse_query(&mut self, close: char) -> Result<PathFilter, ParseError> {
        self.cursor.advance(); // consume ?

        let ch = self.ensure_length(ParseErrorKind::OpenIndexer)?;
        if ch != '(' {
            return Err(self.error(ParseErrorKind::UnexpectedIndexerCharacter(ch)));
        }

        self.cursor.advance();

        let mut expressions = Vec::new();

        loop {
            expressions.push(self.parse_expression()?);

            match self.ensure_length(ParseErrorKind::OpenQuery)? {
                ')' => {
                    self.cursor.advance();
                    self.ensure_length(ParseErrorKind::OpenIndexer)?;
                    self.cursor.skip_whitespace();

                    let ch = self.ensure_length(ParseErrorKind::OpenIndexer)?;
                    if ch != close {
                        return Err(self.error(ParseErrorKind::UnexpectedIndexerCharacter(ch)));
                    }

                    return Ok(PathFilter::Query(expressions));
                }
                connective => {
                    // Connectives are not validated; `&&` and `||` count as one.
                    self.cursor.advance();
                    if self.cursor.current_char() == Some(connective) {
                        self.cursor.advance();
                    }
                }
            }
        }
    }

    fn parse_expression(&mut self) -> Result<QueryExpression, ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(self.error(ParseErrorKind::TooDeep(self.options.max_depth)));
        }

        self.depth += 1;
        let expression = self.parse_expression_body();
        self.depth -= 1;

        expression
    }

    fn parse_expression_body(&mut self) -> Result<QueryExpression, ParseError> {
        self.cursor.skip_whitespace();

        let ch = self.ensure_length(ParseErrorKind::OpenQuery)?;
        if ch != '@' {
            return Err(self.error(ParseErrorKind::UnexpectedQueryCharacter(ch)));
        }

        self.cursor.advance();

        let mut path = Vec::new();
        let part_start = self.cursor.position();

        if self.parse_path(&mut path, part_start, true)? {
            return Err(self.error(ParseErrorKind::OpenQuery));
        }

        self.cursor.skip_whitespace();

        if self.ensure_length(ParseErrorKind::OpenQuery)? == ')' {
            return Ok(QueryExpression::exists(path));
        }

        let operator = self.parse_operator()?;

        self.cursor.skip_whitespace();
        self.ensure_length(ParseErrorKind::OpenQuery)?;

        let value = self.parse_value()?;

        self.cursor.skip_whitespace();
        self.ensure_length(ParseErrorKind::OpenQuery)?;

        Ok(QueryExpression::compare(path, operator, value))
    }

    fn parse_operator(&mut self) -> Result<QueryOperator, ParseError> {
        if self.cursor.position() + 1 >= self.cursor.len() {
            return Err(self.error(ParseErrorKind::OpenQuery));
        }

        for (text, operator) in OPERATORS {
            if self.cursor.match_str(text) {
                return Ok(operator);
            }
        }

        Err(self.error(ParseErrorKind::InvalidOperator))
    }

    fn parse_value(&mut self) -> Result<Literal, ParseError> {
        let start = self.cursor.position();

        match self.cursor.current_char() {
            Some('\'') => {
                let s = self.read_quoted(ParseErrorKind::InvalidValue)?;
                Ok(Literal::String(s))
            }
            Some(ch) if ch.is_ascii_digit() || ch == '-' => {
                self.cursor.advance();

                while let Some(ch) = self.cursor.current_char() {
                    if ch == ' ' || ch == ')' {
                        let text = self.cursor.slice(start, self.cursor.position());
                        return self.parse_number(&text, start);
                    }
                    self.cursor.advance();
                }

                Err(self.error_at(ParseErrorKind::InvalidValue, start))
            }
            Some('t' | 'f' | 'n') => {
                let keywords = [
                    ("true", Literal::Boolean(true)),
                    ("false", Literal::Boolean(false)),
                    ("null", Literal::Null),
                ];

                for (word, literal) in keywords {
                    if self.cursor.match_str(word) {
                        return Ok(literal);
                    }
                }

                Err(self.error(ParseErrorKind::InvalidValue))
            }
            _ => Err(self.error(ParseErrorKind::InvalidValue)),
        }
    }

    fn parse_number(&self, text: &str, start: usize) -> Result<Literal, ParseError> {
        let invalid = || self.error_at(ParseErrorKind::InvalidValue, start);

        if text.contains(['.', 'E', 'e']) {
            match text.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(Literal::Float(n)),
                _ => Err(invalid()),
            }
        } else {
            text.parse::<i64>().map(Literal::Integer).map_err(|_| invalid())
        }
    }
}

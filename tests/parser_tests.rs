// tests/parser_tests.rs

use jpath::ast::{PathFilter, QueryExpression, QueryOperator};
use jpath::parser::{ParseErrorKind, Parser};
use jpath::Literal;

fn parse(expression: &str) -> Vec<PathFilter> {
    Parser::new(expression)
        .parse()
        .unwrap_or_else(|e| panic!("'{}' failed to compile: {}", expression, e))
}

fn parse_err(expression: &str) -> (ParseErrorKind, usize) {
    match Parser::new(expression).parse() {
        Ok(filters) => panic!("'{}' compiled to {:?}", expression, filters),
        Err(e) => (e.kind, e.position),
    }
}

fn field(name: &str) -> PathFilter {
    PathFilter::Field(Some(name.to_string()))
}

fn scan(name: &str) -> PathFilter {
    PathFilter::Scan(Some(name.to_string()))
}

// ============================================================================
// Root and members
// ============================================================================

#[test]
fn test_empty_expression() {
    assert_eq!(parse(""), vec![]);
}

#[test]
fn test_root_only() {
    assert_eq!(parse("$"), vec![]);
    assert_eq!(parse("$   "), vec![]);
    assert_eq!(parse("   "), vec![]);
}

#[test]
fn test_dotted_members() {
    assert_eq!(
        parse("$.store.book[0].title"),
        vec![
            field("store"),
            field("book"),
            PathFilter::ArrayIndex(Some(0)),
            field("title"),
        ]
    );
}

#[test]
fn test_root_is_optional() {
    assert_eq!(parse("store.book"), vec![field("store"), field("book")]);
    assert_eq!(parse("[1]"), vec![PathFilter::ArrayIndex(Some(1))]);
}

#[test]
fn test_surrounding_spaces() {
    assert_eq!(parse("  $.a  "), vec![field("a")]);
}

#[test]
fn test_wildcards() {
    assert_eq!(parse("$.*"), vec![PathFilter::Field(None)]);
    assert_eq!(parse("$..*"), vec![PathFilter::Scan(None)]);
    assert_eq!(parse("$[*]"), vec![PathFilter::ArrayIndex(None)]);
    assert_eq!(parse("$[ * ]"), vec![PathFilter::ArrayIndex(None)]);
    assert_eq!(
        parse("$.*[0]"),
        vec![PathFilter::Field(None), PathFilter::ArrayIndex(Some(0))]
    );
}

#[test]
fn test_scan() {
    assert_eq!(parse("$..book"), vec![scan("book")]);
    assert_eq!(parse("$.a..b"), vec![field("a"), scan("b")]);
    assert_eq!(
        parse("$..book[2]"),
        vec![scan("book"), PathFilter::ArrayIndex(Some(2))]
    );
}

#[test]
fn test_scan_marker_before_indexer() {
    assert_eq!(parse("$..['a'].b"), vec![field("a"), scan("b")]);
}

#[test]
fn test_parenthesised_indexer() {
    assert_eq!(parse("$.a(0)"), vec![field("a"), PathFilter::ArrayIndex(Some(0))]);
}

// ============================================================================
// Indexers
// ============================================================================

#[test]
fn test_quoted_field() {
    assert_eq!(parse("$['a b']"), vec![field("a b")]);
    assert_eq!(parse("$[ 'a.b' ]"), vec![field("a.b")]);
    assert_eq!(parse("$.x['y']"), vec![field("x"), field("y")]);
}

#[test]
fn test_quoted_field_escapes() {
    assert_eq!(parse(r"$['it\'s']"), vec![field("it's")]);
    assert_eq!(parse(r"$['back\\slash']"), vec![field(r"back\slash")]);
}

#[test]
fn test_array_indexes() {
    assert_eq!(parse("$[0]"), vec![PathFilter::ArrayIndex(Some(0))]);
    assert_eq!(parse("$[-1]"), vec![PathFilter::ArrayIndex(Some(-1))]);
    assert_eq!(parse("$[ 12 ]"), vec![PathFilter::ArrayIndex(Some(12))]);
}

#[test]
fn test_multi_index() {
    assert_eq!(parse("$[3,0]"), vec![PathFilter::ArrayMultiIndex(vec![3, 0])]);
    assert_eq!(
        parse("$[ 1 , 2 ,-3]"),
        vec![PathFilter::ArrayMultiIndex(vec![1, 2, -3])]
    );
}

#[test]
fn test_slices() {
    let cases = vec![
        ("$[1:3]", Some(1), Some(3), None),
        ("$[-1:]", Some(-1), None, None),
        ("$[:2]", None, Some(2), None),
        ("$[:]", None, None, None),
        ("$[::-1]", None, None, Some(-1)),
        ("$[1:5:2]", Some(1), Some(5), Some(2)),
        ("$[ 1 : 5 : 2 ]", Some(1), Some(5), Some(2)),
    ];

    for (input, start, end, step) in cases {
        assert_eq!(
            parse(input),
            vec![PathFilter::ArraySlice { start, end, step }],
            "{}",
            input
        );
    }
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_query_comparison() {
    assert_eq!(
        parse("$[?(@.price<10)]"),
        vec![PathFilter::Query(vec![QueryExpression::compare(
            vec![field("price")],
            QueryOperator::LessThan,
            Literal::Integer(10),
        )])]
    );
}

#[test]
fn test_query_exists() {
    assert_eq!(
        parse("$..book[?(@.isbn)]"),
        vec![
            scan("book"),
            PathFilter::Query(vec![QueryExpression::exists(vec![field("isbn")])]),
        ]
    );
}

#[test]
fn test_query_operators() {
    let cases = vec![
        ("==", QueryOperator::Equals),
        ("!=", QueryOperator::NotEquals),
        ("<>", QueryOperator::NotEquals),
        ("<", QueryOperator::LessThan),
        ("<=", QueryOperator::LessThanOrEquals),
        (">", QueryOperator::GreaterThan),
        (">=", QueryOperator::GreaterThanOrEquals),
    ];

    for (symbol, operator) in cases {
        let input = format!("$[?(@.a {} 1)]", symbol);
        match parse(&input).as_slice() {
            [PathFilter::Query(expressions)] => {
                assert_eq!(expressions[0].operator, operator, "{}", input)
            }
            other => panic!("unexpected chain for {}: {:?}", input, other),
        }
    }
}

#[test]
fn test_query_literals() {
    let cases = vec![
        ("'x'", Literal::String("x".into())),
        (r"'it\'s'", Literal::String("it's".into())),
        ("42", Literal::Integer(42)),
        ("-7", Literal::Integer(-7)),
        ("2.5", Literal::Float(2.5)),
        ("1e3", Literal::Float(1000.0)),
        ("true", Literal::Boolean(true)),
        ("false", Literal::Boolean(false)),
        ("null", Literal::Null),
    ];

    for (text, literal) in cases {
        let input = format!("$[?(@.a == {})]", text);
        match parse(&input).as_slice() {
            [PathFilter::Query(expressions)] => {
                assert_eq!(expressions[0].value, Some(literal), "{}", input)
            }
            other => panic!("unexpected chain for {}: {:?}", input, other),
        }
    }
}

#[test]
fn test_query_conjunction() {
    let filters = parse("$[?(@.a==1 && @.b!=2.5)]");
    assert_eq!(
        filters,
        vec![PathFilter::Query(vec![
            QueryExpression::compare(vec![field("a")], QueryOperator::Equals, Literal::Integer(1)),
            QueryExpression::compare(
                vec![field("b")],
                QueryOperator::NotEquals,
                Literal::Float(2.5)
            ),
        ])]
    );
}

#[test]
fn test_query_on_current_node() {
    assert_eq!(
        parse("$.tags[?(@ == 'x')]"),
        vec![
            field("tags"),
            PathFilter::Query(vec![QueryExpression::compare(
                vec![],
                QueryOperator::Equals,
                Literal::String("x".into()),
            )]),
        ]
    );
}

#[test]
fn test_nested_query() {
    let filters = parse("$[?(@.tags[?(@ == 'x')])]");
    let inner = PathFilter::Query(vec![QueryExpression::compare(
        vec![],
        QueryOperator::Equals,
        Literal::String("x".into()),
    )]);
    assert_eq!(
        filters,
        vec![PathFilter::Query(vec![QueryExpression::exists(vec![
            field("tags"),
            inner,
        ])])]
    );
}

#[test]
fn test_query_followed_by_member() {
    assert_eq!(
        parse("$.book[?(@.price > 10)].title"),
        vec![
            field("book"),
            PathFilter::Query(vec![QueryExpression::compare(
                vec![field("price")],
                QueryOperator::GreaterThan,
                Literal::Integer(10),
            )]),
            field("title"),
        ]
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_open_indexer() {
    assert_eq!(parse_err("$["), (ParseErrorKind::OpenIndexer, 2));
    assert_eq!(parse_err("$.foo[").0, ParseErrorKind::OpenIndexer);
    assert_eq!(parse_err("$[1").0, ParseErrorKind::OpenIndexer);
    assert_eq!(parse_err("$[1:").0, ParseErrorKind::OpenIndexer);
    assert_eq!(parse_err("$['a'").0, ParseErrorKind::OpenIndexer);
    assert_eq!(parse_err("$['a").0, ParseErrorKind::OpenIndexer);
}

#[test]
fn test_unexpected_characters() {
    assert_eq!(parse_err("$x"), (ParseErrorKind::UnexpectedCharacter('x'), 1));
    assert_eq!(parse_err("$.a b"), (ParseErrorKind::UnexpectedCharacter(' '), 3));
    assert_eq!(parse_err("$.a]"), (ParseErrorKind::UnexpectedCharacter(']'), 3));
    assert_eq!(parse_err("$ .a"), (ParseErrorKind::UnexpectedCharacter(' '), 1));
}

#[test]
fn test_character_following_indexer() {
    assert_eq!(parse_err("$[0]a"), (ParseErrorKind::UnexpectedAfterIndexer('a'), 4));
}

#[test]
fn test_bad_array_indexers() {
    assert_eq!(parse_err("$[]").0, ParseErrorKind::IndexExpected);
    assert_eq!(parse_err("$[1,]").0, ParseErrorKind::IndexExpected);
    assert_eq!(parse_err("$[,1]").0, ParseErrorKind::IndexExpected);
    assert_eq!(parse_err("$[1 2]").0, ParseErrorKind::UnexpectedIndexerCharacter('2'));
    assert_eq!(parse_err("$[a]").0, ParseErrorKind::UnexpectedIndexerCharacter('a'));
    assert_eq!(parse_err("$[1:2,3]").0, ParseErrorKind::UnexpectedIndexerCharacter(','));
    assert_eq!(parse_err("$[1,2:3]").0, ParseErrorKind::UnexpectedIndexerCharacter(':'));
    assert_eq!(parse_err("$[1:2:3:4]").0, ParseErrorKind::UnexpectedIndexerCharacter(':'));
    assert_eq!(parse_err("$[*,1]").0, ParseErrorKind::UnexpectedIndexerCharacter(','));
    assert_eq!(parse_err("$[1*]").0, ParseErrorKind::UnexpectedIndexerCharacter('*'));
    assert_eq!(parse_err("$[1)").0, ParseErrorKind::UnexpectedIndexerCharacter(')'));
}

#[test]
fn test_invalid_index_text() {
    assert_eq!(parse_err("$[-]").0, ParseErrorKind::InvalidIndex("-".into()));
    assert_eq!(parse_err("$[1-2]").0, ParseErrorKind::InvalidIndex("1-2".into()));
    assert_eq!(
        parse_err("$[99999999999999999999]").0,
        ParseErrorKind::InvalidIndex("99999999999999999999".into())
    );
}

#[test]
fn test_zero_step() {
    assert_eq!(parse_err("$[::0]").0, ParseErrorKind::ZeroStep);
    assert_eq!(parse_err("$[1:2:0]").0, ParseErrorKind::ZeroStep);
}

#[test]
fn test_quoted_field_errors() {
    assert_eq!(parse_err(r"$['a\b']").0, ParseErrorKind::UnknownEscape('b'));
    assert_eq!(parse_err("$['']").0, ParseErrorKind::EmptyIndexer);
    assert_eq!(parse_err("$['a' x]").0, ParseErrorKind::UnexpectedIndexerCharacter('x'));
    assert_eq!(parse_err("$['a')").0, ParseErrorKind::UnexpectedIndexerCharacter(')'));
}

#[test]
fn test_query_errors() {
    assert_eq!(parse_err("$[?(a)]").0, ParseErrorKind::UnexpectedQueryCharacter('a'));
    assert_eq!(parse_err("$[?@.a]").0, ParseErrorKind::UnexpectedIndexerCharacter('@'));
    assert_eq!(parse_err("$[?(@.a").0, ParseErrorKind::OpenQuery);
    assert_eq!(parse_err("$[?(@.a = 1)]").0, ParseErrorKind::InvalidOperator);
    assert_eq!(parse_err("$[?(@.a == x)]").0, ParseErrorKind::InvalidValue);
    assert_eq!(parse_err("$[?(@.a == tru)]").0, ParseErrorKind::InvalidValue);
    assert_eq!(parse_err("$[?(@.a == 1").0, ParseErrorKind::InvalidValue);
    assert_eq!(parse_err("$[?(@.a == 1.2.3)]").0, ParseErrorKind::InvalidValue);
    assert_eq!(parse_err("$[?(@.a == 1e999)]").0, ParseErrorKind::InvalidValue);
    assert_eq!(parse_err(r"$[?(@.a == 'x\n')]").0, ParseErrorKind::UnknownEscape('n'));
    assert_eq!(parse_err("$[?(@.a)").0, ParseErrorKind::OpenIndexer);
    assert_eq!(parse_err("$[?(@.a))").0, ParseErrorKind::UnexpectedIndexerCharacter(')'));
}

#[test]
fn test_error_messages() {
    let err = Parser::new(r"$['a\q']").parse().unwrap_err();
    assert_eq!(err.to_string(), r"Unknown escape character: \q at position 5");

    let err = Parser::new("$[?(@.a ~ 1)]").parse().unwrap_err();
    assert_eq!(err.to_string(), "Could not read query operator at position 8");
}

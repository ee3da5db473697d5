//! A `nom`-based parser for field expressions.
//!
//! ```text
//! expression := literal | call | selection
//! call       := identifier '(' [expression (',' expression)*] ')'
//! selection  := '.' | '$' identifier | identifier segment*
//! segment    := '.' identifier | '[' digits ']'
//! literal    := number | 'text' | "text" | true | false | null
//! ```
use crate::ast::{Expression, PathSegment, Selection};
use crate::error::ExprError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{alpha1, char, multispace0, one_of, satisfy, u64 as nom_u64},
    combinator::{map, not, peek, recognize, value},
    multi::{many0, separated_list0},
    number::complete::double,
    sequence::{delimited, pair, preceded, terminated},
};
use serde_json::Value;

pub fn parse_expression(input: &str) -> Result<Expression, ExprError> {
    match expression(input.trim()) {
        Ok(("", expr)) => Ok(expr),
        Ok((rem, _)) => Err(ExprError::Parse {
            source_text: input.to_string(),
            message: format!("unexpected trailing input '{}'", rem),
        }),
        Err(e) => Err(ExprError::Parse {
            source_text: input.to_string(),
            message: e.to_string(),
        }),
    }
}

fn expression(input: &str) -> IResult<&str, Expression> {
    ws(alt((
        map(literal, Expression::Literal),
        function_call,
        map(selection, Expression::Selection),
    )))
    .parse(input)
}

// --- Literals ---

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Matches `kw` only when it is not the prefix of a longer identifier.
fn keyword<'a>(
    kw: &'static str,
) -> impl Parser<&'a str, Output = &'a str, Error = nom::error::Error<&'a str>> {
    terminated(tag(kw), not(satisfy(is_ident_char)))
}

fn boolean(input: &str) -> IResult<&str, Value> {
    alt((
        value(Value::Bool(true), keyword("true")),
        value(Value::Bool(false), keyword("false")),
    ))
    .parse(input)
}

fn null(input: &str) -> IResult<&str, Value> {
    value(Value::Null, keyword("null")).parse(input)
}

fn string_literal(input: &str) -> IResult<&str, Value> {
    let single = delimited(char('\''), take_while(|c: char| c != '\''), char('\''));
    let double_quoted = delimited(char('"'), take_while(|c: char| c != '"'), char('"'));
    map(alt((single, double_quoted)), |s: &str| Value::String(s.to_string())).parse(input)
}

fn number(input: &str) -> IResult<&str, Value> {
    // `double` also accepts "inf" and "nan", which would swallow field names.
    map(preceded(peek(one_of("-0123456789")), double), |n: f64| {
        if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
            Value::from(n as i64)
        } else {
            Value::from(n)
        }
    })
    .parse(input)
}

fn literal(input: &str) -> IResult<&str, Value> {
    alt((null, boolean, number, string_literal)).parse(input)
}

// --- Selections ---

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(alt((alpha1, tag("_"))), take_while(is_ident_char))).parse(input)
}

fn key_segment(input: &str) -> IResult<&str, PathSegment> {
    map(preceded(char('.'), identifier), |s| {
        PathSegment::Key(s.to_string())
    })
    .parse(input)
}

fn index_segment(input: &str) -> IResult<&str, PathSegment> {
    map(delimited(char('['), nom_u64, char(']')), |i| {
        PathSegment::Index(i as usize)
    })
    .parse(input)
}

fn field_path(input: &str) -> IResult<&str, Selection> {
    map(
        pair(identifier, many0(alt((key_segment, index_segment)))),
        |(first, mut rest)| {
            let mut segments = vec![PathSegment::Key(first.to_string())];
            segments.append(&mut rest);
            Selection::Path(segments)
        },
    )
    .parse(input)
}

fn selection(input: &str) -> IResult<&str, Selection> {
    alt((
        map(preceded(char('$'), identifier), |name| {
            Selection::Variable(name.to_string())
        }),
        field_path,
        value(Selection::CurrentRecord, char('.')),
    ))
    .parse(input)
}

// --- Function calls ---

fn function_call(input: &str) -> IResult<&str, Expression> {
    let (input, name) = identifier(input)?;
    let (input, _) = multispace0(input)?;
    let (input, args) = delimited(
        char('('),
        separated_list0(char(','), expression),
        ws(char(')')),
    )
    .parse(input)?;

    Ok((
        input,
        Expression::FunctionCall {
            name: name.to_string(),
            args,
        },
    ))
}

/// Wraps `inner` so it also consumes surrounding whitespace.
fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: nom::error::ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

//! nom parsers for unit-suffixed lengths (`"1cm"`, `"5mm"`, `"0.5in"`, `"12pt"`)
//! and the serde glue that lets definitions accept either a bare number of
//! points or such a string.

use crate::page::Margins;
use folio_types::units::{POINTS_PER_CM, POINTS_PER_INCH, POINTS_PER_MM};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{space0, space1},
    combinator::{all_consuming, map, opt},
    multi::separated_list1,
    number::complete::float,
    sequence::delimited,
};
use serde::{Deserialize, Deserializer, de};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Invalid length '{0}'")]
    InvalidLength(String),

    #[error("Invalid margins '{input}': {reason}")]
    InvalidMargins { input: String, reason: String },
}

fn unit(input: &str) -> IResult<&str, f32> {
    alt((
        map(tag_no_case("pt"), |_| 1.0_f32),
        map(tag_no_case("cm"), |_| POINTS_PER_CM),
        map(tag_no_case("mm"), |_| POINTS_PER_MM),
        map(tag_no_case("in"), |_| POINTS_PER_INCH),
    ))
    .parse(input)
}

/// A number immediately followed by an optional unit. No unit means points.
pub fn length(input: &str) -> IResult<&str, f32> {
    let (input, value) = float(input)?;
    let (input, factor) = opt(unit).parse(input)?;
    Ok((input, value * factor.unwrap_or(1.0)))
}

/// Parses a complete length string into points.
pub fn parse_length(input: &str) -> Result<f32, StyleParseError> {
    all_consuming(delimited(space0, length, space0))
        .parse(input)
        .map(|(_, value)| value)
        .map_err(|_| StyleParseError::InvalidLength(input.to_string()))
}

/// Parses 1, 2 or 4 space separated lengths, CSS shorthand style.
pub fn parse_margins(input: &str) -> Result<Margins, StyleParseError> {
    let parts = all_consuming(delimited(space0, separated_list1(space1, length), space0))
        .parse(input)
        .map(|(_, parts)| parts)
        .map_err(|e| StyleParseError::InvalidMargins {
            input: input.to_string(),
            reason: e.to_string(),
        })?;

    match parts.as_slice() {
        [all] => Ok(Margins::all(*all)),
        [y, x] => Ok(Margins::new(*y, *x, *y, *x)),
        [top, right, bottom, left] => Ok(Margins::new(*top, *right, *bottom, *left)),
        _ => Err(StyleParseError::InvalidMargins {
            input: input.to_string(),
            reason: format!("expected 1, 2 or 4 values, got {}", parts.len()),
        }),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LengthDef {
    Points(f32),
    Text(String),
}

impl LengthDef {
    fn into_points<E: de::Error>(self) -> Result<f32, E> {
        match self {
            LengthDef::Points(v) => Ok(v),
            LengthDef::Text(s) => parse_length(&s).map_err(E::custom),
        }
    }
}

/// `deserialize_with` helper for length fields.
pub fn deserialize_length<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    LengthDef::deserialize(deserializer)?.into_points()
}

/// `deserialize_with` helper for optional length fields.
pub fn deserialize_opt_length<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<LengthDef>::deserialize(deserializer)?
        .map(LengthDef::into_points)
        .transpose()
}

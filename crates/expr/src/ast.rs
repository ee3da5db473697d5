//! The syntax tree produced by the expression parser.
use serde_json::Value;
use std::fmt;

/// A parsed expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A literal value, like a string, number, or boolean.
    Literal(Value),
    /// A lookup on the current record or a render variable.
    Selection(Selection),
    /// A call to a registered function.
    FunctionCall { name: String, args: Vec<Expression> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// A mapping key or attribute name (`.name`).
    Key(String),
    /// An array index (`[0]`).
    Index(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// The record itself (`.`).
    CurrentRecord,
    /// A render variable such as `$page_number`.
    Variable(String),
    /// A field name followed by any number of key/index lookups.
    Path(Vec<PathSegment>),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => write!(f, ".{}", k),
            PathSegment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::CurrentRecord => f.write_str("."),
            Selection::Variable(name) => write!(f, "${}", name),
            Selection::Path(segments) => {
                for (i, segment) in segments.iter().enumerate() {
                    match (i, segment) {
                        (0, PathSegment::Key(k)) => f.write_str(k)?,
                        _ => write!(f, "{}", segment)?,
                    }
                }
                Ok(())
            }
        }
    }
}

impl Expression {
    /// Returns true for a plain field path with no function calls.
    pub fn is_field_path(&self) -> bool {
        matches!(self, Expression::Selection(Selection::Path(_)))
    }
}

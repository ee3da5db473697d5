//! Field expressions for report elements.
//!
//! An expression names a record field (`number`), walks into nested data
//! (`customer.orders[0].id`), reads a render variable (`$page_number`) or
//! combines those with functions (`concat('#', upper(code))`). Expressions
//! are parsed once, when the report is defined, and evaluated per record
//! through the [`Record`] capability.

pub mod ast;
pub mod compiled;
pub mod engine;
pub mod error;
pub mod functions;
mod parser;
pub mod record;

pub use ast::{Expression, PathSegment, Selection};
pub use compiled::CompiledExpression;
pub use engine::{
    EvaluationContext, evaluate, evaluate_as_bool, evaluate_as_string, is_truthy, select,
    to_display_string,
};
pub use error::ExprError;
pub use functions::{ExprFunction, FunctionRegistry};
pub use parser::parse_expression;
pub use record::Record;

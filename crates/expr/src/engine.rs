//! Evaluates a parsed expression against a single record.
use crate::ast::{Expression, PathSegment, Selection};
use crate::error::ExprError;
use crate::functions::FunctionRegistry;
use crate::record::Record;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;

/// Everything an evaluation may read besides the record itself.
#[derive(Clone, Copy)]
pub struct EvaluationContext<'a> {
    pub variables: &'a HashMap<String, Value>,
    pub functions: &'a FunctionRegistry,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(variables: &'a HashMap<String, Value>, functions: &'a FunctionRegistry) -> Self {
        Self {
            variables,
            functions,
        }
    }
}

/// Evaluates `expr` against `record`. The record is only ever read.
pub fn evaluate<R: Record + ?Sized>(
    expr: &Expression,
    record: &R,
    e_ctx: &EvaluationContext,
) -> Result<Value, ExprError> {
    match expr {
        Expression::Literal(val) => Ok(val.clone()),
        Expression::Selection(sel) => {
            select(sel, record, e_ctx.variables).map(Cow::into_owned)
        }
        Expression::FunctionCall { name, args } => {
            let function = e_ctx
                .functions
                .get(name)
                .ok_or_else(|| ExprError::UnknownFunction(name.clone()))?;
            let evaluated_args = args
                .iter()
                .map(|arg| evaluate(arg, record, e_ctx))
                .collect::<Result<Vec<_>, _>>()?;
            function(e_ctx, evaluated_args).map_err(|message| ExprError::Function {
                function: name.clone(),
                message,
            })
        }
    }
}

/// Evaluates and applies truthiness: `false`, `null`, `0`, `""` and empty
/// arrays/objects are false.
pub fn evaluate_as_bool<R: Record + ?Sized>(
    expr: &Expression,
    record: &R,
    e_ctx: &EvaluationContext,
) -> Result<bool, ExprError> {
    Ok(is_truthy(&evaluate(expr, record, e_ctx)?))
}

/// Evaluates and converts the result to display text.
pub fn evaluate_as_string<R: Record + ?Sized>(
    expr: &Expression,
    record: &R,
    e_ctx: &EvaluationContext,
) -> Result<String, ExprError> {
    Ok(to_display_string(&evaluate(expr, record, e_ctx)?))
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().unwrap_or(0.0) != 0.0,
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

pub fn to_display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Resolves a selection. Missing fields and out-of-range indexes are errors;
/// a field that exists and holds `null` is not.
pub fn select<'r, R: Record + ?Sized>(
    sel: &Selection,
    record: &'r R,
    variables: &'r HashMap<String, Value>,
) -> Result<Cow<'r, Value>, ExprError> {
    match sel {
        Selection::CurrentRecord => record.as_value().ok_or(ExprError::RecordNotAValue),
        Selection::Variable(name) => variables
            .get(name)
            .map(Cow::Borrowed)
            .ok_or_else(|| ExprError::UnknownVariable(name.clone())),
        Selection::Path(segments) => {
            let missing = |segment: &PathSegment| ExprError::MissingField {
                path: sel.to_string(),
                segment: segment.to_string().trim_start_matches('.').to_string(),
            };

            let (first, rest) = segments
                .split_first()
                .ok_or_else(|| ExprError::MissingField {
                    path: String::new(),
                    segment: String::new(),
                })?;
            let mut current = match first {
                PathSegment::Key(name) => record.field(name),
                PathSegment::Index(i) => record
                    .as_value()
                    .and_then(|v| descend(v, &PathSegment::Index(*i))),
            }
            .ok_or_else(|| missing(first))?;

            for segment in rest {
                current = descend(current, segment).ok_or_else(|| missing(segment))?;
            }
            Ok(current)
        }
    }
}

fn lookup<'v>(value: &'v Value, segment: &PathSegment) -> Option<&'v Value> {
    match segment {
        PathSegment::Key(k) => value.as_object()?.get(k),
        PathSegment::Index(i) => value.as_array()?.get(*i),
    }
}

fn descend<'r>(value: Cow<'r, Value>, segment: &PathSegment) -> Option<Cow<'r, Value>> {
    match value {
        Cow::Borrowed(v) => lookup(v, segment).map(Cow::Borrowed),
        Cow::Owned(v) => lookup(&v, segment).cloned().map(Cow::Owned),
    }
}

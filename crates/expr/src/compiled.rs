use crate::ast::Expression;
use crate::engine::{self, EvaluationContext};
use crate::error::ExprError;
use crate::parser::parse_expression;
use crate::record::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// An expression parsed once at definition time, keeping its source text for
/// error reporting. (De)serializes as the source string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompiledExpression {
    source: String,
    ast: Expression,
}

impl CompiledExpression {
    pub fn parse(source: &str) -> Result<Self, ExprError> {
        let ast = parse_expression(source)?;
        log::trace!("compiled expression '{}' -> {:?}", source, ast);
        Ok(Self {
            source: source.trim().to_string(),
            ast,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn ast(&self) -> &Expression {
        &self.ast
    }

    pub fn evaluate<R: Record + ?Sized>(
        &self,
        record: &R,
        e_ctx: &EvaluationContext,
    ) -> Result<Value, ExprError> {
        engine::evaluate(&self.ast, record, e_ctx)
    }

    pub fn evaluate_as_bool<R: Record + ?Sized>(
        &self,
        record: &R,
        e_ctx: &EvaluationContext,
    ) -> Result<bool, ExprError> {
        engine::evaluate_as_bool(&self.ast, record, e_ctx)
    }
}

impl TryFrom<String> for CompiledExpression {
    type Error = ExprError;

    fn try_from(source: String) -> Result<Self, Self::Error> {
        Self::parse(&source)
    }
}

impl TryFrom<&str> for CompiledExpression {
    type Error = ExprError;

    fn try_from(source: &str) -> Result<Self, Self::Error> {
        Self::parse(source)
    }
}

impl From<CompiledExpression> for String {
    fn from(expr: CompiledExpression) -> String {
        expr.source
    }
}

impl fmt::Display for CompiledExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

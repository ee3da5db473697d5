//! The registry of functions callable from expressions, plus the built-ins.
use crate::engine::{EvaluationContext, to_display_string};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

/// A function callable from an expression. An `Err` carries a message that
/// is wrapped into [`crate::ExprError::Function`].
pub type ExprFunction = fn(e_ctx: &EvaluationContext, args: Vec<Value>) -> Result<Value, String>;

pub struct FunctionRegistry {
    functions: HashMap<String, ExprFunction>,
}

static BUILTINS: LazyLock<FunctionRegistry> = LazyLock::new(FunctionRegistry::default);

impl FunctionRegistry {
    /// Creates a new, empty function registry.
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// A shared registry holding only the built-in functions.
    pub fn builtins() -> &'static FunctionRegistry {
        &BUILTINS
    }

    /// Registers a function, replacing any previous one of the same name.
    pub fn register(&mut self, name: &str, func: ExprFunction) {
        self.functions.insert(name.to_lowercase(), func);
    }

    /// Finds a function by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&ExprFunction> {
        self.functions.get(&name.to_lowercase())
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.functions.keys().collect();
        names.sort();
        f.debug_struct("FunctionRegistry").field("functions", &names).finish()
    }
}

fn single_string(args: &[Value]) -> Result<&str, String> {
    match args {
        [Value::String(s)] => Ok(s),
        [Value::Null] => Ok(""),
        [other] => Err(format!("expected a string, got {}", other)),
        _ => Err(format!("expected 1 argument, got {}", args.len())),
    }
}

fn upper(_e_ctx: &EvaluationContext, args: Vec<Value>) -> Result<Value, String> {
    single_string(&args).map(|s| s.to_uppercase().into())
}

fn lower(_e_ctx: &EvaluationContext, args: Vec<Value>) -> Result<Value, String> {
    single_string(&args).map(|s| s.to_lowercase().into())
}

fn concat(_e_ctx: &EvaluationContext, args: Vec<Value>) -> Result<Value, String> {
    Ok(args.iter().map(to_display_string).collect::<String>().into())
}

fn len(_e_ctx: &EvaluationContext, args: Vec<Value>) -> Result<Value, String> {
    match args.as_slice() {
        [Value::String(s)] => Ok(s.chars().count().into()),
        [Value::Array(a)] => Ok(a.len().into()),
        [Value::Object(o)] => Ok(o.len().into()),
        [Value::Null] => Ok(0.into()),
        [other] => Err(format!("cannot take the length of {}", other)),
        _ => Err(format!("expected 1 argument, got {}", args.len())),
    }
}

fn coalesce(_e_ctx: &EvaluationContext, args: Vec<Value>) -> Result<Value, String> {
    Ok(args.into_iter().find(|v| !v.is_null()).unwrap_or(Value::Null))
}

fn equals(_e_ctx: &EvaluationContext, args: Vec<Value>) -> Result<Value, String> {
    match args.as_slice() {
        [a, b] => Ok((a == b || to_display_string(a) == to_display_string(b)).into()),
        _ => Err(format!("expected 2 arguments, got {}", args.len())),
    }
}

impl Default for FunctionRegistry {
    /// Creates a new registry populated with all built-in functions.
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register("upper", upper);
        registry.register("lower", lower);
        registry.register("concat", concat);
        registry.register("len", len);
        registry.register("coalesce", coalesce);
        registry.register("equals", equals);
        registry
    }
}

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("Expression parse error in '{source_text}': {message}")]
    Parse { source_text: String, message: String },

    #[error("Field '{path}' does not exist on the record (failed at '{segment}')")]
    MissingField { path: String, segment: String },

    #[error("Unknown variable '${0}'")]
    UnknownVariable(String),

    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    #[error("Function '{function}' error: {message}")]
    Function { function: String, message: String },

    #[error("The record cannot be used as a value with '.'")]
    RecordNotAValue,
}

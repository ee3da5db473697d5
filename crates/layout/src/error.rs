use folio_expr::ExprError;
use folio_render_core::GeneratorError;
use folio_report::{BandRole, DefinitionError};
use thiserror::Error;

/// An expression failed against a specific record.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Failed to evaluate '{expression}' for record #{record_index} in the {band} band: {source}")]
pub struct EvaluationError {
    pub expression: String,
    /// 0-based index of the top-level record. Failures inside a sub-report
    /// report the record and band that anchor it.
    pub record_index: usize,
    pub band: BandRole,
    pub source: ExprError,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error(
        "The {band} band needs {height:.2}pt but an empty page only has {available:.2}pt (record #{record_index})"
    )]
    BandTooLarge {
        band: BandRole,
        record_index: usize,
        height: f32,
        available: f32,
    },
    #[error(
        "Sub-report records '{expression}' for record #{record_index} must yield an array, got {found}"
    )]
    SubReportSource {
        expression: String,
        record_index: usize,
        found: &'static str,
    },
}

/// Everything a render call can fail with.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
}

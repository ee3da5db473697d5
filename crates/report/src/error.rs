use crate::band::BandRole;
use folio_expr::ExprError;
use thiserror::Error;

/// A report definition that can never render correctly. Raised when the
/// definition is built, before any record is looked at.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DefinitionError {
    #[error("Report declares {groups} group(s) but no detail band")]
    MissingDetailBand { groups: usize },

    #[error("{band} band has a negative or non-finite height ({height:.2})")]
    InvalidBandHeight { band: BandRole, height: f32 },

    #[error("{band} band is {width:.2}pt wide but the page content area is only {available:.2}pt")]
    BandTooWide {
        band: BandRole,
        width: f32,
        available: f32,
    },

    #[error(
        "Page header ({header:.2}pt) and page footer ({footer:.2}pt) leave no room in a content height of {available:.2}pt"
    )]
    PageBandsOverlap {
        header: f32,
        footer: f32,
        available: f32,
    },

    #[error("Element #{index} of the {band} band is invalid: {reason}")]
    InvalidElement {
        band: BandRole,
        index: usize,
        reason: String,
    },

    #[error("{band} band holds a sub-report; page bands cannot flow")]
    SubReportInPageBand { band: BandRole },

    #[error("Invalid expression: {0}")]
    InvalidExpression(#[from] ExprError),

    #[error("Invalid report JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for DefinitionError {
    fn from(e: serde_json::Error) -> Self {
        DefinitionError::Json(e.to_string())
    }
}

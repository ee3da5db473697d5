use crate::definition::ReportDefinition;
use crate::error::DefinitionError;
use folio_expr::CompiledExpression;
use serde::Deserialize;
use std::sync::Arc;

/// A nested report rendered inline after the band that holds it, once per
/// parent record. `records` is evaluated against the parent record and must
/// yield an array.
///
/// The nested report's begin band acts as its header and its summary band as
/// its footer. Page headers and footers of the nested report are ignored; the
/// parent's are used on every page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubReport {
    pub report: Arc<ReportDefinition>,
    pub records: CompiledExpression,
}

impl SubReport {
    pub fn new(report: ReportDefinition, records: &str) -> Result<Self, DefinitionError> {
        Ok(Self {
            report: Arc::new(report),
            records: CompiledExpression::parse(records)?,
        })
    }
}

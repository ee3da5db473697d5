use crate::band::BandDefinition;
use crate::error::DefinitionError;
use folio_expr::CompiledExpression;
use serde::Deserialize;

/// A grouping level. Consecutive records with the same key value form one
/// group; the header is placed before the first of them and the footer
/// after the last. Records are never reordered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GroupDefinition {
    pub key: CompiledExpression,
    #[serde(default)]
    pub header: Option<BandDefinition>,
    #[serde(default)]
    pub footer: Option<BandDefinition>,
    /// Start a new page whenever a new group begins (except the first).
    #[serde(default)]
    pub force_new_page: bool,
}

impl GroupDefinition {
    pub fn new(key: &str) -> Result<Self, DefinitionError> {
        Ok(Self {
            key: CompiledExpression::parse(key)?,
            header: None,
            footer: None,
            force_new_page: false,
        })
    }

    pub fn header(mut self, band: BandDefinition) -> Self {
        self.header = Some(band);
        self
    }

    pub fn footer(mut self, band: BandDefinition) -> Self {
        self.footer = Some(band);
        self
    }

    pub fn force_new_page(mut self) -> Self {
        self.force_new_page = true;
        self
    }
}

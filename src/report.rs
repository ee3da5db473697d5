//! A report definition bound to the records it renders.

use folio_expr::FunctionRegistry;
use folio_layout::{LayoutConfig, LayoutEngine, ReportError};
use folio_render_core::{Generator, LaidOutReport};
use folio_report::ReportDefinition;
use folio_source::DataSource;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// One renderable report: an immutable definition, its record set and the
/// engine settings to lay it out with.
///
/// The definition is shared, so binding the same definition to many record
/// sets is cheap.
#[derive(Debug, Clone)]
pub struct Report {
    definition: Arc<ReportDefinition>,
    records: Vec<Value>,
    engine: LayoutEngine,
}

impl Report {
    pub fn new(definition: impl Into<Arc<ReportDefinition>>, records: Vec<Value>) -> Self {
        Self {
            definition: definition.into(),
            records,
            engine: LayoutEngine::default(),
        }
    }

    /// Binds the definition to every record `source` yields.
    pub fn from_source<S: DataSource + ?Sized>(
        definition: impl Into<Arc<ReportDefinition>>,
        source: &mut S,
    ) -> Self {
        Self::new(definition, source.drain_records())
    }

    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.engine = self.engine.with_config(config);
        self
    }

    pub fn with_functions(mut self, functions: FunctionRegistry) -> Self {
        self.engine = self.engine.with_functions(functions);
        self
    }

    pub fn definition(&self) -> &ReportDefinition {
        &self.definition
    }

    pub fn records(&self) -> &[Value] {
        &self.records
    }

    /// Lays the report out without emitting it anywhere.
    pub fn layout(&self) -> Result<LaidOutReport, ReportError> {
        self.engine.layout(&self.definition, &self.records)
    }

    /// Renders the report into `generator` and returns its output. A failed
    /// layout leaves the generator untouched.
    pub fn generate_by<G: Generator + ?Sized>(
        &self,
        generator: &mut G,
    ) -> Result<G::Output, ReportError> {
        self.engine
            .render(&self.definition, &self.records, generator)
    }
}

/// Page and element totals of one laid-out report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSummary {
    pub title: String,
    pub record_count: usize,
    pub page_count: usize,
    pub element_count: usize,
}

impl RenderSummary {
    pub fn new(report: &Report, laid_out: &LaidOutReport) -> Self {
        Self {
            title: report.definition.title.clone(),
            record_count: report.records.len(),
            page_count: laid_out.page_count(),
            element_count: laid_out.element_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_render_core::{CallsExt, RecordingGenerator};
    use folio_report::{BandDefinition, Element};
    use folio_source::VecDataSource;
    use serde_json::json;

    fn numbers_report() -> ReportDefinition {
        ReportDefinition::builder()
            .title("Numbers")
            .detail(BandDefinition::new(20.0).element(Element::object_value("number").unwrap()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_report_from_source_renders_every_record() {
        let mut source = VecDataSource::new((1..=3).map(|n| json!({ "number": n })).collect());
        let report = Report::from_source(numbers_report(), &mut source);
        assert_eq!(report.records().len(), 3);

        let calls = report.generate_by(&mut RecordingGenerator::new()).unwrap();
        assert_eq!(calls.values_by_page(), vec![vec![json!(1), json!(2), json!(3)]]);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let report = Report::new(numbers_report(), vec![json!({ "number": 7 })]);
        let summary = RenderSummary::new(&report, &report.layout().unwrap());
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({ "title": "Numbers", "recordCount": 1, "pageCount": 1, "elementCount": 1 })
        );
    }

    #[test]
    fn test_custom_functions_survive_config_change() {
        fn shout(
            _ctx: &folio_expr::EvaluationContext,
            args: Vec<Value>,
        ) -> Result<Value, String> {
            Ok(json!(format!("{}!", folio_expr::to_display_string(&args[0]))))
        }
        let mut functions = FunctionRegistry::new();
        functions.register("shout", shout);

        let definition = ReportDefinition::builder()
            .detail(BandDefinition::new(20.0).element(Element::object_value("shout(name)").unwrap()))
            .build()
            .unwrap();
        let report = Report::new(definition, vec![json!({ "name": "hey" })])
            .with_functions(functions)
            .with_config(LayoutConfig::default());

        let calls = report.generate_by(&mut RecordingGenerator::new()).unwrap();
        assert_eq!(calls.values_by_page(), vec![vec![json!("hey!")]]);
    }
}

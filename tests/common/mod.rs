pub mod fixtures;

use folio::{GeneratorCall, RecordingGenerator, Report, ReportDefinition};
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Renders `definition` over `records` into a fresh recording generator.
pub fn record_calls(
    definition: ReportDefinition,
    records: Vec<Value>,
) -> Result<Vec<GeneratorCall>, folio::ReportError> {
    Report::new(definition, records).generate_by(&mut RecordingGenerator::new())
}

/// The effective styles of every placed element, in emission order.
pub fn placed_styles(calls: &[GeneratorCall]) -> Vec<folio::Style> {
    calls
        .iter()
        .filter_map(|call| match call {
            GeneratorCall::PlaceElement { style, .. } => Some(style.style().clone()),
            _ => None,
        })
        .collect()
}

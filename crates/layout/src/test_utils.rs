use crate::{LayoutConfig, LayoutEngine};
use folio_render_core::LaidOutReport;
use folio_report::{BandDefinition, Element, ReportBuilder, ReportDefinition};
use folio_style::{Margins, PageSize};
use serde_json::{Value, json};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A builder for a 200x100pt page with no margins.
pub fn small_page() -> ReportBuilder {
    ReportDefinition::builder()
        .page_size(PageSize::Custom {
            width: 200.0,
            height: 100.0,
        })
        .margins(Margins::default())
}

pub fn value_band(height: f32, expression: &str) -> BandDefinition {
    BandDefinition::new(height).element(Element::object_value(expression).unwrap())
}

pub fn label_band(height: f32, text: &str) -> BandDefinition {
    BandDefinition::new(height).element(Element::label(text))
}

pub fn numbers(count: usize) -> Vec<Value> {
    (1..=count).map(|n| json!({ "number": n })).collect()
}

pub fn layout(definition: &ReportDefinition, records: &[Value]) -> LaidOutReport {
    LayoutEngine::new(LayoutConfig::default())
        .layout(definition, records)
        .unwrap()
}

/// Values placed on each page, in emission order.
pub fn page_values(report: &LaidOutReport) -> Vec<Vec<Value>> {
    report
        .pages
        .iter()
        .map(|page| {
            page.iter()
                .map(|el| el.value.resolve(report.page_count()))
                .collect()
        })
        .collect()
}

/// Every placed value across all pages.
pub fn all_values(report: &LaidOutReport) -> Vec<Value> {
    page_values(report).into_iter().flatten().collect()
}

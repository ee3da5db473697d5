//! Rendering many independent reports at once.
//!
//! Each report gets its own render pass and its own generator, so the jobs
//! share nothing mutable and can run on any [`Executor`]. Results always come
//! back in input order.

use crate::report::{RenderSummary, Report};
use folio_layout::ReportError;
use folio_render_core::{Generator, LaidOutReport};
use folio_traits::Executor;

/// Renders every report into a fresh generator built by `make_generator`.
pub fn render_batch<E, G, F>(
    executor: &E,
    reports: Vec<Report>,
    make_generator: F,
) -> Vec<Result<G::Output, ReportError>>
where
    E: Executor,
    G: Generator,
    G::Output: Send + 'static,
    F: Fn() -> G + Send + Sync + Clone + 'static,
{
    log::debug!(
        "Rendering {} report(s) with {} (parallelism {})",
        reports.len(),
        executor.name(),
        executor.parallelism()
    );
    executor.execute_all(reports, move |report: Report| {
        let mut generator = make_generator();
        report.generate_by(&mut generator)
    })
}

/// Lays out every report, returning the page model with its totals.
pub fn layout_batch<E: Executor>(
    executor: &E,
    reports: Vec<Report>,
) -> Vec<Result<(LaidOutReport, RenderSummary), ReportError>> {
    log::debug!(
        "Laying out {} report(s) with {}",
        reports.len(),
        executor.name()
    );
    executor.execute_all(reports, |report: Report| {
        let laid_out = report.layout()?;
        let summary = RenderSummary::new(&report, &laid_out);
        log::trace!(
            "Report '{}': {} page(s) from {} record(s)",
            summary.title,
            summary.page_count,
            summary.record_count
        );
        Ok((laid_out, summary))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_executor::SyncExecutor;
    use folio_render_core::{CallsExt, RecordingGenerator};
    use folio_report::{BandDefinition, Element, ReportDefinition};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_render_batch_keeps_order_and_isolates_failures() {
        let definition = Arc::new(
            ReportDefinition::builder()
                .detail(BandDefinition::new(20.0).element(Element::object_value("number").unwrap()))
                .build()
                .unwrap(),
        );
        let reports = vec![
            Report::new(definition.clone(), vec![json!({ "number": 1 })]),
            Report::new(definition.clone(), vec![json!({ "other": 2 })]),
            Report::new(definition, vec![json!({ "number": 3 })]),
        ];

        let results = render_batch(&SyncExecutor::new(), reports, RecordingGenerator::new);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().values_by_page(), vec![vec![json!(1)]]);
        assert!(matches!(results[1], Err(ReportError::Evaluation(_))));
        assert_eq!(results[2].as_ref().unwrap().values_by_page(), vec![vec![json!(3)]]);
    }
}

mod common;

use common::fixtures::{numbers, numbers_report};
use common::{TestResult, init_logger};
use folio::{CallsExt, Executor, ExecutorImpl, RecordingGenerator, Report, SyncExecutor};
use serde_json::json;
use std::sync::Arc;

fn reports(count: usize) -> Vec<Report> {
    let definition = Arc::new(numbers_report().build().unwrap());
    (1..=count)
        .map(|n| Report::new(definition.clone(), numbers(n)))
        .collect()
}

#[cfg(feature = "rayon-executor")]
#[test]
fn test_rayon_batch_preserves_order() -> TestResult {
    init_logger();
    let executor = folio::RayonExecutor::new();
    let results = folio::render_batch(&executor, reports(40), RecordingGenerator::new);

    assert_eq!(results.len(), 40);
    for (i, result) in results.into_iter().enumerate() {
        let values = result?.values_by_page().concat();
        assert_eq!(values.len(), i + 1);
        assert_eq!(values.last(), Some(&json!(i + 1)));
    }
    Ok(())
}

#[test]
fn test_batch_matches_sequential_renders() -> TestResult {
    init_logger();
    let executor = ExecutorImpl::default();
    let parallel = folio::render_batch(&executor, reports(12), RecordingGenerator::new);
    let sequential = folio::render_batch(&SyncExecutor::new(), reports(12), RecordingGenerator::new);

    for (a, b) in parallel.into_iter().zip(sequential) {
        assert_eq!(a?, b?);
    }
    Ok(())
}

#[test]
fn test_layout_batch_summaries() -> TestResult {
    init_logger();
    let executor = ExecutorImpl::for_batch(3);
    assert!(executor.parallelism() >= 1);

    let results = folio::layout_batch(&executor, vec![
        reports(1).remove(0),
        Report::new(numbers_report().build()?, numbers(100)),
    ]);
    let (_, small) = results[0].as_ref().map_err(|e| e.to_string())?;
    let (laid_out, large) = results[1].as_ref().map_err(|e| e.to_string())?;
    assert_eq!(small.page_count, 1);
    assert_eq!(large.page_count, 3);
    assert_eq!(large.record_count, 100);
    assert_eq!(laid_out.page_count(), 3);
    Ok(())
}

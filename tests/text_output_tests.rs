mod common;

use common::{TestResult, init_logger};
use folio::{
    BandDefinition, Element, Margins, PageSize, Report, ReportDefinition, SystemSymbol,
    TextGenerator,
};
use serde_json::json;

fn names_report() -> ReportDefinition {
    // 20x5 cells with the default 6x12pt grid.
    ReportDefinition::builder()
        .title("Names")
        .page_size(PageSize::Custom {
            width: 120.0,
            height: 60.0,
        })
        .margins(Margins::default())
        .page_header(
            BandDefinition::new(12.0)
                .element(Element::system_field(SystemSymbol::ReportTitle))
                .element(
                    Element::system_field(SystemSymbol::PageNumber)
                        .style(serde_json::from_value(json!({ "alignment": "right" })).unwrap()),
                ),
        )
        .detail(BandDefinition::new(12.0).element(Element::object_value("name").unwrap()))
        .build()
        .unwrap()
}

#[test]
fn test_text_generator_end_to_end() -> TestResult {
    init_logger();
    let records = ["alpha", "beta", "gamma", "delta", "eps", "zeta"]
        .iter()
        .map(|name| json!({ "name": name }))
        .collect();

    let text = Report::new(names_report(), records).generate_by(&mut TextGenerator::new())?;
    let pages: Vec<&str> = text.split("\n\u{c}\n").collect();
    assert_eq!(pages.len(), 2);
    assert_eq!(
        pages[0],
        "Names              1\nalpha\nbeta\ngamma\ndelta"
    );
    assert_eq!(pages[1], "Names              2\neps\nzeta");
    Ok(())
}

#[test]
fn test_text_generator_with_no_pages() -> TestResult {
    init_logger();
    let text = Report::new(names_report(), vec![]).generate_by(&mut TextGenerator::new())?;
    assert_eq!(text, "");
    Ok(())
}

use folio::{BandDefinition, Element, ReportBuilder, ReportDefinition, Style};
use serde_json::{Value, json};

/// `count` records shaped `{ "number": n }`, numbered from 1.
pub fn numbers(count: usize) -> Vec<Value> {
    (1..=count).map(|n| json!({ "number": n })).collect()
}

/// Records with a `category` key, in the given order.
pub fn categorized(categories: &[&str]) -> Vec<Value> {
    categories
        .iter()
        .enumerate()
        .map(|(i, c)| json!({ "category": c, "amount": (i + 1) * 10 }))
        .collect()
}

/// An A4 report with a single 20pt detail band showing `number`.
pub fn numbers_report() -> ReportBuilder {
    ReportDefinition::builder()
        .title("Numbers")
        .detail(BandDefinition::new(20.0).element(Element::object_value("number").unwrap()))
}

pub fn style(json: Value) -> Style {
    serde_json::from_value(json).unwrap()
}

/// The JSON form of [`numbers_report`].
pub const NUMBERS_REPORT_JSON: &str = r#"{
    "title": "Numbers",
    "pageSize": "A4",
    "margins": "1cm",
    "bands": {
        "detail": {
            "height": 20,
            "elements": [ { "type": "objectValue", "expression": "number" } ]
        }
    }
}"#;

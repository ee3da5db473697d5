use crate::test_utils::*;
use crate::{EvaluationPolicy, LayoutConfig, LayoutEngine, LayoutError, ReportError};
use chrono::NaiveDate;
use folio_render_core::{Generator, GeneratorCall, RecordingGenerator};
use folio_report::{
    BandDefinition, BandRole, ConditionalStyle, Element, Extent, GroupDefinition, ReportDefinition,
    SubReport, SystemSymbol,
};
use folio_style::{FontWeight, PageSize, Style};
use serde_json::{Value, json};

fn tall_page() -> folio_report::ReportBuilder {
    small_page().page_size(PageSize::Custom {
        width: 200.0,
        height: 1000.0,
    })
}

#[test]
fn test_bands_per_page_follow_the_content_height() {
    init_logger();
    let def = small_page().detail(value_band(20.0, "number")).build().unwrap();
    let report = layout(&def, &numbers(12));

    assert_eq!(report.page_count(), 3);
    assert_eq!(
        page_values(&report),
        vec![
            (1..=5).map(Value::from).collect::<Vec<_>>(),
            (6..=10).map(Value::from).collect(),
            vec![json!(11), json!(12)],
        ]
    );
    // Second band on a page sits right below the first.
    assert_eq!(report.pages[0][1].rect.y, 20.0);
}

#[test]
fn test_page_header_and_footer_repeat_on_every_page() {
    init_logger();
    let def = small_page()
        .page_header(label_band(10.0, "H"))
        .page_footer(label_band(10.0, "F"))
        .detail(value_band(20.0, "number"))
        .build()
        .unwrap();
    let report = layout(&def, &numbers(10));

    let pages = page_values(&report);
    assert_eq!(pages.len(), 3);
    assert_eq!(
        pages[0],
        vec![json!("H"), json!(1), json!(2), json!(3), json!(4), json!("F")]
    );
    assert_eq!(pages[2], vec![json!("H"), json!(9), json!(10), json!("F")]);
    let footer = report.pages[2].last().unwrap();
    assert_eq!(footer.rect.y, 90.0);
}

#[test]
fn test_group_boundaries_fire_on_key_changes_only() {
    init_logger();
    let def = tall_page()
        .group(
            GroupDefinition::new("cat")
                .unwrap()
                .header(value_band(10.0, "concat('<', cat)"))
                .footer(value_band(10.0, "concat('>', cat)")),
        )
        .detail(value_band(10.0, "n"))
        .build()
        .unwrap();
    let records: Vec<Value> = ["A", "A", "B", "B", "A"]
        .iter()
        .enumerate()
        .map(|(i, cat)| json!({ "cat": cat, "n": i + 1 }))
        .collect();

    let values = all_values(&layout(&def, &records));
    assert_eq!(
        values,
        vec![
            json!("<A"),
            json!(1),
            json!(2),
            json!(">A"),
            json!("<B"),
            json!(3),
            json!(4),
            json!(">B"),
            json!("<A"),
            json!(5),
            json!(">A"),
        ]
    );
}

#[test]
fn test_outer_group_change_reopens_inner_groups() {
    init_logger();
    let def = tall_page()
        .group(
            GroupDefinition::new("region")
                .unwrap()
                .header(value_band(10.0, "concat('R:', region)"))
                .footer(value_band(10.0, "concat('/R:', region)")),
        )
        .group(
            GroupDefinition::new("city")
                .unwrap()
                .header(value_band(10.0, "concat('C:', city)"))
                .footer(value_band(10.0, "concat('/C:', city)")),
        )
        .detail(value_band(10.0, "$index"))
        .build()
        .unwrap();
    let records = vec![
        json!({ "region": "N", "city": "a" }),
        json!({ "region": "N", "city": "a" }),
        json!({ "region": "N", "city": "b" }),
        json!({ "region": "S", "city": "b" }),
    ];

    let values = all_values(&layout(&def, &records));
    let expected: Vec<Value> = vec![
        json!("R:N"),
        json!("C:a"),
        json!(0),
        json!(1),
        json!("/C:a"),
        json!("C:b"),
        json!(2),
        json!("/C:b"),
        json!("/R:N"),
        json!("R:S"),
        json!("C:b"),
        json!(3),
        json!("/C:b"),
        json!("/R:S"),
    ];
    assert_eq!(values, expected);
}

#[test]
fn test_group_footer_breaks_before_the_next_header() {
    init_logger();
    let def = small_page()
        .group(
            GroupDefinition::new("cat")
                .unwrap()
                .header(value_band(10.0, "concat('<', cat)"))
                .footer(value_band(30.0, "concat('>', cat)")),
        )
        .detail(value_band(20.0, "n"))
        .build()
        .unwrap();
    let records: Vec<Value> = ["A", "A", "A", "A", "B"]
        .iter()
        .enumerate()
        .map(|(i, cat)| json!({ "cat": cat, "n": i + 1 }))
        .collect();

    let pages = page_values(&layout(&def, &records));
    assert_eq!(
        pages,
        vec![
            vec![json!("<A"), json!(1), json!(2), json!(3), json!(4)],
            vec![json!(">A"), json!("<B"), json!(5), json!(">B")],
        ]
    );
}

#[test]
fn test_group_force_new_page() {
    init_logger();
    let def = small_page()
        .group(GroupDefinition::new("cat").unwrap().force_new_page())
        .detail(value_band(10.0, "n"))
        .build()
        .unwrap();
    let records = vec![
        json!({ "cat": "A", "n": 1 }),
        json!({ "cat": "A", "n": 2 }),
        json!({ "cat": "B", "n": 3 }),
    ];

    let pages = page_values(&layout(&def, &records));
    assert_eq!(pages, vec![vec![json!(1), json!(2)], vec![json!(3)]]);
}

#[test]
fn test_band_force_new_page_and_visibility() {
    init_logger();
    let def = small_page()
        .detail(
            value_band(10.0, "number")
                .child(label_band(5.0, "child"))
                .child(label_band(5.0, "hidden").hidden()),
        )
        .summary(label_band(10.0, "total").force_new_page())
        .build()
        .unwrap();
    let report = layout(&def, &numbers(2));

    let pages = page_values(&report);
    assert_eq!(
        pages,
        vec![
            vec![json!(1), json!("child"), json!(2), json!("child")],
            vec![json!("total")],
        ]
    );
    assert_eq!(report.pages[0][2].rect.y, 15.0);
}

#[test]
fn test_band_taller_than_a_page_is_an_error() {
    init_logger();
    let def = small_page()
        .page_header(label_band(10.0, "H"))
        .detail(value_band(95.0, "number"))
        .build()
        .unwrap();
    let err = LayoutEngine::default().layout(&def, &numbers(1)).unwrap_err();
    match err {
        ReportError::Layout(LayoutError::BandTooLarge {
            band,
            record_index,
            available,
            ..
        }) => {
            assert_eq!(band, BandRole::Detail);
            assert_eq!(record_index, 0);
            assert_eq!(available, 90.0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_evaluation_failure_aborts_without_generator_calls() {
    init_logger();
    let def = small_page().detail(value_band(10.0, "n")).build().unwrap();
    let records = vec![json!({ "n": 1 }), json!({ "n": 2 }), json!({ "m": 3 })];
    let mut generator = RecordingGenerator::new();

    let err = LayoutEngine::default()
        .render(&def, &records, &mut generator)
        .unwrap_err();
    match err {
        ReportError::Evaluation(e) => {
            assert_eq!(e.record_index, 2);
            assert_eq!(e.band, BandRole::Detail);
            assert_eq!(e.expression, "n");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(generator.calls().is_empty());
}

#[test]
fn test_skip_policy_leaves_failing_elements_out() {
    init_logger();
    let def = small_page()
        .detail(
            value_band(10.0, "n").element(
                Element::label("x")
                    .at(100.0, 0.0)
                    .conditional_style(ConditionalStyle::new("missing.flag", Style::default()).unwrap()),
            ),
        )
        .build()
        .unwrap();
    let records = vec![json!({ "n": 1 }), json!({ "m": 2 })];
    let engine = LayoutEngine::new(LayoutConfig {
        evaluation_policy: EvaluationPolicy::SkipElement,
        ..Default::default()
    });

    let report = engine.layout(&def, &records).unwrap();
    assert_eq!(all_values(&report), vec![json!(1), json!("x"), json!("x")]);
}

#[test]
fn test_empty_record_set() {
    init_logger();
    let def = small_page()
        .page_header(label_band(10.0, "H"))
        .begin(label_band(10.0, "B"))
        .detail(value_band(10.0, "number"))
        .summary(label_band(10.0, "S"))
        .page_footer(label_band(10.0, "F"))
        .build()
        .unwrap();
    let no_records: Vec<Value> = Vec::new();

    let mut generator = RecordingGenerator::new();
    let calls = LayoutEngine::default()
        .render(&def, &no_records, &mut generator)
        .unwrap();
    assert_eq!(calls.len(), 2);
    assert!(matches!(calls[0], GeneratorCall::Begin(_)));
    assert_eq!(calls[1], GeneratorCall::End);

    let printed = folio_report::ReportBuilder::extending(&def)
        .print_if_empty(true)
        .build()
        .unwrap();
    let report = layout(&printed, &no_records);
    assert_eq!(
        page_values(&report),
        vec![vec![json!("H"), json!("B"), json!("S"), json!("F")]]
    );
}

#[test]
fn test_page_count_is_resolved_after_layout() {
    init_logger();
    let footer = BandDefinition::new(20.0)
        .element(Element::system_field(SystemSymbol::PageNumber).at(0.0, 0.0))
        .element(
            Element::system_field(SystemSymbol::PageCount)
                .at(100.0, 0.0)
                .width(Extent::Fixed(50.0)),
        );
    let def = small_page()
        .page_footer(footer)
        .detail(value_band(20.0, "number"))
        .build()
        .unwrap();

    let report = layout(&def, &numbers(12));
    let pages = page_values(&report);
    assert_eq!(pages.len(), 3);
    for (i, page) in pages.iter().enumerate() {
        assert_eq!(page[page.len() - 2..], [json!(i + 1), json!(3)]);
    }
}

#[test]
fn test_system_fields() {
    init_logger();
    let def = small_page()
        .title("Inventory")
        .author("Ops")
        .detail(
            BandDefinition::new(10.0)
                .element(Element::system_field(SystemSymbol::RecordIndex).width(Extent::Fixed(20.0)))
                .element(Element::object_value("$index").unwrap().at(20.0, 0.0).width(Extent::Fixed(20.0)))
                .element(Element::system_field(SystemSymbol::ReportTitle).at(40.0, 0.0).width(Extent::Fixed(20.0)))
                .element(Element::system_field(SystemSymbol::ReportAuthor).at(60.0, 0.0).width(Extent::Fixed(20.0)))
                .element(
                    Element::system_field(SystemSymbol::CurrentDate {
                        format: "%d/%m/%Y".into(),
                    })
                    .at(80.0, 0.0),
                ),
        )
        .build()
        .unwrap();
    let engine = LayoutEngine::new(LayoutConfig {
        render_time: NaiveDate::from_ymd_opt(2024, 5, 17).and_then(|d| d.and_hms_opt(9, 30, 0)),
        ..Default::default()
    });

    let report = engine.layout(&def, &numbers(2)).unwrap();
    assert_eq!(
        all_values(&report),
        vec![
            json!(1),
            json!(0),
            json!("Inventory"),
            json!("Ops"),
            json!("17/05/2024"),
            json!(2),
            json!(1),
            json!("Inventory"),
            json!("Ops"),
            json!("17/05/2024"),
        ]
    );
}

#[test]
fn test_conditional_styles_follow_the_record() {
    init_logger();
    let bold = Style {
        font_weight: Some(FontWeight::Bold),
        ..Default::default()
    };
    let def = small_page()
        .default_style(Style {
            font_size: Some(6.0),
            ..Default::default()
        })
        .detail(
            BandDefinition::new(10.0).element(
                Element::object_value("n")
                    .unwrap()
                    .conditional_style(ConditionalStyle::new("vip", bold).unwrap()),
            ),
        )
        .build()
        .unwrap();
    let records = vec![json!({ "n": 1, "vip": true }), json!({ "n": 2, "vip": false })];

    let report = layout(&def, &records);
    let first = &report.pages[0][0].style;
    let second = &report.pages[0][1].style;
    assert_eq!(first.font_weight, Some(FontWeight::Bold));
    assert_eq!(first.font_size, Some(6.0));
    assert_eq!(second.font_weight, None);
    assert_eq!(second.font_size, Some(6.0));
}

#[test]
fn test_subreport_rows_render_inline() {
    init_logger();
    let orders = ReportDefinition::builder()
        .begin(label_band(10.0, "Orders"))
        .detail(value_band(10.0, "id"))
        .build()
        .unwrap();
    let def = small_page()
        .detail(value_band(10.0, "name").subreport(SubReport::new(orders, "orders").unwrap()))
        .summary(label_band(10.0, "end"))
        .build()
        .unwrap();
    let records = vec![
        json!({ "name": "Acme", "orders": [{ "id": 1 }, { "id": 2 }] }),
        json!({ "name": "Beta", "orders": [] }),
    ];

    let report = layout(&def, &records);
    assert_eq!(
        all_values(&report),
        vec![
            json!("Acme"),
            json!("Orders"),
            json!(1),
            json!(2),
            json!("Beta"),
            json!("end"),
        ]
    );
    // Parent cursor continues after the rows.
    assert_eq!(report.pages[0][4].rect.y, 40.0);
}

#[test]
fn test_subreport_source_must_be_an_array() {
    init_logger();
    let rows = ReportDefinition::builder()
        .detail(value_band(10.0, "id"))
        .build()
        .unwrap();
    let def = small_page()
        .detail(value_band(10.0, "name").subreport(SubReport::new(rows, "orders").unwrap()))
        .build()
        .unwrap();
    let records = vec![json!({ "name": "Acme", "orders": "none" })];

    let err = LayoutEngine::default().layout(&def, &records).unwrap_err();
    assert!(matches!(
        err,
        ReportError::Layout(LayoutError::SubReportSource {
            record_index: 0,
            found: "a string",
            ..
        })
    ));
}

#[test]
fn test_page_bands_read_the_parent_record_while_subreport_rows_flow() {
    init_logger();
    let orders = ReportDefinition::builder()
        .detail(value_band(20.0, "id"))
        .build()
        .unwrap();
    let def = small_page()
        .page_header(value_band(20.0, "concat(name, '#', $index)"))
        .detail(value_band(20.0, "name").subreport(SubReport::new(orders, "orders").unwrap()))
        .build()
        .unwrap();
    let records = vec![json!({
        "name": "Acme",
        "orders": [{ "id": 1 }, { "id": 2 }, { "id": 3 }, { "id": 4 }, { "id": 5 }],
    })];

    let report = layout(&def, &records);
    assert_eq!(
        page_values(&report),
        vec![
            vec![json!("Acme#0"), json!("Acme"), json!(1), json!(2), json!(3)],
            vec![json!("Acme#0"), json!(4), json!(5)],
        ]
    );
}

#[test]
fn test_subreport_errors_name_the_anchoring_band_and_record() {
    init_logger();
    let broken = ReportDefinition::builder()
        .detail(value_band(10.0, "missing"))
        .build()
        .unwrap();
    let def = small_page()
        .begin(label_band(10.0, "start").subreport(SubReport::new(broken, "items").unwrap()))
        .detail(value_band(10.0, "name"))
        .build()
        .unwrap();
    let records = vec![json!({ "name": "a", "items": [{ "id": 1 }] })];

    match LayoutEngine::default().layout(&def, &records).unwrap_err() {
        ReportError::Evaluation(e) => {
            assert_eq!(e.band, BandRole::Begin);
            assert_eq!(e.record_index, 0);
            assert_eq!(e.expression, "missing");
        }
        other => panic!("unexpected error: {other}"),
    }

    let lines = ReportDefinition::builder()
        .detail(value_band(10.0, "id"))
        .build()
        .unwrap();
    let def = tall_page()
        .detail(value_band(10.0, "name"))
        .group(
            GroupDefinition::new("name")
                .unwrap()
                .header(label_band(10.0, "group").subreport(SubReport::new(lines, "items").unwrap())),
        )
        .build()
        .unwrap();
    let records = vec![
        json!({ "name": "a", "items": [{ "id": 1 }] }),
        json!({ "name": "b", "items": [{ "id": 2 }, { "other": 3 }] }),
    ];

    match LayoutEngine::default().layout(&def, &records).unwrap_err() {
        ReportError::Evaluation(e) => {
            assert_eq!(e.band, BandRole::GroupHeader(0));
            assert_eq!(e.record_index, 1);
            assert_eq!(e.expression, "id");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_layout_is_idempotent() {
    init_logger();
    let def = small_page()
        .page_header(label_band(10.0, "H"))
        .detail(value_band(20.0, "number"))
        .build()
        .unwrap();
    let records = numbers(9);
    let engine = LayoutEngine::default();

    let mut first = RecordingGenerator::new();
    let mut second = RecordingGenerator::new();
    let a = engine.render(&def, &records, &mut first).unwrap();
    let b = engine.render(&def, &records, &mut second).unwrap();
    assert_eq!(a, b);
    assert!(first.end().is_err());
}

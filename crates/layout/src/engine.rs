//! The band layout engine.
//!
//! A render pass walks the record set once, in order. For every record it
//! checks the group keys, opens and closes groups, then places the detail
//! band, breaking pages whenever the next band does not fit above the page
//! footer. The whole report is laid out into a [`LaidOutReport`] first; the
//! generator only sees it after layout succeeded.

use crate::algorithms::pagination::{EPSILON, check_band_fit};
use crate::config::{EvaluationPolicy, LayoutConfig};
use crate::context::{LayoutState, RenderContext};
use crate::error::{EvaluationError, LayoutError, ReportError};
use chrono::format::{Item, StrftimeItems};
use chrono::{Local, NaiveDateTime};
use folio_expr::{CompiledExpression, EvaluationContext, ExprError, FunctionRegistry, Record};
use folio_render_core::{ElementKind, Generator, LaidOutReport, PlacedElement, PlacedValue};
use folio_report::{
    BandDefinition, BandRole, Element, ElementContent, ReportDefinition, SubReport, SystemSymbol,
};
use folio_style::{Style, StyleChain};
use folio_types::Rect;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Lays out report definitions against record sets. Holds no per-render
/// state, so one engine can serve any number of renders, concurrently.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
    functions: Option<Arc<FunctionRegistry>>,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            functions: None,
        }
    }

    /// Uses `functions` instead of the built-in registry for expressions.
    pub fn with_functions(mut self, functions: FunctionRegistry) -> Self {
        self.functions = Some(Arc::new(functions));
        self
    }

    /// Replaces the configuration, keeping any custom functions.
    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    fn functions(&self) -> &FunctionRegistry {
        self.functions
            .as_deref()
            .unwrap_or_else(|| FunctionRegistry::builtins())
    }

    /// Lays out the whole report without touching any generator.
    pub fn layout<R: Record>(
        &self,
        definition: &ReportDefinition,
        records: &[R],
    ) -> Result<LaidOutReport, ReportError> {
        definition.validate()?;
        let started_at = self
            .config
            .render_time
            .unwrap_or_else(|| Local::now().naive_local());
        log::debug!(
            "Laying out report '{}' over {} record(s)",
            definition.title,
            records.len()
        );

        let mut pass = Pass {
            config: &self.config,
            functions: self.functions(),
            root: definition,
            content: definition.page_rect(),
            ctx: RenderContext::new(started_at, self.config.style_cache),
        };
        pass.run(records)?;

        let (hits, misses) = pass.ctx.styles.stats();
        let report = LaidOutReport {
            geometry: definition.page_geometry(),
            pages: pass.ctx.finished_pages,
        };
        log::debug!(
            "Laid out report '{}': {} page(s), {} element(s), style cache {} hit(s) / {} miss(es)",
            definition.title,
            report.page_count(),
            report.element_count(),
            hits,
            misses
        );
        Ok(report)
    }

    /// Lays out the report, then streams it into `generator`. On any layout
    /// error the generator receives no calls at all.
    pub fn render<R: Record, G: Generator + ?Sized>(
        &self,
        definition: &ReportDefinition,
        records: &[R],
        generator: &mut G,
    ) -> Result<G::Output, ReportError> {
        let laid_out = self.layout(definition, records)?;
        Ok(laid_out.emit(generator)?)
    }
}

/// What a band instance reads from: the current record and where it sits.
#[derive(Clone, Copy)]
struct Scope<'r> {
    record: &'r dyn Record,
    index: usize,
    count: usize,
    report: &'r ReportDefinition,
    chain: &'r StyleChain,
    /// The top-level record and band a sub-report row hangs off; `None` for
    /// rows of the top-level report itself.
    anchor: Option<Anchor<'r>>,
}

#[derive(Clone, Copy)]
struct Anchor<'r> {
    record: &'r dyn Record,
    index: usize,
    count: usize,
    role: BandRole,
}

impl<'r> Scope<'r> {
    /// Band role and record index reported in errors. Failures inside a
    /// sub-report point at the top-level band and record that anchor it.
    fn error_site(&self, role: BandRole) -> (BandRole, usize) {
        match &self.anchor {
            Some(anchor) => (anchor.role, anchor.index),
            None => (role, self.index),
        }
    }

    /// The anchor for sub-reports placed from a band of this scope.
    fn anchor_for(&self, role: BandRole) -> Anchor<'r> {
        self.anchor.unwrap_or(Anchor {
            record: self.record,
            index: self.index,
            count: self.count,
            role,
        })
    }

    /// The scope page bands are evaluated in: the top-level report and its
    /// current record, even while sub-report rows are flowing.
    fn page_scope(&self, root: &'r ReportDefinition) -> Scope<'r> {
        let (record, index, count) = match &self.anchor {
            Some(anchor) => (anchor.record, anchor.index, anchor.count),
            None => (self.record, self.index, self.count),
        };
        Scope {
            record,
            index,
            count,
            report: root,
            chain: &root.style_chain,
            anchor: None,
        }
    }
}

struct Pass<'a> {
    config: &'a LayoutConfig,
    functions: &'a FunctionRegistry,
    root: &'a ReportDefinition,
    content: Rect,
    ctx: RenderContext,
}

impl<'a> Pass<'a> {
    fn run<R: Record>(&mut self, records: &[R]) -> Result<(), ReportError> {
        let root = self.root;
        if records.is_empty() && !root.print_if_empty {
            log::debug!("No records and print_if_empty is off; the report has no pages");
            self.ctx.transition(LayoutState::End);
            return Ok(());
        }

        let empty = Value::Object(Map::new());
        let first: &dyn Record = records.first().map_or(&empty as &dyn Record, |r| r as &dyn Record);
        let last: &dyn Record = records.last().map_or(&empty as &dyn Record, |r| r as &dyn Record);
        let opening = Scope {
            record: first,
            index: 0,
            count: records.len(),
            report: root,
            chain: &root.style_chain,
            anchor: None,
        };
        let closing = Scope {
            record: last,
            index: records.len().saturating_sub(1),
            ..opening
        };

        self.ctx.transition(LayoutState::PageHeaderPending);
        self.open_page(&opening)?;
        self.flow_report(root, &root.style_chain, records, None)?;

        self.ctx.transition(LayoutState::Finalizing);
        self.close_page(&closing)?;
        self.ctx.transition(LayoutState::End);
        Ok(())
    }

    /// Begin band, groups and details, summary band. Shared by the top-level
    /// report and inline sub-reports.
    fn flow_report<R: Record>(
        &mut self,
        report: &ReportDefinition,
        chain: &StyleChain,
        records: &[R],
        anchor: Option<Anchor<'_>>,
    ) -> Result<(), ReportError> {
        let empty = Value::Object(Map::new());
        let count = records.len();
        let first: &dyn Record = records.first().map_or(&empty as &dyn Record, |r| r as &dyn Record);
        let last: &dyn Record = records.last().map_or(&empty as &dyn Record, |r| r as &dyn Record);

        if let Some(begin) = &report.bands.begin {
            let scope = Scope {
                record: first,
                index: 0,
                count,
                report,
                chain,
                anchor,
            };
            self.place_band(BandRole::Begin, begin, &scope)?;
        }

        self.ctx.group_keys.push(Vec::new());
        let flowed = self.flow_records(report, chain, records, anchor);
        self.ctx.group_keys.pop();
        flowed?;

        if let Some(summary) = &report.bands.summary {
            let scope = Scope {
                record: last,
                index: count.saturating_sub(1),
                count,
                report,
                chain,
                anchor,
            };
            self.place_band(BandRole::Summary, summary, &scope)?;
        }
        Ok(())
    }

    fn flow_records<R: Record>(
        &mut self,
        report: &ReportDefinition,
        chain: &StyleChain,
        records: &[R],
        anchor: Option<Anchor<'_>>,
    ) -> Result<(), ReportError> {
        let count = records.len();
        for (index, record) in records.iter().enumerate() {
            let scope = Scope {
                record,
                index,
                count,
                report,
                chain,
                anchor,
            };

            if !report.groups.is_empty() {
                self.ctx.transition(LayoutState::GroupBoundaryCheck);
                let keys = report
                    .groups
                    .iter()
                    .enumerate()
                    .map(|(level, group)| {
                        self.evaluate_group_key(&group.key, BandRole::GroupHeader(level), &scope)
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                let changed = match self.ctx.group_keys.last() {
                    Some(previous) if !previous.is_empty() => {
                        keys.iter().zip(previous).position(|(now, before)| now != before)
                    }
                    _ => Some(0),
                };

                if let Some(level) = changed {
                    if index > 0 {
                        let previous = Scope {
                            record: &records[index - 1],
                            index: index - 1,
                            ..scope
                        };
                        self.close_groups(report, level, &previous)?;
                    }
                    self.open_groups(report, level, &scope, index > 0)?;
                }
                if let Some(frame) = self.ctx.group_keys.last_mut() {
                    *frame = keys;
                }
            }

            self.ctx.transition(LayoutState::DetailIteration);
            if let Some(detail) = &report.bands.detail {
                self.place_band(BandRole::Detail, detail, &scope)?;
            }
        }

        match records.last() {
            Some(last) if !report.groups.is_empty() => {
                let scope = Scope {
                    record: last,
                    index: count - 1,
                    count,
                    report,
                    chain,
                    anchor,
                };
                self.close_groups(report, 0, &scope)
            }
            _ => Ok(()),
        }
    }

    /// Footers from the innermost level out to `level`.
    fn close_groups(
        &mut self,
        report: &ReportDefinition,
        level: usize,
        scope: &Scope,
    ) -> Result<(), ReportError> {
        for (l, group) in report.groups.iter().enumerate().skip(level).rev() {
            log::trace!("Closing group level {} after record #{}", l, scope.index);
            if let Some(footer) = &group.footer {
                self.place_band(BandRole::GroupFooter(l), footer, scope)?;
            }
        }
        Ok(())
    }

    /// Headers from `level` in to the innermost level.
    fn open_groups(
        &mut self,
        report: &ReportDefinition,
        level: usize,
        scope: &Scope,
        reopening: bool,
    ) -> Result<(), ReportError> {
        for (l, group) in report.groups.iter().enumerate().skip(level) {
            log::trace!("Opening group level {} at record #{}", l, scope.index);
            if group.force_new_page && reopening && self.ctx.page_has_body {
                self.break_page(scope)?;
            }
            if let Some(header) = &group.header {
                self.place_band(BandRole::GroupHeader(l), header, scope)?;
            }
        }
        Ok(())
    }

    fn place_band(
        &mut self,
        role: BandRole,
        band: &BandDefinition,
        scope: &Scope,
    ) -> Result<(), ReportError> {
        if !band.visible {
            return Ok(());
        }
        if band.force_new_page && self.ctx.page_has_body {
            self.break_page(scope)?;
        }
        self.ensure_room(role, band.height, scope)?;

        let y = self.ctx.cursor_y;
        self.instantiate(role, band, y, scope)?;
        self.ctx.cursor_y += band.height;
        self.ctx.page_has_body = true;

        for child in &band.child_bands {
            self.place_band(BandRole::Child, child, scope)?;
        }
        for subreport in &band.subreports {
            self.place_subreport(role, subreport, scope)?;
        }
        Ok(())
    }

    fn ensure_room(&mut self, role: BandRole, height: f32, scope: &Scope) -> Result<(), ReportError> {
        self.ctx.transition(LayoutState::PageBreakCheck);
        let available = self.ctx.body_bottom - self.ctx.body_top;
        if height > available + EPSILON {
            let (band, record_index) = scope.error_site(role);
            return Err(LayoutError::BandTooLarge {
                band,
                record_index,
                height,
                available,
            }
            .into());
        }
        let analysis = check_band_fit(self.ctx.cursor_y, height, self.ctx.body_bottom);
        if analysis.should_break {
            log::trace!(
                "{} band ({:.2}pt) does not fit in the {:.2}pt left on page {}",
                role,
                height,
                analysis.remaining_height,
                self.ctx.page_number
            );
            self.break_page(scope)?;
        }
        Ok(())
    }

    fn place_subreport(
        &mut self,
        role: BandRole,
        subreport: &SubReport,
        scope: &Scope,
    ) -> Result<(), ReportError> {
        let variables = self.variables(scope);
        let e_ctx = EvaluationContext::new(&variables, self.functions);
        let Some(source) = self.evaluate_element(&subreport.records, role, scope, &e_ctx)? else {
            return Ok(());
        };
        let rows = match source {
            Value::Array(rows) => rows,
            other => {
                let (_, record_index) = scope.error_site(role);
                return Err(LayoutError::SubReportSource {
                    expression: subreport.records.source().to_string(),
                    record_index,
                    found: value_kind(&other),
                }
                .into());
            }
        };

        let nested = &*subreport.report;
        log::trace!(
            "Sub-report '{}' for record #{} with {} row(s)",
            nested.title,
            scope.index,
            rows.len()
        );
        if rows.is_empty() && !nested.print_if_empty {
            return Ok(());
        }
        let chain = scope.chain.appended(&nested.style_chain);
        self.flow_report(nested, &chain, &rows, Some(scope.anchor_for(role)))
    }

    fn break_page(&mut self, scope: &Scope) -> Result<(), ReportError> {
        log::trace!(
            "Page break after page {} at record #{}",
            self.ctx.page_number,
            scope.index
        );
        self.close_page(scope)?;
        self.ctx.transition(LayoutState::PageHeaderPending);
        self.open_page(scope)
    }

    fn open_page(&mut self, scope: &Scope) -> Result<(), ReportError> {
        let root = self.root;
        let scope = scope.page_scope(root);
        self.ctx.page_number += 1;
        self.ctx.page_has_body = false;

        let mut header_height = 0.0;
        if let Some(header) = root.bands.get(BandRole::PageHeader) {
            header_height = self.place_fixed(BandRole::PageHeader, header, self.content.y, &scope)?;
        }
        let (_, footer_height) = root.bands.page_chrome_height();
        self.ctx.body_top = self.content.y + header_height;
        self.ctx.body_bottom = self.content.bottom() - footer_height;
        self.ctx.cursor_y = self.ctx.body_top;
        Ok(())
    }

    fn close_page(&mut self, scope: &Scope) -> Result<(), ReportError> {
        if !self.ctx.is_page_open() {
            return Ok(());
        }
        let root = self.root;
        let scope = scope.page_scope(root);
        if let Some(footer) = root.bands.get(BandRole::PageFooter) {
            let y = self.ctx.body_bottom;
            self.place_fixed(BandRole::PageFooter, footer, y, &scope)?;
        }
        self.ctx.finish_page();
        Ok(())
    }

    /// Places a page band and its children at `y` without pagination.
    /// Returns the height used.
    fn place_fixed(
        &mut self,
        role: BandRole,
        band: &BandDefinition,
        y: f32,
        scope: &Scope,
    ) -> Result<f32, ReportError> {
        if !band.visible {
            return Ok(0.0);
        }
        self.instantiate(role, band, y, scope)?;
        let mut height = band.height;
        for child in &band.child_bands {
            height += self.place_fixed(BandRole::Child, child, y + height, scope)?;
        }
        Ok(height)
    }

    /// Evaluates and styles every element of `band` and adds them to the open
    /// page with the band's top edge at `y`.
    fn instantiate(
        &mut self,
        role: BandRole,
        band: &BandDefinition,
        y: f32,
        scope: &Scope,
    ) -> Result<(), ReportError> {
        let band_width = band.resolved_width(self.content.width);
        let variables = self.variables(scope);
        let e_ctx = EvaluationContext::new(&variables, self.functions);

        for element in &band.elements {
            let Some((kind, value)) = self.element_value(role, element, scope, &e_ctx)? else {
                continue;
            };
            let conditional = self.matched_conditionals(role, element, scope, &e_ctx)?;
            let style = self.ctx.styles.resolve(
                scope.chain,
                &band.default_style,
                &element.style,
                &conditional,
            );
            let rect = Rect::new(
                self.content.x + element.x,
                y + element.y,
                element.width.resolve(element.x, band_width),
                element.height.resolve(element.y, band.height),
            );
            self.ctx.current_page.push(PlacedElement {
                kind,
                style,
                rect,
                value,
            });
        }
        Ok(())
    }

    fn element_value(
        &self,
        role: BandRole,
        element: &Element,
        scope: &Scope,
        e_ctx: &EvaluationContext,
    ) -> Result<Option<(ElementKind, PlacedValue)>, ReportError> {
        let placed = match &element.content {
            ElementContent::Label { text } => Some((
                ElementKind::Label,
                PlacedValue::Resolved(Value::String(text.clone())),
            )),
            ElementContent::ObjectValue { expression } => self
                .evaluate_element(expression, role, scope, e_ctx)?
                .map(|value| (ElementKind::ObjectValue, PlacedValue::Resolved(value))),
            ElementContent::SystemField { field } => self
                .system_value(field, role, scope)?
                .map(|value| (ElementKind::SystemField, value)),
        };
        Ok(placed)
    }

    fn system_value(
        &self,
        field: &SystemSymbol,
        role: BandRole,
        scope: &Scope,
    ) -> Result<Option<PlacedValue>, ReportError> {
        let value = match field {
            SystemSymbol::PageNumber => Value::from(self.ctx.page_number),
            SystemSymbol::PageCount => return Ok(Some(PlacedValue::PageCount)),
            SystemSymbol::ReportTitle => Value::from(scope.report.title.as_str()),
            SystemSymbol::ReportAuthor => Value::from(scope.report.author.as_str()),
            SystemSymbol::RecordIndex => Value::from(scope.index + 1),
            SystemSymbol::CurrentDate { format } => {
                match format_date(&self.ctx.started_at, format) {
                    Ok(date) => Value::from(date),
                    Err(source) => {
                        let (band, record_index) = scope.error_site(role);
                        let error = EvaluationError {
                            expression: format.clone(),
                            record_index,
                            band,
                            source,
                        };
                        return self.apply_policy(error);
                    }
                }
            }
        };
        Ok(Some(PlacedValue::Resolved(value)))
    }

    fn matched_conditionals<'e>(
        &self,
        role: BandRole,
        element: &'e Element,
        scope: &Scope,
        e_ctx: &EvaluationContext,
    ) -> Result<Vec<&'e Style>, ReportError> {
        let mut matched = Vec::new();
        for conditional in &element.conditional_styles {
            match conditional.when.evaluate_as_bool(scope.record, e_ctx) {
                Ok(true) => matched.push(&conditional.style),
                Ok(false) => {}
                Err(source) => {
                    self.apply_policy::<()>(evaluation_error(&conditional.when, role, scope, source))?;
                }
            }
        }
        Ok(matched)
    }

    fn evaluate_element(
        &self,
        expression: &CompiledExpression,
        role: BandRole,
        scope: &Scope,
        e_ctx: &EvaluationContext,
    ) -> Result<Option<Value>, ReportError> {
        match expression.evaluate(scope.record, e_ctx) {
            Ok(value) => Ok(Some(value)),
            Err(source) => self.apply_policy(evaluation_error(expression, role, scope, source)),
        }
    }

    /// Group keys decide the structure of the report, so they always abort.
    fn evaluate_group_key(
        &self,
        key: &CompiledExpression,
        role: BandRole,
        scope: &Scope,
    ) -> Result<Value, ReportError> {
        let variables = self.variables(scope);
        let e_ctx = EvaluationContext::new(&variables, self.functions);
        key.evaluate(scope.record, &e_ctx)
            .map_err(|source| evaluation_error(key, role, scope, source).into())
    }

    fn apply_policy<T>(&self, error: EvaluationError) -> Result<Option<T>, ReportError> {
        match self.config.evaluation_policy {
            EvaluationPolicy::Abort => Err(error.into()),
            EvaluationPolicy::SkipElement => {
                log::warn!("Skipping element: {}", error);
                Ok(None)
            }
        }
    }

    fn variables(&self, scope: &Scope) -> HashMap<String, Value> {
        HashMap::from([
            ("index".to_string(), Value::from(scope.index)),
            ("record_count".to_string(), Value::from(scope.count)),
            ("page_number".to_string(), Value::from(self.ctx.page_number)),
            (
                "report_title".to_string(),
                Value::from(scope.report.title.as_str()),
            ),
        ])
    }
}

fn evaluation_error(
    expression: &CompiledExpression,
    role: BandRole,
    scope: &Scope,
    source: ExprError,
) -> EvaluationError {
    let (band, record_index) = scope.error_site(role);
    EvaluationError {
        expression: expression.source().to_string(),
        record_index,
        band,
        source,
    }
}

fn format_date(at: &NaiveDateTime, format: &str) -> Result<String, ExprError> {
    let items: Vec<Item> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(ExprError::Function {
            function: "currentDate".to_string(),
            message: format!("invalid date format '{}'", format),
        });
    }
    Ok(at.format_with_items(items.iter()).to_string())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

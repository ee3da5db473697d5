use crate::error::GeneratorError;
use crate::traits::Generator;
use folio_style::{EffectiveStyle, PageGeometry};
use folio_types::Rect;
use serde_json::Value;
use std::sync::Arc;

/// The kind of primitive handed to a generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Label,
    ObjectValue,
    SystemField,
}

/// A value that may only be known once the whole report has been laid out.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacedValue {
    Resolved(Value),
    PageCount,
}

impl PlacedValue {
    pub fn resolve(&self, page_count: usize) -> Value {
        match self {
            PlacedValue::Resolved(v) => v.clone(),
            PlacedValue::PageCount => Value::from(page_count),
        }
    }
}

/// An element with its final page position, style and value.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedElement {
    pub kind: ElementKind,
    pub style: Arc<EffectiveStyle>,
    pub rect: Rect,
    pub value: PlacedValue,
}

/// The complete result of laying out one report: every page with its
/// positioned elements, ready to be streamed into any [`Generator`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LaidOutReport {
    pub geometry: PageGeometry,
    /// Pages of positioned elements, each sorted top-to-bottom then
    /// left-to-right.
    pub pages: Vec<Vec<PlacedElement>>,
}

impl LaidOutReport {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn element_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    /// Streams the report into `generator` and returns its output.
    pub fn emit<G: Generator + ?Sized>(&self, generator: &mut G) -> Result<G::Output, GeneratorError> {
        let page_count = self.page_count();
        log::debug!(
            "Emitting {} page(s), {} element(s)",
            page_count,
            self.element_count()
        );
        generator.begin(&self.geometry)?;
        for page in &self.pages {
            generator.new_page()?;
            for el in page {
                let value = el.value.resolve(page_count);
                generator.place_element(el.kind, &el.style, el.rect, &value)?;
            }
        }
        generator.end()
    }
}

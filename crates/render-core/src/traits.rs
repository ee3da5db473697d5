use crate::error::GeneratorError;
use crate::types::ElementKind;
use folio_style::{EffectiveStyle, PageGeometry};
use folio_types::Rect;
use serde_json::Value;

/// The sink a laid-out report is streamed into.
///
/// Calls arrive in a fixed order: `begin` once, then for every page a
/// `new_page` followed by that page's elements top-to-bottom and
/// left-to-right, then `end` once. A report with no pages gets only `begin`
/// and `end`. Rectangles are in points with the origin at the top-left
/// corner of the sheet.
pub trait Generator {
    type Output;

    fn begin(&mut self, geometry: &PageGeometry) -> Result<(), GeneratorError>;

    fn place_element(
        &mut self,
        kind: ElementKind,
        style: &EffectiveStyle,
        rect: Rect,
        value: &Value,
    ) -> Result<(), GeneratorError>;

    fn new_page(&mut self) -> Result<(), GeneratorError>;

    fn end(&mut self) -> Result<Self::Output, GeneratorError>;
}

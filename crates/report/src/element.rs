use crate::error::DefinitionError;
use folio_expr::CompiledExpression;
use folio_style::{Style, parsers};
use serde::{Deserialize, Deserializer, de};

/// A value supplied by the rendering process rather than by the record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SystemSymbol {
    PageNumber,
    /// Only known once the whole report is laid out.
    PageCount,
    ReportTitle,
    ReportAuthor,
    /// The render time, formatted with a `strftime` pattern.
    CurrentDate {
        #[serde(default = "default_date_format")]
        format: String,
    },
    /// 1-based position of the current record in its record set.
    RecordIndex,
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

/// What an element displays.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ElementContent {
    Label { text: String },
    ObjectValue { expression: CompiledExpression },
    SystemField { field: SystemSymbol },
}

impl ElementContent {
    pub fn name(&self) -> &'static str {
        match self {
            ElementContent::Label { .. } => "label",
            ElementContent::ObjectValue { .. } => "object value",
            ElementContent::SystemField { .. } => "system field",
        }
    }
}

/// A width or height. `Auto` extends to the band edge from the element's
/// offset, `Band` takes the whole band dimension.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Extent {
    #[default]
    Auto,
    Band,
    Fixed(f32),
}

impl Extent {
    pub fn resolve(&self, offset: f32, band_extent: f32) -> f32 {
        match self {
            Extent::Auto => (band_extent - offset).max(0.0),
            Extent::Band => band_extent,
            Extent::Fixed(v) => *v,
        }
    }
}

impl<'de> Deserialize<'de> for Extent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ExtentDef {
            Points(f32),
            Text(String),
        }

        match ExtentDef::deserialize(deserializer)? {
            ExtentDef::Points(v) => Ok(Extent::Fixed(v)),
            ExtentDef::Text(s) => match s.trim() {
                "auto" => Ok(Extent::Auto),
                "band" => Ok(Extent::Band),
                other => parsers::parse_length(other)
                    .map(Extent::Fixed)
                    .map_err(de::Error::custom),
            },
        }
    }
}

/// A style applied on top of the element style when `when` is truthy for the
/// current record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionalStyle {
    pub when: CompiledExpression,
    pub style: Style,
}

impl ConditionalStyle {
    pub fn new(when: &str, style: Style) -> Result<Self, DefinitionError> {
        Ok(Self {
            when: CompiledExpression::parse(when)?,
            style,
        })
    }
}

/// A positioned item inside a band. Coordinates are relative to the band's
/// top-left corner.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    #[serde(flatten)]
    pub content: ElementContent,
    #[serde(default, deserialize_with = "parsers::deserialize_length")]
    pub x: f32,
    #[serde(default, deserialize_with = "parsers::deserialize_length")]
    pub y: f32,
    #[serde(default)]
    pub width: Extent,
    #[serde(default)]
    pub height: Extent,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub conditional_styles: Vec<ConditionalStyle>,
}

impl Element {
    fn with_content(content: ElementContent) -> Self {
        Self {
            content,
            x: 0.0,
            y: 0.0,
            width: Extent::Auto,
            height: Extent::Auto,
            style: Style::default(),
            conditional_styles: Vec::new(),
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self::with_content(ElementContent::Label { text: text.into() })
    }

    pub fn object_value(expression: &str) -> Result<Self, DefinitionError> {
        Ok(Self::with_content(ElementContent::ObjectValue {
            expression: CompiledExpression::parse(expression)?,
        }))
    }

    pub fn system_field(field: SystemSymbol) -> Self {
        Self::with_content(ElementContent::SystemField { field })
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = Extent::Fixed(width);
        self.height = Extent::Fixed(height);
        self
    }

    pub fn width(mut self, width: Extent) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: Extent) -> Self {
        self.height = height;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn conditional_style(mut self, conditional: ConditionalStyle) -> Self {
        self.conditional_styles.push(conditional);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_style::FontWeight;

    #[test]
    fn extent_resolution() {
        assert_eq!(Extent::Auto.resolve(10.0, 50.0), 40.0);
        assert_eq!(Extent::Auto.resolve(60.0, 50.0), 0.0);
        assert_eq!(Extent::Band.resolve(10.0, 50.0), 50.0);
        assert_eq!(Extent::Fixed(12.0).resolve(10.0, 50.0), 12.0);
    }

    #[test]
    fn builds_elements() {
        let el = Element::object_value("customer.name")
            .unwrap()
            .at(5.0, 2.0)
            .size(100.0, 12.0)
            .conditional_style(
                ConditionalStyle::new(
                    "vip",
                    Style {
                        font_weight: Some(FontWeight::Bold),
                        ..Default::default()
                    },
                )
                .unwrap(),
            );
        assert_eq!(el.content.name(), "object value");
        assert_eq!(el.width, Extent::Fixed(100.0));
        assert_eq!(el.conditional_styles.len(), 1);
        assert!(Element::object_value("a..b").is_err());
    }

    #[test]
    fn deserializes_tagged_elements() {
        let el: Element = serde_json::from_str(
            r#"{ "type": "objectValue", "expression": "number", "x": "1cm", "width": "band" }"#,
        )
        .unwrap();
        assert!(matches!(el.content, ElementContent::ObjectValue { .. }));
        assert!((el.x - 28.3465).abs() < 0.01);
        assert_eq!(el.width, Extent::Band);
        assert_eq!(el.height, Extent::Auto);

        let el: Element = serde_json::from_str(
            r#"{ "type": "systemField", "field": { "currentDate": {} } }"#,
        )
        .unwrap();
        assert_eq!(
            el.content,
            ElementContent::SystemField {
                field: SystemSymbol::CurrentDate {
                    format: "%Y-%m-%d".into()
                }
            }
        );

        let el: Element =
            serde_json::from_str(r#"{ "type": "systemField", "field": "pageCount" }"#).unwrap();
        assert_eq!(
            el.content,
            ElementContent::SystemField {
                field: SystemSymbol::PageCount
            }
        );
    }
}

//! Page size, margins and the derived printable area.

use crate::parsers;
use folio_types::{Rect, Size};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::hash::{Hash, Hasher};

#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Hash for Margins {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.top.to_bits().hash(state);
        self.right.to_bits().hash(state);
        self.bottom.to_bits().hash(state);
        self.left.to_bits().hash(state);
    }
}

impl Eq for Margins {}

impl Margins {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl<'de> Deserialize<'de> for Margins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct MarginsMap {
            #[serde(default, deserialize_with = "parsers::deserialize_opt_length")]
            top: Option<f32>,
            #[serde(default, deserialize_with = "parsers::deserialize_opt_length")]
            right: Option<f32>,
            #[serde(default, deserialize_with = "parsers::deserialize_opt_length")]
            bottom: Option<f32>,
            #[serde(default, deserialize_with = "parsers::deserialize_opt_length")]
            left: Option<f32>,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum MarginsDef {
            Points(f32),
            Shorthand(String),
            Map(MarginsMap),
        }

        match MarginsDef::deserialize(deserializer)? {
            MarginsDef::Points(v) => Ok(Margins::all(v)),
            MarginsDef::Shorthand(s) => parsers::parse_margins(&s).map_err(de::Error::custom),
            MarginsDef::Map(m) => Ok(Margins::new(
                m.top.unwrap_or_default(),
                m.right.unwrap_or_default(),
                m.bottom.unwrap_or_default(),
                m.left.unwrap_or_default(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom { width: f32, height: f32 },
}

impl PageSize {
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }

    pub fn size(&self) -> Size {
        let (width, height) = self.dimensions_pt();
        Size::new(width, height)
    }

    /// The same sheet rotated a quarter turn.
    pub fn landscape(&self) -> PageSize {
        let (width, height) = self.dimensions_pt();
        PageSize::Custom {
            width: height,
            height: width,
        }
    }

    fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "a4" => Ok(PageSize::A4),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            _ => Err(format!("Unknown page size: {}", s)),
        }
    }
}

impl Eq for PageSize {}

impl Hash for PageSize {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (width, height) = self.dimensions_pt();
        width.to_bits().hash(state);
        height.to_bits().hash(state);
    }
}

impl Serialize for PageSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        match self {
            PageSize::A4 => serializer.serialize_str("A4"),
            PageSize::Letter => serializer.serialize_str("Letter"),
            PageSize::Legal => serializer.serialize_str("Legal"),
            PageSize::Custom { width, height } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("width", width)?;
                map.serialize_entry("height", height)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct CustomDef {
            #[serde(deserialize_with = "parsers::deserialize_length")]
            width: f32,
            #[serde(deserialize_with = "parsers::deserialize_length")]
            height: f32,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PageSizeDef {
            Named(String),
            Custom(CustomDef),
        }

        match PageSizeDef::deserialize(deserializer)? {
            PageSizeDef::Named(s) => Self::parse(&s).map_err(de::Error::custom),
            PageSizeDef::Custom(c) => Ok(PageSize::Custom {
                width: c.width,
                height: c.height,
            }),
        }
    }
}

/// Sheet size plus margins: everything a generator needs to set up a page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageGeometry {
    pub size: Size,
    pub margins: Margins,
}

impl PageGeometry {
    pub fn new(page_size: PageSize, margins: Margins) -> Self {
        Self {
            size: page_size.size(),
            margins,
        }
    }

    /// The printable area inside the margins.
    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.margins.left,
            self.margins.top,
            (self.size.width - self.margins.horizontal()).max(0.0),
            (self.size.height - self.margins.vertical()).max(0.0),
        )
    }

    pub fn content_width(&self) -> f32 {
        self.content_rect().width
    }

    pub fn content_height(&self) -> f32 {
        self.content_rect().height
    }
}

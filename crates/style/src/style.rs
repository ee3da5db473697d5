//! The style mapping shared by reports, bands and elements.
//!
//! Every property is optional: an unset property means "inherit from the
//! next less specific level", and if no level sets it the generator falls
//! back to its own default.

use crate::border::Border;
use crate::font::{FontStyle, FontWeight};
use crate::page::Margins;
use crate::parsers;
use crate::text::{TextAlign, TextDecoration};
use folio_types::Color;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

#[derive(Deserialize, Serialize, Default, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Style {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "parsers::deserialize_opt_length"
    )]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "parsers::deserialize_opt_length"
    )]
    pub leading: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Margins>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_wrap: Option<bool>,
}

impl Eq for Style {}

impl Hash for Style {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.font_name.hash(state);
        self.font_size.map(f32::to_bits).hash(state);
        self.font_weight.hash(state);
        self.font_style.hash(state);
        self.leading.map(f32::to_bits).hash(state);
        self.alignment.hash(state);
        self.text_decoration.hash(state);
        self.text_color.hash(state);
        self.background_color.hash(state);
        self.border.hash(state);
        self.padding.hash(state);
        self.word_wrap.hash(state);
    }
}

impl Style {
    /// Overlays every property set in `other` onto `self`. Properties that
    /// `other` leaves unset keep their current value.
    pub fn merge(&mut self, other: &Style) {
        if other.font_name.is_some() { self.font_name = other.font_name.clone(); }
        if other.font_size.is_some() { self.font_size = other.font_size; }
        if other.font_weight.is_some() { self.font_weight = other.font_weight; }
        if other.font_style.is_some() { self.font_style = other.font_style; }
        if other.leading.is_some() { self.leading = other.leading; }
        if other.alignment.is_some() { self.alignment = other.alignment; }
        if other.text_decoration.is_some() { self.text_decoration = other.text_decoration; }
        if other.text_color.is_some() { self.text_color = other.text_color.clone(); }
        if other.background_color.is_some() { self.background_color = other.background_color.clone(); }
        if other.border.is_some() { self.border = other.border.clone(); }
        if other.padding.is_some() { self.padding = other.padding; }
        if other.word_wrap.is_some() { self.word_wrap = other.word_wrap; }
    }

    /// Returns a copy of `self` with `other` merged on top.
    pub fn merged_with(&self, other: &Style) -> Style {
        let mut merged = self.clone();
        merged.merge(other);
        merged
    }

    pub fn is_empty(&self) -> bool {
        self == &Style::default()
    }

    /// Names (in their serialized, camelCase form) of the properties that are set.
    pub fn property_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.font_name.is_some() { names.push("fontName"); }
        if self.font_size.is_some() { names.push("fontSize"); }
        if self.font_weight.is_some() { names.push("fontWeight"); }
        if self.font_style.is_some() { names.push("fontStyle"); }
        if self.leading.is_some() { names.push("leading"); }
        if self.alignment.is_some() { names.push("alignment"); }
        if self.text_decoration.is_some() { names.push("textDecoration"); }
        if self.text_color.is_some() { names.push("textColor"); }
        if self.background_color.is_some() { names.push("backgroundColor"); }
        if self.border.is_some() { names.push("border"); }
        if self.padding.is_some() { names.push("padding"); }
        if self.word_wrap.is_some() { names.push("wordWrap"); }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_key_by_key() {
        let mut base = Style {
            font_name: Some("Helvetica".into()),
            font_size: Some(10.0),
            ..Default::default()
        };
        base.merge(&Style {
            font_size: Some(6.0),
            alignment: Some(TextAlign::Right),
            ..Default::default()
        });

        assert_eq!(base.font_name.as_deref(), Some("Helvetica"));
        assert_eq!(base.font_size, Some(6.0));
        assert_eq!(base.alignment, Some(TextAlign::Right));
    }

    #[test]
    fn empty_overlay_changes_nothing() {
        let base = Style {
            text_color: Some(Color::rgb(1, 2, 3)),
            ..Default::default()
        };
        assert_eq!(base.merged_with(&Style::default()), base);
        assert!(Style::default().is_empty());
        assert!(!base.is_empty());
    }

    #[test]
    fn deserializes_camel_case_properties() {
        let style: Style = serde_json::from_str(
            r#"{"fontName": "Helvetica", "fontSize": "6pt", "alignment": "right"}"#,
        )
        .unwrap();
        assert_eq!(style.font_name.as_deref(), Some("Helvetica"));
        assert_eq!(style.font_size, Some(6.0));
        assert_eq!(style.property_names(), vec!["fontName", "fontSize", "alignment"]);

        assert!(serde_json::from_str::<Style>(r##"{"fontColour": "#000"}"##).is_err());
    }
}

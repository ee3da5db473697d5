//! A generator that records every call it receives.
use crate::error::GeneratorError;
use crate::traits::Generator;
use crate::types::ElementKind;
use folio_style::{EffectiveStyle, PageGeometry};
use folio_types::Rect;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorCall {
    Begin(PageGeometry),
    PlaceElement {
        kind: ElementKind,
        style: EffectiveStyle,
        rect: Rect,
        value: Value,
    },
    NewPage,
    End,
}

/// Captures the call stream. The output of `end` is the full list of calls,
/// which makes two renders directly comparable.
#[derive(Debug, Default)]
pub struct RecordingGenerator {
    calls: Vec<GeneratorCall>,
    began: bool,
    page_open: bool,
}

impl RecordingGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[GeneratorCall] {
        &self.calls
    }
}

impl Generator for RecordingGenerator {
    type Output = Vec<GeneratorCall>;

    fn begin(&mut self, geometry: &PageGeometry) -> Result<(), GeneratorError> {
        if self.began {
            return Err(GeneratorError::Protocol("begin called twice".into()));
        }
        self.began = true;
        self.calls.push(GeneratorCall::Begin(*geometry));
        Ok(())
    }

    fn place_element(
        &mut self,
        kind: ElementKind,
        style: &EffectiveStyle,
        rect: Rect,
        value: &Value,
    ) -> Result<(), GeneratorError> {
        if !self.page_open {
            return Err(GeneratorError::Protocol(
                "element placed before the first page".into(),
            ));
        }
        self.calls.push(GeneratorCall::PlaceElement {
            kind,
            style: style.clone(),
            rect,
            value: value.clone(),
        });
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), GeneratorError> {
        if !self.began {
            return Err(GeneratorError::Protocol("new_page before begin".into()));
        }
        self.page_open = true;
        self.calls.push(GeneratorCall::NewPage);
        Ok(())
    }

    fn end(&mut self) -> Result<Self::Output, GeneratorError> {
        if !self.began {
            return Err(GeneratorError::Protocol("end before begin".into()));
        }
        self.calls.push(GeneratorCall::End);
        self.began = false;
        self.page_open = false;
        Ok(std::mem::take(&mut self.calls))
    }
}

/// Helpers for inspecting a recorded call stream.
pub trait CallsExt {
    fn page_count(&self) -> usize;
    /// Values placed on each page, in order.
    fn values_by_page(&self) -> Vec<Vec<Value>>;
}

impl CallsExt for [GeneratorCall] {
    fn page_count(&self) -> usize {
        self.iter().filter(|c| matches!(c, GeneratorCall::NewPage)).count()
    }

    fn values_by_page(&self) -> Vec<Vec<Value>> {
        let mut pages: Vec<Vec<Value>> = Vec::new();
        for call in self {
            match call {
                GeneratorCall::NewPage => pages.push(Vec::new()),
                GeneratorCall::PlaceElement { value, .. } => {
                    if let Some(page) = pages.last_mut() {
                        page.push(value.clone());
                    }
                }
                _ => {}
            }
        }
        pages
    }
}

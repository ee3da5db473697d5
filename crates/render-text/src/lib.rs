//! A generator that draws pages as plain text.
//!
//! Each page becomes a grid of characters; a point position maps to a cell
//! by dividing by the cell size. Pages are separated by a form feed. Useful
//! for terminals, logs and golden-file tests.

use folio_expr::to_display_string;
use folio_render_core::utils::aligned_x;
use folio_render_core::{ElementKind, Generator, GeneratorError};
use folio_style::{EffectiveStyle, PageGeometry};
use folio_types::Rect;
use itertools::Itertools;
use serde_json::Value;

/// Cell size in points. The defaults roughly match a 10pt monospaced font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextGridConfig {
    pub cell_width: f32,
    pub cell_height: f32,
}

impl Default for TextGridConfig {
    fn default() -> Self {
        Self {
            cell_width: 6.0,
            cell_height: 12.0,
        }
    }
}

#[derive(Debug, Default)]
pub struct TextGenerator {
    config: TextGridConfig,
    columns: usize,
    rows: usize,
    pages: Vec<Vec<Vec<char>>>,
}

impl TextGenerator {
    pub fn new() -> Self {
        Self::with_config(TextGridConfig::default())
    }

    pub fn with_config(config: TextGridConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    fn cell(&self, points: f32, cell: f32) -> usize {
        (points / cell).floor().max(0.0) as usize
    }

    fn write(&mut self, rect: Rect, text: &str, style: &EffectiveStyle) -> Result<(), GeneratorError> {
        let cell_width = self.config.cell_width;
        let text_width = text.chars().count() as f32 * cell_width;
        let x = aligned_x(style.alignment.unwrap_or_default(), text_width, &rect);

        let row = self.cell(rect.y, self.config.cell_height);
        let first_col = self.cell(x, cell_width);
        let last_col = self.cell(rect.right(), cell_width).min(self.columns);
        let page = self
            .pages
            .last_mut()
            .ok_or_else(|| GeneratorError::Protocol("element placed before the first page".into()))?;
        let Some(line) = page.get_mut(row) else {
            log::trace!("Text '{}' at row {} falls below the grid", text, row);
            return Ok(());
        };
        for (col, ch) in (first_col..last_col).zip(text.chars()) {
            line[col] = ch;
        }
        Ok(())
    }
}

impl Generator for TextGenerator {
    type Output = String;

    fn begin(&mut self, geometry: &PageGeometry) -> Result<(), GeneratorError> {
        self.columns = self.cell(geometry.size.width, self.config.cell_width);
        self.rows = self.cell(geometry.size.height, self.config.cell_height);
        self.pages.clear();
        log::debug!("Text grid is {}x{} cells", self.columns, self.rows);
        Ok(())
    }

    fn place_element(
        &mut self,
        _kind: ElementKind,
        style: &EffectiveStyle,
        rect: Rect,
        value: &Value,
    ) -> Result<(), GeneratorError> {
        let text = to_display_string(value);
        self.write(rect, &text, style)
    }

    fn new_page(&mut self) -> Result<(), GeneratorError> {
        self.pages.push(vec![vec![' '; self.columns]; self.rows]);
        Ok(())
    }

    fn end(&mut self) -> Result<Self::Output, GeneratorError> {
        let pages = std::mem::take(&mut self.pages);
        Ok(pages
            .iter()
            .map(|page| {
                let lines: Vec<String> = page
                    .iter()
                    .map(|line| line.iter().collect::<String>().trim_end().to_string())
                    .collect();
                let used = lines.iter().rposition(|l| !l.is_empty()).map_or(0, |i| i + 1);
                lines[..used].iter().join("\n")
            })
            .join("\n\u{c}\n"))
    }
}

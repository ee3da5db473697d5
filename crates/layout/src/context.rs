use crate::style::StyleResolver;
use chrono::NaiveDateTime;
use folio_render_core::PlacedElement;
use serde_json::Value;
use std::fmt;

/// Phases of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    Start,
    PageHeaderPending,
    DetailIteration,
    GroupBoundaryCheck,
    PageBreakCheck,
    Finalizing,
    End,
}

impl fmt::Display for LayoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Mutable state of one render pass. Created when the pass starts and
/// dropped when it ends; nothing in it outlives the render.
#[derive(Debug)]
pub struct RenderContext {
    state: LayoutState,
    /// 1-based number of the open page; 0 before the first page opens.
    pub page_number: usize,
    /// Absolute Y where the next band goes.
    pub cursor_y: f32,
    /// First Y below the page header.
    pub body_top: f32,
    /// Last Y above the page footer.
    pub body_bottom: f32,
    /// Whether anything besides the page header was placed on the open page.
    pub page_has_body: bool,
    /// Current key value per group level, one frame per nested report.
    pub group_keys: Vec<Vec<Value>>,
    pub styles: StyleResolver,
    pub started_at: NaiveDateTime,
    pub finished_pages: Vec<Vec<PlacedElement>>,
    pub current_page: Vec<PlacedElement>,
}

impl RenderContext {
    pub fn new(started_at: NaiveDateTime, style_cache: bool) -> Self {
        Self {
            state: LayoutState::Start,
            page_number: 0,
            cursor_y: 0.0,
            body_top: 0.0,
            body_bottom: 0.0,
            page_has_body: false,
            group_keys: Vec::new(),
            styles: StyleResolver::new(style_cache),
            started_at,
            finished_pages: Vec::new(),
            current_page: Vec::new(),
        }
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    pub fn transition(&mut self, next: LayoutState) {
        if self.state != next {
            log::trace!("Layout state {} -> {} (page {})", self.state, next, self.page_number);
            self.state = next;
        }
    }

    pub fn is_page_open(&self) -> bool {
        self.page_number > self.finished_pages.len()
    }

    /// Room left on the open page for body bands.
    pub fn remaining_height(&self) -> f32 {
        (self.body_bottom - self.cursor_y).max(0.0)
    }

    /// Moves the open page into the finished list, sorted top-to-bottom then
    /// left-to-right.
    pub fn finish_page(&mut self) {
        let mut page = std::mem::take(&mut self.current_page);
        page.sort_by(|a, b| {
            a.rect
                .y
                .total_cmp(&b.rect.y)
                .then(a.rect.x.total_cmp(&b.rect.x))
        });
        self.finished_pages.push(page);
    }
}

use chrono::NaiveDateTime;

/// What to do when an element's expression cannot be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaluationPolicy {
    /// Abort the whole render with an `EvaluationError`.
    #[default]
    Abort,
    /// Log a warning and leave the element (or conditional style) out.
    SkipElement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    pub evaluation_policy: EvaluationPolicy,
    /// Reuse resolved styles within a render pass.
    ///
    /// Styles are keyed by a hash of every input to the cascade, so turning
    /// this off only changes speed, never output. Defaults to `true`.
    pub style_cache: bool,
    /// Timestamp used by `CurrentDate` system fields. `None` uses the local
    /// time when the render starts; set it for reproducible output.
    pub render_time: Option<NaiveDateTime>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            evaluation_policy: EvaluationPolicy::Abort,
            style_cache: true,
            render_time: None,
        }
    }
}

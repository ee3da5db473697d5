//! Band layout and pagination.
//!
//! [`LayoutEngine`] turns a [`folio_report::ReportDefinition`] and a record
//! set into a [`folio_render_core::LaidOutReport`], resolving expressions and
//! styles along the way, and can stream the result into any
//! [`folio_render_core::Generator`].

pub mod algorithms;
pub mod config;
pub mod context;
pub(crate) mod engine;
pub mod error;
pub mod style;

pub use self::config::{EvaluationPolicy, LayoutConfig};
pub use self::context::{LayoutState, RenderContext};
pub use self::engine::LayoutEngine;
pub use self::error::{EvaluationError, LayoutError, ReportError};
pub use self::style::{StyleResolver, compute_style};

#[cfg(test)]
mod engine_test;
#[cfg(test)]
mod test_utils;

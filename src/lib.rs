//! folio renders record sets through declarative, band-based report
//! definitions.
//!
//! A [`ReportDefinition`] describes bands of positioned elements, grouping
//! levels and nested sub-reports, with default styles cascading down an
//! explicit [`StyleChain`]. A [`Report`] binds a definition to records and
//! hands the laid-out pages to any [`Generator`].
//!
//! ```ignore
//! use folio::{BandDefinition, Element, Report, ReportDefinition, TextGenerator};
//! use serde_json::json;
//!
//! let definition = ReportDefinition::builder()
//!     .title("Numbers")
//!     .detail(BandDefinition::new(20.0).element(Element::object_value("number")?))
//!     .build()?;
//! let text = Report::new(definition, vec![json!({ "number": 1 })])
//!     .generate_by(&mut TextGenerator::new())?;
//! ```

pub mod batch;
pub mod report;

pub use batch::{layout_batch, render_batch};
pub use report::{RenderSummary, Report};

// Workspace re-exports
pub use folio_executor::{Executor, ExecutorImpl, SyncExecutor};
#[cfg(feature = "rayon-executor")]
pub use folio_executor::RayonExecutor;
pub use folio_expr::{CompiledExpression, ExprError, FunctionRegistry, Record};
pub use folio_layout::{
    EvaluationError, EvaluationPolicy, LayoutConfig, LayoutEngine, LayoutError, ReportError,
};
pub use folio_render_core::{
    CallsExt, ElementKind, Generator, GeneratorCall, GeneratorError, LaidOutReport,
    PlacedElement, RecordingGenerator,
};
pub use folio_render_text::{TextGenerator, TextGridConfig};
pub use folio_report::{
    BandDefinition, BandRole, ConditionalStyle, DefinitionError, Element, ElementContent, Extent,
    GroupDefinition, ReportBuilder, ReportDefinition, SubReport, SystemSymbol,
};
pub use folio_source::{DataSource, IteratorDataSource, VecDataSource};
pub use folio_style::{
    EffectiveStyle, FontWeight, Margins, PageGeometry, PageSize, Style, StyleChain, TextAlign,
};
pub use folio_types::{Color, Rect, units};

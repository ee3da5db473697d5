//! Declarative report definitions.
//!
//! A report is described once as a set of bands (begin, page header, detail,
//! group headers and footers, summary, page footer), each holding positioned
//! elements, plus an optional stack of grouping levels and nested
//! sub-reports. Definitions are validated when built and are immutable
//! afterwards, so one definition can drive any number of renders.

pub mod band;
pub mod definition;
pub mod element;
pub mod error;
pub mod group;
pub mod subreport;

pub use band::{BandDefinition, BandRole, ReportBands};
pub use definition::{ReportBuilder, ReportDefinition};
pub use element::{ConditionalStyle, Element, ElementContent, Extent, SystemSymbol};
pub use error::DefinitionError;
pub use group::GroupDefinition;
pub use subreport::SubReport;

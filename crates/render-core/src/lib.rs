//! Generator-facing rendering abstractions.
//!
//! This crate provides the types shared by the layout engine and every
//! output backend:
//! - `Generator` trait, the seam output formats plug into
//! - `LaidOutReport`, the buffered page model the layout engine produces
//! - `RecordingGenerator`, which captures the call stream
//! - Coordinate helpers for backends

mod error;
pub mod recording;
mod traits;
mod types;
pub mod utils;

pub use error::GeneratorError;
pub use recording::{CallsExt, GeneratorCall, RecordingGenerator};
pub use traits::Generator;
pub use types::{ElementKind, LaidOutReport, PlacedElement, PlacedValue};

//! Assembling the template context for a week's gazette.

pub mod context;

pub use context::{fmt_points, safe_filename, GazetteContext, SlotContent};

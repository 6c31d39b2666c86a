//! Typed wrappers used across the CLI surface.

pub mod engine;
pub mod ids;
pub mod style;
pub mod time;

pub use engine::PdfEngine;
pub use ids::LeagueId;
pub use style::BlurbStyle;
pub use time::{Season, Week};

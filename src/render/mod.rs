//! Document output: docx templating and PDF conversion.

pub mod docx;
pub mod pdf;

pub use docx::{render_docx, scan_template_slots};
pub use pdf::{convert_to_pdf, tool_available};

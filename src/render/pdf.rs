//! Docx -> PDF conversion via external tools.
//!
//! `soffice` (LibreOffice headless) covers Linux/CI; `docx2pdf` drives Word
//! on macOS/Windows. Conversion failure is a warning, never a build failure.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{info, warn};

use crate::cli::types::PdfEngine;

fn pdf_path_for(docx: &Path) -> PathBuf {
    docx.with_extension("pdf")
}

fn convert_soffice(docx: &Path) -> bool {
    let Some(outdir) = docx.parent() else {
        return false;
    };
    let status = Command::new("soffice")
        .args(["--headless", "--convert-to", "pdf", "--outdir"])
        .arg(outdir)
        .arg(docx)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    matches!(status, Ok(s) if s.success()) && pdf_path_for(docx).is_file()
}

fn convert_docx2pdf(docx: &Path) -> bool {
    let status = Command::new("docx2pdf")
        .arg(docx)
        .arg(pdf_path_for(docx))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    matches!(status, Ok(s) if s.success()) && pdf_path_for(docx).is_file()
}

/// Convert the rendered docx. Returns the PDF path, or `None` (with a
/// warning) when no backend succeeded.
pub fn convert_to_pdf(docx: &Path, engine: PdfEngine) -> Option<PathBuf> {
    let converted = match engine {
        PdfEngine::Soffice => convert_soffice(docx),
        PdfEngine::Word => convert_docx2pdf(docx),
        PdfEngine::Auto => convert_soffice(docx) || convert_docx2pdf(docx),
    };

    if converted {
        let pdf = pdf_path_for(docx);
        info!("PDF exported: {}", pdf.display());
        Some(pdf)
    } else {
        warn!(
            "PDF export skipped for {} (engine {}; no soffice or docx2pdf?)",
            docx.display(),
            engine
        );
        None
    }
}

/// Whether an external converter binary responds; used by `doctor`.
pub fn tool_available(name: &str) -> bool {
    Command::new(name)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_path_for() {
        assert_eq!(
            pdf_path_for(Path::new("recaps/League/2025-10-07/Gazette_Week_5.docx")),
            Path::new("recaps/League/2025-10-07/Gazette_Week_5.pdf")
        );
    }

    #[test]
    fn test_missing_tool_is_unavailable() {
        assert!(!tool_available("definitely-not-a-real-binary-9000"));
    }
}

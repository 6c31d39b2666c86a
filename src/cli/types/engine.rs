//! PDF conversion backend selection.

use crate::error::{GazetteError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which external tool converts the rendered docx to PDF.
///
/// `Auto` tries LibreOffice first and falls back to `docx2pdf` (which drives
/// Word on macOS/Windows).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PdfEngine {
    #[default]
    Auto,
    Soffice,
    Word,
}

impl fmt::Display for PdfEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PdfEngine::Auto => "auto",
            PdfEngine::Soffice => "soffice",
            PdfEngine::Word => "word",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for PdfEngine {
    type Err = GazetteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(PdfEngine::Auto),
            "soffice" | "libreoffice" => Ok(PdfEngine::Soffice),
            "word" | "docx2pdf" => Ok(PdfEngine::Word),
            other => Err(GazetteError::InvalidPdfEngine {
                engine: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_engine_round_trip() {
        for engine in [PdfEngine::Auto, PdfEngine::Soffice, PdfEngine::Word] {
            let parsed: PdfEngine = engine.to_string().parse().unwrap();
            assert_eq!(parsed, engine);
        }
    }

    #[test]
    fn test_pdf_engine_aliases() {
        assert_eq!("libreoffice".parse::<PdfEngine>().unwrap(), PdfEngine::Soffice);
        assert_eq!("docx2pdf".parse::<PdfEngine>().unwrap(), PdfEngine::Word);
        assert_eq!("AUTO".parse::<PdfEngine>().unwrap(), PdfEngine::Auto);
    }

    #[test]
    fn test_pdf_engine_invalid() {
        assert!("ghostscript".parse::<PdfEngine>().is_err());
    }
}

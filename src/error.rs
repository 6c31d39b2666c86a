//! Error types for the Gridiron Gazette CLI

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GazetteError>;

#[derive(Error, Debug)]
pub enum GazetteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Docx archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to parse numeric value: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("Failed to load league config {path}: {message}")]
    Config { path: String, message: String },

    #[error("No league named \"{name}\" in {path}. Known: {known}")]
    UnknownLeague {
        name: String,
        path: String,
        known: String,
    },

    #[error("Template error: {message}")]
    Template { message: String },

    #[error("PDF conversion failed: {message}")]
    Pdf { message: String },

    #[error("Blurb generation failed: {message}")]
    Llm { message: String },

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Invalid blurb style: {style}")]
    InvalidBlurbStyle { style: String },

    #[error("Invalid PDF engine: {engine}")]
    InvalidPdfEngine { engine: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_league_display() {
        let err = GazetteError::UnknownLeague {
            name: "Mondays".to_string(),
            path: "leagues.json".to_string(),
            known: "Sunday League, Dynasty".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Mondays"));
        assert!(msg.contains("leagues.json"));
        assert!(msg.contains("Sunday League, Dynasty"));
    }

    #[test]
    fn test_template_error_display() {
        let err = GazetteError::Template {
            message: "word/document.xml missing".to_string(),
        };
        assert_eq!(err.to_string(), "Template error: word/document.xml missing");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: GazetteError = io.into();
        assert!(matches!(err, GazetteError::Io(_)));
    }
}

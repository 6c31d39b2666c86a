//! Blurb voice selection.

use crate::error::{GazetteError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Voice used for LLM-generated matchup blurbs.
///
/// `Default` is a neutral, score-focused recap. `Mascot` writes as Sabre the
/// Doberman, the Gazette's beat reporter. `Rtg` is a terse by-the-numbers
/// ratings column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlurbStyle {
    #[default]
    Default,
    Mascot,
    Rtg,
}

impl fmt::Display for BlurbStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BlurbStyle::Default => "default",
            BlurbStyle::Mascot => "mascot",
            BlurbStyle::Rtg => "rtg",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for BlurbStyle {
    type Err = GazetteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "default" => Ok(BlurbStyle::Default),
            "mascot" | "sabre" => Ok(BlurbStyle::Mascot),
            "rtg" => Ok(BlurbStyle::Rtg),
            other => Err(GazetteError::InvalidBlurbStyle {
                style: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blurb_style_round_trip() {
        for style in [BlurbStyle::Default, BlurbStyle::Mascot, BlurbStyle::Rtg] {
            let parsed: BlurbStyle = style.to_string().parse().unwrap();
            assert_eq!(parsed, style);
        }
    }

    #[test]
    fn test_blurb_style_sabre_alias() {
        assert_eq!("sabre".parse::<BlurbStyle>().unwrap(), BlurbStyle::Mascot);
    }

    #[test]
    fn test_blurb_style_invalid() {
        let err = "haiku".parse::<BlurbStyle>().unwrap_err();
        assert!(err.to_string().contains("haiku"));
    }
}

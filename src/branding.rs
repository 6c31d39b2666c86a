//! Team branding: mascot names and logo image lookup.
//!
//! Mascots come from a `team_mascots.json` mapping next to the working
//! directory; logos are discovered by walking a handful of candidate
//! directories recursively. Explicit mappings beat discovered files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};
use walkdir::WalkDir;


pub const MASCOTS_FILE: &str = "team_mascots.json";

const LOGO_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];
const LOGO_DIRS: [&str; 5] = [
    "assets/logos",
    "logos",
    "logos/generated_logo",
    "static/logos",
    "images/logos",
];

/// Lowercase, trim, collapse internal whitespace.
pub fn norm(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Alphanumeric-only lookup key ("The Mudville 9!" -> "themudville9").
pub fn alnum_key(s: &str) -> String {
    norm(s).chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Optional mascot/logo mappings file. Unknown fields are rejected so a bare
/// `{team: mascot}` object falls through to the flat-map parse below.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MascotsFile {
    #[serde(default)]
    team_mascots: BTreeMap<String, String>,
    #[serde(default)]
    team_logos: BTreeMap<String, String>,
}

/// Resolves team names to mascots and logo files.
pub struct MascotBook {
    root: PathBuf,
    mascots_by_norm: BTreeMap<String, String>,
    mascots_by_alnum: BTreeMap<String, String>,
    explicit_logos: BTreeMap<String, PathBuf>,
    logo_index: BTreeMap<String, PathBuf>,
}

impl MascotBook {
    /// Build the book rooted at `root`: load `team_mascots.json` if present
    /// and index every image under the candidate logo directories.
    pub fn load(root: &Path) -> Self {
        let mapping = read_mascots_file(&root.join(MASCOTS_FILE));

        let mut mascots_by_norm = BTreeMap::new();
        let mut mascots_by_alnum = BTreeMap::new();
        for (team, mascot) in &mapping.team_mascots {
            mascots_by_norm.insert(norm(team), mascot.clone());
            mascots_by_alnum.insert(alnum_key(team), mascot.clone());
        }

        let mut explicit_logos = BTreeMap::new();
        for (team, path) in &mapping.team_logos {
            let p = if Path::new(path).is_absolute() {
                PathBuf::from(path)
            } else {
                root.join(path)
            };
            if p.is_file() {
                explicit_logos.insert(alnum_key(team), p);
            } else {
                warn!("mapped logo for \"{}\" missing: {}", team, p.display());
            }
        }

        let logo_index = build_logo_index(root);
        debug!(
            "mascot book loaded: {} mascots, {} explicit logos, {} indexed files",
            mascots_by_norm.len(),
            explicit_logos.len(),
            logo_index.len()
        );

        Self {
            root: root.to_path_buf(),
            mascots_by_norm,
            mascots_by_alnum,
            explicit_logos,
            logo_index,
        }
    }

    pub fn mascot_for(&self, team_name: &str) -> Option<&str> {
        if team_name.trim().is_empty() {
            return None;
        }
        self.mascots_by_norm
            .get(&norm(team_name))
            .or_else(|| self.mascots_by_alnum.get(&alnum_key(team_name)))
            .map(|s| s.as_str())
    }

    pub fn logo_for(&self, team_name: &str) -> Option<&Path> {
        if team_name.trim().is_empty() {
            return None;
        }
        let key = alnum_key(team_name);
        if let Some(path) = self
            .explicit_logos
            .get(&key)
            .or_else(|| self.logo_index.get(&key))
        {
            return Some(path.as_path());
        }
        // Generated files often drop articles ("mudville9" for "The
        // Mudville 9!"), so fall back to containment either way around.
        self.logo_index
            .iter()
            .find(|(k, _)| k.len() >= 4 && (key.contains(k.as_str()) || k.contains(&key)))
            .map(|(_, path)| path.as_path())
    }

    /// Teams with no resolvable logo, for doctor/diagnostics output.
    pub fn unresolved<'a>(&self, teams: &'a [String]) -> Vec<&'a str> {
        teams
            .iter()
            .filter(|t| self.logo_for(t).is_none())
            .map(|t| t.as_str())
            .collect()
    }

    pub fn indexed_logo_count(&self) -> usize {
        self.logo_index.len() + self.explicit_logos.len()
    }

    /// Debug listing for `--print-logo-map` / `--branding-test`.
    pub fn print_logo_map(&self, teams: &[String]) {
        println!("Logo map (root: {}):", self.root.display());
        for team in teams {
            let mascot = self.mascot_for(team).unwrap_or("-");
            match self.logo_for(team) {
                Some(path) => println!("  {team} [{mascot}] -> {}", path.display()),
                None => println!("  {team} [{mascot}] -> (no logo)"),
            }
        }
    }
}

fn read_mascots_file(path: &Path) -> MascotsFile {
    let Some(raw) = fs::read_to_string(path).ok() else {
        return MascotsFile::default();
    };
    match serde_json::from_str::<MascotsFile>(&raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            // Also accept a bare {team: mascot} object
            match serde_json::from_str::<BTreeMap<String, String>>(&raw) {
                Ok(flat) => MascotsFile {
                    team_mascots: flat,
                    team_logos: BTreeMap::new(),
                },
                Err(_) => {
                    warn!("could not parse {}: {}", path.display(), e);
                    MascotsFile::default()
                }
            }
        }
    }
}

/// Walk the candidate directories and map normalized file stems to paths.
/// First match wins, so earlier directories take precedence.
fn build_logo_index(root: &Path) -> BTreeMap<String, PathBuf> {
    let mut index = BTreeMap::new();
    for dir in LOGO_DIRS {
        let base = root.join(dir);
        if !base.is_dir() {
            continue;
        }
        for entry in WalkDir::new(&base).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let ext_ok = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| LOGO_EXTENSIONS.contains(&e.to_lowercase().as_str()))
                .unwrap_or(false);
            if !ext_ok {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                index
                    .entry(alnum_key(stem))
                    .or_insert_with(|| path.to_path_buf());
            }
        }
    }
    index
}

//! The `doctor` command: sanity-check the local setup before a build.

use std::path::{Path, PathBuf};

use crate::branding::MascotBook;
use crate::config::load_leagues;
use crate::render::{scan_template_slots, tool_available};
use crate::{Result, ESPN_S2_ENV_VAR, OPENAI_API_KEY_ENV_VAR, SWID_ENV_VAR};

pub struct DoctorParams {
    pub leagues_path: PathBuf,
    pub template: PathBuf,
}

fn mark(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "MISSING"
    }
}

pub fn handle_doctor(params: DoctorParams) -> Result<()> {
    println!("Gridiron Gazette doctor\n");

    match load_leagues(&params.leagues_path) {
        Ok(leagues) => {
            println!(
                "config: {} ({} league{})",
                params.leagues_path.display(),
                leagues.len(),
                if leagues.len() == 1 { "" } else { "s" }
            );
            for cfg in &leagues {
                let (s2, swid) = cfg.cookies();
                let cookies = s2.is_some() && swid.is_some();
                println!(
                    "  - {} (league_id={}, year={}, cookies: {})",
                    cfg.name,
                    cfg.league_id,
                    cfg.year,
                    if cookies { "present" } else { "none (public leagues only)" }
                );
            }
        }
        Err(e) => println!("config: FAILED ({e})"),
    }

    match scan_template_slots(&params.template) {
        Ok(slots) => println!(
            "template: {} ({} matchup slot{})",
            params.template.display(),
            slots,
            if slots == 1 { "" } else { "s" }
        ),
        Err(e) => println!("template: FAILED ({e})"),
    }

    let book = MascotBook::load(Path::new("."));
    println!("branding: {} logo file(s) indexed", book.indexed_logo_count());

    println!("pdf: soffice {}", mark(tool_available("soffice")));
    println!("pdf: docx2pdf {}", mark(tool_available("docx2pdf")));

    let has_key = std::env::var(OPENAI_API_KEY_ENV_VAR).is_ok_and(|v| !v.trim().is_empty());
    println!(
        "blurbs: {} {}",
        OPENAI_API_KEY_ENV_VAR,
        if has_key { "set" } else { "not set (fallback blurbs)" }
    );
    let env_cookies = std::env::var(ESPN_S2_ENV_VAR).is_ok() && std::env::var(SWID_ENV_VAR).is_ok();
    if env_cookies {
        println!("cookies: {ESPN_S2_ENV_VAR}/{SWID_ENV_VAR} set in the environment");
    }

    Ok(())
}

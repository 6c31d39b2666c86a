//! Placeholder substitution straight into the docx OOXML.
//!
//! A docx file is a zip archive; templates mark insertion points with
//! `{{ KEY }}` tags in `word/document.xml` (and header/footer parts). Text
//! keys are substituted XML-escaped; logo keys become inline `<w:drawing>`
//! images backed by new entries under `word/media/` plus relationship and
//! content-type registrations.

use std::collections::BTreeMap;
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};
use zip::{write::SimpleFileOptions, ZipArchive, ZipWriter};

use crate::error::{GazetteError, Result};
use crate::gazette::GazetteContext;


const DOCUMENT_PART: &str = "word/document.xml";
const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";
const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

const EMU_PER_MM: f64 = 36000.0;

const RELS_IMAGE_TYPE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

static TAG_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{.*?\}\}").unwrap());
static INNER_XML: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").unwrap());

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Word splits typed text into multiple runs, so `{{KEY}}` often arrives as
/// `{{KE</w:t></w:r><w:r><w:t>Y}}`. Strip the tags inside each `{{...}}`
/// span before substitution.
fn coalesce_placeholders(xml: &str) -> String {
    TAG_SPAN
        .replace_all(xml, |caps: &regex::Captures| {
            INNER_XML.replace_all(&caps[0], "").into_owned()
        })
        .into_owned()
}

/// A logo image staged for insertion.
struct StagedLogo {
    rel_id: String,
    media_name: String,
    bytes: Vec<u8>,
    extension: String,
    width_emu: u64,
    height_emu: u64,
}

/// PNG pixel dimensions from the IHDR chunk; other formats render square.
fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if bytes.len() < 24 || &bytes[1..4] != b"PNG" {
        return None;
    }
    let width = u32::from_be_bytes(bytes[16..20].try_into().ok()?);
    let height = u32::from_be_bytes(bytes[20..24].try_into().ok()?);
    if width == 0 || height == 0 {
        None
    } else {
        Some((width, height))
    }
}

fn stage_logo(index: usize, path: &Path, logo_mm: f64) -> Result<StagedLogo> {
    let bytes = fs::read(path)?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| "png".to_string());

    let width_emu = (logo_mm * EMU_PER_MM) as u64;
    let height_emu = match png_dimensions(&bytes) {
        Some((w, h)) => ((logo_mm * EMU_PER_MM) * (h as f64) / (w as f64)) as u64,
        None => width_emu,
    };

    Ok(StagedLogo {
        rel_id: format!("rIdGazLogo{}", index),
        media_name: format!("gazette_logo_{}.{}", index, extension),
        bytes,
        extension,
        width_emu,
        height_emu,
    })
}

/// Inline picture markup for one staged logo. Namespaces are declared on the
/// elements themselves so this works regardless of the template's root attrs.
fn drawing_xml(logo: &StagedLogo, index: usize) -> String {
    format!(
        r#"</w:t></w:r><w:r><w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing"><wp:extent cx="{cx}" cy="{cy}"/><wp:docPr id="{id}" name="GazetteLogo{id}"/><a:graphic xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:pic xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:nvPicPr><pic:cNvPr id="{id}" name="GazetteLogo{id}"/><pic:cNvPicPr/></pic:nvPicPr><pic:blipFill><a:blip xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" r:embed="{rel}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill><pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r><w:r><w:t xml:space="preserve">"#,
        cx = logo.width_emu,
        cy = logo.height_emu,
        id = 9000 + index,
        rel = logo.rel_id,
    )
}

/// Substitute `{{KEY}}` tags in one XML part. `drawings` maps logo keys to
/// their replacement markup; unknown keys render empty.
fn substitute(xml: &str, ctx: &GazetteContext, drawings: &BTreeMap<String, String>) -> String {
    let xml = coalesce_placeholders(xml);
    PLACEHOLDER
        .replace_all(&xml, |caps: &regex::Captures| {
            let key = &caps[1];
            if let Some(markup) = drawings.get(key) {
                return markup.clone();
            }
            match ctx.get(key) {
                Some(value) => xml_escape(value),
                None => {
                    debug!("template key {} not in context, rendering empty", key);
                    String::new()
                }
            }
        })
        .into_owned()
}

fn ensure_content_type(content_types: &str, extension: &str) -> String {
    if content_types.contains(&format!("Extension=\"{}\"", extension)) {
        return content_types.to_string();
    }
    let mime = match extension {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    };
    content_types.replacen(
        "</Types>",
        &format!(
            "<Default Extension=\"{}\" ContentType=\"{}\"/></Types>",
            extension, mime
        ),
        1,
    )
}

fn add_relationships(rels: &str, logos: &[&StagedLogo]) -> String {
    let mut additions = String::new();
    for logo in logos {
        additions.push_str(&format!(
            "<Relationship Id=\"{}\" Type=\"{}\" Target=\"media/{}\"/>",
            logo.rel_id, RELS_IMAGE_TYPE, logo.media_name
        ));
    }
    rels.replacen("</Relationships>", &format!("{}</Relationships>", additions), 1)
}

fn is_text_part(name: &str) -> bool {
    name == DOCUMENT_PART
        || (name.starts_with("word/header") && name.ends_with(".xml"))
        || (name.starts_with("word/footer") && name.ends_with(".xml"))
}

/// Render `template` with `ctx` into `out_path`.
///
/// Logos are only inserted into the document body; header/footer parts get
/// text substitution only (they carry their own relationship files).
pub fn render_docx(
    template: &Path,
    out_path: &Path,
    ctx: &GazetteContext,
    logo_mm: f64,
) -> Result<()> {
    let template_bytes = fs::read(template).map_err(|e| GazetteError::Template {
        message: format!("cannot read template {}: {}", template.display(), e),
    })?;
    let mut archive = ZipArchive::new(Cursor::new(template_bytes))?;

    // Stage logos referenced by the context and present on disk
    let mut staged: Vec<(String, StagedLogo)> = Vec::new();
    for (i, (key, path)) in ctx.logos().iter().enumerate() {
        match stage_logo(i + 1, path, logo_mm) {
            Ok(logo) => staged.push((key.clone(), logo)),
            Err(e) => warn!("skipping logo {} ({}): {}", key, path.display(), e),
        }
    }
    let drawings: BTreeMap<String, String> = staged
        .iter()
        .enumerate()
        .map(|(i, (key, logo))| (key.clone(), drawing_xml(logo, i + 1)))
        .collect();

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let out_file = fs::File::create(out_path)?;
    let mut writer = ZipWriter::new(out_file);
    let options = SimpleFileOptions::default();

    let mut saw_document = false;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let name = entry.name().to_string();
        if name.ends_with('/') {
            continue;
        }

        if is_text_part(&name) {
            let mut xml = String::new();
            entry.read_to_string(&mut xml)?;
            let rendered = if name == DOCUMENT_PART {
                saw_document = true;
                substitute(&xml, ctx, &drawings)
            } else {
                substitute(&xml, ctx, &BTreeMap::new())
            };
            writer.start_file(name, options)?;
            writer.write_all(rendered.as_bytes())?;
        } else if name == DOCUMENT_RELS_PART && !staged.is_empty() {
            let mut xml = String::new();
            entry.read_to_string(&mut xml)?;
            let logos: Vec<&StagedLogo> = staged.iter().map(|(_, l)| l).collect();
            writer.start_file(name, options)?;
            writer.write_all(add_relationships(&xml, &logos).as_bytes())?;
        } else if name == CONTENT_TYPES_PART && !staged.is_empty() {
            let mut xml = String::new();
            entry.read_to_string(&mut xml)?;
            for (_, logo) in &staged {
                xml = ensure_content_type(&xml, &logo.extension);
            }
            writer.start_file(name, options)?;
            writer.write_all(xml.as_bytes())?;
        } else {
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes)?;
            writer.start_file(name, options)?;
            writer.write_all(&bytes)?;
        }
    }

    if !saw_document {
        return Err(GazetteError::Template {
            message: format!("{} has no {}", template.display(), DOCUMENT_PART),
        });
    }

    for (_, logo) in &staged {
        writer.start_file(format!("word/media/{}", logo.media_name), options)?;
        writer.write_all(&logo.bytes)?;
    }

    writer.finish()?;
    Ok(())
}

/// Count the `MATCHUPi_*` slot groups a template actually uses. Doctor
/// reports this so `--slots` can match the template.
pub fn scan_template_slots(template: &Path) -> Result<usize> {
    static SLOT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"MATCHUP(\d+)_").unwrap());

    let bytes = fs::read(template).map_err(|e| GazetteError::Template {
        message: format!("cannot read template {}: {}", template.display(), e),
    })?;
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut max_slot = 0usize;
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if !is_text_part(entry.name()) {
            continue;
        }
        let mut xml = String::new();
        entry.read_to_string(&mut xml)?;
        let xml = coalesce_placeholders(&xml);
        for caps in SLOT.captures_iter(&xml) {
            if let Ok(n) = caps[1].parse::<usize>() {
                max_slot = max_slot.max(n);
            }
        }
    }
    Ok(max_slot)
}

//! Build Orchestrator: picks the content source, sequences
//! backup → render → assemble → validate, and owns the `clean` and
//! `restore` recovery paths.

use crate::assemble::{self, AssembleReport};
use crate::commands::{CmdMessage, CmdResult};
use crate::config::SiteConfig;
use crate::error::{DeckError, Result};
use crate::render;
use crate::store::fs::stamped_path;
use crate::store::{Backend, PageStore};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

const SITE_BACKUP_PREFIX: &str = "site-backup-";

static PAGE_FILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^page(\d+)\.html$").expect("page file pattern"));
static WRAPPER_TAGS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<!DOCTYPE[^>]*>|</?html[^>]*>|</?body[^>]*>|<head[^>]*>[\s\S]*?</head>")
        .expect("wrapper tag pattern")
});

/// Where the build sources its pages from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildSource {
    Database,
    LegacyFiles,
}

impl std::fmt::Display for BuildSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildSource::Database => write!(f, "database"),
            BuildSource::LegacyFiles => write!(f, "legacy files"),
        }
    }
}

/// Pure source selection: the legacy path whenever the store is absent,
/// unreadable, or empty (all three collapse to "no usable pages"), the
/// database otherwise.
pub fn determine_build_source<B: Backend>(store: &PageStore<B>) -> BuildSource {
    if store.is_empty() {
        BuildSource::LegacyFiles
    } else {
        BuildSource::Database
    }
}

/// Run one full build. Returns the message stream on success; any render,
/// assemble, or validation failure propagates with its diagnostic context
/// attached as log messages by the CLI layer.
pub fn build<B: Backend>(config: &SiteConfig, store: &PageStore<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    validate_environment(config)?;

    let source = determine_build_source(store);
    result.add_message(CmdMessage::info(format!("building from: {}", source)));

    if let Some(backup) = backup_output(config)? {
        result.add_message(CmdMessage::info(format!(
            "output backed up to {}",
            backup.display()
        )));
    }

    let (fragment, page_count) = match source {
        BuildSource::Database => {
            let fragment = render::render_pages(store.get_all())?;
            (fragment, store.len())
        }
        BuildSource::LegacyFiles => render_legacy(config)?,
    };

    let report = assemble::assemble(config, &fragment, page_count)?;
    append_report(&mut result, report);

    result.add_message(CmdMessage::success(format!(
        "built {} with {} pages",
        config.output_path().display(),
        page_count
    )));
    Ok(result)
}

/// Reset the output to the pristine template, then rebuild.
pub fn clean<B: Backend>(config: &SiteConfig, store: &PageStore<B>) -> Result<CmdResult> {
    let template_path = config.template_path();
    if !template_path.exists() {
        return Err(DeckError::TemplateMissing(template_path));
    }
    fs::copy(&template_path, config.output_path()).map_err(DeckError::Io)?;

    let mut result = build(config, store)?;
    result.add_message(CmdMessage::success("clean rebuild completed"));
    Ok(result)
}

/// Copy the single most recent output backup over the output,
/// unconditionally.
pub fn restore(config: &SiteConfig) -> Result<CmdResult> {
    let backup = latest_site_backup(&config.backup_path())?.ok_or(DeckError::NoBackup)?;
    fs::copy(&backup, config.output_path()).map_err(DeckError::Io)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "restored {} from {}",
        config.output_path().display(),
        backup.display()
    )));
    Ok(result)
}

fn validate_environment(config: &SiteConfig) -> Result<()> {
    let template_path = config.template_path();
    if !template_path.exists() {
        return Err(DeckError::TemplateMissing(template_path));
    }
    if let Some(parent) = config.output_path().parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(DeckError::Io)?;
        }
    }
    Ok(())
}

/// Timestamped copy of the current output before it is overwritten.
fn backup_output(config: &SiteConfig) -> Result<Option<PathBuf>> {
    let output_path = config.output_path();
    if !output_path.exists() {
        return Ok(None);
    }
    let backup_dir = config.backup_path();
    if !backup_dir.exists() {
        fs::create_dir_all(&backup_dir).map_err(DeckError::Io)?;
    }
    let backup = stamped_path(&backup_dir, SITE_BACKUP_PREFIX, "html");
    fs::copy(&output_path, &backup).map_err(DeckError::Io)?;
    Ok(Some(backup))
}

fn latest_site_backup(backup_dir: &Path) -> Result<Option<PathBuf>> {
    if !backup_dir.exists() {
        return Ok(None);
    }
    let mut backups = Vec::new();
    for entry in fs::read_dir(backup_dir).map_err(DeckError::Io)? {
        let entry = entry.map_err(DeckError::Io)?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(SITE_BACKUP_PREFIX) && name.ends_with(".html") {
            backups.push(entry.path());
        }
    }
    // Timestamped names sort chronologically.
    backups.sort();
    Ok(backups.pop())
}

/// Read `page<N>.html` files from the content directory in numeric order,
/// strip document wrapper tags, and wrap each in its section container.
pub fn render_legacy(config: &SiteConfig) -> Result<(String, usize)> {
    let files = legacy_page_files(&config.content_path())?;
    if files.is_empty() {
        return Err(DeckError::EmptyContent);
    }

    let mut combined = String::new();
    for (index, (_, path)) in files.iter().enumerate() {
        let raw = fs::read_to_string(path).map_err(DeckError::Io)?;
        let body = clean_page_content(&raw);
        combined.push_str(&render::wrap_section(index + 1, &body));
    }
    Ok((combined, files.len()))
}

/// The `page<N>.html` files in numeric order, paired with their numbers.
/// Files like `pages.html` or `page-notes.html` do not qualify.
pub(crate) fn legacy_page_files(content_dir: &Path) -> Result<Vec<(u32, PathBuf)>> {
    if !content_dir.exists() {
        return Ok(Vec::new());
    }
    let mut numbered: Vec<(u32, PathBuf)> = Vec::new();
    for entry in fs::read_dir(content_dir).map_err(DeckError::Io)? {
        let entry = entry.map_err(DeckError::Io)?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if let Some(capture) = PAGE_FILE.captures(&name) {
            if let Ok(number) = capture[1].parse::<u32>() {
                numbered.push((number, entry.path()));
            }
        }
    }
    numbered.sort_by_key(|(number, _)| *number);
    Ok(numbered)
}

/// Remove doctype, html/body tags, and the whole head block from a legacy
/// page file so only the body content survives.
pub fn clean_page_content(content: &str) -> String {
    WRAPPER_TAGS.replace_all(content, "").trim().to_string()
}

fn append_report(result: &mut CmdResult, report: AssembleReport) {
    if report.script_patched {
        result.add_message(CmdMessage::info("client script page count updated"));
    }
    for warning in report.warnings {
        result.add_message(CmdMessage::warning(warning));
    }
}

use crate::commands::{CmdMessage, CmdResult};
use crate::config::SiteConfig;
use crate::error::{DeckError, Result};
use crate::migrate::{extract_background, extract_page};
use crate::pipeline;
use crate::store::{Backend, PageStore};
use std::fs;

/// Migrate legacy `page<N>.html` files into the store, in numeric order.
/// Files whose required fields cannot be extracted are skipped with a
/// warning naming the gaps; a recoverable page with only pinyin missing is
/// imported with an empty pinyin and a warning. Background images are
/// recovered best-effort from the site stylesheet.
pub fn run<B: Backend>(store: &mut PageStore<B>, config: &SiteConfig) -> Result<CmdResult> {
    let content_dir = config.content_path();
    if !content_dir.exists() {
        return Err(DeckError::Build(format!(
            "no legacy content directory at {}",
            content_dir.display()
        )));
    }

    // Missing stylesheet just means no backgrounds to recover.
    let css = fs::read_to_string(config.styles_path()).unwrap_or_default();

    let mut result = CmdResult::default();
    let mut migrated = 0usize;

    for (number, path) in pipeline::legacy_page_files(&content_dir)? {
        let html = fs::read_to_string(&path).map_err(DeckError::Io)?;
        let mut extraction = extract_page(&html);
        let name = path.file_name().unwrap_or_default().to_string_lossy().to_string();

        if extraction.draft.chinese_character.is_none() || extraction.draft.quote.is_none() {
            result.add_message(CmdMessage::warning(format!(
                "skipped {}: could not extract {}",
                name,
                extraction.missing.join(", ")
            )));
            continue;
        }

        if extraction.draft.pinyin.is_none() {
            result.add_message(CmdMessage::warning(format!(
                "{}: pinyin not found, imported empty",
                name
            )));
            extraction.draft.pinyin = Some(String::new());
        }

        if extraction.draft.background_image.is_none() {
            extraction.draft.background_image = extract_background(&css, number);
        }

        extraction
            .draft
            .extra
            .insert("sourceFile".to_string(), serde_json::Value::String(name));
        let record = store.add(extraction.draft)?;
        result.affected_pages.push(record);
        migrated += 1;
    }

    result.add_message(CmdMessage::success(format!(
        "migrated {} legacy pages",
        migrated
    )));
    Ok(result)
}

use crate::assemble;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::SiteConfig;
use crate::error::{DeckError, Result};
use crate::store::{Backend, PageStore};
use std::fs;

/// Consistency check of the on-disk output: no leaked placeholder tokens,
/// no duplicate section ids, and (when the store has pages) a section count
/// that matches the store.
pub fn run<B: Backend>(config: &SiteConfig, store: &PageStore<B>) -> Result<CmdResult> {
    let output_path = config.output_path();
    let html = match fs::read_to_string(&output_path) {
        Ok(html) => html,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DeckError::Build(format!(
                "no output file at {}; run `scrolldeck build` first",
                output_path.display()
            )));
        }
        Err(e) => return Err(DeckError::Io(e)),
    };

    assemble::check_token_leakage(&html)?;

    let found = assemble::count_sections(&html)?;
    if !store.is_empty() && found != store.len() {
        return Err(DeckError::PageCountMismatch {
            expected: store.len(),
            found,
        });
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "output is consistent: {} page sections, no leaked placeholders",
        found
    )));
    Ok(result)
}

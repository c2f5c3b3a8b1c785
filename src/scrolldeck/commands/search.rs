use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{Backend, PageStore};

pub fn run<B: Backend>(store: &PageStore<B>, term: &str) -> Result<CmdResult> {
    let matches: Vec<_> = store.search(term).into_iter().cloned().collect();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "found {} matching pages",
        matches.len()
    )));
    Ok(result.with_listed_pages(matches))
}

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{Backend, PageStore};

pub fn run<B: Backend>(store: &mut PageStore<B>, id: u32) -> Result<CmdResult> {
    let removed = store.delete(id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "deleted page {} ({}), {} pages remain",
        removed.id,
        removed.chinese_character,
        store.len()
    )));
    Ok(result.with_affected_pages(vec![removed]))
}

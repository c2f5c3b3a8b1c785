use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{Backend, PageStore};

pub fn run<B: Backend>(store: &PageStore<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default().with_listed_pages(store.get_all().to_vec());
    result.add_message(CmdMessage::info(format!("total pages: {}", store.len())));
    Ok(result)
}

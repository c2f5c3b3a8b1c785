use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::PagePatch;
use crate::store::{Backend, PageStore};

pub fn run<B: Backend>(store: &mut PageStore<B>, id: u32, patch: PagePatch) -> Result<CmdResult> {
    let updated = store.update(id, patch)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "updated page {} ({})",
        updated.id, updated.chinese_character
    )));
    Ok(result.with_affected_pages(vec![updated]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeckError;
    use crate::model::PageDraft;
    use crate::store::memory::MemoryBackend;

    #[test]
    fn updates_named_fields_only() {
        let mut store = PageStore::open(MemoryBackend::new());
        store
            .add(PageDraft {
                chinese_character: Some("家".to_string()),
                pinyin: Some("jiā".to_string()),
                quote: Some("old".to_string()),
                ..Default::default()
            })
            .unwrap();

        let patch = PagePatch {
            quote: Some("new".to_string()),
            ..Default::default()
        };
        let result = run(&mut store, 1, patch).unwrap();
        assert_eq!(result.affected_pages[0].quote, "new");
        assert_eq!(result.affected_pages[0].pinyin, "jiā");
    }

    #[test]
    fn unknown_id_is_not_found() {
        let mut store = PageStore::open(MemoryBackend::new());
        let err = run(&mut store, 7, PagePatch::default()).unwrap_err();
        assert!(matches!(err, DeckError::NotFound(7)));
    }
}

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{Backend, PageStore};
use std::path::Path;

pub fn run<B: Backend>(store: &PageStore<B>, path: &Path) -> Result<CmdResult> {
    store.export(path)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "exported {} pages to {}",
        store.len(),
        path.display()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageDraft;
    use crate::store::memory::MemoryBackend;

    #[test]
    fn exports_store_verbatim() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = PageStore::open(MemoryBackend::new());
        store
            .add(PageDraft {
                chinese_character: Some("家".to_string()),
                pinyin: Some("jiā".to_string()),
                quote: Some("home".to_string()),
                ..Default::default()
            })
            .unwrap();

        let path = temp.path().join("export.json");
        run(&store, &path).unwrap();

        let exported: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(exported["pages"][0]["chineseCharacter"], "家");
        assert_eq!(exported["metadata"]["totalPages"], 1);
    }
}

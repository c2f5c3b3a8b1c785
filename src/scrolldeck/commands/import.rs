use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DeckError, Result};
use crate::store::{Backend, PageStore};
use std::fs;
use std::path::Path;

pub fn run<B: Backend>(store: &mut PageStore<B>, path: &Path) -> Result<CmdResult> {
    let content = fs::read_to_string(path).map_err(DeckError::Io)?;
    let payload: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| DeckError::Format(e.to_string()))?;

    let count = store.import(payload)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "imported {} pages from {}",
        count,
        path.display()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryBackend;

    #[test]
    fn imports_a_store_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("import.json");
        fs::write(
            &path,
            r#"{"pages": [{
                "id": 1, "order": 1,
                "chineseCharacter": "道", "pinyin": "dào", "quote": "way",
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-01T00:00:00Z"
            }]}"#,
        )
        .unwrap();

        let mut store = PageStore::open(MemoryBackend::new());
        run(&mut store, &path).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn rejects_payload_without_pages_array() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("bad.json");
        fs::write(&path, r#"{"pages": "nope"}"#).unwrap();

        let mut store = PageStore::open(MemoryBackend::new());
        let err = run(&mut store, &path).unwrap_err();
        assert!(matches!(err, DeckError::Format(_)));
    }

    #[test]
    fn rejects_unparseable_json() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("bad.json");
        fs::write(&path, "{ nope").unwrap();

        let mut store = PageStore::open(MemoryBackend::new());
        let err = run(&mut store, &path).unwrap_err();
        assert!(matches!(err, DeckError::Format(_)));
    }
}

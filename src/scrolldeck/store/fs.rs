use super::Backend;
use crate::error::{DeckError, Result};
use crate::model::StoreData;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

const BACKUP_PREFIX: &str = "backup-";

/// File-backed store: the snapshot lives in a single JSON file and every
/// write is preceded by a timestamped copy of the previous file.
pub struct FileBackend {
    data_file: PathBuf,
    backup_dir: PathBuf,
    /// Keep only the newest N backups. `None` keeps everything.
    keep_backups: Option<usize>,
}

impl FileBackend {
    pub fn new(data_file: PathBuf, backup_dir: PathBuf) -> Self {
        Self {
            data_file,
            backup_dir,
            keep_backups: None,
        }
    }

    pub fn with_retention(mut self, keep: Option<usize>) -> Self {
        self.keep_backups = keep;
        self
    }

    fn backup_current(&self) -> Result<()> {
        if !self.data_file.exists() {
            return Ok(());
        }
        ensure_dir(&self.backup_dir)?;
        let backup_path = stamped_path(&self.backup_dir, BACKUP_PREFIX, "json");
        fs::copy(&self.data_file, &backup_path).map_err(DeckError::Io)?;
        self.prune_backups()?;
        Ok(())
    }

    fn prune_backups(&self) -> Result<()> {
        let Some(keep) = self.keep_backups else {
            return Ok(());
        };
        let mut backups = list_backups(&self.backup_dir)?;
        if backups.len() <= keep {
            return Ok(());
        }
        // Timestamped names sort chronologically; the oldest come first.
        backups.sort();
        let excess = backups.len() - keep;
        for path in backups.into_iter().take(excess) {
            fs::remove_file(path).map_err(DeckError::Io)?;
        }
        Ok(())
    }
}

/// Timestamped path that is guaranteed not to exist yet. The timestamp is
/// filename-safe (colons and dots replaced) and has millisecond precision,
/// so two writes in the same millisecond get distinct sequence suffixes.
/// The name layout keeps lexical order equal to chronological order.
pub(crate) fn stamped_path(dir: &Path, prefix: &str, ext: &str) -> PathBuf {
    let stamp = Utc::now().format("%Y-%m-%dT%H-%M-%S-%3fZ");
    let mut seq = 0u32;
    loop {
        let candidate = dir.join(format!("{prefix}{stamp}-{seq:03}.{ext}"));
        if !candidate.exists() {
            return candidate;
        }
        seq += 1;
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(DeckError::Io)?;
    }
    Ok(())
}

fn list_backups(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut backups = Vec::new();
    for entry in fs::read_dir(dir).map_err(DeckError::Io)? {
        let entry = entry.map_err(DeckError::Io)?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(BACKUP_PREFIX) && name.ends_with(".json") {
            backups.push(entry.path());
        }
    }
    Ok(backups)
}

impl Backend for FileBackend {
    fn load(&self) -> Result<Option<StoreData>> {
        if !self.data_file.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.data_file).map_err(DeckError::Io)?;
        let data: StoreData =
            serde_json::from_str(&content).map_err(DeckError::Serialization)?;
        Ok(Some(data))
    }

    fn persist(&mut self, data: &StoreData) -> Result<()> {
        if let Some(parent) = self.data_file.parent() {
            ensure_dir(parent)?;
        }
        self.backup_current()?;
        let content = serde_json::to_string_pretty(data).map_err(DeckError::Serialization)?;
        fs::write(&self.data_file, content).map_err(DeckError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageDraft;
    use crate::store::PageStore;

    fn draft(character: &str) -> PageDraft {
        PageDraft {
            chinese_character: Some(character.to_string()),
            pinyin: Some(String::new()),
            quote: Some("quote".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn persists_and_reloads() {
        let temp = tempfile::tempdir().unwrap();
        let data_file = temp.path().join("data/pages.json");
        let backup_dir = temp.path().join("data");

        let backend = FileBackend::new(data_file.clone(), backup_dir.clone());
        let mut store = PageStore::open(backend);
        let added = store.add(draft("家")).unwrap();

        let reopened = PageStore::open(FileBackend::new(data_file, backup_dir));
        assert!(reopened.load_warning().is_none());
        let loaded = reopened.get(added.id).unwrap();
        assert_eq!(loaded.chinese_character, "家");
        assert_eq!(loaded.quote, "quote");
        assert_eq!(loaded.pinyin, "");
    }

    #[test]
    fn every_save_writes_a_backup_of_the_prior_state() {
        let temp = tempfile::tempdir().unwrap();
        let data_file = temp.path().join("pages.json");
        let backend = FileBackend::new(data_file, temp.path().to_path_buf());
        let mut store = PageStore::open(backend);

        // First save has nothing to back up.
        store.add(draft("一")).unwrap();
        assert_eq!(list_backups(temp.path()).unwrap().len(), 0);

        store.add(draft("二")).unwrap();
        store.add(draft("三")).unwrap();
        assert_eq!(list_backups(temp.path()).unwrap().len(), 2);
    }

    #[test]
    fn deleted_ids_are_not_reused_after_reload() {
        let temp = tempfile::tempdir().unwrap();
        let data_file = temp.path().join("pages.json");
        let backup_dir = temp.path().to_path_buf();

        let mut store = PageStore::open(FileBackend::new(data_file.clone(), backup_dir.clone()));
        store.add(draft("家")).unwrap();
        store.add(draft("道")).unwrap();
        store.delete(2).unwrap();

        let mut reopened = PageStore::open(FileBackend::new(data_file, backup_dir));
        let added = reopened.add(draft("和")).unwrap();
        assert_eq!(added.id, 3);
    }

    #[test]
    fn stamped_paths_never_collide() {
        let temp = tempfile::tempdir().unwrap();
        let first = stamped_path(temp.path(), BACKUP_PREFIX, "json");
        fs::write(&first, "a").unwrap();
        let second = stamped_path(temp.path(), BACKUP_PREFIX, "json");
        assert_ne!(first, second);
    }

    #[test]
    fn retention_keeps_newest_backups() {
        let temp = tempfile::tempdir().unwrap();
        let data_file = temp.path().join("pages.json");
        let backend =
            FileBackend::new(data_file, temp.path().to_path_buf()).with_retention(Some(2));
        let mut store = PageStore::open(backend);

        for character in ["一", "二", "三", "四", "五"] {
            store.add(draft(character)).unwrap();
        }
        assert_eq!(list_backups(temp.path()).unwrap().len(), 2);
    }

    #[test]
    fn malformed_file_starts_empty_with_warning() {
        let temp = tempfile::tempdir().unwrap();
        let data_file = temp.path().join("pages.json");
        fs::write(&data_file, "{ not json").unwrap();

        let store = PageStore::open(FileBackend::new(data_file, temp.path().to_path_buf()));
        assert!(store.is_empty());
        assert!(store.load_warning().unwrap().contains("starting empty"));
    }
}

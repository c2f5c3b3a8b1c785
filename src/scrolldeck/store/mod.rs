//! # Content Store
//!
//! The page collection lives in memory as [`StoreData`] and is pushed through
//! a [`Backend`] on every mutation. Backends only know how to load and
//! persist a snapshot; id assignment, ordering, validation, and search live
//! in [`PageStore`] so they behave identically over any backend.
//!
//! ## Implementations
//!
//! - [`fs::FileBackend`]: production JSON file storage
//!   - Store in `data/pages.json`
//!   - A timestamped `backup-*.json` copy of the previous file before every
//!     write, with optional keep-last-N pruning
//! - [`memory::MemoryBackend`]: in-memory snapshot for tests
//!
//! ## Durability model
//!
//! Every mutating operation persists the whole store before returning. There
//! is no in-memory-only mode and no partial write. A load failure (malformed
//! file) downgrades to an empty store with a recorded warning; it never
//! propagates to the caller.

use crate::error::{DeckError, Result};
use crate::model::{PageDraft, PagePatch, PageRecord, StoreData, StoreMetadata};
use chrono::Utc;
use std::path::Path;

pub mod fs;
pub mod memory;

/// Persistence seam for the page store.
pub trait Backend {
    /// Load the persisted snapshot, `None` if nothing has been persisted yet.
    fn load(&self) -> Result<Option<StoreData>>;

    /// Persist a snapshot, taking a backup of the previous state first.
    fn persist(&mut self, data: &StoreData) -> Result<()>;
}

/// The ordered page collection plus its persistence backend.
pub struct PageStore<B: Backend> {
    data: StoreData,
    backend: B,
    load_warning: Option<String>,
}

impl<B: Backend> PageStore<B> {
    /// Open the store. A missing snapshot starts empty; a malformed one
    /// starts empty and records a warning for the caller to surface.
    pub fn open(backend: B) -> Self {
        match backend.load() {
            Ok(Some(data)) => Self {
                data,
                backend,
                load_warning: None,
            },
            Ok(None) => Self {
                data: StoreData::default(),
                backend,
                load_warning: None,
            },
            Err(e) => Self {
                data: StoreData::default(),
                backend,
                load_warning: Some(format!("could not load store, starting empty: {}", e)),
            },
        }
    }

    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    pub fn metadata(&self) -> &StoreMetadata {
        &self.data.metadata
    }

    pub fn len(&self) -> usize {
        self.data.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.pages.is_empty()
    }

    pub fn get_all(&self) -> &[PageRecord] {
        &self.data.pages
    }

    pub fn get(&self, id: u32) -> Result<&PageRecord> {
        self.data
            .pages
            .iter()
            .find(|p| p.id == id)
            .ok_or(DeckError::NotFound(id))
    }

    /// Validate, assign the next id, append with `order = count + 1`, and
    /// persist. Ids come from a persisted high-water mark and are never
    /// reused after deletion.
    pub fn add(&mut self, mut draft: PageDraft) -> Result<PageRecord> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(DeckError::Validation(missing));
        }
        draft.prune_shadowed_extra();

        let now = Utc::now();
        let record = PageRecord {
            id: self.next_id(),
            order: self.data.pages.len() as u32 + 1,
            chinese_character: draft.chinese_character.unwrap_or_default(),
            pinyin: draft.pinyin.unwrap_or_default(),
            quote: draft.quote.unwrap_or_default(),
            custom_html: draft.custom_html,
            background_image: draft.background_image,
            link_url: draft.link_url,
            category: draft.category,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
            extra: draft.extra,
        };

        self.data.pages.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    /// Shallow-merge `patch` over the record, refresh `updatedAt`, persist.
    /// Patch keys that shadow modeled fields are dropped, not merged.
    pub fn update(&mut self, id: u32, mut patch: PagePatch) -> Result<PageRecord> {
        let index = self.position(id)?;
        patch.prune_shadowed_extra();
        {
            let record = &mut self.data.pages[index];
            if let Some(v) = patch.chinese_character {
                record.chinese_character = v;
            }
            if let Some(v) = patch.pinyin {
                record.pinyin = v;
            }
            if let Some(v) = patch.quote {
                record.quote = v;
            }
            if let Some(v) = patch.custom_html {
                record.custom_html = Some(v);
            }
            if let Some(v) = patch.background_image {
                record.background_image = Some(v);
            }
            if let Some(v) = patch.link_url {
                record.link_url = Some(v);
            }
            if let Some(v) = patch.category {
                record.category = Some(v);
            }
            if let Some(v) = patch.tags {
                record.tags = Some(v);
            }
            for (key, value) in patch.extra {
                record.extra.insert(key, value);
            }
            record.updated_at = Utc::now();
        }
        self.persist()?;
        Ok(self.data.pages[index].clone())
    }

    /// Remove the record and renumber the rest so `order` stays 1..N.
    pub fn delete(&mut self, id: u32) -> Result<PageRecord> {
        let index = self.position(id)?;
        let removed = self.data.pages.remove(index);
        for (i, page) in self.data.pages.iter_mut().enumerate() {
            page.order = i as u32 + 1;
        }
        self.persist()?;
        Ok(removed)
    }

    /// Case-insensitive substring match over character, pinyin, quote,
    /// category, and tags, in store order. An empty query returns every
    /// page.
    pub fn search(&self, query: &str) -> Vec<&PageRecord> {
        let term = query.to_lowercase();
        if term.is_empty() {
            return self.data.pages.iter().collect();
        }
        self.data
            .pages
            .iter()
            .filter(|page| {
                page.chinese_character.to_lowercase().contains(&term)
                    || page.pinyin.to_lowercase().contains(&term)
                    || page.quote.to_lowercase().contains(&term)
                    || page
                        .category
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(&term))
                    || page
                        .tags
                        .iter()
                        .flatten()
                        .any(|tag| tag.to_lowercase().contains(&term))
            })
            .collect()
    }

    /// Replace the store wholesale from an external payload. The payload
    /// must carry an array-typed `pages` field.
    pub fn import(&mut self, payload: serde_json::Value) -> Result<usize> {
        match payload.get("pages") {
            Some(pages) if pages.is_array() => {}
            Some(_) => return Err(DeckError::Format("`pages` is not an array".to_string())),
            None => return Err(DeckError::Format("missing `pages` field".to_string())),
        }

        let data: StoreData =
            serde_json::from_value(payload).map_err(|e| DeckError::Format(e.to_string()))?;
        self.data = data;
        self.persist()?;
        Ok(self.data.pages.len())
    }

    /// Write the current store verbatim to `path`.
    pub fn export(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(DeckError::Io)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.data).map_err(DeckError::Serialization)?;
        std::fs::write(path, content).map_err(DeckError::Io)?;
        Ok(())
    }

    fn position(&self, id: u32) -> Result<usize> {
        self.data
            .pages
            .iter()
            .position(|p| p.id == id)
            .ok_or(DeckError::NotFound(id))
    }

    fn next_id(&self) -> u32 {
        // The floor covers files written before the high-water mark existed.
        let floor = self.data.pages.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        self.data.metadata.next_id.max(floor)
    }

    fn persist(&mut self) -> Result<()> {
        self.data.metadata.total_pages = self.data.pages.len() as u32;
        // The mark only ratchets up, so it survives deletions and imports.
        self.data.metadata.next_id = self.next_id();
        self.data.metadata.last_updated = Utc::now();
        self.backend.persist(&self.data)
    }
}

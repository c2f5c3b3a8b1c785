use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One unit of content: a character, its pronunciation, and a quote.
///
/// Wire names are camelCase so existing `pages.json` files load unchanged.
/// Fields we don't model are carried through `extra` untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub id: u32,
    /// 1-based display position. Contiguous 1..N after every mutation.
    pub order: u32,
    pub chinese_character: String,
    pub pinyin: String,
    pub quote: String,
    /// When present and non-empty, used verbatim as the page body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Incoming page data before the store has accepted it.
///
/// All fields are optional here; `missing_fields` decides whether the
/// draft can become a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDraft {
    pub chinese_character: Option<String>,
    pub pinyin: Option<String>,
    pub quote: Option<String>,
    pub custom_html: Option<String>,
    pub background_image: Option<String>,
    pub link_url: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PageDraft {
    /// Returns the wire names of required fields that are missing.
    ///
    /// `chineseCharacter` and `quote` must be present and non-empty;
    /// `pinyin` must be present but may be empty.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.chinese_character.as_deref().unwrap_or("").is_empty() {
            missing.push("chineseCharacter".to_string());
        }
        if self.pinyin.is_none() {
            missing.push("pinyin".to_string());
        }
        if self.quote.as_deref().unwrap_or("").is_empty() {
            missing.push("quote".to_string());
        }
        missing
    }

    /// Drop `extra` keys that shadow modeled fields. A payload like
    /// `{"id": 99}` lands in `extra` during deserialization, and merging it
    /// would serialize the same JSON key twice.
    pub fn prune_shadowed_extra(&mut self) {
        for key in MODELED_KEYS {
            self.extra.remove(*key);
        }
    }
}

/// Wire names claimed by `PageRecord` fields.
const MODELED_KEYS: &[&str] = &[
    "id",
    "order",
    "chineseCharacter",
    "pinyin",
    "quote",
    "customHtml",
    "backgroundImage",
    "linkUrl",
    "category",
    "tags",
    "createdAt",
    "updatedAt",
];

/// A partial update applied over an existing record (shallow field
/// overwrite). Same shape as a draft, but nothing is required.
pub type PagePatch = PageDraft;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoreMetadata {
    pub version: String,
    /// Recomputed from the live page count before every persist; never
    /// trusted as input.
    pub total_pages: u32,
    /// High-water mark for id assignment. Only ever moves forward, so a
    /// deleted id is never handed out again. Files written before this
    /// field existed load as 0 and the store falls back to max(id) + 1.
    #[serde(default)]
    pub next_id: u32,
    pub last_updated: DateTime<Utc>,
    pub description: String,
}

impl Default for StoreMetadata {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            total_pages: 0,
            next_id: 1,
            last_updated: Utc::now(),
            description: "Scrolldeck content database".to_string(),
        }
    }
}

/// The persisted collection: metadata plus the ordered page list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub metadata: StoreMetadata,
    #[serde(default)]
    pub pages: Vec<PageRecord>,
}

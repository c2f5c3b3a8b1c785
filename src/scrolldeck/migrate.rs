//! Best-effort extraction of structured fields from legacy page HTML.
//!
//! The legacy pages were written by hand against the generated layout, so
//! the patterns target that layout's markers. Extraction is inherently
//! lossy: instead of papering over a miss with placeholder text, the result
//! carries the list of fields that could not be recovered and the caller
//! decides what to do with the gap.

use crate::generate::categorize;
use crate::model::PageDraft;
use once_cell::sync::Lazy;
use regex::Regex;

static CHARACTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"class="home-character"[^>]*>\s*([^<]+?)\s*<"#).expect("character pattern"));
static PINYIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"font-style: italic[^>]*>\s*([^<]+?)\s*<").expect("pinyin pattern"));
static QUOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"font-weight: 300[^>]*>\s*"?([^<]+?)"?\s*<"#).expect("quote pattern"));
static BACKGROUND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\.bg-(page|online)-(\d+)[^}]*background-image:\s*url\(['"]?([^'")]+)['"]?\)"#)
        .expect("background pattern")
});

/// A partial record plus the wire names of fields extraction could not find.
#[derive(Debug)]
pub struct Extraction {
    pub draft: PageDraft,
    pub missing: Vec<&'static str>,
}

impl Extraction {
    /// Nothing usable was recovered at all.
    pub fn is_empty(&self) -> bool {
        self.draft.chinese_character.is_none() && self.draft.quote.is_none()
    }
}

/// Pull character, pinyin, and quote out of a legacy page file.
pub fn extract_page(html: &str) -> Extraction {
    let mut missing = Vec::new();

    let chinese_character = capture(&CHARACTER, html);
    if chinese_character.is_none() {
        missing.push("chineseCharacter");
    }

    let pinyin = capture(&PINYIN, html);
    if pinyin.is_none() {
        missing.push("pinyin");
    }

    let quote = capture(&QUOTE, html);
    if quote.is_none() {
        missing.push("quote");
    }

    let category = chinese_character.as_deref().map(categorize);

    Extraction {
        draft: PageDraft {
            chinese_character,
            pinyin,
            quote,
            category,
            ..Default::default()
        },
        missing,
    }
}

/// Look up a page's background image in the site stylesheet. A
/// `.bg-page-<n>` rule wins over its `.bg-online-<n>` variant.
pub fn extract_background(css: &str, page_number: u32) -> Option<String> {
    let mut online = None;
    for capture in BACKGROUND.captures_iter(css) {
        if capture[2].parse::<u32>().map_or(true, |n| n != page_number) {
            continue;
        }
        let url = capture[3].to_string();
        match &capture[1] {
            "page" => return Some(url),
            _ => online = online.or(Some(url)),
        }
    }
    online
}

fn capture(pattern: &Regex, html: &str) -> Option<String> {
    pattern
        .captures(html)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty())
}

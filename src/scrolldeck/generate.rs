//! Text generation behind a trait so a real backend can replace the static
//! lookup table without touching the store or assembler.

use once_cell::sync::Lazy;

/// Output of one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub word: String,
    pub pinyin: String,
    pub quote: String,
}

/// A content generator: prompt in, character/pinyin/quote out.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Generated;
}

/// keyword, character, pinyin
static KEYWORDS: Lazy<Vec<(&str, &str, &str)>> = Lazy::new(|| {
    vec![
        ("home", "家", "jiā"),
        ("family", "家", "jiā"),
        ("balance", "衡", "héng"),
        ("harmony", "和", "hé"),
        ("wisdom", "智", "zhì"),
        ("love", "愛", "ài"),
        ("peace", "和", "hé"),
        ("strength", "力", "lì"),
        ("beauty", "美", "měi"),
        ("nature", "自然", "zì rán"),
        ("growth", "成長", "chéng zhǎng"),
        ("change", "變", "biàn"),
        ("journey", "旅", "lǚ"),
        ("dream", "夢", "mèng"),
        ("hope", "希望", "xī wàng"),
    ]
});

/// Default generator: first keyword found in the prompt picks the character;
/// unknown prompts fall back to 道.
pub struct KeywordGenerator;

impl TextGenerator for KeywordGenerator {
    fn generate(&self, prompt: &str) -> Generated {
        let prompt_lower = prompt.to_lowercase();
        let (word, pinyin) = KEYWORDS
            .iter()
            .find(|(keyword, _, _)| prompt_lower.contains(keyword))
            .map(|(_, word, pinyin)| (*word, *pinyin))
            .unwrap_or(("道", "dào"));

        Generated {
            word: word.to_string(),
            pinyin: pinyin.to_string(),
            quote: format!(
                "In the essence of {word}, we find the bridge between ancient wisdom and modern understanding."
            ),
        }
    }
}

/// category, characters that place a word in it
static CATEGORIES: Lazy<Vec<(&str, &[&str])>> = Lazy::new(|| {
    vec![
        ("family", &["家", "母", "父", "子", "女"] as &[&str]),
        ("nature", &["自然", "山", "水", "花", "树"]),
        ("wisdom", &["智", "慧", "学", "道"]),
        ("emotion", &["愛", "情", "心", "感"]),
        ("balance", &["衡", "和", "平"]),
        ("transformation", &["變", "成長", "化"]),
    ]
});

/// Free-form tag for a word based on which character family it falls into.
pub fn categorize(word: &str) -> String {
    CATEGORIES
        .iter()
        .find(|(_, chars)| chars.iter().any(|c| word.contains(c)))
        .map(|(category, _)| category.to_string())
        .unwrap_or_else(|| "general".to_string())
}

/// Tags derived from the word shape and quote content.
pub fn suggest_tags(word: &str, quote: &str) -> Vec<String> {
    let mut tags = vec!["generated".to_string()];

    if word.chars().count() == 1 {
        tags.push("single-character".to_string());
    } else {
        tags.push("phrase".to_string());
    }

    let quote_lower = quote.to_lowercase();
    if quote_lower.contains("wisdom") {
        tags.push("wisdom".to_string());
    }
    if quote_lower.contains("ancient") {
        tags.push("traditional".to_string());
    }
    if quote_lower.contains("modern") {
        tags.push("contemporary".to_string());
    }

    tags
}

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::generate::{categorize, suggest_tags, TextGenerator};
use crate::model::PageDraft;
use crate::store::{Backend, PageStore};
use serde_json::Value;

/// Create a page from a free-text prompt via the injected generator.
pub fn run<B: Backend>(
    store: &mut PageStore<B>,
    generator: &dyn TextGenerator,
    prompt: &str,
) -> Result<CmdResult> {
    let generated = generator.generate(prompt);
    let category = categorize(&generated.word);
    let tags = suggest_tags(&generated.word, &generated.quote);

    let mut draft = PageDraft {
        chinese_character: Some(generated.word),
        pinyin: Some(generated.pinyin),
        quote: Some(generated.quote),
        category: Some(category),
        tags: Some(tags),
        ..Default::default()
    };
    draft
        .extra
        .insert("prompt".to_string(), Value::String(prompt.to_string()));
    draft.extra.insert(
        "sourceMethod".to_string(),
        Value::String("generated".to_string()),
    );

    let record = store.add(draft)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "added page {} ({}) with id {}",
        record.chinese_character, record.pinyin, record.id
    )));
    Ok(result.with_affected_pages(vec![record]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::KeywordGenerator;
    use crate::store::memory::MemoryBackend;

    #[test]
    fn adds_a_generated_page() {
        let mut store = PageStore::open(MemoryBackend::new());
        let result = run(&mut store, &KeywordGenerator, "finding my way home").unwrap();

        assert_eq!(result.affected_pages.len(), 1);
        let page = &result.affected_pages[0];
        assert_eq!(page.chinese_character, "家");
        assert_eq!(page.category.as_deref(), Some("family"));
        assert_eq!(page.extra["prompt"], "finding my way home");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn stub_generator_is_injectable() {
        struct Fixed;
        impl TextGenerator for Fixed {
            fn generate(&self, _prompt: &str) -> crate::generate::Generated {
                crate::generate::Generated {
                    word: "試".to_string(),
                    pinyin: "shì".to_string(),
                    quote: "a trial".to_string(),
                }
            }
        }

        let mut store = PageStore::open(MemoryBackend::new());
        let result = run(&mut store, &Fixed, "anything").unwrap();
        assert_eq!(result.affected_pages[0].chinese_character, "試");
    }
}

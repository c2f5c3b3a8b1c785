//! Template Renderer: turns the ordered page list into the concatenated
//! fragment the assembler drops into the template. One `page-<n>` section
//! per record, numbered by array position, order preserved.

use crate::error::{DeckError, Result};
use crate::model::PageRecord;

/// Render every page and concatenate in store order. An empty list is a hard
/// error here; the orchestrator treats it as the signal to fall back to the
/// legacy file path.
pub fn render_pages(pages: &[PageRecord]) -> Result<String> {
    if pages.is_empty() {
        return Err(DeckError::EmptyContent);
    }

    let mut combined = String::new();
    for (index, page) in pages.iter().enumerate() {
        let number = index + 1;
        combined.push_str(&wrap_section(number, &page_body(page)));
    }
    Ok(combined)
}

/// Wrap a page body in its uniquely numbered sectioning container so the
/// client scroller can address it as `page-<n>`.
pub fn wrap_section(number: usize, body: &str) -> String {
    format!(
        "\n            <div class=\"page-section\" id=\"page-{number}\">\n                <div class=\"page-content\">\n                    {body}\n                </div>\n            </div>"
    )
}

/// Per-record custom markup wins outright; otherwise synthesize the fixed
/// layout. Missing optional fields become empty strings, never a literal
/// "null".
fn page_body(page: &PageRecord) -> String {
    if let Some(html) = page.custom_html.as_deref() {
        if !html.is_empty() {
            return html.to_string();
        }
    }

    let link_href = page.link_url.as_deref().unwrap_or("#");
    let link_target = if page.link_url.is_some() {
        " target=\"_blank\""
    } else {
        ""
    };

    format!(
        r#"<div style="text-align: center; padding: 20px;">
    <div style="font-size: clamp(8rem, 25vw, 16rem); line-height: 1; margin: 20px 0; color: #fff; text-shadow: 0 0 20px rgba(255,255,255,0.3);">
        <a href="{link_href}"{link_target} class="home-character">
            {character}
        </a>
    </div>
    <div style="font-size: clamp(1.2rem, 4vw, 1.8rem); color: #ccc; margin: 10px 0; font-style: italic; letter-spacing: 0.2em;">
        {pinyin}
    </div>
    <div style="background: rgba(255,255,255,0.1); padding: 30px 20px; border-radius: 15px; margin: 40px 0; max-width: 600px; margin-left: auto; margin-right: auto;">
        <p style="font-size: clamp(1rem, 3vw, 1.3rem); line-height: 1.6; color: #fff; margin: 0; font-weight: 300;">
            "{quote}"
        </p>
    </div>
</div>"#,
        character = page.chinese_character,
        pinyin = page.pinyin,
        quote = page.quote,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: u32, character: &str) -> PageRecord {
        let now = Utc::now();
        PageRecord {
            id,
            order: id,
            chinese_character: character.to_string(),
            pinyin: String::new(),
            quote: "a quote".to_string(),
            custom_html: None,
            background_image: None,
            link_url: None,
            category: None,
            tags: None,
            created_at: now,
            updated_at: now,
            extra: Default::default(),
        }
    }

    #[test]
    fn empty_list_is_an_error() {
        assert!(matches!(render_pages(&[]), Err(DeckError::EmptyContent)));
    }

    #[test]
    fn sections_are_numbered_by_position() {
        let pages = vec![record(5, "家"), record(9, "道")];
        let html = render_pages(&pages).unwrap();
        assert!(html.contains("id=\"page-1\""));
        assert!(html.contains("id=\"page-2\""));
        assert!(!html.contains("id=\"page-5\""));
        // Store order is preserved.
        assert!(html.find("家").unwrap() < html.find("道").unwrap());
    }

    #[test]
    fn custom_html_overrides_generated_markup() {
        let mut page = record(1, "家");
        page.custom_html = Some("<h1>hand made</h1>".to_string());
        let html = render_pages(&[page]).unwrap();
        assert!(html.contains("<h1>hand made</h1>"));
        assert!(!html.contains("home-character"));
    }

    #[test]
    fn empty_custom_html_falls_back_to_generated_markup() {
        let mut page = record(1, "家");
        page.custom_html = Some(String::new());
        let html = render_pages(&[page]).unwrap();
        assert!(html.contains("home-character"));
    }

    #[test]
    fn link_url_turns_the_character_into_a_link() {
        let mut page = record(1, "家");
        page.link_url = Some("https://example.com".to_string());
        let html = render_pages(&[page]).unwrap();
        assert!(html.contains("href=\"https://example.com\" target=\"_blank\""));

        let plain = render_pages(&[record(1, "家")]).unwrap();
        assert!(plain.contains("href=\"#\""));
        assert!(!plain.contains("target=\"_blank\""));
    }

    #[test]
    fn missing_optionals_render_as_empty_strings() {
        let html = render_pages(&[record(1, "家")]).unwrap();
        assert!(!html.contains("null"));
        assert!(!html.contains("None"));
    }
}

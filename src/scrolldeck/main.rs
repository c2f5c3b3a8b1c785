use chrono::Utc;
use clap::Parser;
use colored::*;
use scrolldeck::api::{CmdMessage, DeckApi, MessageLevel};
use scrolldeck::config::SiteConfig;
use scrolldeck::error::{DeckError, Result};
use scrolldeck::generate::KeywordGenerator;
use scrolldeck::model::{PagePatch, PageRecord};
use scrolldeck::store::fs::FileBackend;
use scrolldeck::store::PageStore;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red(), e);
        if let Some(suggestion) = e.suggestion() {
            eprintln!("{} {}", "Hint:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut api = init_api(&cli)?;

    if let Some(warning) = api.store().load_warning() {
        eprintln!("{}", warning.yellow());
    }

    match cli.command {
        Some(Commands::Build) | None => handle_simple(api.build()),
        Some(Commands::Add { prompt }) => handle_simple(api.add_page(&prompt)),
        Some(Commands::List) => handle_listing(api.list_pages()),
        Some(Commands::Search { term }) => handle_listing(api.search_pages(&term)),
        Some(Commands::Update { id, fields }) => {
            let patch: PagePatch = serde_json::from_str(&fields)
                .map_err(|e| DeckError::Format(e.to_string()))?;
            handle_simple(api.update_page(id, patch))
        }
        Some(Commands::Delete { id }) => handle_simple(api.delete_page(id)),
        Some(Commands::Export { path }) => {
            let path = path.unwrap_or_else(|| api.config().root().join("data/export.json"));
            handle_simple(api.export_store(&path))
        }
        Some(Commands::Import { path }) => handle_simple(api.import_store(&path)),
        Some(Commands::Clean) => handle_simple(api.clean()),
        Some(Commands::Restore) => handle_simple(api.restore()),
        Some(Commands::Validate) => handle_simple(api.validate()),
        Some(Commands::Migrate) => handle_simple(api.migrate()),
    }
}

fn init_api(cli: &Cli) -> Result<DeckApi<FileBackend>> {
    let config = SiteConfig::load(&cli.root)?;
    let backend = FileBackend::new(config.data_path(), config.backup_path())
        .with_retention(config.keep_backups);
    let store = PageStore::open(backend);
    Ok(DeckApi::new(store, config, Box::new(KeywordGenerator)))
}

fn handle_simple(result: Result<scrolldeck::api::CmdResult>) -> Result<()> {
    let result = result?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_listing(result: Result<scrolldeck::api::CmdResult>) -> Result<()> {
    let result = result?;
    print_pages(&result.listed_pages);
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;

fn print_pages(pages: &[PageRecord]) {
    if pages.is_empty() {
        println!("No pages found.");
        return;
    }

    for page in pages {
        let idx_str = format!("{:>3}. ", page.order);
        let head = if page.pinyin.is_empty() {
            page.chinese_character.clone()
        } else {
            format!("{} ({})", page.chinese_character, page.pinyin)
        };
        let label = match &page.category {
            Some(category) => format!("{} [{}] {}", head, category, page.quote),
            None => format!("{} {}", head, page.quote),
        };

        let time_ago = format_time_ago(page.created_at);
        let fixed_width = idx_str.width() + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let label = truncate_to_width(&label, available);
        let padding = available.saturating_sub(label.width());

        println!(
            "{}{}{}{}",
            idx_str,
            label,
            " ".repeat(padding),
            time_ago.dimmed()
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: chrono::DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

//! # API Facade
//!
//! Single entry point for every scrolldeck operation. The facade dispatches
//! to command functions and, for mutating operations, chains the rebuild the
//! way the site has always worked: a durable store change is immediately
//! followed by a fresh build of the output.
//!
//! Generic over the storage [`Backend`] so the same facade runs against the
//! file store in production and the memory store in tests. The text
//! generator is injected for the same reason: the default is a static
//! keyword table, but anything implementing [`TextGenerator`] can stand in.

use crate::commands;
use crate::config::SiteConfig;
use crate::error::Result;
use crate::generate::TextGenerator;
use crate::model::PagePatch;
use crate::store::{Backend, PageStore};
use std::path::Path;

pub struct DeckApi<B: Backend> {
    store: PageStore<B>,
    config: SiteConfig,
    generator: Box<dyn TextGenerator>,
}

impl<B: Backend> DeckApi<B> {
    pub fn new(store: PageStore<B>, config: SiteConfig, generator: Box<dyn TextGenerator>) -> Self {
        Self {
            store,
            config,
            generator,
        }
    }

    pub fn store(&self) -> &PageStore<B> {
        &self.store
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn build(&self) -> Result<commands::CmdResult> {
        commands::build::run(&self.config, &self.store)
    }

    /// Generate a page from a prompt, store it, and rebuild the site.
    pub fn add_page(&mut self, prompt: &str) -> Result<commands::CmdResult> {
        let mut result = commands::add::run(&mut self.store, self.generator.as_ref(), prompt)?;
        result.absorb(self.build()?);
        Ok(result)
    }

    pub fn list_pages(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn search_pages(&self, term: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, term)
    }

    /// Apply a partial update, then rebuild.
    pub fn update_page(&mut self, id: u32, patch: PagePatch) -> Result<commands::CmdResult> {
        let mut result = commands::update::run(&mut self.store, id, patch)?;
        result.absorb(self.build()?);
        Ok(result)
    }

    /// Delete a page, then rebuild.
    pub fn delete_page(&mut self, id: u32) -> Result<commands::CmdResult> {
        let mut result = commands::delete::run(&mut self.store, id)?;
        result.absorb(self.build()?);
        Ok(result)
    }

    pub fn export_store(&self, path: &Path) -> Result<commands::CmdResult> {
        commands::export::run(&self.store, path)
    }

    /// Replace the store from an external file, then rebuild.
    pub fn import_store(&mut self, path: &Path) -> Result<commands::CmdResult> {
        let mut result = commands::import::run(&mut self.store, path)?;
        result.absorb(self.build()?);
        Ok(result)
    }

    pub fn clean(&self) -> Result<commands::CmdResult> {
        commands::clean::run(&self.config, &self.store)
    }

    pub fn restore(&self) -> Result<commands::CmdResult> {
        commands::restore::run(&self.config)
    }

    pub fn validate(&self) -> Result<commands::CmdResult> {
        commands::validate::run(&self.config, &self.store)
    }

    /// Extract legacy page files into the store, then rebuild.
    pub fn migrate(&mut self) -> Result<commands::CmdResult> {
        let mut result = commands::migrate::run(&mut self.store, &self.config)?;
        result.absorb(self.build()?);
        Ok(result)
    }
}

pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::KeywordGenerator;
    use crate::store::memory::MemoryBackend;
    use std::fs;

    const TEMPLATE: &str = "<body>{{CONTENT_PLACEHOLDER}}<span>1 / {{TOTAL_PAGES}}</span></body>";

    fn api() -> (tempfile::TempDir, DeckApi<MemoryBackend>) {
        let temp = tempfile::tempdir().unwrap();
        let config = SiteConfig::load(temp.path()).unwrap();
        fs::write(config.template_path(), TEMPLATE).unwrap();
        let store = PageStore::open(MemoryBackend::new());
        let api = DeckApi::new(store, config, Box::new(KeywordGenerator));
        (temp, api)
    }

    #[test]
    fn add_page_stores_and_rebuilds() {
        let (_temp, mut api) = api();
        api.add_page("coming home").unwrap();

        assert_eq!(api.store().len(), 1);
        let output = fs::read_to_string(api.config().output_path()).unwrap();
        assert!(output.contains("id=\"page-1\""));
        assert!(output.contains("家"));
    }

    #[test]
    fn delete_page_rebuilds_with_fewer_sections() {
        let (_temp, mut api) = api();
        api.add_page("home").unwrap();
        api.add_page("wisdom").unwrap();
        let id = api.store().get_all()[0].id;

        api.delete_page(id).unwrap();

        let output = fs::read_to_string(api.config().output_path()).unwrap();
        assert!(output.contains("id=\"page-1\""));
        assert!(!output.contains("id=\"page-2\""));
        assert!(output.contains("1 / 1"));
    }

    #[test]
    fn validate_passes_after_build() {
        let (_temp, mut api) = api();
        api.add_page("balance in all things").unwrap();
        api.validate().unwrap();
    }
}

use crate::commands::CmdResult;
use crate::config::SiteConfig;
use crate::error::Result;
use crate::pipeline;
use crate::store::{Backend, PageStore};

pub fn run<B: Backend>(config: &SiteConfig, store: &PageStore<B>) -> Result<CmdResult> {
    pipeline::build(config, store)
}

use crate::commands::CmdResult;
use crate::config::SiteConfig;
use crate::error::Result;
use crate::pipeline;

pub fn run(config: &SiteConfig) -> Result<CmdResult> {
    pipeline::restore(config)
}

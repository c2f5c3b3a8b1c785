use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scrolldeck")]
#[command(about = "Build a single-page scroll site from a JSON page store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Site root directory
    #[arg(short, long, global = true, default_value = ".")]
    pub root: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the site from the store (or legacy content files)
    #[command(alias = "b")]
    Build,

    /// Generate a page from a free-text prompt and rebuild
    #[command(alias = "a")]
    Add {
        /// Prompt text, e.g. "finding inner peace"
        prompt: String,
    },

    /// List all pages
    #[command(alias = "ls")]
    List,

    /// Search pages by character, pinyin, quote, category, or tag
    Search {
        /// Search term
        term: String,
    },

    /// Update a page by id with a partial JSON payload and rebuild
    Update {
        /// Page id
        id: u32,

        /// Partial record, e.g. '{"quote": "New quote"}'
        fields: String,
    },

    /// Delete a page by id and rebuild
    #[command(alias = "rm")]
    Delete {
        /// Page id
        id: u32,
    },

    /// Export the store to a file
    Export {
        /// Destination path (defaults to data/export.json)
        path: Option<PathBuf>,
    },

    /// Replace the store from a file and rebuild
    Import {
        /// Source path
        path: PathBuf,
    },

    /// Reset the output from the template, then rebuild
    Clean,

    /// Copy the most recent output backup over the output
    Restore,

    /// Check on-disk output consistency
    Validate,

    /// Extract legacy page<N>.html files into the store and rebuild
    Migrate,
}

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DeckError>;

#[derive(Debug, Error)]
pub enum DeckError {
    /// A page payload is missing required fields. Field names are the
    /// camelCase wire names so the message matches what sits in pages.json.
    #[error("missing required fields: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("page with id {0} not found")]
    NotFound(u32),

    /// A JSON payload that does not have the expected shape.
    #[error("invalid payload: {0}")]
    Format(String),

    #[error("store contains no pages")]
    EmptyContent,

    #[error("template file not found: {}", .0.display())]
    TemplateMissing(PathBuf),

    #[error("template is missing the {0} placeholder")]
    TemplateMalformed(&'static str),

    /// A placeholder token survived substitution, which means the content
    /// itself contained the token.
    #[error("placeholder {0} survived substitution")]
    SubstitutionFailed(&'static str),

    #[error("expected {expected} page sections, found {found}")]
    PageCountMismatch { expected: usize, found: usize },

    #[error("duplicate section identifier: {0}")]
    DuplicateId(String),

    #[error("no site backup available to restore")]
    NoBackup,

    #[error("build error: {0}")]
    Build(String),

    #[error("I/O error: {0}")]
    Io(std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(serde_json::Error),
}

impl DeckError {
    /// Corrective command printed alongside the failure summary, where one
    /// makes sense.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            DeckError::PageCountMismatch { .. }
            | DeckError::DuplicateId(_)
            | DeckError::SubstitutionFailed(_) => {
                Some("run `scrolldeck restore` to roll the output back to the last backup")
            }
            DeckError::TemplateMalformed(_) | DeckError::TemplateMissing(_) => {
                Some("run `scrolldeck clean` after fixing the template")
            }
            DeckError::EmptyContent => {
                Some("run `scrolldeck add \"<prompt>\"` to create a first page")
            }
            _ => None,
        }
    }
}

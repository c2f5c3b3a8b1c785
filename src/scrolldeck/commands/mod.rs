use crate::model::PageRecord;

pub mod add;
pub mod build;
pub mod clean;
pub mod delete;
pub mod export;
pub mod import;
pub mod list;
pub mod migrate;
pub mod restore;
pub mod search;
pub mod update;
pub mod validate;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// What a command hands back to the UI: pages it changed, pages it listed,
/// and a message stream. No terminal I/O below this type.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_pages: Vec<PageRecord>,
    pub listed_pages: Vec<PageRecord>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_pages(mut self, pages: Vec<PageRecord>) -> Self {
        self.affected_pages = pages;
        self
    }

    pub fn with_listed_pages(mut self, pages: Vec<PageRecord>) -> Self {
        self.listed_pages = pages;
        self
    }

    /// Fold another result's messages into this one.
    pub fn absorb(&mut self, other: CmdResult) {
        self.messages.extend(other.messages);
    }
}

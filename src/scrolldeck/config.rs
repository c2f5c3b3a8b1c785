use crate::error::{DeckError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "scrolldeck.json";

/// Site layout and build options, stored in `<root>/scrolldeck.json`.
///
/// All paths are relative to the site root; `SiteConfig::load` resolves them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(default = "default_data_file")]
    pub data_file: String,

    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,

    #[serde(default = "default_template_file")]
    pub template_file: String,

    #[serde(default = "default_output_file")]
    pub output_file: String,

    #[serde(default = "default_script_file")]
    pub script_file: String,

    /// Legacy per-file content directory used by the fallback build path.
    #[serde(default = "default_content_dir")]
    pub content_dir: String,

    /// Stylesheet holding the `.bg-page-<n>` background rules.
    #[serde(default = "default_styles_file")]
    pub styles_file: String,

    /// Keep only the newest N store backups. `None` keeps everything, which
    /// matches the historical behavior.
    #[serde(default)]
    pub keep_backups: Option<usize>,

    #[serde(skip)]
    root: PathBuf,
}

fn default_data_file() -> String {
    "data/pages.json".to_string()
}

fn default_backup_dir() -> String {
    "data".to_string()
}

fn default_template_file() -> String {
    "template.html".to_string()
}

fn default_output_file() -> String {
    "index.html".to_string()
}

fn default_script_file() -> String {
    "js/script.js".to_string()
}

fn default_content_dir() -> String {
    "content".to_string()
}

fn default_styles_file() -> String {
    "css/background-transitions.css".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            backup_dir: default_backup_dir(),
            template_file: default_template_file(),
            output_file: default_output_file(),
            script_file: default_script_file(),
            content_dir: default_content_dir(),
            styles_file: default_styles_file(),
            keep_backups: None,
            root: PathBuf::from("."),
        }
    }
}

impl SiteConfig {
    /// Load config from the site root, or return defaults if not found.
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        let config_path = root.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            let content = fs::read_to_string(&config_path).map_err(DeckError::Io)?;
            serde_json::from_str::<SiteConfig>(&content).map_err(DeckError::Serialization)?
        } else {
            SiteConfig::default()
        };
        config.root = root.to_path_buf();
        Ok(config)
    }

    /// Save config to the site root.
    pub fn save(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(DeckError::Io)?;
        }
        let config_path = self.root.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(DeckError::Serialization)?;
        fs::write(config_path, content).map_err(DeckError::Io)?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_path(&self) -> PathBuf {
        self.root.join(&self.data_file)
    }

    pub fn backup_path(&self) -> PathBuf {
        self.root.join(&self.backup_dir)
    }

    pub fn template_path(&self) -> PathBuf {
        self.root.join(&self.template_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output_file)
    }

    pub fn script_path(&self) -> PathBuf {
        self.root.join(&self.script_file)
    }

    pub fn content_path(&self) -> PathBuf {
        self.root.join(&self.content_dir)
    }

    pub fn styles_path(&self) -> PathBuf {
        self.root.join(&self.styles_file)
    }
}

use crate::model::document::DocumentOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Editing behaviour (tabs, gutter, indentation, quitting)
    #[serde(default)]
    pub editor: EditorConfig,

    /// Undo/redo history settings
    #[serde(default)]
    pub history: HistoryConfig,
}

/// Editor behavior configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Rendered width of a tab stop
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,

    /// Show line numbers in the gutter
    #[serde(default = "default_true")]
    pub line_numbers: bool,

    /// Automatically indent new lines based on the previous line
    #[serde(default = "default_true")]
    pub auto_indent: bool,

    /// Typing `(`, `[` or `{` also inserts the closer
    #[serde(default = "default_true")]
    pub auto_close_brackets: bool,

    /// Extra quit presses required while the document has unsaved changes
    #[serde(default = "default_quit_confirmations")]
    pub quit_confirmations: u32,

    /// Seconds a status message stays visible
    #[serde(default = "default_status_message_timeout")]
    pub status_message_timeout_secs: u64,
}

fn default_tab_size() -> usize {
    4
}

fn default_true() -> bool {
    true
}

fn default_quit_confirmations() -> u32 {
    3
}

fn default_status_message_timeout() -> u64 {
    5
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: default_tab_size(),
            line_numbers: true,
            auto_indent: true,
            auto_close_brackets: true,
            quit_confirmations: default_quit_confirmations(),
            status_message_timeout_secs: default_status_message_timeout(),
        }
    }
}

impl EditorConfig {
    pub fn document_options(&self) -> DocumentOptions {
        DocumentOptions {
            tab_width: self.tab_size,
            line_numbers: self.line_numbers,
            auto_indent: self.auto_indent,
        }
    }

    pub fn status_message_timeout(&self) -> Duration {
        Duration::from_secs(self.status_message_timeout_secs)
    }
}

/// Undo/redo configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Snapshots kept per stack; the oldest is dropped when full
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Typing within this many milliseconds of the previous edit joins the
    /// same undo step
    #[serde(default = "default_snapshot_debounce")]
    pub snapshot_debounce_ms: u64,
}

fn default_max_depth() -> usize {
    crate::model::history::DEFAULT_MAX_DEPTH
}

fn default_snapshot_debounce() -> u64 {
    500
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            snapshot_debounce_ms: default_snapshot_debounce(),
        }
    }
}

impl HistoryConfig {
    pub fn snapshot_debounce(&self) -> Duration {
        Duration::from_millis(self.snapshot_debounce_ms)
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("scoom").join("config.json"))
    }

    /// The config at [`Config::default_config_path`], or defaults when there
    /// is none. A broken file is logged and ignored.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_config_path().filter(|path| path.is_file()) else {
            tracing::debug!("no config file, using defaults");
            return Self::default();
        };
        Self::load_from_file(&path).unwrap_or_else(|e| {
            tracing::warn!("ignoring config: {}", e);
            Self::default()
        })
    }

    /// Read and validate a JSON config. Missing fields take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: Config = serde_json::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the config as pretty-printed JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let write_error = |message: String| ConfigError::Write {
            path: path.to_path_buf(),
            message,
        };
        let contents = serde_json::to_string_pretty(self).map_err(|e| write_error(e.to_string()))?;
        std::fs::write(path, contents).map_err(|e| write_error(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.editor.tab_size == 0 {
            return Err(ConfigError::Invalid("editor.tab_size must be at least 1"));
        }

        if self.history.max_depth == 0 {
            return Err(ConfigError::Invalid("history.max_depth must be at least 1"));
        }

        Ok(())
    }
}

/// Why a config file could not be used
#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
    Write { path: PathBuf, message: String },
    Invalid(&'static str),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, message } => {
                write!(f, "cannot read {}: {message}", path.display())
            }
            ConfigError::Parse { path, message } => {
                write!(f, "{} is not valid config JSON: {message}", path.display())
            }
            ConfigError::Write { path, message } => {
                write!(f, "cannot write {}: {message}", path.display())
            }
            ConfigError::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

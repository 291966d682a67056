// src/error.rs
use thiserror::Error;
use uuid::Uuid;

/// Failure modes a pane can run into.
///
/// None of these ever leave the pane: they are logged and the pane degrades
/// gracefully (message in the terminal, setting left untouched, gesture ignored).
#[derive(Error, Debug)]
pub enum PaneError {
    // Process management
    #[error("Failed to spawn child process {program}: {message}")]
    Spawn { program: String, message: String },

    #[error("Failed to parse command line '{command}': {message}")]
    CommandParse { command: String, message: String },

    // Preferences
    #[error("Invalid color '{value}' for {field}")]
    InvalidColor { field: String, value: String },

    #[error("Invalid font description: {value}")]
    InvalidFont { value: String },

    #[error("Unsupported encoding {encoding}: {message}")]
    Encoding { encoding: String, message: String },

    #[error("Invalid search pattern '{pattern}': {message}")]
    Search { pattern: String, message: String },

    // Settings store
    #[error("Settings I/O error: {source}")]
    SettingsIo {
        #[from]
        source: std::io::Error,
    },

    #[error("Settings parse error: {message}")]
    SettingsParse { message: String },

    #[error("Unknown profile: {0}")]
    UnknownProfile(Uuid),
}

pub type PaneResult<T> = Result<T, PaneError>;

impl From<toml::de::Error> for PaneError {
    fn from(err: toml::de::Error) -> Self {
        PaneError::SettingsParse { message: err.to_string() }
    }
}

impl From<toml::ser::Error> for PaneError {
    fn from(err: toml::ser::Error) -> Self {
        PaneError::SettingsParse { message: err.to_string() }
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedBrowserError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path not found: {path}")]
    PathNotFound { path: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Failed to fetch listing for {path}: {reason}")]
    FetchFailed { path: String, reason: String },

    #[error("Row {index} is out of range ({len} items)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("No file selected")]
    NoSelection,

    #[error("{viewer} is not available for {fname}")]
    ViewerUnavailable { viewer: String, fname: String },
}

pub type Result<T> = std::result::Result<T, FeedBrowserError>;

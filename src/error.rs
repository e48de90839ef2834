use thiserror::Error;

#[derive(Error, Debug)]
pub enum DexError {
    #[error("'{0}' not found in the catalog")]
    ItemNotFound(String),

    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("API error: {url} returned status {status}")]
    Api { status: u16, url: String },

    #[error("malformed record from {0}")]
    InvalidRecord(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, DexError>;

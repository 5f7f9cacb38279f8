use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error performing IO")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL {url}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Error reading target manifest")]
    Manifest(#[from] serde_json::Error),

    #[error("Invalid logo target: {0}")]
    InvalidTarget(String),
}

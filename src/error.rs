use crate::parse;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(#[from] parse::Error),
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Url error: {0}")]
    Url(#[from] url::ParseError),
    #[error("{endpoint} answered with {content_type:?} instead of JSON: {preview}")]
    UnexpectedContentType {
        endpoint: String,
        content_type: String,
        preview: String,
    },
    #[error("response envelope has no {panel:?} panel")]
    MissingPanel { panel: &'static str },
    #[error("no dining hall configured for {0:?}")]
    UnknownHall(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    pub fn config_error(msg: &str) -> Self {
        Self::Config(msg.to_string())
    }

    /// True for the errors that mean the upstream pages no longer look the way we expect.
    pub const fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::Parse(_) | Self::UnexpectedContentType { .. } | Self::MissingPanel { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("server returned HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected response payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response payload is missing '{field}'")]
    MissingField { field: &'static str },

    #[error("invalid '{field}' parameter: {reason}")]
    Validation { field: String, reason: String },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("invalid config value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// HTTP status of a transport failure, if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True only for an HTTP 404. Existence checks translate exactly this
    /// case to `false`; every other error keeps propagating.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

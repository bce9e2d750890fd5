use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please paste a link.")]
    Empty,
    #[error("Invalid link.")]
    Invalid,
}

/// Anything that goes wrong talking to the metadata service.
///
/// The variants only exist for diagnostics; users see one message.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch link information.")]
    Request(#[source] reqwest::Error),
    #[error("Failed to fetch link information.")]
    Status(u16),
    #[error("Failed to fetch link information.")]
    Decode(#[source] serde_json::Error),
    #[error("Failed to fetch link information.")]
    Other(String),
}

impl FetchError {
    /// Underlying cause, for logs.
    pub fn detail(&self) -> String {
        match self {
            FetchError::Request(e) => format!("request failed: {}", e),
            FetchError::Status(code) => format!("HTTP {}", code),
            FetchError::Decode(e) => format!("invalid JSON: {}", e),
            FetchError::Other(msg) => msg.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not serialize {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum AddError {
    #[error("Please paste a link.")]
    Empty,
    #[error("Invalid link.")]
    InvalidUrl,
    #[error("This link has already been added.")]
    Duplicate,
    #[error("Another link is still being added.")]
    Busy,
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("The add was cancelled before it finished.")]
    Superseded,
}

impl From<ValidationError> for AddError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Empty => AddError::Empty,
            ValidationError::Invalid => AddError::InvalidUrl,
        }
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("API key is missing")]
    MissingCredential,

    #[error("API returned an error: status {status}, message: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// True for failures caused by a missing or rejected credential.
    pub fn is_credential(&self) -> bool {
        match self {
            Error::MissingCredential => true,
            Error::Api { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

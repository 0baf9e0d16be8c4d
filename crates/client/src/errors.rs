use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Non-2xx answer other than 401, with the server's message verbatim.
    #[error("{status}: {message}")]
    Api {
        status: u16,
        message: String,
        fields: BTreeMap<String, Vec<String>>,
    },

    /// The server rejected the credentials or token; the session was cleared.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("session store unavailable: {0}")]
    Poisoned(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Unauthorized(_) => Some(401),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

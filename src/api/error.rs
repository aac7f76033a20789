use thiserror::Error;

/// Failure of a single call against the configuration service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (host unreachable, reset, ...).
    #[error("Failed to fetch API ({endpoint}). {detail}")]
    Network { endpoint: String, detail: String },

    /// The service answered with a non-2xx status.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// A 2xx response whose body was not the expected JSON.
    #[error("failed to parse response from {path}: {detail}")]
    Decode { path: String, detail: String },
}

impl ApiError {
    /// Build a server error from a non-2xx status and its body text.
    ///
    /// An empty body falls back to `Request failed with status N`.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = if body.is_empty() {
            format!("Request failed with status {status}")
        } else {
            body.to_string()
        };
        Self::Server { status, message }
    }

    /// HTTP status attached to the error, if the service responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Network { .. } | Self::Decode { .. } => None,
        }
    }
}

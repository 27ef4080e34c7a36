use thiserror::Error;

/// Errors returned by [`ActivityLogger`](crate::ActivityLogger) calls.
///
/// Validation errors (`MissingField`, `NotImplemented`) are raised before
/// any network activity. Nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing required attribute: {0}")]
    MissingField(&'static str),

    #[error("not implemented: mixpanel's {0}")]
    NotImplemented(&'static str),

    #[error("transport failure for {url}: {message}")]
    TransportFailure { url: String, message: String },

    #[error("mixpanel error: {url} returned {status}")]
    RemoteRejected { status: u16, url: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown mutation verb: {0}")]
    UnknownVerb(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The URL of the attempted request, for dispatch failures.
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::TransportFailure { url, .. } | Error::RemoteRejected { url, .. } => Some(url),
            _ => None,
        }
    }
}

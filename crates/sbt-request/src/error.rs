use thiserror::Error;

/// Errors returned by the request page core.
///
/// Component entry points never hand these to their callers; they are
/// rendered through the [`Presenter`](crate::Presenter) or logged.
#[derive(Debug, Error)]
pub enum SbtError {
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("http error: {0}")]
    Http(String),

    #[error("{source_name} quote error: {reason}")]
    Quote {
        source_name: &'static str,
        reason: String,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("clipboard error: {0}")]
    Clipboard(String),

    #[error("user rejected connection")]
    ConnectionRejected,

    #[error("no accounts found")]
    NoAccounts,

    #[error("{0}")]
    Provider(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SbtError {
    pub(crate) fn quote(source_name: &'static str, reason: impl Into<String>) -> Self {
        Self::Quote {
            source_name,
            reason: reason.into(),
        }
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} is not being tracked")]
    NotFound(String),
    #[error("no account found for {0}")]
    AccountNotFound(String),
    #[error("ladder data unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("failed to deliver notification: {0}")]
    Delivery(String),
    #[error("failed to persist state")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

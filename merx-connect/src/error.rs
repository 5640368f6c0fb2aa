use thiserror::Error;

/// Failures talking to external collaborators
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("text generation returned no choices")]
    EmptyCompletion,

    #[error("could not build request signature: {0}")]
    Signing(String),
}

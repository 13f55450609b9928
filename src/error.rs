use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize)]
pub enum DutchpayError {
    /// Participant count must be at least one
    #[error("Invalid participant count: {0}")]
    InvalidParticipantCount(u32),

    /// Local validation failure; blocks step advancement, no request is made
    #[error("Invalid input for field `{0}`: {1}")]
    InvalidInput(String, String),

    /// Submission attempted before a receipt was attached
    #[error("No receipt attached")]
    MissingReceipt,

    /// Receipt recognition rejected the uploaded image
    #[error("Receipt recognition failed: {0}")]
    RecognitionFailure(String),

    /// Bank has no deep-link scheme mapping; no navigation is attempted
    #[error("Unknown bank: {0}")]
    UnknownBank(String),

    /// Settlement link does not resolve to a record
    #[error("Settlement link {0} not found")]
    NotFound(String),

    /// Request failed at the transport level or outside the 2xx range
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request exceeded the configured deadline
    #[error("Network timeout")]
    NetworkTimeout,
}

impl From<reqwest::Error> for DutchpayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DutchpayError::NetworkTimeout
        } else if err.status() == Some(reqwest::StatusCode::NOT_FOUND) {
            let path = err
                .url()
                .map(|url| url.path().to_string())
                .unwrap_or_default();
            DutchpayError::NotFound(path)
        } else {
            DutchpayError::NetworkError(err.to_string())
        }
    }
}

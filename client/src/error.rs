use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("service rejected {action}: {reason}")]
    Rejected { action: String, reason: String },

    #[error("service unreachable: {0}")]
    Unreachable(String),

    #[error("invalid response from service: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    Other(String),
}

use thiserror::Error;

/// Every way an operation can fail, normalized to one user-facing message via `Display`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    #[error("Please upload a PDF file only.")]
    NotPdf { content_type: String },
    #[error("File is too large ({actual} bytes); the limit is {max_bytes} bytes.")]
    TooLarge { max_bytes: u64, actual: u64 },
    #[error("Server error: {0}")]
    HttpStatus(u16),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request timed out: {0}")]
    Timeout(String),
    #[error("Malformed response from server: {0}")]
    Malformed(String),
    #[error("{0}")]
    Service(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    /// Rejected locally, before any network call.
    Validation,
    /// Unreachable service or non-success status.
    Transport,
    /// Transport succeeded but the payload reports or implies an error.
    Service,
}

impl Failure {
    pub fn category(&self) -> FailureCategory {
        match self {
            Failure::NotPdf { .. } | Failure::TooLarge { .. } => FailureCategory::Validation,
            Failure::HttpStatus(_) | Failure::Network(_) | Failure::Timeout(_) => {
                FailureCategory::Transport
            }
            Failure::Malformed(_) | Failure::Service(_) => FailureCategory::Service,
        }
    }
}

//! Error types for outbound port operations.

/// Directory fetch failures (the "transport error" of the catalog fetch).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("Directory request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("Directory returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The body could not be turned into countries.
    #[error("Invalid directory response: {0}")]
    Decode(String),
}

impl DirectoryError {
    pub fn request(message: impl ToString) -> Self {
        Self::Request(message.to_string())
    }

    pub fn decode(message: impl ToString) -> Self {
        Self::Decode(message.to_string())
    }

    /// Whether repeating the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(_) => true,
            // 408 and 429 are the only client errors worth repeating
            Self::Status { status, .. } => *status >= 500 || *status == 408 || *status == 429,
            Self::Decode(_) => false,
        }
    }
}

/// Shortlist blob encode/decode failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Failed to encode shortlist: {0}")]
    Encode(String),

    #[error("Stored shortlist is corrupt: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        assert!(DirectoryError::request("connection reset").is_transient());
        assert!(DirectoryError::Status {
            status: 503,
            body: String::new()
        }
        .is_transient());
        assert!(DirectoryError::Status {
            status: 429,
            body: String::new()
        }
        .is_transient());
        assert!(!DirectoryError::Status {
            status: 404,
            body: String::new()
        }
        .is_transient());
        assert!(!DirectoryError::decode("missing field `name`").is_transient());
    }
}

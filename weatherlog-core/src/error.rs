use thiserror::Error;

/// Failure taxonomy for the polling client.
///
/// `Api` and `Decode` are equivalent from a caller's point of view: the
/// endpoint was reached but did not yield a usable payload. They are kept
/// separate so operators can tell a server-side rejection from a contract
/// mismatch.
#[derive(Debug, Error)]
pub enum Error {
    #[error("POST {endpoint}: {reason}")]
    Auth { endpoint: String, reason: String },

    #[error("GET {endpoint}: returned {status}")]
    Api { status: u16, endpoint: String },

    #[error("GET {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("report file operation failed: {0}")]
    Io(#[from] std::io::Error),
}

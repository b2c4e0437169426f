use thiserror::Error;

/// Failure of a single remote call. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Non-2xx response. `message` is the body's `detail`, or a status-derived fallback.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never produced a response (connect failure, timeout, bad request build).
    #[error("{0}")]
    Transport(String),

    /// A 2xx response whose body did not match the expected shape.
    #[error("unexpected response from service: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn http_fallback_message(status: u16) -> String {
        format!("HTTP error, status {status}")
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

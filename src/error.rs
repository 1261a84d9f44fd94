use thiserror::Error;

/// Fixed message shown for any failed login; server detail is never echoed.
pub const INVALID_PASSWORD_MESSAGE: &str = "Invalid password.";

/// Shown inside the confirmation prompt when the typed text differs from the token.
pub const CONFIRMATION_MISMATCH_MESSAGE: &str = "Confirmation text does not match.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    /// The server answered 401; the session gate takes over.
    #[error("Unauthorized")]
    Unauthorized,

    /// Non-2xx (non-auth) response, or a transport failure when `status` is `None`.
    #[error("{message}")]
    RequestFailed {
        status: Option<u16>,
        message: String,
    },

    /// A 2xx response whose body is not the JSON we expected.
    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("{}", CONFIRMATION_MISMATCH_MESSAGE)]
    ConfirmationMismatch,

    #[error("{}", INVALID_PASSWORD_MESSAGE)]
    InvalidCredentials,
}

impl ConsoleError {
    pub fn request_failed(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            message: message.into(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        Self::RequestFailed {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;

use thiserror::Error;

/// Protocol level authentication failures reported by the client
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,
    /// The authenticate endpoint answered with a token other than `full` or
    /// `partial`
    #[error("unrecognized auth type: {0:?}")]
    UnrecognizedAuthType(String),
}

use thiserror::Error;

/// Failures reported by the storage contracts.
///
/// The engine inspects these by variant; only `Db` carries free-form detail.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("user not found")]
    UserNotFound,
    #[error("user already exists")]
    UserExists,
    #[error("app not found")]
    AppNotFound,
    #[error("storage error: {0}")]
    Db(String),
}

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password; the two are never told apart.
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("app not found")]
    AppNotFound,
    /// Dependency failure tagged with the engine operation that hit it.
    #[error("{op}: {message}")]
    Internal { op: &'static str, message: String },
}

/// Coarse classification of an [`AuthError`], stable across process boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidCredentials,
    UserAlreadyExists,
    AppNotFound,
    Internal,
}

impl AuthError {
    pub fn internal(op: &'static str, err: impl std::fmt::Display) -> Self {
        AuthError::Internal { op, message: err.to_string() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials => ErrorKind::InvalidCredentials,
            AuthError::UserAlreadyExists => ErrorKind::UserAlreadyExists,
            AuthError::AppNotFound => ErrorKind::AppNotFound,
            AuthError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self.kind() {
            ErrorKind::InvalidCredentials => 1004,
            ErrorKind::UserAlreadyExists => 1002,
            ErrorKind::AppNotFound => 1003,
            ErrorKind::Internal => 1200,
        }
    }
}

use service::auth::{AuthError, ErrorKind};
use thiserror::Error;
use tonic::Status;
use tracing::error;

/// Message returned for every internal failure; the cause stays in the server log.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal error";

/// Map an engine error to the status seen by the caller.
pub fn status_from(err: AuthError) -> Status {
    match err.kind() {
        ErrorKind::InvalidCredentials => Status::unauthenticated("invalid email or password"),
        ErrorKind::UserAlreadyExists => Status::already_exists("user already exists"),
        ErrorKind::AppNotFound => Status::not_found("app not found"),
        ErrorKind::Internal => {
            error!(error = %err, code = err.code(), "request failed with internal error");
            Status::internal(INTERNAL_ERROR_MESSAGE)
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cannot bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },
    #[error("grpc transport failed: {0}")]
    Transport(#[from] tonic::transport::Error),
}

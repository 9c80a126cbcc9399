//! Auth module: three-layer architecture (domain, repository, service).
//!
//! This module centralizes registration, login and admin lookups under the service crate.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod token;
pub mod repo;

pub use errors::{AuthError, ErrorKind, StorageError};
pub use service::{AuthConfig, AuthService};

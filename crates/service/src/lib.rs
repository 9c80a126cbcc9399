//! Service layer of the SSO core.
//! - `auth::service` is the engine: login, registration, admin lookup.
//! - `auth::token` issues per-app signed session tokens.
//! - `auth::repository` declares the storage contracts the engine consumes,
//!   with an in-memory implementation; `auth::repo` holds the database-backed one.

pub mod auth;

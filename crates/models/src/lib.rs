//! Persistence models for the SSO schema: sea-orm entities for `user` and
//! `app`, connection helpers and the small CRUD surface the storage layer needs.

pub mod errors;
pub mod db;
pub mod user;
pub mod app;

//! Process-level helpers shared by the SSO binaries: logging setup and
//! filesystem sanity checks run before the storage layer opens.

pub mod env;
pub mod utils;

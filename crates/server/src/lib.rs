//! gRPC transport for the SSO core: request validation, status mapping and
//! server startup around [`service::auth::AuthService`].

pub mod errors;
pub mod grpc;
pub mod proto;
pub mod startup;
pub mod validation;

pub use startup::run;

//! Generated code from `proto/sso/v1/sso.proto`.

// Suppress clippy warnings from generated tonic code
#![allow(clippy::derive_partial_eq_without_eq)]
#![allow(clippy::doc_markdown)]

pub mod sso {
    pub mod v1 {
        tonic::include_proto!("sso.v1");
    }
}

pub use sso::v1::*;

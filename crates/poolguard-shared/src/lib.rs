//! Code shared between the client and the test tooling

#![warn(unused_crate_dependencies)]

pub mod const_config;
pub mod errors;
pub mod files;
pub mod notifications;
pub mod pool;
pub mod pretty;
pub mod req_args;
pub mod session;
pub mod telemetry;
pub mod tfa;

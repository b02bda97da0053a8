//! Stores functionality that should be shared between different clients of
//! the pool manager backend
//! NB: The assumption is made that the async runtime has already been started
//! before any functions from this library are called

#![warn(unused_crate_dependencies)]

mod client;

pub use client::{AuthLevel, Client, NO_ARGS};

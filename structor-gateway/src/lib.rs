//! HTTP gateway for the Structor sandbox service.
//!
//! Exposes the sandbox operations through a single RPC endpoint and hosts
//! the sandbox preview desk and screenshot upload.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod mounts;
pub mod routes;

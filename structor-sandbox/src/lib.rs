//! Sandbox request facade for the Structor sandbox service.
//!
//! Receives per-operation requests, delegates them to the storage manager,
//! project compiler, generator manager and client manager collaborators, and
//! orchestrates sandbox code generation.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod collaborators;
pub mod config;
pub mod error;
pub mod facade;
pub mod remote;
pub mod rpc;
pub mod server;

pub use collaborators::{
    ClientManager, Collaborators, GeneratorManager, ProjectCompiler, StorageManager,
};
pub use config::SandboxConfig;
pub use error::SandboxError;
pub use facade::{GenerateOutcome, SandboxFacade, SANDBOX_COMPONENT_NAME, SANDBOX_GROUP_NAME};
pub use remote::RemoteCollaborators;
pub use rpc::Method;
pub use server::{SandboxMounts, ServerHandle, UploadTarget};

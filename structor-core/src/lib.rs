//! Core types for the Structor sandbox service.
//!
//! Defines the identifiers, per-operation request options, generator output
//! records and the default component model resolution shared by the sandbox
//! facade and the HTTP gateway.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod generator;
pub mod id;
pub mod model;
pub mod options;

pub use error::CoreError;
pub use generator::{FileDescriptor, GeneratorData};
pub use id::{GeneratorId, SampleId, UserId};
pub use model::{
    apply_default_model, resolve_default_model, DefaultModelResolution, DefaultModelSource,
    FallbackReason,
};
pub use options::{
    GenerateOptions, MessageOptions, PrepareOptions, PublishOptions, SampleOptions,
    SaveGeneratedOptions, WorkingDirectoryOptions, WriteFilesOptions,
};

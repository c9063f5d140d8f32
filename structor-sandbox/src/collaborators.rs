//! Collaborator abstraction traits.
//!
//! The facade only knows these call contracts. What a working copy is, how a
//! project compiles or where samples live is up to the implementation.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use structor_core::{FileDescriptor, GeneratorData, GeneratorId, SampleId, UserId};

use crate::SandboxError;

/// Manages the per-user working copy of a generator.
///
/// Concurrent calls are not serialized by the facade; implementations that
/// need mutual exclusion must provide it.
#[async_trait]
pub trait StorageManager: Send + Sync {
    /// Create a working copy of the generator for the user.
    ///
    /// # Errors
    /// Implementation defined; propagated unchanged by the facade.
    async fn make_working_copy(
        &self,
        generator_id: &GeneratorId,
        user_id: &UserId,
    ) -> Result<Value, SandboxError>;

    /// Delete the current working copy.
    ///
    /// # Errors
    /// Implementation defined; propagated unchanged by the facade.
    async fn delete_working_copy(&self) -> Result<Value, SandboxError>;
}

/// Compiles the working copy into the preview desk.
#[async_trait]
pub trait ProjectCompiler: Send + Sync {
    /// # Errors
    /// Implementation defined; propagated unchanged by the facade.
    async fn compile_working_copy(&self) -> Result<Value, SandboxError>;
}

/// Runs generators and persists their output.
#[async_trait]
pub trait GeneratorManager: Send + Sync {
    /// Build the initial generator data for a component.
    ///
    /// # Errors
    /// Implementation defined; propagated unchanged by the facade.
    async fn init_generator_data(
        &self,
        group_name: &str,
        component_name: &str,
        model: &Value,
        metadata: &Value,
    ) -> Result<GeneratorData, SandboxError>;

    /// Install the packages a generated component depends on.
    ///
    /// # Errors
    /// Implementation defined; propagated unchanged by the facade.
    async fn install_dependencies(&self, dependencies: &Value) -> Result<Value, SandboxError>;

    /// Write generated files into the project.
    ///
    /// # Errors
    /// Implementation defined; propagated unchanged by the facade.
    async fn save_generated(&self, files: &[FileDescriptor]) -> Result<Value, SandboxError>;
}

/// Talks to the generator sample catalogue and the sandbox workspace.
#[async_trait]
pub trait ClientManager: Send + Sync {
    /// # Errors
    /// Implementation defined; propagated unchanged by the facade.
    async fn get_generator_samples(&self) -> Result<Value, SandboxError>;

    /// # Errors
    /// Implementation defined; propagated unchanged by the facade.
    async fn sandbox_prepare(
        &self,
        generator_id: &GeneratorId,
        version: Option<&str>,
    ) -> Result<Value, SandboxError>;

    /// # Errors
    /// Implementation defined; propagated unchanged by the facade.
    async fn sandbox_read_files(&self, sample_id: &SampleId) -> Result<Value, SandboxError>;

    /// # Errors
    /// Implementation defined; propagated unchanged by the facade.
    async fn sandbox_write_files(
        &self,
        sample_id: &SampleId,
        files_object: &Value,
    ) -> Result<Value, SandboxError>;

    /// Run the sample's generator over `data` and return the generated files.
    ///
    /// # Errors
    /// Implementation defined; propagated unchanged by the facade.
    async fn sandbox_process(
        &self,
        sample_id: &SampleId,
        data: GeneratorData,
    ) -> Result<GeneratorData, SandboxError>;

    /// # Errors
    /// Implementation defined; propagated unchanged by the facade.
    async fn sandbox_publish(
        &self,
        sample_id: &SampleId,
        generator_key: &str,
        force_clone: bool,
    ) -> Result<Value, SandboxError>;
}

/// The full set of collaborators a [`crate::SandboxFacade`] delegates to.
#[derive(Clone)]
pub struct Collaborators {
    pub storage: Arc<dyn StorageManager>,
    pub compiler: Arc<dyn ProjectCompiler>,
    pub generator: Arc<dyn GeneratorManager>,
    pub client: Arc<dyn ClientManager>,
}

impl Collaborators {
    /// Use one value for every collaborator role.
    #[must_use]
    pub fn from_single<T>(backend: Arc<T>) -> Self
    where
        T: StorageManager + ProjectCompiler + GeneratorManager + ClientManager + 'static,
    {
        Self {
            storage: backend.clone(),
            compiler: backend.clone(),
            generator: backend.clone(),
            client: backend,
        }
    }
}

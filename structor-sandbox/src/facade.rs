//! Sandbox request facade.
//!
//! Translates sandbox requests into collaborator calls. Apart from
//! [`SandboxFacade::sandbox_generate`] every operation is a single
//! pass-through; collaborator errors are returned unchanged.

use std::sync::OnceLock;

use serde_json::Value;
use structor_core::model::apply_default_model;
use structor_core::{
    DefaultModelResolution, GenerateOptions, GeneratorData, MessageOptions, PrepareOptions,
    PublishOptions, SampleOptions, SaveGeneratedOptions, WorkingDirectoryOptions,
    WriteFilesOptions,
};

use crate::config::{SandboxConfig, PREVIEW_ROUTE, SCREENSHOT_ROUTE};
use crate::server::{SandboxMounts, ServerHandle, UploadTarget};
use crate::{Collaborators, SandboxError};

/// Group name passed to the generator by `sandboxGenerate`.
///
/// Placeholder: not derived from caller input.
pub const SANDBOX_GROUP_NAME: &str = "TestGroup";

/// Component name passed to the generator by `sandboxGenerate`.
///
/// Placeholder: not derived from caller input. Also names the
/// `<component>.json` default model file.
pub const SANDBOX_COMPONENT_NAME: &str = "TestComponent";

/// Result of [`SandboxFacade::sandbox_generate`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOutcome {
    /// Generated files with `default_model` resolved.
    pub data: GeneratorData,
    /// How the default model was obtained.
    pub resolution: DefaultModelResolution,
}

/// Entry point for every sandbox operation.
///
/// Holds no per-request state. The only shared state is the one-time
/// server registration.
pub struct SandboxFacade {
    config: SandboxConfig,
    collaborators: Collaborators,
    mounts: OnceLock<SandboxMounts>,
}

impl SandboxFacade {
    /// Create a facade over the given collaborators.
    #[must_use]
    pub fn new(config: SandboxConfig, collaborators: Collaborators) -> Self {
        Self {
            config,
            collaborators,
            mounts: OnceLock::new(),
        }
    }

    /// The sandbox layout this facade serves.
    #[must_use]
    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Routes registered by [`Self::set_server`], if any.
    #[must_use]
    pub fn mounts(&self) -> Option<&SandboxMounts> {
        self.mounts.get()
    }

    /// Register the preview mount and the screenshot upload on `server`.
    ///
    /// Returns `true` if routes were registered. `None` registers nothing.
    /// Only the first successful call registers; later calls are ignored.
    pub fn set_server(&self, server: Option<&mut dyn ServerHandle>) -> bool {
        let Some(server) = server else {
            tracing::debug!("no server handle, sandbox preview routes not registered");
            return false;
        };
        let mut registered = false;
        self.mounts.get_or_init(|| {
            let mounts = SandboxMounts {
                preview_route: PREVIEW_ROUTE,
                preview_dir: self.config.desk_dir(),
                upload_route: SCREENSHOT_ROUTE,
                upload: UploadTarget::screenshot(&self.config),
            };
            server.mount_static(mounts.preview_route, &mounts.preview_dir);
            server.mount_upload(mounts.upload_route, mounts.upload.clone());
            tracing::info!(
                preview = mounts.preview_route,
                desk = %mounts.preview_dir.display(),
                upload = mounts.upload_route,
                "sandbox preview routes registered"
            );
            registered = true;
            mounts
        });
        if !registered {
            tracing::warn!("sandbox server already set, ignoring");
        }
        registered
    }

    /// Echo `message` back.
    ///
    /// # Errors
    /// Never fails.
    #[allow(clippy::unused_async)]
    pub async fn loopback(&self, options: MessageOptions) -> Result<String, SandboxError> {
        Ok(format!("Response: {}", options.message))
    }

    /// Always fail with `message`.
    ///
    /// # Errors
    /// Always returns [`SandboxError::Rejected`] with `"Response: <message>"`.
    #[allow(clippy::unused_async)]
    pub async fn error(&self, options: MessageOptions) -> Result<String, SandboxError> {
        Err(SandboxError::Rejected(format!("Response: {}", options.message)))
    }

    /// # Errors
    /// Propagates [`crate::StorageManager::make_working_copy`] errors.
    pub async fn make_working_directory(
        &self,
        options: WorkingDirectoryOptions,
    ) -> Result<Value, SandboxError> {
        self.collaborators
            .storage
            .make_working_copy(&options.generator_id, &options.user_id)
            .await
    }

    /// # Errors
    /// Propagates [`crate::StorageManager::delete_working_copy`] errors.
    pub async fn remove_working_directory(&self) -> Result<Value, SandboxError> {
        self.collaborators.storage.delete_working_copy().await
    }

    /// # Errors
    /// Propagates [`crate::ProjectCompiler::compile_working_copy`] errors.
    pub async fn compile_working_desk(&self) -> Result<Value, SandboxError> {
        self.collaborators.compiler.compile_working_copy().await
    }

    /// # Errors
    /// Propagates client manager errors.
    pub async fn get_generator_samples(&self) -> Result<Value, SandboxError> {
        self.collaborators.client.get_generator_samples().await
    }

    /// # Errors
    /// Propagates client manager errors.
    pub async fn sandbox_prepare(&self, options: PrepareOptions) -> Result<Value, SandboxError> {
        self.collaborators
            .client
            .sandbox_prepare(&options.generator_id, options.version.as_deref())
            .await
    }

    /// # Errors
    /// Propagates client manager errors.
    pub async fn sandbox_read_files(&self, options: SampleOptions) -> Result<Value, SandboxError> {
        self.collaborators
            .client
            .sandbox_read_files(&options.sample_id)
            .await
    }

    /// # Errors
    /// Propagates client manager errors.
    pub async fn sandbox_write_files(
        &self,
        options: WriteFilesOptions,
    ) -> Result<Value, SandboxError> {
        self.collaborators
            .client
            .sandbox_write_files(&options.sample_id, &options.files_object)
            .await
    }

    /// Generate the sample's component and resolve its default model.
    ///
    /// 1. Initialise generator data for the placeholder group/component.
    /// 2. Let the client manager run the sample's generator over it.
    /// 3. Resolve `default_model` from the generated `TestComponent.json`,
    ///    falling back to `[{"type": "TestComponent"}]`.
    ///
    /// # Errors
    /// Propagates errors from generator initialisation and processing. A
    /// malformed model file is logged and never fails the operation.
    pub async fn sandbox_generate(
        &self,
        options: GenerateOptions,
    ) -> Result<GenerateOutcome, SandboxError> {
        let initial = self
            .collaborators
            .generator
            .init_generator_data(
                SANDBOX_GROUP_NAME,
                SANDBOX_COMPONENT_NAME,
                &options.model,
                &options.metadata,
            )
            .await?;

        let mut data = self
            .collaborators
            .client
            .sandbox_process(&options.sample_id, initial)
            .await?;

        let resolution = apply_default_model(&mut data, SANDBOX_COMPONENT_NAME);
        for error in &resolution.parse_errors {
            tracing::error!(
                sample = %options.sample_id,
                %error,
                "sandbox default model source code parsing failed"
            );
        }
        tracing::debug!(
            sample = %options.sample_id,
            files = data.files.len(),
            source = ?resolution.source,
            "sandbox generation complete"
        );

        Ok(GenerateOutcome { data, resolution })
    }

    /// Install dependencies, then save the generated files.
    ///
    /// # Errors
    /// Propagates installation errors, in which case nothing is saved, and
    /// save errors.
    pub async fn save_sandbox_generated(
        &self,
        options: SaveGeneratedOptions,
    ) -> Result<Value, SandboxError> {
        let generator = &self.collaborators.generator;
        generator.install_dependencies(&options.dependencies).await?;
        generator.save_generated(&options.files).await
    }

    /// # Errors
    /// Propagates client manager errors.
    pub async fn sandbox_publish(&self, options: PublishOptions) -> Result<Value, SandboxError> {
        self.collaborators
            .client
            .sandbox_publish(&options.sample_id, &options.generator_key, options.force_clone)
            .await
    }
}

//! Scripted in-memory collaborators shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use structor_core::{FileDescriptor, GeneratorData, GeneratorId, SampleId, UserId};
use structor_sandbox::{
    ClientManager, Collaborators, GeneratorManager, ProjectCompiler, SandboxConfig, SandboxError,
    SandboxFacade, StorageManager,
};

/// Collaborator double that records every call and answers from a script.
#[derive(Default)]
pub struct ScriptedBackend {
    pub calls: Mutex<Vec<String>>,
    /// Files `sandbox_process` returns.
    pub generated_files: Mutex<Vec<FileDescriptor>>,
    /// `default_model` `sandbox_process` returns.
    pub upstream_model: Mutex<Option<Value>>,
    pub init_error: Option<String>,
    pub process_error: Option<String>,
    pub install_error: Option<String>,
}

impl ScriptedBackend {
    pub fn with_files(files: Vec<FileDescriptor>) -> Self {
        Self {
            generated_files: Mutex::new(files),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().expect("calls lock").push(call.into());
    }

    fn fail_or(&self, error: Option<&String>, ok: Value) -> Result<Value, SandboxError> {
        match error {
            Some(msg) => Err(SandboxError::Rejected(msg.clone())),
            None => Ok(ok),
        }
    }
}

#[async_trait]
impl StorageManager for ScriptedBackend {
    async fn make_working_copy(
        &self,
        generator_id: &GeneratorId,
        user_id: &UserId,
    ) -> Result<Value, SandboxError> {
        self.record(format!("makeWorkingCopy({generator_id}, {user_id})"));
        Ok(json!({"generatorId": generator_id, "userId": user_id}))
    }

    async fn delete_working_copy(&self) -> Result<Value, SandboxError> {
        self.record("deleteWorkingCopy");
        Ok(json!(true))
    }
}

#[async_trait]
impl ProjectCompiler for ScriptedBackend {
    async fn compile_working_copy(&self) -> Result<Value, SandboxError> {
        self.record("compileWorkingCopy");
        Ok(json!({"compiled": true}))
    }
}

#[async_trait]
impl GeneratorManager for ScriptedBackend {
    async fn init_generator_data(
        &self,
        group_name: &str,
        component_name: &str,
        model: &Value,
        metadata: &Value,
    ) -> Result<GeneratorData, SandboxError> {
        self.record(format!(
            "initGeneratorData({group_name}, {component_name}, {model}, {metadata})"
        ));
        if let Some(msg) = &self.init_error {
            return Err(SandboxError::Rejected(msg.clone()));
        }
        Ok(GeneratorData::default())
    }

    async fn install_dependencies(&self, dependencies: &Value) -> Result<Value, SandboxError> {
        self.record(format!("installDependencies({dependencies})"));
        self.fail_or(self.install_error.as_ref(), json!("installed"))
    }

    async fn save_generated(&self, files: &[FileDescriptor]) -> Result<Value, SandboxError> {
        self.record(format!("saveGenerated({})", files.len()));
        Ok(json!("saved"))
    }
}

#[async_trait]
impl ClientManager for ScriptedBackend {
    async fn get_generator_samples(&self) -> Result<Value, SandboxError> {
        self.record("getGeneratorSamples");
        Ok(json!([{"sampleId": "button"}]))
    }

    async fn sandbox_prepare(
        &self,
        generator_id: &GeneratorId,
        version: Option<&str>,
    ) -> Result<Value, SandboxError> {
        self.record(format!("sandboxPrepare({generator_id}, {version:?})"));
        Ok(json!({"prepared": generator_id}))
    }

    async fn sandbox_read_files(&self, sample_id: &SampleId) -> Result<Value, SandboxError> {
        self.record(format!("sandboxReadFiles({sample_id})"));
        Ok(json!({"index.js": "export default 1;"}))
    }

    async fn sandbox_write_files(
        &self,
        sample_id: &SampleId,
        files_object: &Value,
    ) -> Result<Value, SandboxError> {
        self.record(format!("sandboxWriteFiles({sample_id}, {files_object})"));
        Ok(json!(true))
    }

    async fn sandbox_process(
        &self,
        sample_id: &SampleId,
        mut data: GeneratorData,
    ) -> Result<GeneratorData, SandboxError> {
        self.record(format!("sandboxProcess({sample_id})"));
        if let Some(msg) = &self.process_error {
            return Err(SandboxError::Rejected(msg.clone()));
        }
        data.files = self.generated_files.lock().expect("files lock").clone();
        data.default_model = self.upstream_model.lock().expect("model lock").clone();
        Ok(data)
    }

    async fn sandbox_publish(
        &self,
        sample_id: &SampleId,
        generator_key: &str,
        force_clone: bool,
    ) -> Result<Value, SandboxError> {
        self.record(format!("sandboxPublish({sample_id}, {generator_key}, {force_clone})"));
        Ok(json!({"published": generator_key}))
    }
}

pub fn facade_over(backend: &Arc<ScriptedBackend>) -> SandboxFacade {
    SandboxFacade::new(
        SandboxConfig::new("/tmp/structor-sandbox"),
        Collaborators::from_single(Arc::clone(backend)),
    )
}

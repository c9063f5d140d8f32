//! Collaborators backed by a remote HTTP service.
//!
//! Every collaborator call becomes `POST <base>/<collaborator>/<operation>`
//! with a JSON body `{"args": [...]}`. A 2xx response body is the result,
//! anything else is a rejection carrying the service's error message.

use async_trait::async_trait;
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Uri};
use hyper_util::rt::TokioIo;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use structor_core::{FileDescriptor, GeneratorData, GeneratorId, SampleId, UserId};
use tokio::net::TcpStream;

use crate::{ClientManager, GeneratorManager, ProjectCompiler, SandboxError, StorageManager};

const STORAGE: &str = "storageManager";
const COMPILER: &str = "projectCompiler";
const GENERATOR: &str = "generatorManager";
const CLIENT: &str = "clientManager";

/// All four collaborator roles served by one remote backend.
#[derive(Debug, Clone)]
pub struct RemoteCollaborators {
    /// `host:port` to connect to.
    authority: String,
    /// Path prefix without a trailing slash.
    base_path: String,
}

impl RemoteCollaborators {
    /// Create a client for the backend at `base_url`, e.g. `http://127.0.0.1:2301/api`.
    ///
    /// # Errors
    /// Returns [`SandboxError::Transport`] if the URL is not a plain `http://` URL.
    pub fn new(base_url: &str) -> Result<Self, SandboxError> {
        let uri: Uri = base_url
            .parse()
            .map_err(|e| SandboxError::Transport(format!("invalid backend URL {base_url}: {e}")))?;
        if uri.scheme_str() != Some("http") {
            return Err(SandboxError::Transport(format!(
                "unsupported backend URL {base_url}; expected http://"
            )));
        }
        let authority = uri
            .authority()
            .ok_or_else(|| SandboxError::Transport(format!("backend URL {base_url} has no host")))?;
        let port = authority.port_u16().unwrap_or(80);

        Ok(Self {
            authority: format!("{}:{port}", authority.host()),
            base_path: uri.path().trim_end_matches('/').to_owned(),
        })
    }

    fn path_for(&self, collaborator: &str, operation: &str) -> String {
        format!("{}/{collaborator}/{operation}", self.base_path)
    }

    /// Invoke `operation` on `collaborator` and return the raw JSON result.
    async fn call(
        &self,
        collaborator: &str,
        operation: &str,
        args: Value,
    ) -> Result<Value, SandboxError> {
        let path = self.path_for(collaborator, operation);
        let stream = TcpStream::connect(&self.authority)
            .await
            .map_err(|e| SandboxError::Transport(format!("connect to {}: {e}", self.authority)))?;

        let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
            .await
            .map_err(|e| SandboxError::Transport(format!("HTTP handshake: {e}")))?;

        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::debug!("collaborator connection closed: {e}");
            }
        });

        let body = Bytes::from(json!({ "args": args }).to_string());
        let req = Request::builder()
            .method(Method::POST)
            .uri(path.as_str())
            .header("Host", self.authority.as_str())
            .header("Content-Type", "application/json")
            .header("Content-Length", body.len().to_string())
            .body(Full::new(body))
            .map_err(|e| SandboxError::Transport(format!("build request: {e}")))?;

        tracing::debug!(%collaborator, %operation, "calling remote collaborator");

        let resp = sender
            .send_request(req)
            .await
            .map_err(|e| SandboxError::Transport(format!("send request: {e}")))?;

        let status = resp.status();
        let bytes = resp
            .into_body()
            .collect()
            .await
            .map_err(|e| SandboxError::Transport(format!("read response body: {e}")))?
            .to_bytes();

        if !status.is_success() {
            return Err(SandboxError::Rejected(rejection_message(status, &bytes)));
        }
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| SandboxError::Transport(format!("invalid JSON from {path}: {e}")))
    }

    async fn call_as<T: DeserializeOwned>(
        &self,
        collaborator: &str,
        operation: &str,
        args: Value,
    ) -> Result<T, SandboxError> {
        let value = self.call(collaborator, operation, args).await?;
        serde_json::from_value(value).map_err(|e| {
            SandboxError::Transport(format!("unexpected {collaborator}.{operation} result: {e}"))
        })
    }
}

/// The service's `error` string if it sent one, else the body or the status.
fn rejection_message(status: hyper::StatusCode, body: &[u8]) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) {
        if let Some(Value::String(message)) = map.get("error") {
            return message.clone();
        }
    }
    let text = String::from_utf8_lossy(body).trim().to_owned();
    if text.is_empty() {
        format!("HTTP {status}")
    } else {
        text
    }
}

#[async_trait]
impl StorageManager for RemoteCollaborators {
    async fn make_working_copy(
        &self,
        generator_id: &GeneratorId,
        user_id: &UserId,
    ) -> Result<Value, SandboxError> {
        self.call(STORAGE, "makeWorkingCopy", json!([generator_id, user_id]))
            .await
    }

    async fn delete_working_copy(&self) -> Result<Value, SandboxError> {
        self.call(STORAGE, "deleteWorkingCopy", json!([])).await
    }
}

#[async_trait]
impl ProjectCompiler for RemoteCollaborators {
    async fn compile_working_copy(&self) -> Result<Value, SandboxError> {
        self.call(COMPILER, "compileWorkingCopy", json!([])).await
    }
}

#[async_trait]
impl GeneratorManager for RemoteCollaborators {
    async fn init_generator_data(
        &self,
        group_name: &str,
        component_name: &str,
        model: &Value,
        metadata: &Value,
    ) -> Result<GeneratorData, SandboxError> {
        self.call_as(
            GENERATOR,
            "initGeneratorData",
            json!([group_name, component_name, model, metadata]),
        )
        .await
    }

    async fn install_dependencies(&self, dependencies: &Value) -> Result<Value, SandboxError> {
        self.call(GENERATOR, "installDependencies", json!([dependencies]))
            .await
    }

    async fn save_generated(&self, files: &[FileDescriptor]) -> Result<Value, SandboxError> {
        self.call(GENERATOR, "saveGenerated", json!([files])).await
    }
}

#[async_trait]
impl ClientManager for RemoteCollaborators {
    async fn get_generator_samples(&self) -> Result<Value, SandboxError> {
        self.call(CLIENT, "getGeneratorSamples", json!([])).await
    }

    async fn sandbox_prepare(
        &self,
        generator_id: &GeneratorId,
        version: Option<&str>,
    ) -> Result<Value, SandboxError> {
        self.call(CLIENT, "sandboxPrepare", json!([generator_id, version]))
            .await
    }

    async fn sandbox_read_files(&self, sample_id: &SampleId) -> Result<Value, SandboxError> {
        self.call(CLIENT, "sandboxReadFiles", json!([sample_id])).await
    }

    async fn sandbox_write_files(
        &self,
        sample_id: &SampleId,
        files_object: &Value,
    ) -> Result<Value, SandboxError> {
        self.call(CLIENT, "sandboxWriteFiles", json!([sample_id, files_object]))
            .await
    }

    async fn sandbox_process(
        &self,
        sample_id: &SampleId,
        data: GeneratorData,
    ) -> Result<GeneratorData, SandboxError> {
        self.call_as(CLIENT, "sandboxProcess", json!([sample_id, data]))
            .await
    }

    async fn sandbox_publish(
        &self,
        sample_id: &SampleId,
        generator_key: &str,
        force_clone: bool,
    ) -> Result<Value, SandboxError> {
        self.call(
            CLIENT,
            "sandboxPublish",
            json!([sample_id, generator_key, force_clone]),
        )
        .await
    }
}

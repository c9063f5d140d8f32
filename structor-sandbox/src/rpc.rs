//! RPC method table.
//!
//! Maps dispatcher method names onto [`SandboxFacade`] operations and
//! converts between the loosely-typed JSON records on the wire and the
//! per-operation option structs.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{SandboxError, SandboxFacade};

/// Operations callable through [`SandboxFacade::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Loopback,
    Error,
    MakeWorkingDirectory,
    RemoveWorkingDirectory,
    CompileWorkingDesk,
    GetGeneratorSamples,
    SandboxPrepare,
    SandboxReadFiles,
    SandboxWriteFiles,
    SandboxGenerate,
    SaveSandboxGenerated,
    SandboxPublish,
}

impl Method {
    /// Every dispatchable method.
    pub const ALL: [Method; 12] = [
        Method::Loopback,
        Method::Error,
        Method::MakeWorkingDirectory,
        Method::RemoveWorkingDirectory,
        Method::CompileWorkingDesk,
        Method::GetGeneratorSamples,
        Method::SandboxPrepare,
        Method::SandboxReadFiles,
        Method::SandboxWriteFiles,
        Method::SandboxGenerate,
        Method::SaveSandboxGenerated,
        Method::SandboxPublish,
    ];

    /// The wire name of the method.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Method::Loopback => "loopback",
            Method::Error => "error",
            Method::MakeWorkingDirectory => "makeWorkingDirectory",
            Method::RemoveWorkingDirectory => "removeWorkingDirectory",
            Method::CompileWorkingDesk => "compileWorkingDesk",
            Method::GetGeneratorSamples => "getGeneratorSamples",
            Method::SandboxPrepare => "sandboxPrepare",
            Method::SandboxReadFiles => "sandboxReadFiles",
            Method::SandboxWriteFiles => "sandboxWriteFiles",
            Method::SandboxGenerate => "sandboxGenerate",
            Method::SaveSandboxGenerated => "saveSandboxGenerated",
            Method::SandboxPublish => "sandboxPublish",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = SandboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| SandboxError::UnknownMethod(s.to_owned()))
    }
}

fn parse_options<T: DeserializeOwned>(method: Method, options: Value) -> Result<T, SandboxError> {
    // A missing options record reads as an empty one.
    let options = match options {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };
    serde_json::from_value(options).map_err(|e| SandboxError::InvalidOptions {
        method: method.name(),
        reason: e.to_string(),
    })
}

fn to_value<T: Serialize>(method: Method, result: &T) -> Result<Value, SandboxError> {
    serde_json::to_value(result)
        .map_err(|e| SandboxError::Rejected(format!("{method}: failed to encode response: {e}")))
}

impl SandboxFacade {
    /// Run `method` with the raw options record and return its JSON result.
    ///
    /// # Errors
    /// Returns [`SandboxError::InvalidOptions`] if `options` does not fit the
    /// method, otherwise whatever the operation returns.
    pub async fn dispatch(&self, method: Method, options: Value) -> Result<Value, SandboxError> {
        let invocation = Uuid::new_v4();
        tracing::debug!(%invocation, %method, "sandbox invocation");

        let result = match method {
            Method::Loopback => self
                .loopback(parse_options(method, options)?)
                .await
                .map(Value::String),
            Method::Error => self
                .error(parse_options(method, options)?)
                .await
                .map(Value::String),
            Method::MakeWorkingDirectory => {
                self.make_working_directory(parse_options(method, options)?).await
            }
            Method::RemoveWorkingDirectory => self.remove_working_directory().await,
            Method::CompileWorkingDesk => self.compile_working_desk().await,
            Method::GetGeneratorSamples => self.get_generator_samples().await,
            Method::SandboxPrepare => self.sandbox_prepare(parse_options(method, options)?).await,
            Method::SandboxReadFiles => {
                self.sandbox_read_files(parse_options(method, options)?).await
            }
            Method::SandboxWriteFiles => {
                self.sandbox_write_files(parse_options(method, options)?).await
            }
            Method::SandboxGenerate => {
                let outcome = self.sandbox_generate(parse_options(method, options)?).await?;
                to_value(method, &outcome.data)
            }
            Method::SaveSandboxGenerated => {
                self.save_sandbox_generated(parse_options(method, options)?).await
            }
            Method::SandboxPublish => self.sandbox_publish(parse_options(method, options)?).await,
        };

        if let Err(e) = &result {
            tracing::debug!(%invocation, %method, error = %e, "sandbox invocation failed");
        }
        result
    }
}

//! Generator output types passed between the generator manager and the
//! client manager.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single generated file.
///
/// Fields other than the output name and source text are carried through
/// untouched so collaborators can round-trip their own metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    /// File name the generator writes, e.g. `TestComponent.json`.
    #[serde(default)]
    pub output_file_name: String,

    /// Generated source text.
    #[serde(default)]
    pub source_code: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FileDescriptor {
    /// Create a descriptor with no extra fields.
    #[must_use]
    pub fn new(output_file_name: impl Into<String>, source_code: impl Into<String>) -> Self {
        Self {
            output_file_name: output_file_name.into(),
            source_code: source_code.into(),
            extra: Map::new(),
        }
    }
}

/// Record produced by code generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorData {
    /// Generated files in generator order.
    #[serde(default)]
    pub files: Vec<FileDescriptor>,

    /// Component model used to preview the generated component.
    ///
    /// Holds whatever the collaborators produced until the sandbox resolves
    /// it to a non-empty array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GeneratorData {
    /// Create generator data holding only `files`.
    #[must_use]
    pub fn with_files(files: Vec<FileDescriptor>) -> Self {
        Self {
            files,
            ..Self::default()
        }
    }
}

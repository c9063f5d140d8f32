//! Per-operation request options.
//!
//! Each sandbox operation receives one of these, deserialized from the
//! camelCase record the dispatcher sends. Absent required fields are a
//! deserialization error; optional fields document their default.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::generator::FileDescriptor;
use crate::id::{GeneratorId, RawId, SampleId, UserId};

/// Options for `loopback` and `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageOptions {
    pub message: String,
}

/// Options for `makeWorkingDirectory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingDirectoryOptions {
    pub generator_id: GeneratorId,
    pub user_id: UserId,
}

/// Options for `sandboxPrepare`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepareOptions {
    pub generator_id: GeneratorId,
    /// Generator version to prepare. `None` lets the client manager pick.
    /// A numeric version is kept in its decimal form.
    #[serde(default, deserialize_with = "optional_version")]
    pub version: Option<String>,
}

fn optional_version<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(de)?.map(|raw| match raw {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    }))
}

/// Options for `sandboxReadFiles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleOptions {
    pub sample_id: SampleId,
}

/// Options for `sandboxWriteFiles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteFilesOptions {
    pub sample_id: SampleId,
    /// Opaque file map understood by the client manager.
    pub files_object: Value,
}

/// Options for `sandboxGenerate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOptions {
    pub sample_id: SampleId,
    /// Project metadata forwarded to the generator. Defaults to `null`.
    #[serde(default)]
    pub metadata: Value,
    /// Component model forwarded to the generator. Defaults to `null`.
    #[serde(default)]
    pub model: Value,
}

/// Options for `saveSandboxGenerated`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveGeneratedOptions {
    pub files: Vec<FileDescriptor>,
    /// Dependency description passed to the installer. Defaults to `null`.
    #[serde(default)]
    pub dependencies: Value,
}

/// Options for `sandboxPublish`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishOptions {
    pub sample_id: SampleId,
    pub generator_key: String,
    /// Clone the generator even if one with the same key exists. Defaults to `false`.
    #[serde(default)]
    pub force_clone: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn publish_options_force_clone_defaults_to_false() {
        let opts: PublishOptions =
            match serde_json::from_value(json!({"sampleId": "s1", "generatorKey": "acme/button"})) {
                Ok(o) => o,
                Err(e) => panic!("deserialization failed: {e}"),
            };
        assert!(!opts.force_clone);
        assert_eq!(opts.generator_key, "acme/button");
    }

    #[test]
    fn generate_options_absent_model_and_metadata_are_null() {
        let opts: GenerateOptions = match serde_json::from_value(json!({"sampleId": 3})) {
            Ok(o) => o,
            Err(e) => panic!("deserialization failed: {e}"),
        };
        assert_eq!(opts.sample_id.as_str(), "3");
        assert!(opts.model.is_null());
        assert!(opts.metadata.is_null());
    }

    #[test]
    fn working_directory_options_require_both_ids() {
        let missing_user =
            serde_json::from_value::<WorkingDirectoryOptions>(json!({"generatorId": "g"}));
        assert!(missing_user.is_err(), "userId is required");

        let ok = serde_json::from_value::<WorkingDirectoryOptions>(
            json!({"generatorId": "g", "userId": "u"}),
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn prepare_options_version_is_optional() {
        let opts: PrepareOptions = match serde_json::from_value(json!({"generatorId": "g"})) {
            Ok(o) => o,
            Err(e) => panic!("deserialization failed: {e}"),
        };
        assert!(opts.version.is_none());
    }

    #[test]
    fn prepare_options_version_accepts_string_and_number() {
        let text: PrepareOptions =
            match serde_json::from_value(json!({"generatorId": "g", "version": "2.0.0"})) {
                Ok(o) => o,
                Err(e) => panic!("deserialization failed: {e}"),
            };
        assert_eq!(text.version.as_deref(), Some("2.0.0"));

        let number: PrepareOptions =
            match serde_json::from_value(json!({"generatorId": "g", "version": 2})) {
                Ok(o) => o,
                Err(e) => panic!("numeric version rejected: {e}"),
            };
        assert_eq!(number.version.as_deref(), Some("2"));

        let null: PrepareOptions =
            match serde_json::from_value(json!({"generatorId": "g", "version": null})) {
                Ok(o) => o,
                Err(e) => panic!("null version rejected: {e}"),
            };
        assert!(null.version.is_none());
    }
}

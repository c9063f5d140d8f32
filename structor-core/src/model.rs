//! Default component model resolution for generated sandbox output.
//!
//! After generation the sandbox looks for a `<component>.json` file among the
//! generated files and uses its parsed contents as the preview model. Anything
//! that does not yield a non-empty array falls back to a single entry naming
//! the component.

use serde_json::{json, Value};

use crate::generator::{FileDescriptor, GeneratorData};

/// Why the default model fell back to the single-entry default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No model file was generated and no model was supplied upstream.
    Missing,
    /// The model file could not be parsed; holds the last parse error.
    ParseFailed(String),
    /// The resolved value was not an array.
    NotAnArray,
    /// The resolved value was an empty array.
    Empty,
}

/// Where the resolved default model came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultModelSource {
    /// Parsed from the generated `<component>.json` file.
    ModelFile,
    /// Already present on the generator data before resolution.
    Upstream,
    /// Replaced by `[{"type": <component>}]`.
    Fallback(FallbackReason),
}

/// Outcome of [`resolve_default_model`].
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultModelResolution {
    /// The resolved model, always a non-empty array.
    pub model: Vec<Value>,
    pub source: DefaultModelSource,
    /// Parse errors for every matching model file that failed to parse, in
    /// file order.
    pub parse_errors: Vec<String>,
}

impl DefaultModelResolution {
    /// `true` when the single-entry default was used.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, DefaultModelSource::Fallback(_))
    }
}

/// File name holding the default model for `component_name`.
#[must_use]
pub fn model_file_name(component_name: &str) -> String {
    format!("{component_name}.json")
}

/// The single-entry model used when nothing better is available.
#[must_use]
pub fn fallback_model(component_name: &str) -> Vec<Value> {
    vec![json!({ "type": component_name })]
}

/// Resolve the default model from `files`, starting from `existing`.
///
/// Every file named `<component_name>.json` is parsed in order; each
/// successful parse replaces the current value, a failed parse leaves it
/// as it was and is recorded in `parse_errors`.
#[must_use]
pub fn resolve_default_model(
    files: &[FileDescriptor],
    component_name: &str,
    existing: Option<Value>,
) -> DefaultModelResolution {
    let file_name = model_file_name(component_name);
    let mut current = existing.map(|v| (v, DefaultModelSource::Upstream));
    let mut parse_errors = Vec::new();

    for file in files.iter().filter(|f| f.output_file_name == file_name) {
        match serde_json::from_str::<Value>(&file.source_code) {
            Ok(value) => current = Some((value, DefaultModelSource::ModelFile)),
            Err(e) => parse_errors.push(e.to_string()),
        }
    }

    let fallback = |reason| DefaultModelResolution {
        model: fallback_model(component_name),
        source: DefaultModelSource::Fallback(reason),
        parse_errors: parse_errors.clone(),
    };

    match current {
        Some((Value::Array(items), source)) if !items.is_empty() => DefaultModelResolution {
            model: items,
            source,
            parse_errors: parse_errors.clone(),
        },
        Some((Value::Array(_), _)) => fallback(FallbackReason::Empty),
        Some(_) => fallback(FallbackReason::NotAnArray),
        None => match parse_errors.last() {
            Some(last) => fallback(FallbackReason::ParseFailed(last.clone())),
            None => fallback(FallbackReason::Missing),
        },
    }
}

/// Resolve and store the default model on `data`.
///
/// Returns the resolution so callers can tell which branch was taken.
pub fn apply_default_model(
    data: &mut GeneratorData,
    component_name: &str,
) -> DefaultModelResolution {
    let resolution = resolve_default_model(&data.files, component_name, data.default_model.take());
    data.default_model = Some(Value::Array(resolution.model.clone()));
    resolution
}

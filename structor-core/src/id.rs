use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Wire form of an identifier: dispatchers send either a string or a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(serde_json::Number),
}

fn normalize(kind: &'static str, raw: RawId) -> Result<String, CoreError> {
    let value = match raw {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    };
    if value.trim().is_empty() {
        return Err(CoreError::InvalidIdentifier {
            kind,
            reason: "must not be empty".to_owned(),
        });
    }
    Ok(value)
}

/// Identifies a generator in the generator catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawId", into = "String")]
pub struct GeneratorId(String);

impl GeneratorId {
    /// Creates a `GeneratorId`, rejecting empty values.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidIdentifier`] if `id` is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        normalize("generator id", RawId::Text(id.into())).map(Self)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<RawId> for GeneratorId {
    type Error = CoreError;

    fn try_from(raw: RawId) -> Result<Self, Self::Error> {
        normalize("generator id", raw).map(Self)
    }
}

impl From<GeneratorId> for String {
    fn from(id: GeneratorId) -> Self {
        id.0
    }
}

impl fmt::Display for GeneratorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies a user of the sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawId", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Creates a `UserId`, rejecting empty values.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidIdentifier`] if `id` is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        normalize("user id", RawId::Text(id.into())).map(Self)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<RawId> for UserId {
    type Error = CoreError;

    fn try_from(raw: RawId) -> Result<Self, Self::Error> {
        normalize("user id", raw).map(Self)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies a generator sample loaded into the sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawId", into = "String")]
pub struct SampleId(String);

impl SampleId {
    /// Creates a `SampleId`, rejecting empty values.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidIdentifier`] if `id` is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        normalize("sample id", RawId::Text(id.into())).map(Self)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<RawId> for SampleId {
    type Error = CoreError;

    fn try_from(raw: RawId) -> Result<Self, Self::Error> {
        normalize("sample id", raw).map(Self)
    }
}

impl From<SampleId> for String {
    fn from(id: SampleId) -> Self {
        id.0
    }
}

impl fmt::Display for SampleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

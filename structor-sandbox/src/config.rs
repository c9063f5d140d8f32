//! Sandbox directory layout.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Route serving the compiled preview desk.
pub const PREVIEW_ROUTE: &str = "/structor-sandbox-preview";

/// Route accepting the preview screenshot upload.
pub const SCREENSHOT_ROUTE: &str = "/structor-sandbox-screenshot";

/// Multipart field carrying the screenshot.
pub const SCREENSHOT_FIELD: &str = "screenshot";

/// Every upload is stored under this name, replacing the previous one.
pub const SCREENSHOT_FILE_NAME: &str = "screenshot.png";

/// Location of the sandbox on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxConfig {
    /// Root directory of the sandbox workspace.
    pub sandbox_dir: PathBuf,
}

impl SandboxConfig {
    /// Create a config rooted at `sandbox_dir`.
    #[must_use]
    pub fn new(sandbox_dir: impl Into<PathBuf>) -> Self {
        Self {
            sandbox_dir: sandbox_dir.into(),
        }
    }

    /// Root directory of the sandbox workspace.
    #[must_use]
    pub fn sandbox_dir(&self) -> &Path {
        &self.sandbox_dir
    }

    /// Compiled preview desk: `<sandbox>/work/.structor/desk`.
    #[must_use]
    pub fn desk_dir(&self) -> PathBuf {
        self.sandbox_dir.join("work").join(".structor").join("desk")
    }

    /// Directory the screenshot upload is written to.
    #[must_use]
    pub fn screenshot_dir(&self) -> PathBuf {
        self.desk_dir().join("assets").join("img")
    }
}

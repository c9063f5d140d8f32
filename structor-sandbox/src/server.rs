//! Hosting server registration contract.
//!
//! The facade does not own an HTTP server. The host hands it a
//! [`ServerHandle`] once at startup and the facade registers the preview
//! mount and the screenshot upload through it.

use std::path::{Path, PathBuf};

use crate::config::{SandboxConfig, SCREENSHOT_FIELD, SCREENSHOT_FILE_NAME};

/// Where an uploaded file is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    /// Multipart field carrying the file.
    pub field_name: &'static str,
    /// Destination directory.
    pub dir: PathBuf,
    /// Fixed file name; each upload overwrites the previous file.
    pub file_name: &'static str,
}

impl UploadTarget {
    /// The screenshot target for `config`.
    #[must_use]
    pub fn screenshot(config: &SandboxConfig) -> Self {
        Self {
            field_name: SCREENSHOT_FIELD,
            dir: config.screenshot_dir(),
            file_name: SCREENSHOT_FILE_NAME,
        }
    }

    /// Full destination path of the uploaded file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(self.file_name)
    }
}

/// A server the facade can register routes on.
pub trait ServerHandle {
    /// Serve the files under `dir` at `route`.
    fn mount_static(&mut self, route: &str, dir: &Path);

    /// Accept a single-file upload at `route`, stored per `target`.
    fn mount_upload(&mut self, route: &str, target: UploadTarget);
}

/// What [`crate::SandboxFacade::set_server`] registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxMounts {
    pub preview_route: &'static str,
    pub preview_dir: PathBuf,
    pub upload_route: &'static str,
    pub upload: UploadTarget,
}

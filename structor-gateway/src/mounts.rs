//! axum implementation of the sandbox [`ServerHandle`].
//!
//! Static mounts are served with `tower-http`'s `ServeDir`; uploads are
//! parsed with axum's multipart extractor and written to the fixed target.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        DefaultBodyLimit,
    },
    http::StatusCode,
    routing::post,
    Router,
};
use structor_sandbox::{ServerHandle, UploadTarget};
use tower_http::services::ServeDir;

use crate::error::GatewayError;

/// Largest accepted screenshot upload.
const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// A router under construction that the sandbox facade can mount routes on.
#[derive(Debug, Default)]
pub struct AxumServer {
    router: Router,
}

impl AxumServer {
    /// Wrap an existing router.
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Finish construction and return the router.
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }
}

impl ServerHandle for AxumServer {
    fn mount_static(&mut self, route: &str, dir: &Path) {
        let router = std::mem::take(&mut self.router);
        self.router = router.nest_service(route, ServeDir::new(dir));
    }

    fn mount_upload(&mut self, route: &str, target: UploadTarget) {
        let target = Arc::new(target);
        let handler = post(move |multipart: Result<Multipart, MultipartRejection>| {
            let target = Arc::clone(&target);
            async move {
                match multipart {
                    Ok(multipart) => store_upload(&target, multipart).await,
                    // Not a multipart request: nothing to store.
                    Err(MultipartRejection::InvalidBoundary(_)) => {
                        tracing::debug!("upload without a multipart body, nothing stored");
                        Ok(StatusCode::NO_CONTENT)
                    }
                    Err(e) => Err(GatewayError::InvalidRequest(e.body_text())),
                }
            }
        })
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

        let router = std::mem::take(&mut self.router);
        self.router = router.route(route, handler);
    }
}

/// Write the single file field named by `target`, replacing any previous file.
///
/// A body without that file still succeeds. Text fields are ignored under
/// any name, including the target's; file fields under any other name, or a
/// second file under the right name, are rejected.
///
/// # Errors
/// Returns [`GatewayError::InvalidRequest`] for malformed or unexpected
/// fields and [`GatewayError::Upload`] if the file cannot be written.
pub async fn store_upload(
    target: &UploadTarget,
    mut multipart: Multipart,
) -> Result<StatusCode, GatewayError> {
    let mut stored = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| GatewayError::InvalidRequest(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_owned();
        let is_file = field.file_name().is_some();

        if !is_file {
            continue;
        }
        if name != target.field_name {
            return Err(GatewayError::InvalidRequest(format!(
                "unexpected file field '{name}'"
            )));
        }
        if stored {
            return Err(GatewayError::InvalidRequest(format!(
                "more than one '{name}' file"
            )));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| GatewayError::InvalidRequest(format!("failed to read '{name}': {e}")))?;

        tokio::fs::create_dir_all(&target.dir)
            .await
            .map_err(|e| GatewayError::Upload(format!("{}: {e}", target.dir.display())))?;
        let path = target.path();
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| GatewayError::Upload(format!("{}: {e}", path.display())))?;

        tracing::info!(path = %path.display(), size = data.len(), "upload stored");
        stored = true;
    }

    Ok(StatusCode::NO_CONTENT)
}

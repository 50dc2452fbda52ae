//! Falcon embedding upload.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::instrument;

use crate::client::Falcon;
use crate::error::{Error, Result};

/// Extension reported for an uploaded file.
///
/// This is everything after the last `.` of the full path string. A path
/// without any `.` yields the whole path.
#[must_use]
pub fn file_extension(path: &Path) -> String {
    let path = path.to_string_lossy();
    path.rsplit_once('.')
        .map_or_else(|| path.to_string(), |(_, ext)| ext.to_owned())
}

impl Falcon {
    /// Upload files so the service can build embeddings from them.
    ///
    /// Every file is read fully before anything is sent. The form carries one
    /// `extension` field per path followed by one `file` part per path, both
    /// in the order given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] for an empty path list,
    /// [`Error::Io`] naming the first unreadable path,
    /// [`Error::HttpStatus`] for a non-2xx answer and
    /// [`Error::Network`] for transport failures.
    #[instrument(skip(self, paths), fields(host = %self.host_name_port(), files = paths.len()))]
    pub async fn create_embedding<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Result<Value> {
        if paths.is_empty() {
            return Err(Error::invalid_request("no files to embed"));
        }

        let mut files = Vec::with_capacity(paths.len());
        let mut form = Form::new();

        for path in paths {
            let path = path.as_ref();
            let contents = tokio::fs::read(path)
                .await
                .map_err(|e| Error::io(path, e))?;

            let mut part = Part::bytes(contents);
            if let Some(name) = path.file_name() {
                part = part.file_name(name.to_string_lossy().into_owned());
            }

            files.push(part);
            form = form.text("extension", file_extension(path));
        }

        for part in files {
            form = form.part("file", part);
        }

        let url = self.embedding_url();
        tracing::debug!(%url, "uploading files for embedding");

        let response = self.client().post(&url).multipart(form).send().await?;
        Self::decode(response).await
    }
}

//! File upload.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::ApiClient;
use crate::prelude::*;

pub const UPLOAD_ENDPOINT: &str = "api/v1/auth/upload/file";
/// Multipart field carrying the file.
pub const UPLOAD_FIELD: &str = "file";

/// Body returned by the upload endpoint. Only the first file is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub files: Vec<Value>,
}

impl ApiClient {
    /// Uploads one file and returns the API's description of it.
    pub async fn upload_file(
        &self,
        file_name: impl Into<String>,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Value> {
        let file_name = file_name.into();
        info!("Uploading {file_name} ({} bytes)", bytes.len());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(content_type)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let request = self.client.post(self.path(UPLOAD_ENDPOINT)).multipart(form);
        let response: UploadResponse = self.send(request).await?;
        response.files.into_iter().next().ok_or(Error::EmptyUpload)
    }
}

//! Form extraction for record writes
//!
//! Blog and gallery writes arrive as `multipart/form-data` carrying an
//! optional `image` file, or as plain JSON / urlencoded bodies without one.
//! [`ContentForm`] accepts all three and hands handlers text fields plus
//! the file, still unsaved.

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header,
    Form, Json,
};
use std::collections::HashMap;

use crate::api::middleware::ApiError;
use crate::services::upload::UploadedFile;

/// Multipart field holding the uploaded file
const FILE_FIELD: &str = "image";

/// Text fields and the optional file of a write request
#[derive(Debug, Default)]
pub struct ContentForm {
    pub fields: HashMap<String, String>,
    pub file: Option<UploadedFile>,
}

impl ContentForm {
    /// Take a text field out of the form
    pub fn take(&mut self, name: &str) -> Option<String> {
        self.fields.remove(name)
    }

    /// Take a field that must be present
    pub fn require(&mut self, name: &str) -> Result<String, ApiError> {
        self.take(name)
            .ok_or_else(|| ApiError::validation_error(format!("{} is required", name)))
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::validation_error(format!("Failed to read multipart: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();

            if name == FILE_FIELD && field.file_name().is_some() {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::validation_error(format!("Failed to read file: {}", e)))?;

                // Browsers send an empty part when no file was chosen
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }

                form.file = Some(UploadedFile {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                });
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| ApiError::validation_error(format!("Failed to read field '{}': {}", name, e)))?;
            form.fields.insert(name, value);
        }

        Ok(form)
    }

    /// Flatten a JSON object into text fields; `null` counts as absent
    fn from_json(body: HashMap<String, serde_json::Value>) -> Self {
        let fields = body
            .into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(s) => Some((key, s)),
                serde_json::Value::Null => None,
                other => Some((key, other.to_string())),
            })
            .collect();

        Self { fields, file: None }
    }
}

impl<S> FromRequest<S> for ContentForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::validation_error(e.body_text()))?;
            return Self::from_multipart(multipart).await;
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::validation_error(e.body_text()))?;
            return Ok(Self { fields, file: None });
        }

        if content_type.is_empty() {
            let body = Bytes::from_request(req, state)
                .await
                .map_err(|e| ApiError::validation_error(e.body_text()))?;
            // No body and no type: nothing was submitted
            if body.iter().all(u8::is_ascii_whitespace) {
                return Ok(Self::default());
            }
            let body = serde_json::from_slice(&body)
                .map_err(|e| ApiError::validation_error(format!("Invalid JSON body: {}", e)))?;
            return Ok(Self::from_json(body));
        }

        let Json(body) = Json::<HashMap<String, serde_json::Value>>::from_request(req, state)
            .await
            .map_err(|e| ApiError::validation_error(e.body_text()))?;

        Ok(Self::from_json(body))
    }
}

// Multipart form collection
// The dashboard submits settings, events, and restore uploads as multipart
// form data: text fields plus at most one file field per form.

use std::collections::HashMap;

use axum::extract::Multipart;

use courtside_lib::utils::form::parse_flag;

use crate::error::{ApiError, ApiResult};

/// A parsed multipart form: text fields plus the one expected file field
pub struct FormData {
    fields: HashMap<String, String>,
    pub file: Option<UploadedFile>,
}

pub struct UploadedFile {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

impl FormData {
    /// Drain a multipart stream, treating `file_field` as the file part
    pub async fn read(mut multipart: Multipart, file_field: &str) -> ApiResult<Self> {
        let mut fields = HashMap::new();
        let mut file = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid form data: {}", e)))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == file_field {
                let original_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Invalid file upload: {}", e)))?;
                // A file input left empty still submits a nameless part
                if !original_name.is_empty() {
                    file = Some(UploadedFile {
                        original_name,
                        bytes: bytes.to_vec(),
                    });
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Invalid form field: {}", e)))?;
                fields.insert(name, value);
            }
        }

        Ok(Self { fields, file })
    }

    /// Required text field
    pub fn require(&self, name: &str) -> ApiResult<String> {
        self.text(name)
            .ok_or_else(|| ApiError::bad_request(format!("Missing required field: {}", name)))
    }

    /// Non-empty text field
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .filter(|v| !v.is_empty())
            .cloned()
    }

    /// Flag field through the fixed truthy-coercion boundary
    pub fn flag(&self, name: &str) -> bool {
        self.fields.get(name).is_some_and(|v| parse_flag(v))
    }

    /// Numeric field; empty or unparsable values read as absent
    pub fn score(&self, name: &str) -> Option<i64> {
        self.fields.get(name).and_then(|v| v.parse().ok())
    }
}

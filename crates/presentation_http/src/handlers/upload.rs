//! Multipart audio form parsing shared by the upload endpoints

use std::collections::HashMap;

use axum::extract::Multipart;
use domain::AudioFormat;
use tracing::debug;

use crate::error::ApiError;

/// Name of the form part carrying the audio
pub const FILE_FIELD: &str = "file";

/// An uploaded audio file
#[derive(Debug, Clone, Default)]
pub struct AudioUpload {
    pub data: Vec<u8>,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

impl AudioUpload {
    /// Format from the content type, then the extension, then `wav`
    #[must_use]
    pub fn format(&self) -> AudioFormat {
        AudioFormat::detect(self.content_type.as_deref(), self.file_name.as_deref())
    }
}

/// An audio upload plus its text fields
#[derive(Debug, Default)]
pub struct AudioForm {
    file: Option<AudioUpload>,
    fields: HashMap<String, String>,
}

impl AudioForm {
    /// Read every part of a multipart body
    ///
    /// The first `file` part is kept as audio; other named parts are kept as
    /// text. Unknown parts are ignored.
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(ToString::to_string) else {
                continue;
            };

            if name == FILE_FIELD {
                let content_type = field.content_type().map(ToString::to_string);
                let file_name = field.file_name().map(ToString::to_string);
                let data = field.bytes().await?.to_vec();
                if form.file.is_none() {
                    form.file = Some(AudioUpload {
                        data,
                        content_type,
                        file_name,
                    });
                }
            } else {
                let value = field.text().await?;
                form.fields.entry(name).or_insert(value);
            }
        }

        debug!(
            has_file = form.file.is_some(),
            fields = form.fields.len(),
            "Parsed multipart form"
        );
        Ok(form)
    }

    /// Take the audio part
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when no `file` part was sent.
    pub fn take_file(&mut self) -> Result<AudioUpload, ApiError> {
        self.file
            .take()
            .ok_or_else(|| ApiError::InvalidInput("No audio file provided".to_string()))
    }

    /// A text field, if sent
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

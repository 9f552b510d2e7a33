//! Multipart form payloads.
//!
//! Forms are built as plain data so callers (and tests) can inspect exactly
//! what will be sent; conversion to `reqwest::multipart::Form` happens at
//! dispatch.

use std::path::Path;

use anyhow::{Context, Result};

/// Binary part of a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name
    pub field: String,
    pub file_name: String,
    /// MIME type, if known
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// Creates a part, sniffing the MIME type from the content.
    pub fn new(field: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mime = infer::get(&bytes).map(|kind| kind.mime_type().to_string());
        Self {
            field: field.into(),
            file_name: file_name.into(),
            mime,
            bytes,
        }
    }

    /// Reads a file from disk into a part.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub async fn read(field: impl Into<String>, path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().to_string());
        Ok(Self::new(field, file_name, bytes))
    }
}

/// Multipart form: ordered text fields plus at most one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub file: Option<FilePart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Sets the file part, replacing any previous one.
    #[must_use]
    pub fn file(mut self, part: FilePart) -> Self {
        self.file = Some(part);
        self
    }

    /// Returns the first value for a text field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Converts to a reqwest multipart form.
    ///
    /// # Errors
    /// Returns an error if the file part carries an invalid MIME type.
    pub fn into_reqwest(self) -> reqwest::Result<reqwest::multipart::Form> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        if let Some(file) = self.file {
            let mut part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
            if let Some(mime) = file.mime {
                part = part.mime_str(&mime)?;
            }
            form = form.part(file.field, part);
        }
        Ok(form)
    }
}

//! Asynchronous settings backend consumed by the sync layer.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::StorageError;
use crate::theme::SettingsState;

mod ha;
mod local;
pub mod protocol;

pub use ha::{HaBackend, Transport};
pub use local::LocalBackend;

const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend transport failed: {0}")]
    Transport(String),
    #[error("backend rejected `{command}`: {message}")]
    Rejected { command: String, message: String },
    #[error("malformed backend response")]
    MalformedResponse(#[source] serde_json::Error),
    #[error("failed to encode request")]
    Encode(#[source] serde_json::Error),
    #[error("no backend configured")]
    NotConfigured,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// An image file picked for the page background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// MIME type sniffed from the leading bytes.
    pub fn mime_type(&self) -> &'static str {
        image::guess_format(&self.bytes)
            .map(|format| format.to_mime_type())
            .unwrap_or(FALLBACK_MIME)
    }

    /// `data:<mime>;base64,...`, usable directly as a CSS background.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type(),
            STANDARD.encode(&self.bytes)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub url: String,
}

#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// Stored settings blob; possibly partial, merged onto defaults by the caller.
    async fn get_settings(&self) -> BackendResult<serde_json::Value>;

    async fn get_language(&self) -> BackendResult<String>;

    async fn update_settings(&self, state: &SettingsState) -> BackendResult<()>;

    async fn upload_image(&self, upload: &ImageUpload) -> BackendResult<UploadedImage>;
}

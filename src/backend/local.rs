use async_trait::async_trait;

use super::{BackendResult, ImageUpload, SettingsBackend, UploadedImage};
use crate::i18n::Locale;
use crate::storage::LocalStorage;
use crate::theme::SettingsState;

/// Standalone backend over [`LocalStorage`]. Uploaded images stay local as data URLs.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    storage: LocalStorage,
}

impl LocalBackend {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }
}

#[async_trait]
impl SettingsBackend for LocalBackend {
    async fn get_settings(&self) -> BackendResult<serde_json::Value> {
        Ok(self
            .storage
            .load_settings_value()?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new())))
    }

    async fn get_language(&self) -> BackendResult<String> {
        let saved = self.storage.load_language()?;
        let system = Locale::system_code();
        Ok(Locale::detect(saved.as_deref(), system.as_deref())
            .code()
            .to_string())
    }

    async fn update_settings(&self, state: &SettingsState) -> BackendResult<()> {
        self.storage.save_settings(state)?;
        Ok(())
    }

    async fn upload_image(&self, upload: &ImageUpload) -> BackendResult<UploadedImage> {
        Ok(UploadedImage {
            url: upload.to_data_url(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use super::*;
    use crate::backend::test_support::jpeg_bytes;

    fn fixture_root() -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let pid = std::process::id();
        path.push(format!("mirage-local-backend-{pid}-{nanos}"));
        path
    }

    #[tokio::test]
    async fn settings_round_trip_through_local_files() {
        let root = fixture_root();
        let backend = LocalBackend::new(LocalStorage::with_paths(root.clone()));

        assert_eq!(backend.get_settings().await.unwrap(), serde_json::json!({}));

        let mut state = SettingsState::default();
        Arc::make_mut(&mut state.night).border_radius = 4;
        backend.update_settings(&state).await.unwrap();

        let stored = backend.get_settings().await.unwrap();
        assert_eq!(SettingsState::from_partial_value(stored).unwrap(), state);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn saved_language_wins() {
        let root = fixture_root();
        let backend = LocalBackend::new(LocalStorage::with_paths(root.clone()));
        backend.storage().save_language(Locale::De).unwrap();

        assert_eq!(backend.get_language().await.unwrap(), "de");
        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn upload_returns_data_url() {
        let backend = LocalBackend::new(LocalStorage::with_paths(fixture_root()));
        let uploaded = backend
            .upload_image(&ImageUpload::new("bg.jpg", jpeg_bytes(16)))
            .await
            .unwrap();
        assert!(uploaded.url.starts_with("data:image/jpeg;base64,/9j/"));
    }
}

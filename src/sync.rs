//! Loading, saving and uploading through an optional [`SettingsBackend`].
//!
//! Failures are logged and reported once through the alert surface; nothing is retried.

use std::sync::Arc;

use thiserror::Error;

use crate::backend::{BackendError, ImageUpload, SettingsBackend};
use crate::i18n::{translate, Locale};
use crate::notification;
use crate::theme::SettingsState;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to load settings")]
    Load(#[source] BackendError),
    #[error("failed to save settings")]
    Save(#[source] BackendError),
    #[error("failed to upload background image")]
    Upload(#[source] BackendError),
}

impl SyncError {
    pub fn backend_error(&self) -> &BackendError {
        match self {
            Self::Load(err) | Self::Save(err) | Self::Upload(err) => err,
        }
    }
}

pub type SyncResult<T> = std::result::Result<T, SyncError>;

pub type Alert = Box<dyn Fn(&str) + Send + Sync>;

pub struct BackendSync {
    backend: Option<Arc<dyn SettingsBackend>>,
    alert: Alert,
    locale: Locale,
}

impl BackendSync {
    pub fn new(backend: Option<Arc<dyn SettingsBackend>>) -> Self {
        Self {
            backend,
            alert: Box::new(|message: &str| notification::send(message)),
            locale: Locale::default(),
        }
    }

    /// Replaces the desktop notification used to report failures.
    pub fn with_alert(mut self, alert: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.alert = Box::new(alert);
        self
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    fn report(&self, message_key: &str, err: &BackendError) {
        tracing::error!(?err, "{message_key}");
        (self.alert)(&translate(self.locale, message_key, &[]));
    }

    /// Backend settings merged onto defaults. Without a backend, or when the call or the
    /// blob is bad, the defaults are returned.
    pub async fn load_settings(&self) -> SettingsState {
        match self.try_load_settings().await {
            Ok(state) => state,
            Err(err) => {
                self.report("loadError", err.backend_error());
                SettingsState::default()
            }
        }
    }

    pub async fn try_load_settings(&self) -> SyncResult<SettingsState> {
        let Some(backend) = &self.backend else {
            tracing::debug!("no backend configured; starting from defaults");
            return Ok(SettingsState::default());
        };
        let blob = backend.get_settings().await.map_err(SyncError::Load)?;
        match SettingsState::from_partial_value(blob) {
            Ok(state) => {
                tracing::info!("settings loaded from backend");
                Ok(state)
            }
            Err(err) => {
                tracing::warn!(?err, "backend settings are malformed; using defaults");
                Ok(SettingsState::default())
            }
        }
    }

    /// Backend language, falling back to the saved preference and the system locale.
    pub async fn load_locale(&self, saved: Option<&str>) -> Locale {
        let system = Locale::system_code();
        let Some(backend) = &self.backend else {
            return Locale::detect(saved, system.as_deref());
        };
        match backend.get_language().await {
            Ok(code) => Locale::detect(Some(&code), saved.or(system.as_deref())),
            Err(err) => {
                tracing::warn!(?err, "failed to read backend language");
                Locale::detect(saved, system.as_deref())
            }
        }
    }

    /// Persists `state`. A failure is reported once and returned; nothing is retried.
    pub async fn save(&self, state: &SettingsState) -> SyncResult<()> {
        let Some(backend) = &self.backend else {
            tracing::debug!("no backend configured; save skipped");
            return Ok(());
        };
        backend.update_settings(state).await.map_err(|err| {
            self.report("saveError", &err);
            SyncError::Save(err)
        })
    }

    /// Uploads a background image and returns the reference to store in `customBg`.
    ///
    /// Without a backend the image is embedded as a data URL so it can be used at once.
    pub async fn upload_background_image(&self, upload: &ImageUpload) -> SyncResult<String> {
        let Some(backend) = &self.backend else {
            tracing::debug!(file = %upload.file_name, "no backend configured; using data URL");
            return Ok(upload.to_data_url());
        };
        match backend.upload_image(upload).await {
            Ok(uploaded) => Ok(uploaded.url),
            Err(err) => {
                self.report("uploadError", &err);
                Err(SyncError::Upload(err))
            }
        }
    }
}

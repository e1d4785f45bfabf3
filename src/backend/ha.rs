use async_trait::async_trait;

use super::protocol::{BackendRequest, UploadResponse};
use super::{BackendError, BackendResult, ImageUpload, SettingsBackend, UploadedImage};
use crate::i18n::Locale;
use crate::theme::SettingsState;

/// Request/response channel to Home Assistant, typically its WebSocket API.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request and returns the `result` payload.
    async fn call(&self, request: BackendRequest) -> BackendResult<serde_json::Value>;
}

/// [`SettingsBackend`] speaking the `mirage/*` commands over a [`Transport`].
pub struct HaBackend<T> {
    transport: T,
    config_entry_id: Option<String>,
}

impl<T: Transport> HaBackend<T> {
    pub fn new(transport: T, config_entry_id: Option<String>) -> Self {
        Self {
            transport,
            config_entry_id,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[async_trait]
impl<T: Transport> SettingsBackend for HaBackend<T> {
    async fn get_settings(&self) -> BackendResult<serde_json::Value> {
        let result = self
            .transport
            .call(BackendRequest::GetSettings {
                config_entry_id: self.config_entry_id.clone(),
            })
            .await?;
        // An entry that was never configured has no options yet.
        Ok(match result {
            serde_json::Value::Null => serde_json::Value::Object(serde_json::Map::new()),
            other => other,
        })
    }

    async fn get_language(&self) -> BackendResult<String> {
        match self.transport.call(BackendRequest::GetLanguage).await? {
            serde_json::Value::String(code) => Ok(code),
            serde_json::Value::Null => Ok(Locale::default().code().to_string()),
            other => serde_json::from_value::<String>(other).map_err(BackendError::MalformedResponse),
        }
    }

    async fn update_settings(&self, state: &SettingsState) -> BackendResult<()> {
        let settings = serde_json::to_value(state).map_err(BackendError::Encode)?;
        self.transport
            .call(BackendRequest::UpdateSettings {
                config_entry_id: self.config_entry_id.clone(),
                settings,
            })
            .await?;
        tracing::info!("settings saved to Home Assistant");
        Ok(())
    }

    async fn upload_image(&self, upload: &ImageUpload) -> BackendResult<UploadedImage> {
        let request = BackendRequest::UploadImage {
            file_name: upload.file_name.clone(),
            file_data: upload.to_data_url(),
        };
        let command = request.command();
        let result = self.transport.call(request).await?;
        let response: UploadResponse =
            serde_json::from_value(result).map_err(BackendError::MalformedResponse)?;
        if response.success == Some(false) {
            return Err(BackendError::Rejected {
                command: command.to_string(),
                message: "upload reported failure".to_string(),
            });
        }
        tracing::info!(url = %response.url, "background image uploaded");
        Ok(UploadedImage { url: response.url })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::backend::test_support::jpeg_bytes;

    /// Records every request and replays queued responses in order.
    #[derive(Default)]
    pub(crate) struct RecordingTransport {
        pub(crate) requests: Mutex<Vec<BackendRequest>>,
        pub(crate) responses: Mutex<VecDeque<BackendResult<serde_json::Value>>>,
    }

    impl RecordingTransport {
        pub(crate) fn replying(responses: Vec<BackendResult<serde_json::Value>>) -> Self {
            Self {
                requests: Mutex::default(),
                responses: Mutex::new(responses.into()),
            }
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn call(&self, request: BackendRequest) -> BackendResult<serde_json::Value> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(serde_json::Value::Null))
        }
    }

    #[tokio::test]
    async fn get_settings_sends_entry_id_and_treats_null_as_empty() {
        let backend = HaBackend::new(
            RecordingTransport::replying(vec![Ok(serde_json::Value::Null)]),
            Some("entry-1".to_string()),
        );

        let settings = backend.get_settings().await.unwrap();
        assert_eq!(settings, serde_json::json!({}));
        assert_eq!(
            backend.transport().requests.lock().unwrap()[0],
            BackendRequest::GetSettings {
                config_entry_id: Some("entry-1".to_string())
            }
        );
    }

    #[tokio::test]
    async fn get_language_defaults_to_english_when_absent() {
        let backend = HaBackend::new(
            RecordingTransport::replying(vec![
                Ok(serde_json::json!("de")),
                Ok(serde_json::Value::Null),
                Ok(serde_json::json!(42)),
            ]),
            None,
        );

        assert_eq!(backend.get_language().await.unwrap(), "de");
        assert_eq!(backend.get_language().await.unwrap(), "en");
        assert!(matches!(
            backend.get_language().await,
            Err(BackendError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn update_settings_sends_full_state() {
        let backend = HaBackend::new(RecordingTransport::default(), Some("entry-1".to_string()));
        backend.update_settings(&SettingsState::default()).await.unwrap();

        let requests = backend.transport().requests.lock().unwrap();
        let BackendRequest::UpdateSettings { settings, .. } = &requests[0] else {
            panic!("expected update_settings, got {:?}", requests[0]);
        };
        assert_eq!(settings["night"]["bgColor"], "#0d1117");
        assert_eq!(settings["general"]["font"], "system");
    }

    #[tokio::test]
    async fn upload_image_sends_data_url_and_returns_public_url() {
        let backend = HaBackend::new(
            RecordingTransport::replying(vec![Ok(serde_json::json!({
                "success": true,
                "url": "/local/mirage_backgrounds/sky.jpg"
            }))]),
            None,
        );

        let uploaded = backend
            .upload_image(&ImageUpload::new("sky.jpg", jpeg_bytes(32)))
            .await
            .unwrap();
        assert_eq!(uploaded.url, "/local/mirage_backgrounds/sky.jpg");

        let requests = backend.transport().requests.lock().unwrap();
        let BackendRequest::UploadImage {
            file_name,
            file_data,
        } = &requests[0]
        else {
            panic!("expected upload_image, got {:?}", requests[0]);
        };
        assert_eq!(file_name, "sky.jpg");
        assert!(file_data.starts_with("data:image/jpeg;base64,"));
    }

    #[tokio::test]
    async fn upload_image_reports_rejection_and_malformed_reply() {
        let backend = HaBackend::new(
            RecordingTransport::replying(vec![
                Ok(serde_json::json!({ "success": false, "url": "" })),
                Ok(serde_json::json!({ "ok": true })),
            ]),
            None,
        );
        let upload = ImageUpload::new("sky.jpg", jpeg_bytes(32));

        assert!(matches!(
            backend.upload_image(&upload).await,
            Err(BackendError::Rejected { .. })
        ));
        assert!(matches!(
            backend.upload_image(&upload).await,
            Err(BackendError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn transport_errors_propagate() {
        let backend = HaBackend::new(
            RecordingTransport::replying(vec![Err(BackendError::Transport(
                "socket closed".to_string(),
            ))]),
            None,
        );
        assert!(matches!(
            backend.update_settings(&SettingsState::default()).await,
            Err(BackendError::Transport(_))
        ));
    }
}

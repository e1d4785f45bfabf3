use serde::{Deserialize, Serialize};

/// Request messages understood by the Home Assistant integration, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BackendRequest {
    #[serde(rename = "mirage/get_settings")]
    GetSettings {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        config_entry_id: Option<String>,
    },
    #[serde(rename = "mirage/get_language")]
    GetLanguage,
    #[serde(rename = "mirage/update_settings")]
    UpdateSettings {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        config_entry_id: Option<String>,
        settings: serde_json::Value,
    },
    #[serde(rename = "mirage/upload_image")]
    UploadImage {
        file_name: String,
        /// `data:<mime>;base64,...`
        file_data: String,
    },
}

impl BackendRequest {
    pub fn command(&self) -> &'static str {
        match self {
            Self::GetSettings { .. } => "mirage/get_settings",
            Self::GetLanguage => "mirage/get_language",
            Self::UpdateSettings { .. } => "mirage/update_settings",
            Self::UploadImage { .. } => "mirage/upload_image",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: Option<bool>,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_tagged_by_type() {
        let request = BackendRequest::UpdateSettings {
            config_entry_id: Some("entry-1".to_string()),
            settings: serde_json::json!({ "day": {} }),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "type": "mirage/update_settings",
                "config_entry_id": "entry-1",
                "settings": { "day": {} }
            })
        );
        assert_eq!(request.command(), "mirage/update_settings");

        assert_eq!(
            serde_json::to_value(BackendRequest::GetLanguage).unwrap(),
            serde_json::json!({ "type": "mirage/get_language" })
        );
    }

    #[test]
    fn get_settings_omits_missing_entry_id() {
        let request = BackendRequest::GetSettings {
            config_entry_id: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "type": "mirage/get_settings" })
        );
    }

    #[test]
    fn upload_response_success_flag_is_optional() {
        let response: UploadResponse =
            serde_json::from_str(r#"{ "url": "/local/mirage_backgrounds/a.jpg" }"#).unwrap();
        assert_eq!(response.success, None);
        assert_eq!(response.url, "/local/mirage_backgrounds/a.jpg");
    }
}

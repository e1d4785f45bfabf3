//! Export and import of [`SettingsState`] as pretty-printed JSON.

use super::{SettingsPatch, SettingsState, ThemeError, ThemeResult};

pub fn export_settings(state: &SettingsState) -> ThemeResult<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Parses an exported settings string.
///
/// The payload must be an object carrying both `day` and `night`; missing fields inside
/// a section fall back to defaults. Nothing is applied here, so a failure has no effect.
pub fn parse_import(serialized: &str) -> ThemeResult<SettingsState> {
    let raw: serde_json::Value = serde_json::from_str(serialized)?;
    let has_sections = raw
        .as_object()
        .is_some_and(|object| object.contains_key("day") && object.contains_key("night"));
    if !has_sections {
        return Err(ThemeError::MissingSections);
    }

    let patch: SettingsPatch = serde_json::from_value(raw)?;
    if patch.day.is_none() || patch.night.is_none() {
        return Err(ThemeError::MissingSections);
    }
    Ok(SettingsState::default().merged_with(&patch))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::theme::{CardStyle, CardTextColorMode, FontStyle, ThemeConfig};

    fn customized_state() -> SettingsState {
        let mut state = SettingsState::default();
        let night = Arc::make_mut(&mut state.night);
        night.card_style = CardStyle::Floating;
        night.accent_color = "#ff0000".to_string();
        night.weather_color = Some("#00ff00".to_string());
        night.border_thickness = 2.5;
        night.custom_bg = Some("data:image/png;base64,iVBORw0KGgo=".to_string());
        let day = Arc::make_mut(&mut state.day);
        day.card_text_color_mode = CardTextColorMode::Dark;
        day.transparency = 55;
        Arc::make_mut(&mut state.general).font = FontStyle::Serif;
        state
    }

    #[test]
    fn export_then_import_round_trips() {
        let state = customized_state();
        let exported = export_settings(&state).unwrap();
        assert!(exported.contains('\n'), "export should be pretty-printed");

        let imported = parse_import(&exported).unwrap();
        assert_eq!(imported, state);
    }

    #[test]
    fn import_rejects_payload_without_day_and_night() {
        for payload in [
            r#"{ "cardStyle": "glass" }"#,
            r#"{ "day": {} }"#,
            r#"{ "night": {}, "general": {} }"#,
            r#"{ "day": null, "night": null }"#,
            r#"[]"#,
            r#""day night""#,
        ] {
            let err = parse_import(payload).unwrap_err();
            assert!(
                matches!(err, ThemeError::MissingSections),
                "payload {payload} gave {err:?}"
            );
        }
    }

    #[test]
    fn import_rejects_malformed_json() {
        assert!(matches!(
            parse_import("{ not json"),
            Err(ThemeError::Parse(_))
        ));
        assert!(matches!(
            parse_import(r#"{ "day": { "cardStyle": "chrome" }, "night": {} }"#),
            Err(ThemeError::Parse(_))
        ));
    }

    #[test]
    fn import_fills_missing_fields_from_defaults() {
        let imported =
            parse_import(r##"{ "day": { "accentColor": "#abcdef" }, "night": {} }"##).unwrap();
        assert_eq!(imported.day.accent_color, "#abcdef");
        assert_eq!(imported.day.bg_color, ThemeConfig::default_day().bg_color);
        assert_eq!(*imported.night, ThemeConfig::default_night());
        assert!(imported.general.animations_enabled);
    }
}

use serde::Deserialize;

use super::{
    CardStyle, CardTextColorMode, FontStyle, GeneralSettingsPatch, SettingsPatch, TextColors,
    ThemeConfigPatch,
};
use crate::color::Rgb;

const FLAT_MARKERS: [&str; 28] = [
    "cardStyle",
    "accentColor",
    "temperatureColor",
    "weatherColor",
    "humidityColor",
    "doorColor",
    "transparency",
    "blurIntensity",
    "solidGrayscale",
    "solidColorDark",
    "solidColorLight",
    "paperColorDark",
    "paperColorLight",
    "floatingOpacity",
    "floatingColorDark",
    "floatingColorLight",
    "borderThickness",
    "separatorThickness",
    "borderRadius",
    "cardTextColorMode",
    "darkThemeTextColors",
    "lightThemeTextColors",
    "bgColorDark",
    "bgColorLight",
    "customBgDark",
    "customBgLight",
    "font",
    "animationsEnabled",
];

// Nullable fields keep `null` distinguishable from an absent key.
fn nullable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Settings written by the single-theme revision: one flat object with `*Dark`/`*Light`
/// pairs for the handful of values that differed per theme.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyFlatSettings {
    #[serde(default)]
    pub card_style: Option<CardStyle>,
    #[serde(default)]
    pub transparency: Option<f64>,
    #[serde(default)]
    pub blur_intensity: Option<f64>,
    #[serde(default)]
    pub solid_grayscale: Option<f64>,
    #[serde(default)]
    pub solid_color_dark: Option<String>,
    #[serde(default)]
    pub solid_color_light: Option<String>,
    #[serde(default)]
    pub paper_color_dark: Option<String>,
    #[serde(default)]
    pub paper_color_light: Option<String>,
    #[serde(default)]
    pub floating_opacity: Option<f64>,
    #[serde(default)]
    pub floating_color_dark: Option<String>,
    #[serde(default)]
    pub floating_color_light: Option<String>,
    #[serde(default)]
    pub border_thickness: Option<f64>,
    #[serde(default)]
    pub separator_thickness: Option<f64>,
    #[serde(default)]
    pub border_radius: Option<f64>,
    #[serde(default)]
    pub accent_color: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub temperature_color: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub weather_color: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub humidity_color: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub door_color: Option<Option<String>>,
    #[serde(default)]
    pub dark_theme_text_colors: Option<TextColors>,
    #[serde(default)]
    pub light_theme_text_colors: Option<TextColors>,
    #[serde(default)]
    pub card_text_color_mode: Option<CardTextColorMode>,
    #[serde(default)]
    pub bg_color_dark: Option<String>,
    #[serde(default)]
    pub bg_color_light: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub custom_bg_dark: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub custom_bg_light: Option<Option<String>>,
    #[serde(default)]
    pub font: Option<FontStyle>,
    #[serde(default)]
    pub animations_enabled: Option<bool>,
}

pub(crate) fn looks_flat(value: &serde_json::Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };
    if ["day", "night", "general"]
        .iter()
        .any(|section| object.contains_key(*section))
    {
        return false;
    }
    FLAT_MARKERS.iter().any(|key| object.contains_key(*key))
}

fn percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

fn pixels(value: f64) -> u16 {
    value.round().clamp(0.0, f64::from(u16::MAX)) as u16
}

/// Maps a 0..=100 grayscale slider to the night and day solid card colors.
pub fn grayscale_solid_colors(grayscale: f64) -> (String, String) {
    let g = grayscale.clamp(0.0, 100.0) / 100.0;
    (
        Rgb::gray((35.0 + g * 35.0).round() as u8).to_hex(),
        Rgb::gray((235.0 + g * 20.0).round() as u8).to_hex(),
    )
}

impl LegacyFlatSettings {
    /// Shared knobs go to both variants; `*Dark` values to night and `*Light` values to day.
    pub fn into_patch(self) -> SettingsPatch {
        let shared = ThemeConfigPatch {
            card_style: self.card_style,
            accent_color: self.accent_color,
            temperature_color: self.temperature_color,
            weather_color: self.weather_color,
            humidity_color: self.humidity_color,
            door_color: self.door_color,
            transparency: self.transparency.map(percent),
            blur_intensity: self.blur_intensity.map(pixels),
            floating_opacity: self.floating_opacity.map(percent),
            border_thickness: self.border_thickness,
            separator_thickness: self.separator_thickness,
            border_radius: self.border_radius.map(pixels),
            card_text_color_mode: self.card_text_color_mode,
            ..ThemeConfigPatch::default()
        };

        let (gray_dark, gray_light) = match self.solid_grayscale.map(grayscale_solid_colors) {
            Some((dark, light)) => (Some(dark), Some(light)),
            None => (None, None),
        };

        let night = ThemeConfigPatch {
            solid_color: self.solid_color_dark.or(gray_dark),
            paper_color: self.paper_color_dark,
            floating_color: self.floating_color_dark,
            page_text_color: self.dark_theme_text_colors,
            bg_color: self.bg_color_dark,
            custom_bg: self.custom_bg_dark,
            ..shared.clone()
        };
        let day = ThemeConfigPatch {
            solid_color: self.solid_color_light.or(gray_light),
            paper_color: self.paper_color_light,
            floating_color: self.floating_color_light,
            page_text_color: self.light_theme_text_colors,
            bg_color: self.bg_color_light,
            custom_bg: self.custom_bg_light,
            ..shared
        };
        let general = GeneralSettingsPatch {
            font: self.font,
            animations_enabled: self.animations_enabled,
        };

        SettingsPatch {
            day: (!day.is_empty()).then_some(day),
            night: (!night.is_empty()).then_some(night),
            general: (!general.is_empty()).then_some(general),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{SettingsState, ThemeConfig};

    #[test]
    fn looks_flat_detects_single_theme_layout() {
        assert!(looks_flat(&serde_json::json!({ "cardStyle": "glass" })));
        assert!(!looks_flat(&serde_json::json!({ "day": {}, "cardStyle": "glass" })));
        assert!(!looks_flat(&serde_json::json!({})));
        for key in ["solidGrayscale", "floatingColorDark", "bgColorLight", "customBgDark", "font"] {
            assert!(looks_flat(&serde_json::json!({ key: null })), "{key}");
        }
        assert!(!looks_flat(&serde_json::json!([1, 2])));
    }

    #[test]
    fn flat_settings_split_into_day_and_night() {
        let state = SettingsState::from_partial_value(serde_json::json!({
            "theme": "dark",
            "cardStyle": "floating",
            "accentColor": "#ff0000",
            "floatingOpacity": 80,
            "floatingColorDark": "#111111",
            "floatingColorLight": "#eeeeee",
            "darkThemeTextColors": { "primary": "#fafafa", "secondary": "#aaaaaa" },
            "bgColorLight": "#ffffff",
            "customBgDark": "/local/mirage_backgrounds/night.jpg",
            "temperatureColor": null,
            "font": "monospace",
            "animationsEnabled": false,
            "language": "de"
        }))
        .unwrap();

        for config in [&state.day, &state.night] {
            assert_eq!(config.card_style, CardStyle::Floating);
            assert_eq!(config.accent_color, "#ff0000");
            assert_eq!(config.floating_opacity, 80);
        }
        assert_eq!(state.night.floating_color, "#111111");
        assert_eq!(state.day.floating_color, "#eeeeee");
        assert_eq!(state.night.page_text_color.primary, "#fafafa");
        assert_eq!(state.day.page_text_color, ThemeConfig::default_day().page_text_color);
        assert_eq!(state.day.bg_color, "#ffffff");
        assert_eq!(state.night.bg_color, "#0d1117");
        assert_eq!(
            state.night.custom_bg.as_deref(),
            Some("/local/mirage_backgrounds/night.jpg")
        );
        assert_eq!(state.day.custom_bg, None);
        assert_eq!(state.general.font, FontStyle::Monospace);
        assert!(!state.general.animations_enabled);
    }

    #[test]
    fn solid_grayscale_maps_to_gray_solid_colors() {
        let patch = LegacyFlatSettings {
            solid_grayscale: Some(40.0),
            ..LegacyFlatSettings::default()
        }
        .into_patch();

        // 35 + 0.4 * 35 = 49, 235 + 0.4 * 20 = 243
        assert_eq!(patch.night.unwrap().solid_color.as_deref(), Some("#313131"));
        assert_eq!(patch.day.unwrap().solid_color.as_deref(), Some("#f3f3f3"));
        assert!(patch.general.is_none());
    }

    #[test]
    fn flat_blob_without_shared_keys_still_migrates() {
        let state = SettingsState::from_partial_value(serde_json::json!({
            "solidGrayscale": 100,
            "bgColorLight": "#fafafa",
            "animationsEnabled": false
        }))
        .unwrap();

        assert_eq!(state.night.solid_color, "#464646");
        assert_eq!(state.day.solid_color, "#ffffff");
        assert_eq!(state.day.bg_color, "#fafafa");
        assert!(!state.general.animations_enabled);
    }

    #[test]
    fn explicit_solid_color_wins_over_grayscale() {
        let patch = LegacyFlatSettings {
            solid_grayscale: Some(100.0),
            solid_color_dark: Some("#123456".to_string()),
            ..LegacyFlatSettings::default()
        }
        .into_patch();
        assert_eq!(patch.night.unwrap().solid_color.as_deref(), Some("#123456"));
    }
}

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use super::{
    CardStyle, CardTextColorMode, Feature, FontStyle, GeneralSettings, SettingsState, TextColors,
    ThemeConfig, ThemeError, ThemeResult,
};

/// Field names accepted by [`ThemeConfigPatch::from_key_value`].
pub(crate) const THEME_CONFIG_KEYS: [&str; 19] = [
    "cardStyle",
    "accentColor",
    "temperatureColor",
    "weatherColor",
    "humidityColor",
    "doorColor",
    "transparency",
    "blurIntensity",
    "solidColor",
    "paperColor",
    "floatingColor",
    "floatingOpacity",
    "borderThickness",
    "separatorThickness",
    "borderRadius",
    "cardTextColorMode",
    "pageTextColor",
    "bgColor",
    "customBg",
];

pub(crate) const GENERAL_KEYS: [&str; 2] = ["font", "animationsEnabled"];

// Distinguishes an absent key (outer `None`) from an explicit `null` (`Some(None)`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partial [`ThemeConfig`]; every present field overrides, absent fields keep current values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_style: Option<CardStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub temperature_color: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub weather_color: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub humidity_color: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub door_color: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparency: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur_intensity: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solid_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paper_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floating_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floating_opacity: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_thickness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator_thickness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_text_color_mode: Option<CardTextColorMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_text_color: Option<TextColors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_bg: Option<Option<String>>,
}

impl ThemeConfigPatch {
    /// Builds a single-field patch from a field name and its JSON value.
    pub fn from_key_value(key: &str, value: serde_json::Value) -> ThemeResult<Self> {
        if !THEME_CONFIG_KEYS.contains(&key) {
            return Err(ThemeError::UnknownSetting(key.to_string()));
        }
        let mut object = serde_json::Map::new();
        object.insert(key.to_string(), value);
        Ok(serde_json::from_value(serde_json::Value::Object(object))?)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn feature_color(feature: Feature, color: Option<String>) -> Self {
        let mut patch = Self::default();
        *patch.feature_color_slot(feature) = Some(color);
        patch
    }

    fn feature_color_slot(&mut self, feature: Feature) -> &mut Option<Option<String>> {
        match feature {
            Feature::Temperature => &mut self.temperature_color,
            Feature::Weather => &mut self.weather_color,
            Feature::Humidity => &mut self.humidity_color,
            Feature::Door => &mut self.door_color,
        }
    }

    pub fn apply_to(&self, config: &mut ThemeConfig) {
        if let Some(v) = self.card_style {
            config.card_style = v;
        }
        if let Some(ref v) = self.accent_color {
            config.accent_color = v.clone();
        }
        for feature in Feature::ALL {
            let slot = match feature {
                Feature::Temperature => &self.temperature_color,
                Feature::Weather => &self.weather_color,
                Feature::Humidity => &self.humidity_color,
                Feature::Door => &self.door_color,
            };
            if let Some(v) = slot {
                *config.feature_color_mut(feature) = v.clone();
            }
        }
        if let Some(v) = self.transparency {
            config.transparency = v;
        }
        if let Some(v) = self.blur_intensity {
            config.blur_intensity = v;
        }
        if let Some(ref v) = self.solid_color {
            config.solid_color = v.clone();
        }
        if let Some(ref v) = self.paper_color {
            config.paper_color = v.clone();
        }
        if let Some(ref v) = self.floating_color {
            config.floating_color = v.clone();
        }
        if let Some(v) = self.floating_opacity {
            config.floating_opacity = v;
        }
        if let Some(v) = self.border_thickness.filter(|v| v.is_finite()) {
            config.border_thickness = v;
        }
        if let Some(v) = self.separator_thickness.filter(|v| v.is_finite()) {
            config.separator_thickness = v;
        }
        if let Some(v) = self.border_radius {
            config.border_radius = v;
        }
        if let Some(v) = self.card_text_color_mode {
            config.card_text_color_mode = v;
        }
        if let Some(ref v) = self.page_text_color {
            config.page_text_color = v.clone();
        }
        if let Some(ref v) = self.bg_color {
            config.bg_color = v.clone();
        }
        if let Some(ref v) = self.custom_bg {
            config.custom_bg = v.clone();
        }
        config.clamp_ranges();
    }
}

impl From<&ThemeConfig> for ThemeConfigPatch {
    fn from(config: &ThemeConfig) -> Self {
        Self {
            card_style: Some(config.card_style),
            accent_color: Some(config.accent_color.clone()),
            temperature_color: Some(config.temperature_color.clone()),
            weather_color: Some(config.weather_color.clone()),
            humidity_color: Some(config.humidity_color.clone()),
            door_color: Some(config.door_color.clone()),
            transparency: Some(config.transparency),
            blur_intensity: Some(config.blur_intensity),
            solid_color: Some(config.solid_color.clone()),
            paper_color: Some(config.paper_color.clone()),
            floating_color: Some(config.floating_color.clone()),
            floating_opacity: Some(config.floating_opacity),
            border_thickness: Some(config.border_thickness),
            separator_thickness: Some(config.separator_thickness),
            border_radius: Some(config.border_radius),
            card_text_color_mode: Some(config.card_text_color_mode),
            page_text_color: Some(config.page_text_color.clone()),
            bg_color: Some(config.bg_color.clone()),
            custom_bg: Some(config.custom_bg.clone()),
        }
    }
}

impl ThemeConfig {
    pub fn merged_with(&self, patch: &ThemeConfigPatch) -> ThemeConfig {
        let mut merged = self.clone();
        patch.apply_to(&mut merged);
        merged
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<FontStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animations_enabled: Option<bool>,
}

impl GeneralSettingsPatch {
    pub fn from_key_value(key: &str, value: serde_json::Value) -> ThemeResult<Self> {
        if !GENERAL_KEYS.contains(&key) {
            return Err(ThemeError::UnknownSetting(key.to_string()));
        }
        let mut object = serde_json::Map::new();
        object.insert(key.to_string(), value);
        Ok(serde_json::from_value(serde_json::Value::Object(object))?)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, general: &mut GeneralSettings) {
        if let Some(v) = self.font {
            general.font = v;
        }
        if let Some(v) = self.animations_enabled {
            general.animations_enabled = v;
        }
    }
}

impl From<&GeneralSettings> for GeneralSettingsPatch {
    fn from(general: &GeneralSettings) -> Self {
        Self {
            font: Some(general.font),
            animations_enabled: Some(general.animations_enabled),
        }
    }
}

/// Per-section partial settings. Sections that are absent are left untouched when applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<ThemeConfigPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night: Option<ThemeConfigPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general: Option<GeneralSettingsPatch>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.day.is_none() && self.night.is_none() && self.general.is_none()
    }

    /// Shallow per-section merge. A section is only reallocated when its values change,
    /// so untouched sections stay pointer-equal to the previous snapshot.
    pub fn apply_to(&self, state: &mut SettingsState) {
        if let Some(ref patch) = self.day {
            let merged = state.day.merged_with(patch);
            replace_if_changed(&mut state.day, merged);
        }
        if let Some(ref patch) = self.night {
            let merged = state.night.merged_with(patch);
            replace_if_changed(&mut state.night, merged);
        }
        if let Some(ref patch) = self.general {
            let mut general = GeneralSettings::clone(&state.general);
            patch.apply_to(&mut general);
            replace_if_changed(&mut state.general, general);
        }
    }
}

impl From<&SettingsState> for SettingsPatch {
    fn from(state: &SettingsState) -> Self {
        Self {
            day: Some(ThemeConfigPatch::from(state.day.as_ref())),
            night: Some(ThemeConfigPatch::from(state.night.as_ref())),
            general: Some(GeneralSettingsPatch::from(state.general.as_ref())),
        }
    }
}

pub(crate) fn replace_if_changed<T: PartialEq>(slot: &mut Arc<T>, next: T) {
    if **slot != next {
        *slot = Arc::new(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_overrides_only_present_fields() {
        let base = ThemeConfig::default_night();
        let patch = ThemeConfigPatch {
            accent_color: Some("#ff0000".to_string()),
            border_radius: Some(8),
            ..ThemeConfigPatch::default()
        };

        let merged = base.merged_with(&patch);
        assert_eq!(merged.accent_color, "#ff0000");
        assert_eq!(merged.border_radius, 8);
        assert_eq!(merged.transparency, base.transparency);
        assert_eq!(merged.bg_color, base.bg_color);
    }

    #[test]
    fn explicit_null_clears_feature_color_but_absent_key_keeps_it() {
        let mut base = ThemeConfig::default_day();
        base.weather_color = Some("#123456".to_string());
        base.door_color = Some("#654321".to_string());

        let patch: ThemeConfigPatch =
            serde_json::from_str(r#"{ "weatherColor": null }"#).unwrap();
        let merged = base.merged_with(&patch);

        assert_eq!(merged.weather_color, None);
        assert_eq!(merged.door_color.as_deref(), Some("#654321"));
    }

    #[test]
    fn patch_serialization_keeps_null_distinct_from_absent() {
        let patch = ThemeConfigPatch::feature_color(Feature::Humidity, None);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "humidityColor": null }));
    }

    #[test]
    fn from_key_value_builds_single_field_patch() {
        let patch =
            ThemeConfigPatch::from_key_value("cardStyle", serde_json::json!("floating")).unwrap();
        assert_eq!(patch.card_style, Some(CardStyle::Floating));

        let patch =
            ThemeConfigPatch::from_key_value("customBg", serde_json::Value::Null).unwrap();
        assert_eq!(patch.custom_bg, Some(None));
    }

    #[test]
    fn from_key_value_rejects_unknown_and_mistyped_values() {
        let err = ThemeConfigPatch::from_key_value("sparkle", serde_json::json!(true)).unwrap_err();
        assert!(matches!(err, ThemeError::UnknownSetting(ref key) if key == "sparkle"));

        let err =
            ThemeConfigPatch::from_key_value("borderRadius", serde_json::json!("wide")).unwrap_err();
        assert!(matches!(err, ThemeError::Parse(_)));

        assert!(GeneralSettingsPatch::from_key_value("cardStyle", serde_json::json!("glass")).is_err());
    }

    #[test]
    fn patch_application_clamps_values() {
        let patch = ThemeConfigPatch {
            border_radius: Some(200),
            border_thickness: Some(-1.0),
            ..ThemeConfigPatch::default()
        };
        let merged = ThemeConfig::default_day().merged_with(&patch);
        assert_eq!(merged.border_radius, 32);
        assert_eq!(merged.border_thickness, 0.0);
    }

    #[test]
    fn full_snapshot_patch_reproduces_config() {
        let mut config = ThemeConfig::default_night();
        config.temperature_color = Some("#f97316".to_string());
        config.custom_bg = Some("/local/mirage_backgrounds/sky.jpg".to_string());

        let patch = ThemeConfigPatch::from(&config);
        assert_eq!(ThemeConfig::default_day().merged_with(&patch), config);
    }

    #[test]
    fn settings_patch_leaves_absent_sections_pointer_equal() {
        let state = SettingsState::default();
        let patch = SettingsPatch {
            night: Some(ThemeConfigPatch {
                accent_color: Some("#ff0000".to_string()),
                ..ThemeConfigPatch::default()
            }),
            ..SettingsPatch::default()
        };

        let next = state.merged_with(&patch);
        assert!(Arc::ptr_eq(&state.day, &next.day));
        assert!(Arc::ptr_eq(&state.general, &next.general));
        assert!(!Arc::ptr_eq(&state.night, &next.night));
        assert_eq!(next.night.accent_color, "#ff0000");
    }

    #[test]
    fn settings_patch_without_effect_keeps_section_pointer() {
        let state = SettingsState::default();
        let patch = SettingsPatch {
            general: Some(GeneralSettingsPatch {
                animations_enabled: Some(true),
                ..GeneralSettingsPatch::default()
            }),
            ..SettingsPatch::default()
        };

        let next = state.merged_with(&patch);
        assert!(Arc::ptr_eq(&state.general, &next.general));
    }
}

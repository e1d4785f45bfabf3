use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod legacy;
mod patch;
pub mod transfer;

pub use legacy::{grayscale_solid_colors, LegacyFlatSettings};
pub use patch::{GeneralSettingsPatch, SettingsPatch, ThemeConfigPatch};
pub(crate) use patch::replace_if_changed;

pub type ThemeResult<T> = std::result::Result<T, ThemeError>;

pub const MAX_BORDER_RADIUS: u16 = 32;
pub const MAX_LINE_THICKNESS: f64 = 5.0;
pub const MAX_BLUR_INTENSITY: u16 = 40;
pub const MAX_PERCENT: u8 = 100;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("failed to parse settings")]
    Parse(#[from] serde_json::Error),
    #[error("settings must be an object with `day` and `night` sections")]
    MissingSections,
    #[error("unknown theme setting `{0}`")]
    UnknownSetting(String),
}

/// Theme the page is currently rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RenderTheme {
    Light,
    #[default]
    Dark,
}

impl RenderTheme {
    pub const fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Light renders with the day config, dark with the night config.
    pub const fn variant(self) -> ThemeVariant {
        match self {
            Self::Light => ThemeVariant::Day,
            Self::Dark => ThemeVariant::Night,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// One of the two stored theme configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    Day,
    Night,
}

impl ThemeVariant {
    pub const fn render_theme(self) -> RenderTheme {
        match self {
            Self::Day => RenderTheme::Light,
            Self::Night => RenderTheme::Dark,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" | "light" => Some(Self::Day),
            "night" | "dark" => Some(Self::Night),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardStyle {
    #[default]
    Glass,
    Solid,
    Paper,
    Floating,
}

impl CardStyle {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Glass => "glass",
            Self::Solid => "solid",
            Self::Paper => "paper",
            Self::Floating => "floating",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardTextColorMode {
    #[default]
    Auto,
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    System,
    Serif,
    Monospace,
}

/// Features whose color tracks the accent color unless overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Temperature,
    Weather,
    Humidity,
    Door,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::Temperature,
        Feature::Weather,
        Feature::Humidity,
        Feature::Door,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Temperature => "temperatureColor",
            Self::Weather => "weatherColor",
            Self::Humidity => "humidityColor",
            Self::Door => "doorColor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextColors {
    pub primary: String,
    pub secondary: String,
}

impl TextColors {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    pub card_style: CardStyle,
    pub accent_color: String,
    pub temperature_color: Option<String>,
    pub weather_color: Option<String>,
    pub humidity_color: Option<String>,
    pub door_color: Option<String>,
    pub transparency: u8,
    pub blur_intensity: u16,
    pub solid_color: String,
    pub paper_color: String,
    pub floating_color: String,
    pub floating_opacity: u8,
    pub border_thickness: f64,
    pub separator_thickness: f64,
    pub border_radius: u16,
    pub card_text_color_mode: CardTextColorMode,
    pub page_text_color: TextColors,
    pub bg_color: String,
    pub custom_bg: Option<String>,
}

impl ThemeConfig {
    pub fn default_day() -> Self {
        Self {
            solid_color: "#e2e8f0".to_string(),
            paper_color: "#ffffff".to_string(),
            floating_color: "#ffffff".to_string(),
            page_text_color: TextColors::new("#1f2937", "#4b5563"),
            bg_color: "#f3f4f6".to_string(),
            ..Self::default_night()
        }
    }

    pub fn default_night() -> Self {
        Self {
            card_style: CardStyle::Glass,
            accent_color: "#3b82f6".to_string(),
            temperature_color: None,
            weather_color: None,
            humidity_color: None,
            door_color: None,
            transparency: 30,
            blur_intensity: 20,
            solid_color: "#2d3748".to_string(),
            paper_color: "#2a2d35".to_string(),
            floating_color: "#2a323d".to_string(),
            floating_opacity: 100,
            border_thickness: 1.0,
            separator_thickness: 1.0,
            border_radius: 16,
            card_text_color_mode: CardTextColorMode::Auto,
            page_text_color: TextColors::new("#e5e7eb", "#9ca3af"),
            bg_color: "#0d1117".to_string(),
            custom_bg: None,
        }
    }

    pub fn default_for(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Day => Self::default_day(),
            ThemeVariant::Night => Self::default_night(),
        }
    }

    /// Stored override for `feature`; `None` means the feature tracks the accent color.
    pub fn feature_color(&self, feature: Feature) -> Option<&str> {
        match feature {
            Feature::Temperature => self.temperature_color.as_deref(),
            Feature::Weather => self.weather_color.as_deref(),
            Feature::Humidity => self.humidity_color.as_deref(),
            Feature::Door => self.door_color.as_deref(),
        }
    }

    pub(crate) fn feature_color_mut(&mut self, feature: Feature) -> &mut Option<String> {
        match feature {
            Feature::Temperature => &mut self.temperature_color,
            Feature::Weather => &mut self.weather_color,
            Feature::Humidity => &mut self.humidity_color,
            Feature::Door => &mut self.door_color,
        }
    }

    /// Clamps numeric knobs into their supported ranges.
    pub fn clamp_ranges(&mut self) {
        self.transparency = self.transparency.min(MAX_PERCENT);
        self.floating_opacity = self.floating_opacity.min(MAX_PERCENT);
        self.blur_intensity = self.blur_intensity.min(MAX_BLUR_INTENSITY);
        self.border_radius = self.border_radius.min(MAX_BORDER_RADIUS);
        self.border_thickness = clamp_thickness(self.border_thickness);
        self.separator_thickness = clamp_thickness(self.separator_thickness);
    }
}

fn clamp_thickness(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, MAX_LINE_THICKNESS)
    } else {
        1.0
    }
}

/// Resolves the color used for `feature`, re-reading the accent color every time.
pub fn resolve_feature_color(config: &ThemeConfig, feature: Feature) -> &str {
    config
        .feature_color(feature)
        .filter(|color| !color.trim().is_empty())
        .unwrap_or(&config.accent_color)
}

/// Picks which variant's page text palette colors card text.
///
/// `Auto` borrows the palette of the theme opposite to the one being rendered, so a light
/// page gets the night palette. `Light` always uses the night palette (light text) and
/// `Dark` the day palette (dark text).
pub fn resolve_card_text_variant(mode: CardTextColorMode, render: RenderTheme) -> ThemeVariant {
    match mode {
        CardTextColorMode::Auto => render.opposite().variant(),
        CardTextColorMode::Light => ThemeVariant::Night,
        CardTextColorMode::Dark => ThemeVariant::Day,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSettings {
    pub font: FontStyle,
    pub animations_enabled: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            font: FontStyle::System,
            animations_enabled: true,
        }
    }
}

/// Unit of persistence, export, import and preset application.
///
/// Sections sit behind `Arc` so an update copies only the section it touches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsState {
    pub day: Arc<ThemeConfig>,
    pub night: Arc<ThemeConfig>,
    pub general: Arc<GeneralSettings>,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            day: Arc::new(ThemeConfig::default_day()),
            night: Arc::new(ThemeConfig::default_night()),
            general: Arc::new(GeneralSettings::default()),
        }
    }
}

impl SettingsState {
    pub fn config(&self, variant: ThemeVariant) -> &ThemeConfig {
        match variant {
            ThemeVariant::Day => &self.day,
            ThemeVariant::Night => &self.night,
        }
    }

    pub fn config_arc(&self, variant: ThemeVariant) -> &Arc<ThemeConfig> {
        match variant {
            ThemeVariant::Day => &self.day,
            ThemeVariant::Night => &self.night,
        }
    }

    pub(crate) fn config_arc_mut(&mut self, variant: ThemeVariant) -> &mut Arc<ThemeConfig> {
        match variant {
            ThemeVariant::Day => &mut self.day,
            ThemeVariant::Night => &mut self.night,
        }
    }

    /// Config selected by the render theme.
    pub fn active(&self, render: RenderTheme) -> &ThemeConfig {
        self.config(render.variant())
    }

    /// A single-theme setup is the degenerate case where both variants share one config.
    pub fn uniform(config: ThemeConfig, general: GeneralSettings) -> Self {
        let shared = Arc::new(config);
        Self {
            day: Arc::clone(&shared),
            night: shared,
            general: Arc::new(general),
        }
    }

    /// Builds a state from a possibly partial backend blob, starting from defaults.
    ///
    /// Blobs in the flat single-theme layout are migrated first.
    pub fn from_partial_value(value: serde_json::Value) -> ThemeResult<Self> {
        let patch = SettingsPatch::from_value(value)?;
        Ok(Self::default().merged_with(&patch))
    }

    pub fn merged_with(&self, patch: &SettingsPatch) -> Self {
        let mut next = self.clone();
        patch.apply_to(&mut next);
        next
    }
}

impl SettingsPatch {
    /// Reads a patch from either the day/night layout or the older flat layout.
    ///
    /// Stored blobs are read key by key: a field with the wrong type or range is skipped
    /// with a warning and every other field is kept. Only a non-object blob is an error.
    pub fn from_value(value: serde_json::Value) -> ThemeResult<Self> {
        if legacy::looks_flat(&value) {
            let flat: LegacyFlatSettings =
                serde_json::from_value(readable_fields::<LegacyFlatSettings>("settings", value))?;
            tracing::info!("migrating flat settings layout to day/night");
            return Ok(flat.into_patch());
        }
        let serde_json::Value::Object(sections) = value else {
            return Ok(serde_json::from_value(value)?);
        };
        let sections = sections
            .into_iter()
            .map(|(name, section)| {
                let section = match name.as_str() {
                    "day" | "night" => readable_fields::<ThemeConfigPatch>(&name, section),
                    "general" => readable_fields::<GeneralSettingsPatch>(&name, section),
                    _ => section,
                };
                (name, section)
            })
            .collect();
        Ok(serde_json::from_value(serde_json::Value::Object(sections))?)
    }
}

// Keeps the fields of `section` that `T` can read on their own. A section that is not an
// object (or null) is dropped entirely.
fn readable_fields<T: serde::de::DeserializeOwned>(
    section_name: &str,
    section: serde_json::Value,
) -> serde_json::Value {
    let object = match section {
        serde_json::Value::Object(object) => object,
        serde_json::Value::Null => return serde_json::Value::Null,
        other => {
            tracing::warn!(section = section_name, value = %other, "skipping malformed settings section");
            return serde_json::Value::Null;
        }
    };
    let readable = object
        .into_iter()
        .filter(|(key, value)| {
            let single = serde_json::Value::Object(serde_json::Map::from_iter([(
                key.clone(),
                value.clone(),
            )]));
            match serde_json::from_value::<T>(single) {
                Ok(_) => true,
                Err(err) => {
                    tracing::warn!(section = section_name, key = %key, %err, "skipping unreadable setting");
                    false
                }
            }
        })
        .collect();
    serde_json::Value::Object(readable)
}

use std::collections::BTreeMap;

use crate::color::{format_alpha, hex_to_rgba};
use crate::theme::{
    resolve_card_text_variant, resolve_feature_color, Feature, FontStyle, RenderTheme,
    SettingsState, ThemeConfig,
};

const GLASS_BASE_DARK: (u8, u8, u8) = (86, 94, 88);
const GLASS_BASE_LIGHT: (u8, u8, u8) = (240, 242, 240);
const GLASS_ALPHA_SCALE_DARK: f64 = 1.8;
const GLASS_ALPHA_SCALE_LIGHT: f64 = 2.0;
const SLIDER_THUMB_OPACITY: f64 = 70.0;
const TRANSITION_DURATION: &str = "0.3s";

const FONT_SYSTEM: &str = "system-ui, -apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, \"Helvetica Neue\", Arial, \"Noto Sans\", sans-serif";
const FONT_SERIF: &str = "\"Iowan Old Style\", \"Apple Garamond\", Baskerville, \"Times New Roman\", \"Droid Serif\", Times, \"Source Serif Pro\", serif";
const FONT_MONOSPACE: &str =
    "Menlo, Monaco, Consolas, \"Liberation Mono\", \"Courier New\", monospace";

/// Fixed-shape token table shared by every render target.
///
/// Dark tokens are derived from the night config and light tokens from the day config, so
/// both are always present regardless of the active render theme or card style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTokens {
    pub accent_color: String,
    pub temperature_color: String,
    pub weather_color: String,
    pub humidity_color: String,
    pub door_color: String,
    pub primary_text_color: String,
    pub secondary_text_color: String,
    pub card_primary_text_color: String,
    pub card_secondary_text_color: String,
    pub border_radius: String,
    pub border_width: String,
    pub separator_width: String,
    pub glass_blur: String,
    pub glass_bg_color_dark: String,
    pub glass_bg_color_light: String,
    pub glass_border_color_dark: String,
    pub glass_border_color_light: String,
    pub glass_shadow_dark: String,
    pub glass_shadow_light: String,
    pub solid_bg_color_dark: String,
    pub solid_bg_color_light: String,
    pub solid_border_color_dark: String,
    pub solid_border_color_light: String,
    pub solid_shadow_dark: String,
    pub solid_shadow_light: String,
    pub paper_bg_color_dark: String,
    pub paper_bg_color_light: String,
    pub paper_border_color_dark: String,
    pub paper_border_color_light: String,
    pub paper_shadow_dark: String,
    pub paper_shadow_light: String,
    pub floating_bg_color_dark: String,
    pub floating_bg_color_light: String,
    pub floating_shadow_dark: String,
    pub floating_shadow_light: String,
    pub slider_thumb_bg_color: String,
    pub font_family: String,
    pub transition_duration: String,
    pub card_style: String,
    pub page_background: String,
}

impl StyleTokens {
    pub const COUNT: usize = 40;

    /// Token names without the `--mirage-` prefix, in a stable order.
    pub fn entries(&self) -> [(&'static str, &str); Self::COUNT] {
        [
            ("accent-color", self.accent_color.as_str()),
            ("temperature-color", self.temperature_color.as_str()),
            ("weather-color", self.weather_color.as_str()),
            ("humidity-color", self.humidity_color.as_str()),
            ("door-color", self.door_color.as_str()),
            ("primary-text-color", self.primary_text_color.as_str()),
            ("secondary-text-color", self.secondary_text_color.as_str()),
            ("card-primary-text-color", self.card_primary_text_color.as_str()),
            ("card-secondary-text-color", self.card_secondary_text_color.as_str()),
            ("border-radius", self.border_radius.as_str()),
            ("border-width", self.border_width.as_str()),
            ("separator-width", self.separator_width.as_str()),
            ("glass-blur", self.glass_blur.as_str()),
            ("glass-bg-color-dark", self.glass_bg_color_dark.as_str()),
            ("glass-bg-color-light", self.glass_bg_color_light.as_str()),
            ("glass-border-color-dark", self.glass_border_color_dark.as_str()),
            ("glass-border-color-light", self.glass_border_color_light.as_str()),
            ("glass-shadow-dark", self.glass_shadow_dark.as_str()),
            ("glass-shadow-light", self.glass_shadow_light.as_str()),
            ("solid-bg-color-dark", self.solid_bg_color_dark.as_str()),
            ("solid-bg-color-light", self.solid_bg_color_light.as_str()),
            ("solid-border-color-dark", self.solid_border_color_dark.as_str()),
            ("solid-border-color-light", self.solid_border_color_light.as_str()),
            ("solid-shadow-dark", self.solid_shadow_dark.as_str()),
            ("solid-shadow-light", self.solid_shadow_light.as_str()),
            ("paper-bg-color-dark", self.paper_bg_color_dark.as_str()),
            ("paper-bg-color-light", self.paper_bg_color_light.as_str()),
            ("paper-border-color-dark", self.paper_border_color_dark.as_str()),
            ("paper-border-color-light", self.paper_border_color_light.as_str()),
            ("paper-shadow-dark", self.paper_shadow_dark.as_str()),
            ("paper-shadow-light", self.paper_shadow_light.as_str()),
            ("floating-bg-color-dark", self.floating_bg_color_dark.as_str()),
            ("floating-bg-color-light", self.floating_bg_color_light.as_str()),
            ("floating-shadow-dark", self.floating_shadow_dark.as_str()),
            ("floating-shadow-light", self.floating_shadow_light.as_str()),
            ("slider-thumb-bg-color", self.slider_thumb_bg_color.as_str()),
            ("font-family", self.font_family.as_str()),
            ("transition-duration", self.transition_duration.as_str()),
            ("card-style", self.card_style.as_str()),
            ("page-background", self.page_background.as_str()),
        ]
    }

    /// `--mirage-*` property names mapped to their values.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.entries()
            .into_iter()
            .map(|(name, value)| (format!("--mirage-{name}"), value.to_string()))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.strip_prefix("--mirage-").unwrap_or(name);
        self.entries()
            .into_iter()
            .find_map(|(key, value)| (key == name).then_some(value))
    }
}

pub fn font_family(font: FontStyle) -> &'static str {
    match font {
        FontStyle::System => FONT_SYSTEM,
        FontStyle::Serif => FONT_SERIF,
        FontStyle::Monospace => FONT_MONOSPACE,
    }
}

fn glass_background(base: (u8, u8, u8), transparency: u8, scale: f64) -> String {
    let alpha = (f64::from(transparency) / 100.0 * scale * 100.0).round() / 100.0;
    format!(
        "rgba({}, {}, {}, {})",
        base.0,
        base.1,
        base.2,
        format_alpha(alpha)
    )
}

/// Custom image when set, the plain background color otherwise.
pub fn page_background(config: &ThemeConfig) -> String {
    match config
        .custom_bg
        .as_deref()
        .map(str::trim)
        .filter(|bg| !bg.is_empty())
    {
        Some(image) => format!(
            "url(\"{}\") center / cover no-repeat",
            image.replace('"', "%22")
        ),
        None => config.bg_color.clone(),
    }
}

/// Maps the stored settings and the render theme to the token table. Pure.
pub fn project_style_tokens(settings: &SettingsState, render: RenderTheme) -> StyleTokens {
    let active = settings.active(render);
    let dark = settings.config(RenderTheme::Dark.variant());
    let light = settings.config(RenderTheme::Light.variant());
    let card_text = &settings
        .config(resolve_card_text_variant(active.card_text_color_mode, render))
        .page_text_color;

    StyleTokens {
        accent_color: active.accent_color.clone(),
        temperature_color: resolve_feature_color(active, Feature::Temperature).to_string(),
        weather_color: resolve_feature_color(active, Feature::Weather).to_string(),
        humidity_color: resolve_feature_color(active, Feature::Humidity).to_string(),
        door_color: resolve_feature_color(active, Feature::Door).to_string(),
        primary_text_color: active.page_text_color.primary.clone(),
        secondary_text_color: active.page_text_color.secondary.clone(),
        card_primary_text_color: card_text.primary.clone(),
        card_secondary_text_color: card_text.secondary.clone(),
        border_radius: format!("{}px", active.border_radius),
        border_width: format!("{}px", active.border_thickness),
        separator_width: format!("{}px", active.separator_thickness),
        glass_blur: format!("{}px", active.blur_intensity),
        glass_bg_color_dark: glass_background(
            GLASS_BASE_DARK,
            dark.transparency,
            GLASS_ALPHA_SCALE_DARK,
        ),
        glass_bg_color_light: glass_background(
            GLASS_BASE_LIGHT,
            light.transparency,
            GLASS_ALPHA_SCALE_LIGHT,
        ),
        glass_border_color_dark: "rgba(255, 255, 255, 0.15)".to_string(),
        glass_border_color_light: "rgba(0, 0, 0, 0.1)".to_string(),
        glass_shadow_dark: "0 8px 24px rgba(0, 0, 0, 0.3)".to_string(),
        glass_shadow_light: "0 8px 24px rgba(0, 0, 0, 0.1)".to_string(),
        solid_bg_color_dark: dark.solid_color.clone(),
        solid_bg_color_light: light.solid_color.clone(),
        solid_border_color_dark: "rgba(255, 255, 255, 0.1)".to_string(),
        solid_border_color_light: "rgba(0, 0, 0, 0.08)".to_string(),
        solid_shadow_dark: "0 2px 8px rgba(0, 0, 0, 0.3)".to_string(),
        solid_shadow_light: "0 2px 8px rgba(0, 0, 0, 0.08)".to_string(),
        paper_bg_color_dark: dark.paper_color.clone(),
        paper_bg_color_light: light.paper_color.clone(),
        paper_border_color_dark: "rgba(255, 255, 255, 0.1)".to_string(),
        paper_border_color_light: "rgba(0, 0, 0, 0.08)".to_string(),
        paper_shadow_dark: "0 6px 16px rgba(0, 0, 0, 0.5)".to_string(),
        paper_shadow_light: "0 4px 12px rgba(0, 0, 0, 0.1)".to_string(),
        floating_bg_color_dark: hex_to_rgba(&dark.floating_color, f64::from(dark.floating_opacity)),
        floating_bg_color_light: hex_to_rgba(
            &light.floating_color,
            f64::from(light.floating_opacity),
        ),
        floating_shadow_dark: "0 6px 20px rgba(0, 0, 0, 0.3)".to_string(),
        floating_shadow_light: "0 6px 20px rgba(0, 0, 0, 0.1)".to_string(),
        slider_thumb_bg_color: hex_to_rgba(&active.accent_color, SLIDER_THUMB_OPACITY),
        font_family: font_family(settings.general.font).to_string(),
        transition_duration: if settings.general.animations_enabled {
            TRANSITION_DURATION.to_string()
        } else {
            "0s".to_string()
        },
        card_style: active.card_style.as_str().to_string(),
        page_background: page_background(active),
    }
}

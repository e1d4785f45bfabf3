//! Home Assistant theme dictionaries derived from the day and night configs.

use std::collections::BTreeMap;

use crate::color::hex_to_rgba;
use crate::theme::{Feature, SettingsState, ThemeConfig};

pub const DARK_THEME_NAME: &str = "Mirage Dark";
pub const LIGHT_THEME_NAME: &str = "Mirage Light";

const ACCENT_REFERENCE: &str = "var(--mirage-accent-color)";

pub type ThemeVariables = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Dark,
    Light,
}

impl Mode {
    const fn suffix(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    const fn glass_base(self) -> &'static str {
        match self {
            Self::Dark => "86, 94, 88",
            Self::Light => "240, 242, 240",
        }
    }

    const fn glass_scale(self) -> f64 {
        match self {
            Self::Dark => 1.8,
            Self::Light => 2.0,
        }
    }
}

// Whole widths keep one decimal place (`1.0px`), matching the stored float form.
fn decimal_px(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}px")
    } else {
        format!("{value}px")
    }
}

fn theme_variables(config: &ThemeConfig, mode: Mode) -> ThemeVariables {
    let suffix = mode.suffix();
    let mut vars = ThemeVariables::new();
    let mut set = |name: String, value: String| {
        vars.insert(name, value);
    };

    set("mirage-accent-color".into(), config.accent_color.clone());
    // An unset feature color is left to follow the accent variable at render time.
    for feature in Feature::ALL {
        let value = config
            .feature_color(feature)
            .filter(|color| !color.trim().is_empty())
            .unwrap_or(ACCENT_REFERENCE);
        let name = match feature {
            Feature::Temperature => "mirage-temperature-color",
            Feature::Weather => "mirage-weather-color",
            Feature::Humidity => "mirage-humidity-color",
            Feature::Door => "mirage-door-color",
        };
        set(name.into(), value.to_string());
    }
    set(
        "mirage-primary-text-color".into(),
        config.page_text_color.primary.clone(),
    );
    set(
        "mirage-secondary-text-color".into(),
        config.page_text_color.secondary.clone(),
    );
    set(
        "mirage-border-radius".into(),
        format!("{}px", config.border_radius),
    );
    set(
        "mirage-border-width".into(),
        decimal_px(config.border_thickness),
    );
    set(
        "mirage-separator-width".into(),
        decimal_px(config.separator_thickness),
    );
    set(
        "mirage-glass-blur".into(),
        format!("{}px", config.blur_intensity),
    );

    let glass_alpha = f64::from(config.transparency) / 100.0 * mode.glass_scale();
    set(
        format!("mirage-glass-bg-color-{suffix}"),
        format!("rgba({}, {glass_alpha:.2})", mode.glass_base()),
    );
    set(
        format!("mirage-solid-bg-color-{suffix}"),
        config.solid_color.clone(),
    );
    set(
        format!("mirage-paper-bg-color-{suffix}"),
        config.paper_color.clone(),
    );
    set(
        format!("mirage-floating-bg-color-{suffix}"),
        hex_to_rgba(&config.floating_color, f64::from(config.floating_opacity)),
    );
    set("primary-background-color".into(), config.bg_color.clone());
    vars
}

/// Builds the `Mirage Dark` (night) and `Mirage Light` (day) theme variable maps.
pub fn generate(settings: &SettingsState) -> BTreeMap<&'static str, ThemeVariables> {
    BTreeMap::from([
        (DARK_THEME_NAME, theme_variables(&settings.night, Mode::Dark)),
        (LIGHT_THEME_NAME, theme_variables(&settings.day, Mode::Light)),
    ])
}

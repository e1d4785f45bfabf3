use serde::{Deserialize, Serialize};

use crate::i18n::{translate, Locale};
use crate::theme::{
    grayscale_solid_colors, CardStyle, CardTextColorMode, SettingsPatch, SettingsState,
    ThemeConfigPatch, ThemeResult, ThemeVariant,
};

pub type PresetSettings = SettingsPatch;

/// A named bundle of partial settings.
///
/// `key` is the stable identity; `name` is display text and may be retranslated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub key: String,
    pub name: String,
    #[serde(default, rename = "isDefault", skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
    pub settings: PresetSettings,
}

impl Preset {
    /// Snapshot of every section of `state`.
    pub fn snapshot(name: &str, state: &SettingsState) -> Self {
        let name = name.trim().to_string();
        Self {
            key: name.clone(),
            name,
            is_default: false,
            settings: SettingsPatch::from(state),
        }
    }
}

struct BuiltinPreset {
    key: &'static str,
    name_key: &'static str,
    patch: fn(ThemeVariant) -> ThemeConfigPatch,
}

const BUILTIN_PRESETS: [BuiltinPreset; 3] = [
    BuiltinPreset {
        key: "mirage-default",
        name_key: "presetMirageDefault",
        patch: mirage_default_patch,
    },
    BuiltinPreset {
        key: "pure-glass",
        name_key: "presetPureGlass",
        patch: pure_glass_patch,
    },
    BuiltinPreset {
        key: "minimalist-solid",
        name_key: "presetMinimalistSolid",
        patch: minimalist_solid_patch,
    },
];

fn mirage_default_patch(_: ThemeVariant) -> ThemeConfigPatch {
    ThemeConfigPatch {
        card_style: Some(CardStyle::Glass),
        transparency: Some(30),
        blur_intensity: Some(20),
        border_radius: Some(16),
        border_thickness: Some(1.0),
        separator_thickness: Some(1.0),
        accent_color: Some("#3b82f6".to_string()),
        card_text_color_mode: Some(CardTextColorMode::Auto),
        ..ThemeConfigPatch::default()
    }
}

fn pure_glass_patch(_: ThemeVariant) -> ThemeConfigPatch {
    ThemeConfigPatch {
        card_style: Some(CardStyle::Glass),
        transparency: Some(25),
        blur_intensity: Some(30),
        border_thickness: Some(0.0),
        separator_thickness: Some(0.0),
        border_radius: Some(24),
        card_text_color_mode: Some(CardTextColorMode::Light),
        ..ThemeConfigPatch::default()
    }
}

const MINIMALIST_GRAYSCALE: f64 = 20.0;

fn minimalist_solid_patch(variant: ThemeVariant) -> ThemeConfigPatch {
    let (night, day) = grayscale_solid_colors(MINIMALIST_GRAYSCALE);
    let solid_color = match variant {
        ThemeVariant::Day => day,
        ThemeVariant::Night => night,
    };
    ThemeConfigPatch {
        card_style: Some(CardStyle::Solid),
        solid_color: Some(solid_color),
        border_radius: Some(8),
        border_thickness: Some(1.0),
        separator_thickness: Some(1.0),
        card_text_color_mode: Some(CardTextColorMode::Dark),
        ..ThemeConfigPatch::default()
    }
}

pub fn is_builtin_key(key: &str) -> bool {
    BUILTIN_PRESETS.iter().any(|builtin| builtin.key == key)
}

// A stored user preset keyed like a built-in could never be applied or deleted.
fn unshadow_builtin_key(key: String) -> String {
    if !is_builtin_key(&key) {
        return key;
    }
    let renamed = format!("{key}-custom");
    tracing::warn!(key = %key, renamed = %renamed, "user preset used a built-in key; renaming it");
    renamed
}

/// Built-in presets with names resolved for `locale`. They apply to both variants.
pub fn builtin_presets(locale: Locale) -> Vec<Preset> {
    BUILTIN_PRESETS
        .iter()
        .map(|builtin| Preset {
            key: builtin.key.to_string(),
            name: translate(locale, builtin.name_key, &[]),
            is_default: true,
            settings: SettingsPatch {
                day: Some((builtin.patch)(ThemeVariant::Day)),
                night: Some((builtin.patch)(ThemeVariant::Night)),
                general: None,
            },
        })
        .collect()
}

// Older storage had no `key` and kept flat single-theme settings.
#[derive(Debug, Deserialize)]
struct StoredPreset {
    #[serde(default)]
    key: Option<String>,
    name: String,
    settings: serde_json::Value,
}

/// Parses the user preset array, migrating entries written by older revisions.
/// Entries that cannot be read are skipped.
pub fn parse_user_presets(serialized: &str) -> serde_json::Result<Vec<Preset>> {
    let stored: Vec<serde_json::Value> = serde_json::from_str(serialized)?;
    let presets = stored
        .into_iter()
        .filter_map(|entry| match migrate_stored_preset(entry) {
            Ok(preset) => Some(preset),
            Err(err) => {
                tracing::warn!(?err, "skipping unreadable stored preset");
                None
            }
        })
        .collect();
    Ok(presets)
}

fn migrate_stored_preset(entry: serde_json::Value) -> ThemeResult<Preset> {
    let stored: StoredPreset = serde_json::from_value(entry)?;
    let key = match stored.key {
        Some(key) if !key.trim().is_empty() => key,
        _ => stored.name.trim().to_string(),
    };
    let key = unshadow_builtin_key(key);
    let settings = SettingsPatch::from_value(stored.settings)?;
    Ok(Preset {
        key,
        name: stored.name,
        is_default: false,
        settings,
    })
}

/// Built-in presets for the current locale followed by user presets.
#[derive(Debug, Clone)]
pub struct PresetLibrary {
    locale: Locale,
    builtins: Vec<Preset>,
    user: Vec<Preset>,
}

impl PresetLibrary {
    pub fn new(locale: Locale, user: Vec<Preset>) -> Self {
        let user = user
            .into_iter()
            .filter(|preset| !preset.is_default)
            .map(|preset| Preset {
                key: unshadow_builtin_key(preset.key),
                ..preset
            })
            .collect();
        Self {
            locale,
            builtins: builtin_presets(locale),
            user,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Regenerates built-in names for `locale`. User preset names are literal and stay.
    pub fn set_locale(&mut self, locale: Locale) {
        if self.locale == locale {
            return;
        }
        self.locale = locale;
        self.builtins = builtin_presets(locale);
    }

    pub fn presets(&self) -> impl Iterator<Item = &Preset> {
        self.builtins.iter().chain(self.user.iter())
    }

    pub fn builtins(&self) -> &[Preset] {
        &self.builtins
    }

    pub fn user_presets(&self) -> &[Preset] {
        &self.user
    }

    pub fn find(&self, key: &str) -> Option<&Preset> {
        self.presets().find(|preset| preset.key == key)
    }

    /// Snapshots `state` under `name`, replacing a user preset with the same key.
    /// Returns `None` for a blank name or a name equal to a built-in key.
    pub fn save_preset(&mut self, name: &str, state: &SettingsState) -> Option<&Preset> {
        if name.trim().is_empty() {
            return None;
        }
        if is_builtin_key(name.trim()) {
            tracing::warn!(key = name.trim(), "refusing to save over a built-in preset key");
            return None;
        }
        let preset = Preset::snapshot(name, state);
        let index = match self
            .user
            .iter()
            .position(|existing| !existing.is_default && existing.key == preset.key)
        {
            Some(index) => {
                tracing::debug!(key = %preset.key, "replacing user preset");
                self.user[index] = preset;
                index
            }
            None => {
                tracing::debug!(key = %preset.key, "adding user preset");
                self.user.push(preset);
                self.user.len() - 1
            }
        };
        self.user.get(index)
    }

    /// Removes a user preset. Built-in keys are never deletable.
    pub fn delete_preset(&mut self, key: &str) -> bool {
        let before = self.user.len();
        self.user
            .retain(|preset| preset.is_default || preset.key != key);
        let removed = self.user.len() != before;
        if removed {
            tracing::debug!(key, "deleted user preset");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn builtin_names_follow_locale_but_keys_do_not() {
        let en = builtin_presets(Locale::En);
        let de = builtin_presets(Locale::De);
        assert_eq!(en.len(), 3);
        assert_eq!(en[0].name, "Mirage Default");
        assert_eq!(de[0].name, "Mirage Standard");
        let en_keys: Vec<_> = en.iter().map(|p| p.key.as_str()).collect();
        let de_keys: Vec<_> = de.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(en_keys, de_keys);
        assert!(en.iter().all(|p| p.is_default));
    }

    #[test]
    fn minimalist_solid_uses_grayscale_per_variant() {
        let presets = builtin_presets(Locale::En);
        let solid = &presets[2];
        assert_eq!(solid.key, "minimalist-solid");
        // 35 + 0.2 * 35 = 42, 235 + 0.2 * 20 = 239
        assert_eq!(
            solid.settings.night.as_ref().unwrap().solid_color.as_deref(),
            Some("#2a2a2a")
        );
        assert_eq!(
            solid.settings.day.as_ref().unwrap().solid_color.as_deref(),
            Some("#efefef")
        );
    }

    #[test]
    fn set_locale_retranslates_builtins_only() {
        let state = SettingsState::default();
        let mut library = PresetLibrary::new(Locale::En, Vec::new());
        library.save_preset("Abendrot", &state);

        library.set_locale(Locale::Fr);
        assert_eq!(library.find("pure-glass").unwrap().name, "Verre pur");
        assert_eq!(library.find("Abendrot").unwrap().name, "Abendrot");
        assert_eq!(library.locale(), Locale::Fr);
    }

    #[test]
    fn save_preset_trims_name_and_replaces_existing_key() {
        let mut state = SettingsState::default();
        let mut library = PresetLibrary::new(Locale::En, Vec::new());

        library.save_preset("  Red Night ", &state).unwrap();
        Arc::make_mut(&mut state.night).accent_color = "#ff0000".to_string();
        let saved = library.save_preset("Red Night", &state).unwrap();
        assert_eq!(saved.key, "Red Night");

        assert_eq!(library.user_presets().len(), 1);
        let stored = library.find("Red Night").unwrap();
        assert_eq!(
            stored.settings.night.as_ref().unwrap().accent_color.as_deref(),
            Some("#ff0000")
        );
    }

    #[test]
    fn save_preset_ignores_blank_names() {
        let mut library = PresetLibrary::new(Locale::En, Vec::new());
        assert!(library.save_preset("   ", &SettingsState::default()).is_none());
        assert!(library.user_presets().is_empty());
    }

    #[test]
    fn saving_with_builtin_key_is_refused() {
        let mut library = PresetLibrary::new(Locale::En, Vec::new());
        assert!(library
            .save_preset(" pure-glass ", &SettingsState::default())
            .is_none());

        assert!(library.user_presets().is_empty());
        assert_eq!(library.builtins().len(), 3);
        assert!(library.find("pure-glass").unwrap().is_default);
    }

    #[test]
    fn stored_presets_with_builtin_keys_are_renamed() {
        let presets = parse_user_presets(
            r##"[
                { "key": "pure-glass", "name": "My Glass", "settings": { "night": { "blurIntensity": 12 } } },
                { "name": "mirage-default", "settings": {} }
            ]"##,
        )
        .unwrap();
        let keys: Vec<_> = presets.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["pure-glass-custom", "mirage-default-custom"]);

        let mut shadowing = Preset::snapshot("x", &SettingsState::default());
        shadowing.key = "minimalist-solid".to_string();
        let mut library = PresetLibrary::new(Locale::En, vec![shadowing]);
        assert_eq!(library.user_presets()[0].key, "minimalist-solid-custom");
        assert!(library.delete_preset("minimalist-solid-custom"));
    }

    #[test]
    fn deleting_builtin_preset_is_noop() {
        let mut library = PresetLibrary::new(Locale::En, Vec::new());
        assert!(!library.delete_preset("mirage-default"));
        assert_eq!(library.builtins().len(), 3);
        assert_eq!(library.presets().count(), 3);
    }

    #[test]
    fn delete_preset_removes_user_preset() {
        let mut library = PresetLibrary::new(Locale::En, Vec::new());
        library.save_preset("Ocean", &SettingsState::default());
        library.save_preset("Forest", &SettingsState::default());

        assert!(library.delete_preset("Ocean"));
        assert!(!library.delete_preset("Ocean"));
        let keys: Vec<_> = library.user_presets().iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["Forest"]);
    }

    #[test]
    fn user_presets_serialize_without_default_flag() {
        let preset = Preset::snapshot("Ocean", &SettingsState::default());
        let json = serde_json::to_value(&preset).unwrap();
        assert_eq!(json["key"], "Ocean");
        assert_eq!(json["name"], "Ocean");
        assert!(json.get("isDefault").is_none());
        assert_eq!(json["settings"]["night"]["bgColor"], "#0d1117");
    }

    #[test]
    fn parse_user_presets_migrates_name_keyed_flat_entries() {
        let presets = parse_user_presets(
            r##"[
                { "name": " Sunset ", "settings": { "cardStyle": "paper", "bgColorLight": "#fff7ed" } },
                { "key": "ocean", "name": "Ocean", "settings": { "night": { "accentColor": "#0ea5e9" } } },
                { "settings": {} }
            ]"##,
        )
        .unwrap();

        assert_eq!(presets.len(), 2);
        assert_eq!(presets[0].key, "Sunset");
        let day = presets[0].settings.day.as_ref().unwrap();
        assert_eq!(day.card_style, Some(CardStyle::Paper));
        assert_eq!(day.bg_color.as_deref(), Some("#fff7ed"));
        assert_eq!(
            presets[0].settings.night.as_ref().unwrap().card_style,
            Some(CardStyle::Paper)
        );
        assert_eq!(presets[1].key, "ocean");
        assert!(presets[1].settings.day.is_none());
    }

    #[test]
    fn parse_user_presets_rejects_non_array() {
        assert!(parse_user_presets(r#"{ "name": "x" }"#).is_err());
    }
}

use std::sync::Arc;

use crate::presets::Preset;
use crate::theme::transfer::{export_settings, parse_import};
use crate::theme::{
    CardStyle, CardTextColorMode, Feature, FontStyle, GeneralSettings, GeneralSettingsPatch,
    RenderTheme, SettingsState, TextColors, ThemeConfig, ThemeConfigPatch,
    ThemeResult, ThemeVariant,
};
use crate::ui::{project_style_tokens, StyleTokens};

pub type SubscriptionId = u64;

type Listener = Box<dyn FnMut(&SettingsState, &StyleTokens)>;

/// One typed field of a [`ThemeConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeSetting {
    CardStyle(CardStyle),
    AccentColor(String),
    /// `None` makes the feature track the accent color again.
    FeatureColor(Feature, Option<String>),
    Transparency(u8),
    BlurIntensity(u16),
    SolidColor(String),
    PaperColor(String),
    FloatingColor(String),
    FloatingOpacity(u8),
    BorderThickness(f64),
    SeparatorThickness(f64),
    BorderRadius(u16),
    CardTextColorMode(CardTextColorMode),
    PageTextColor(TextColors),
    BgColor(String),
    CustomBg(Option<String>),
}

impl From<ThemeSetting> for ThemeConfigPatch {
    fn from(setting: ThemeSetting) -> Self {
        let mut patch = ThemeConfigPatch::default();
        match setting {
            ThemeSetting::CardStyle(v) => patch.card_style = Some(v),
            ThemeSetting::AccentColor(v) => patch.accent_color = Some(v),
            ThemeSetting::FeatureColor(feature, color) => {
                return ThemeConfigPatch::feature_color(feature, color)
            }
            ThemeSetting::Transparency(v) => patch.transparency = Some(v),
            ThemeSetting::BlurIntensity(v) => patch.blur_intensity = Some(v),
            ThemeSetting::SolidColor(v) => patch.solid_color = Some(v),
            ThemeSetting::PaperColor(v) => patch.paper_color = Some(v),
            ThemeSetting::FloatingColor(v) => patch.floating_color = Some(v),
            ThemeSetting::FloatingOpacity(v) => patch.floating_opacity = Some(v),
            ThemeSetting::BorderThickness(v) => patch.border_thickness = Some(v),
            ThemeSetting::SeparatorThickness(v) => patch.separator_thickness = Some(v),
            ThemeSetting::BorderRadius(v) => patch.border_radius = Some(v),
            ThemeSetting::CardTextColorMode(v) => patch.card_text_color_mode = Some(v),
            ThemeSetting::PageTextColor(v) => patch.page_text_color = Some(v),
            ThemeSetting::BgColor(v) => patch.bg_color = Some(v),
            ThemeSetting::CustomBg(v) => patch.custom_bg = Some(v),
        }
        patch
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneralSetting {
    Font(FontStyle),
    AnimationsEnabled(bool),
}

impl From<GeneralSetting> for GeneralSettingsPatch {
    fn from(setting: GeneralSetting) -> Self {
        match setting {
            GeneralSetting::Font(font) => Self {
                font: Some(font),
                ..Self::default()
            },
            GeneralSetting::AnimationsEnabled(enabled) => Self {
                animations_enabled: Some(enabled),
                ..Self::default()
            },
        }
    }
}

/// Single owner of the current [`SettingsState`].
///
/// Every mutation replaces the snapshot, reprojects the style tokens and notifies
/// subscribers. Mutations before [`SettingsStore::init`] are ignored.
pub struct SettingsStore {
    state: Option<Arc<SettingsState>>,
    render_theme: RenderTheme,
    edit_variant: ThemeVariant,
    tokens: Option<StyleTokens>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
    preset_undo: Option<Arc<SettingsState>>,
}

impl SettingsStore {
    /// Empty store; the edited variant starts as the one `render_theme` displays.
    pub fn new(render_theme: RenderTheme) -> Self {
        Self {
            state: None,
            render_theme,
            edit_variant: render_theme.variant(),
            tokens: None,
            listeners: Vec::new(),
            next_subscription: 0,
            preset_undo: None,
        }
    }

    pub fn init(&mut self, state: SettingsState) {
        tracing::debug!(render_theme = ?self.render_theme, "settings store initialised");
        self.preset_undo = None;
        self.commit(Arc::new(state));
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_some()
    }

    pub fn get(&self) -> Option<&SettingsState> {
        self.state.as_deref()
    }

    /// Shared handle to the current snapshot.
    pub fn snapshot(&self) -> Option<Arc<SettingsState>> {
        self.state.clone()
    }

    pub fn tokens(&self) -> Option<&StyleTokens> {
        self.tokens.as_ref()
    }

    pub fn render_theme(&self) -> RenderTheme {
        self.render_theme
    }

    pub fn set_render_theme(&mut self, render_theme: RenderTheme) {
        if self.render_theme == render_theme {
            return;
        }
        tracing::debug!(?render_theme, "render theme changed");
        self.render_theme = render_theme;
        if let Some(state) = self.state.clone() {
            self.commit(state);
        }
    }

    pub fn edit_variant(&self) -> ThemeVariant {
        self.edit_variant
    }

    /// Selects the variant updates write into; independent of the render theme.
    pub fn set_edit_variant(&mut self, variant: ThemeVariant) {
        self.edit_variant = variant;
    }

    /// Config the page is rendered with.
    pub fn active_config(&self) -> Option<&ThemeConfig> {
        self.get().map(|state| state.active(self.render_theme))
    }

    /// Config updates currently write into.
    pub fn edited_config(&self) -> Option<&ThemeConfig> {
        self.get().map(|state| state.config(self.edit_variant))
    }

    /// Writes into the edited variant. Returns whether the state changed.
    pub fn update_active_theme_config(&mut self, patch: impl Into<ThemeConfigPatch>) -> bool {
        let variant = self.edit_variant;
        let patch = patch.into();
        self.mutate("theme config", |state| {
            let merged = state.config(variant).merged_with(&patch);
            crate::theme::replace_if_changed(state.config_arc_mut(variant), merged);
        })
    }

    /// Field-name form of [`Self::update_active_theme_config`], e.g. `("accentColor", "#ff0000")`.
    pub fn update_theme_value(&mut self, key: &str, value: serde_json::Value) -> ThemeResult<bool> {
        let patch = ThemeConfigPatch::from_key_value(key, value)?;
        Ok(self.update_active_theme_config(patch))
    }

    pub fn update_general_setting(&mut self, patch: impl Into<GeneralSettingsPatch>) -> bool {
        let patch = patch.into();
        self.mutate("general settings", |state| {
            let mut general = GeneralSettings::clone(&state.general);
            patch.apply_to(&mut general);
            crate::theme::replace_if_changed(&mut state.general, general);
        })
    }

    pub fn update_general_value(&mut self, key: &str, value: serde_json::Value) -> ThemeResult<bool> {
        let patch = GeneralSettingsPatch::from_key_value(key, value)?;
        Ok(self.update_general_setting(patch))
    }

    /// Restores one variant, or everything when `variant` is `None`, to defaults.
    pub fn reset_settings(&mut self, variant: Option<ThemeVariant>) -> bool {
        self.mutate("reset", |state| match variant {
            Some(variant) => {
                crate::theme::replace_if_changed(
                    state.config_arc_mut(variant),
                    ThemeConfig::default_for(variant),
                );
            }
            None => {
                let defaults = SettingsState::default();
                crate::theme::replace_if_changed(&mut state.day, ThemeConfig::clone(&defaults.day));
                crate::theme::replace_if_changed(
                    &mut state.night,
                    ThemeConfig::clone(&defaults.night),
                );
                crate::theme::replace_if_changed(
                    &mut state.general,
                    GeneralSettings::clone(&defaults.general),
                );
            }
        })
    }

    /// Shallow-merges each section present in the preset. Idempotent.
    ///
    /// The state before the first of a run of preset applications is kept for
    /// [`Self::undo_preset`].
    pub fn apply_preset(&mut self, preset: &Preset) -> bool {
        let Some(current) = self.state.clone() else {
            tracing::debug!(key = %preset.key, "ignoring preset before settings loaded");
            return false;
        };
        let next = current.merged_with(&preset.settings);
        if next == *current {
            tracing::debug!(key = %preset.key, "preset already applied");
            return false;
        }
        tracing::debug!(key = %preset.key, "applying preset");
        if self.preset_undo.is_none() {
            self.preset_undo = Some(current);
        }
        self.commit(Arc::new(next));
        true
    }

    pub fn can_undo_preset(&self) -> bool {
        self.preset_undo.is_some()
    }

    pub fn undo_preset(&mut self) -> bool {
        let Some(previous) = self.preset_undo.take() else {
            return false;
        };
        tracing::debug!("restoring settings from before preset");
        self.commit(previous);
        true
    }

    /// Pretty-printed JSON of the current state; `None` before load.
    pub fn export_settings(&self) -> Option<String> {
        let state = self.get()?;
        export_settings(state)
            .inspect_err(|err| tracing::error!(?err, "failed to export settings"))
            .ok()
    }

    /// Replaces the whole state with an exported payload. A payload without both `day`
    /// and `night` is rejected and leaves the state untouched.
    pub fn import_settings(&mut self, serialized: &str) -> bool {
        if !self.is_loaded() {
            tracing::debug!("ignoring import before settings loaded");
            return false;
        }
        match parse_import(serialized) {
            Ok(imported) => {
                tracing::info!("settings imported");
                self.preset_undo = None;
                self.commit(Arc::new(imported));
                true
            }
            Err(err) => {
                tracing::warn!(?err, "rejected settings import");
                false
            }
        }
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&SettingsState, &StyleTokens) + 'static,
    ) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    // Runs a non-preset mutation on a copy of the current snapshot. Sections the closure
    // leaves alone stay pointer-equal.
    fn mutate(&mut self, what: &str, f: impl FnOnce(&mut SettingsState)) -> bool {
        let Some(current) = self.state.as_ref() else {
            tracing::debug!(what, "ignoring update before settings loaded");
            return false;
        };
        let mut next = SettingsState::clone(current);
        f(&mut next);
        if next == **current {
            return false;
        }
        tracing::debug!(what, "settings updated");
        self.preset_undo = None;
        self.commit(Arc::new(next));
        true
    }

    fn commit(&mut self, state: Arc<SettingsState>) {
        let tokens = project_style_tokens(&state, self.render_theme);
        for (_, listener) in &mut self.listeners {
            listener(&state, &tokens);
        }
        self.tokens = Some(tokens);
        self.state = Some(state);
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(RenderTheme::default())
    }
}

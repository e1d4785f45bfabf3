//! `mirage` command line: inspect and edit the standalone settings store.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};

use crate::backend::{ImageUpload, LocalBackend, SettingsBackend};
use crate::config::{load_app_config, AppConfig};
use crate::error::AppError;
use crate::i18n::{translate, Locale};
use crate::presets::{is_builtin_key, PresetLibrary};
use crate::storage::LocalStorage;
use crate::store::{SettingsStore, ThemeSetting};
use crate::sync::BackendSync;
use crate::theme::{RenderTheme, ThemeVariant};
use crate::ui::{ha_theme, render_stylesheet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for RenderTheme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => RenderTheme::Light,
            ThemeArg::Dark => RenderTheme::Dark,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    Day,
    Night,
}

impl From<VariantArg> for ThemeVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Day => ThemeVariant::Day,
            VariantArg::Night => ThemeVariant::Night,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "mirage", version, about = "Day/night dashboard theme settings")]
pub struct Cli {
    /// Theme the page is rendered with; defaults to config.json, then dark.
    #[arg(long, global = true, value_enum)]
    pub theme: Option<ThemeArg>,
    /// Interface language code, e.g. `de` or `fr-FR`.
    #[arg(long, global = true)]
    pub lang: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the projected `--mirage-*` style tokens.
    Tokens,
    /// Print the page stylesheet.
    Css,
    /// Print the generated Home Assistant themes as JSON.
    HaThemes,
    /// Print the current settings as pretty JSON.
    Export,
    /// Replace all settings with an exported file.
    Import { file: PathBuf },
    /// Set one theme field, e.g. `set accentColor '"#ff0000"'`.
    Set {
        key: String,
        /// JSON value; bare text is taken as a string.
        value: String,
        /// Variant to edit; defaults to the one the render theme displays.
        #[arg(long, value_enum)]
        variant: Option<VariantArg>,
    },
    /// Set a general setting (`font`, `animationsEnabled`).
    General { key: String, value: String },
    /// Restore defaults for one variant, or everything.
    Reset {
        #[arg(value_enum)]
        variant: Option<VariantArg>,
    },
    #[command(subcommand)]
    Preset(PresetCommand),
    /// Use an image file as the page background.
    Upload {
        file: PathBuf,
        #[arg(long, value_enum)]
        variant: Option<VariantArg>,
    },
    /// Save the preferred interface language.
    Language { code: String },
}

#[derive(Debug, Subcommand)]
pub enum PresetCommand {
    /// List built-in and user presets.
    List,
    /// Apply a preset by key.
    Apply { key: String },
    /// Save the current settings as a user preset.
    Save { name: String },
    /// Delete a user preset.
    Delete { key: String },
}

/// Parses a JSON argument, falling back to a plain string for bare text.
fn parse_value(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

struct Session {
    runtime: tokio::runtime::Runtime,
    storage: LocalStorage,
    sync: BackendSync,
    store: SettingsStore,
    presets: PresetLibrary,
    locale: Locale,
}

impl Session {
    fn open(
        theme: Option<ThemeArg>,
        lang: Option<&str>,
        config: &AppConfig,
    ) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .context("failed to start async runtime")?;
        let storage = LocalStorage::with_default_paths()?;
        let backend: Arc<dyn SettingsBackend> = Arc::new(LocalBackend::new(storage.clone()));
        let mut sync = BackendSync::new(Some(backend));

        let locale = match lang {
            Some(code) => Locale::resolve(code),
            None => runtime.block_on(sync.load_locale(config.language.as_deref())),
        };
        sync.set_locale(locale);

        let render_theme = theme
            .map(RenderTheme::from)
            .or(config.render_theme)
            .unwrap_or_default();
        let mut store = SettingsStore::new(render_theme);
        store.init(runtime.block_on(sync.load_settings()));

        let presets = PresetLibrary::new(locale, storage.load_user_presets());
        tracing::debug!(locale = locale.code(), ?render_theme, "session opened");
        Ok(Self {
            runtime,
            storage,
            sync,
            store,
            presets,
            locale,
        })
    }

    fn persist(&self) -> anyhow::Result<()> {
        let Some(state) = self.store.get() else {
            return Ok(());
        };
        self.runtime
            .block_on(self.sync.save(state))
            .context("settings were changed but could not be saved")
    }

    fn persist_presets(&self) -> anyhow::Result<()> {
        self.storage
            .save_user_presets(self.presets.user_presets())
            .context("failed to save presets")
    }

    fn select_variant(&mut self, variant: Option<VariantArg>) {
        let variant = variant
            .map(ThemeVariant::from)
            .unwrap_or_else(|| self.store.render_theme().variant());
        self.store.set_edit_variant(variant);
    }

    fn report_change(&self, changed: bool) {
        if !changed {
            tracing::info!("settings already up to date");
        }
    }

    fn run(&mut self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Tokens => {
                if let Some(tokens) = self.store.tokens() {
                    for (name, value) in tokens.to_map() {
                        println!("{name}: {value};");
                    }
                }
            }
            Command::Css => {
                if let (Some(tokens), Some(state)) = (self.store.tokens(), self.store.get()) {
                    let dark = self.store.render_theme() == RenderTheme::Dark;
                    print!(
                        "{}",
                        render_stylesheet(tokens, dark, state.general.animations_enabled)
                    );
                }
            }
            Command::HaThemes => {
                if let Some(state) = self.store.get() {
                    let themes = ha_theme::generate(state);
                    println!("{}", serde_json::to_string_pretty(&themes)?);
                }
            }
            Command::Export => {
                if let Some(exported) = self.store.export_settings() {
                    println!("{exported}");
                }
            }
            Command::Import { file } => {
                let contents = std::fs::read_to_string(&file)
                    .with_context(|| format!("failed to read {}", file.display()))?;
                if !self.store.import_settings(&contents) {
                    bail!(translate(self.locale, "importError", &[]));
                }
                self.persist()?;
            }
            Command::Set {
                key,
                value,
                variant,
            } => {
                self.select_variant(variant);
                let changed = self
                    .store
                    .update_theme_value(&key, parse_value(&value))
                    .map_err(AppError::from)?;
                self.report_change(changed);
                if changed {
                    self.persist()?;
                }
            }
            Command::General { key, value } => {
                let changed = self
                    .store
                    .update_general_value(&key, parse_value(&value))
                    .map_err(AppError::from)?;
                self.report_change(changed);
                if changed {
                    self.persist()?;
                }
            }
            Command::Reset { variant } => {
                let changed = self.store.reset_settings(variant.map(ThemeVariant::from));
                self.report_change(changed);
                if changed {
                    self.persist()?;
                }
            }
            Command::Preset(command) => self.run_preset(command)?,
            Command::Upload { file, variant } => {
                let bytes = std::fs::read(&file)
                    .with_context(|| format!("failed to read {}", file.display()))?;
                let file_name = file
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "background".to_string());
                let upload = ImageUpload::new(file_name, bytes);
                let reference = self
                    .runtime
                    .block_on(self.sync.upload_background_image(&upload))
                    .map_err(AppError::from)?;
                self.select_variant(variant);
                if self
                    .store
                    .update_active_theme_config(ThemeSetting::CustomBg(Some(reference)))
                {
                    self.persist()?;
                }
            }
            Command::Language { code } => {
                let Some(locale) = Locale::from_code(&code) else {
                    bail!("unsupported language `{code}`; expected one of en, de, fr");
                };
                self.storage.save_language(locale)?;
                self.locale = locale;
                self.presets.set_locale(locale);
            }
        }
        Ok(())
    }

    fn run_preset(&mut self, command: PresetCommand) -> anyhow::Result<()> {
        match command {
            PresetCommand::List => {
                for preset in self.presets.presets() {
                    let marker = if preset.is_default { "*" } else { " " };
                    println!("{marker} {:<20} {}", preset.key, preset.name);
                }
            }
            PresetCommand::Apply { key } => {
                let preset = self
                    .presets
                    .find(&key)
                    .cloned()
                    .ok_or_else(|| AppError::UnknownPreset(key.clone()))?;
                let changed = self.store.apply_preset(&preset);
                self.report_change(changed);
                if changed {
                    self.persist()?;
                }
            }
            PresetCommand::Save { name } => {
                let Some(state) = self.store.snapshot() else {
                    return Ok(());
                };
                if is_builtin_key(name.trim()) {
                    return Err(AppError::BuiltinPreset(name.trim().to_string()).into());
                }
                let saved = self
                    .presets
                    .save_preset(&name, &state)
                    .map(|preset| preset.key.clone())
                    .ok_or(AppError::EmptyPresetName)?;
                self.persist_presets()?;
                println!("{saved}");
            }
            PresetCommand::Delete { key } => {
                if is_builtin_key(&key) {
                    return Err(AppError::BuiltinPreset(key).into());
                }
                if !self.presets.delete_preset(&key) {
                    return Err(AppError::UnknownPreset(key).into());
                }
                self.persist_presets()?;
            }
        }
        Ok(())
    }
}

/// Runs one command against the standalone local storage.
///
/// The Home Assistant `config_entry_id` from `config.json` only selects the entry for a Home
/// Assistant backend; the standalone CLI never talks to one and ignores it.
pub fn run() -> anyhow::Result<()> {
    let Cli {
        theme,
        lang,
        command,
    } = Cli::parse();
    let config = load_app_config();
    if let Some(entry) = config.config_entry_id() {
        tracing::debug!(entry, "standalone mode; ignoring Home Assistant config entry");
    }
    let mut session = Session::open(theme, lang.as_deref(), &config)?;
    session.run(command)
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{app_dir_path, config_env_dirs, ConfigPathError, APP_DIR};
use crate::i18n::Locale;
use crate::presets::{parse_user_presets, Preset};
use crate::theme::SettingsState;

const SETTINGS_FILE: &str = "settings.json";
const PRESETS_FILE: &str = "presets.json";
const LANGUAGE_FILE: &str = "language";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize {path}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Standalone persistence: settings mirror, user presets and the saved language code,
/// one file each inside the application config directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub const fn with_paths(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn with_default_paths() -> StorageResult<Self> {
        let (xdg_config_home, home) = config_env_dirs();
        let root = app_dir_path(APP_DIR, xdg_config_home.as_deref(), home.as_deref())
            .map_err(|ConfigPathError::MissingHomeDirectory| StorageError::MissingHomeDirectory)?;
        Ok(Self::with_paths(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    pub fn presets_path(&self) -> PathBuf {
        self.root.join(PRESETS_FILE)
    }

    pub fn language_path(&self) -> PathBuf {
        self.root.join(LANGUAGE_FILE)
    }

    /// Raw settings blob as stored; `None` when nothing was saved yet.
    pub fn load_settings_value(&self) -> StorageResult<Option<serde_json::Value>> {
        let path = self.settings_path();
        let Some(contents) = read_optional(&path)? else {
            return Ok(None);
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| StorageError::Parse { path, source })
    }

    pub fn save_settings(&self, state: &SettingsState) -> StorageResult<()> {
        let path = self.settings_path();
        let contents = serde_json::to_string_pretty(state).map_err(|source| {
            StorageError::Serialize {
                path: path.clone(),
                source,
            }
        })?;
        write_file(&path, &contents)?;
        tracing::debug!(path = %path.display(), "saved settings");
        Ok(())
    }

    /// User presets; an unreadable or malformed file yields an empty list.
    pub fn load_user_presets(&self) -> Vec<Preset> {
        let path = self.presets_path();
        let contents = match read_optional(&path) {
            Ok(Some(contents)) => contents,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(?err, "failed to read stored presets; ignoring them");
                return Vec::new();
            }
        };
        parse_user_presets(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, path = %path.display(), "malformed preset storage; ignoring it");
            Vec::new()
        })
    }

    /// Writes user presets only; built-ins are regenerated and never stored.
    pub fn save_user_presets(&self, presets: &[Preset]) -> StorageResult<()> {
        let path = self.presets_path();
        let user: Vec<&Preset> = presets.iter().filter(|preset| !preset.is_default).collect();
        let contents = serde_json::to_string_pretty(&user).map_err(|source| {
            StorageError::Serialize {
                path: path.clone(),
                source,
            }
        })?;
        write_file(&path, &contents)?;
        tracing::debug!(count = user.len(), "saved user presets");
        Ok(())
    }

    pub fn load_language(&self) -> StorageResult<Option<String>> {
        Ok(read_optional(&self.language_path())?
            .map(|code| code.trim().to_string())
            .filter(|code| !code.is_empty()))
    }

    pub fn save_language(&self, locale: Locale) -> StorageResult<()> {
        write_file(&self.language_path(), locale.code())
    }
}

fn read_optional(path: &Path) -> StorageResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StorageError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_file(path: &Path, contents: &str) -> StorageResult<()> {
    let write_err = |source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, contents).map_err(write_err)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::presets::builtin_presets;

    fn fixture_root() -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let pid = std::process::id();
        path.push(format!("mirage-storage-{pid}-{nanos}"));
        path
    }

    fn with_temp_storage<F: FnOnce(&LocalStorage)>(f: F) {
        let root = fixture_root();
        let storage = LocalStorage::with_paths(root.join("mirage"));
        f(&storage);
        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn empty_storage_reports_nothing_saved() {
        with_temp_storage(|storage| {
            assert!(storage.load_settings_value().unwrap().is_none());
            assert!(storage.load_user_presets().is_empty());
            assert_eq!(storage.load_language().unwrap(), None);
        });
    }

    #[test]
    fn settings_round_trip_through_file() {
        with_temp_storage(|storage| {
            let mut state = SettingsState::default();
            Arc::make_mut(&mut state.day).accent_color = "#ff0000".to_string();
            storage.save_settings(&state).unwrap();

            let value = storage.load_settings_value().unwrap().unwrap();
            assert_eq!(SettingsState::from_partial_value(value).unwrap(), state);
        });
    }

    #[test]
    fn malformed_settings_file_is_a_parse_error() {
        with_temp_storage(|storage| {
            fs::create_dir_all(storage.root()).unwrap();
            fs::write(storage.settings_path(), "{ nope").unwrap();
            assert!(matches!(
                storage.load_settings_value(),
                Err(StorageError::Parse { .. })
            ));
        });
    }

    #[test]
    fn only_user_presets_are_persisted() {
        with_temp_storage(|storage| {
            let mut presets = builtin_presets(Locale::En);
            presets.push(Preset::snapshot("Ocean", &SettingsState::default()));
            storage.save_user_presets(&presets).unwrap();

            let loaded = storage.load_user_presets();
            assert_eq!(loaded.len(), 1);
            assert_eq!(loaded[0].key, "Ocean");
            assert_eq!(loaded[0], presets[3]);
        });
    }

    #[test]
    fn malformed_preset_storage_is_ignored() {
        with_temp_storage(|storage| {
            fs::create_dir_all(storage.root()).unwrap();
            fs::write(storage.presets_path(), "not json").unwrap();
            assert!(storage.load_user_presets().is_empty());
        });
    }

    #[test]
    fn language_is_trimmed_on_load() {
        with_temp_storage(|storage| {
            storage.save_language(Locale::Fr).unwrap();
            assert_eq!(storage.load_language().unwrap().as_deref(), Some("fr"));

            fs::write(storage.language_path(), " de\n").unwrap();
            assert_eq!(storage.load_language().unwrap().as_deref(), Some("de"));
        });
    }
}

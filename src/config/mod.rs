use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::theme::RenderTheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

pub(crate) const APP_DIR: &str = "mirage";
const APP_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct HomeAssistantConfig {
    #[serde(default)]
    pub(crate) config_entry_id: Option<String>,
}

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct AppConfig {
    #[serde(default)]
    pub(crate) language: Option<String>,
    #[serde(default)]
    pub(crate) render_theme: Option<RenderTheme>,
    #[serde(default)]
    pub(crate) home_assistant: Option<HomeAssistantConfig>,
}

impl AppConfig {
    pub(crate) fn config_entry_id(&self) -> Option<&str> {
        self.home_assistant
            .as_ref()
            .and_then(|ha| ha.config_entry_id.as_deref())
            .filter(|id| !id.trim().is_empty())
    }
}

pub(crate) fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return AppConfig::default(),
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = app_dir_path(app_dir, xdg_config_home, home)?;
    path.push(file_name);
    Ok(path)
}

pub(crate) fn app_dir_path(
    app_dir: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture_root() -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let pid = std::process::id();
        path.push(format!("mirage-config-{pid}-{nanos}"));
        path
    }

    fn with_temp_root<F: FnOnce(&Path)>(f: F) {
        let root = fixture_root();
        fs::create_dir_all(&root).unwrap();
        f(&root);
        let _ = fs::remove_dir_all(&root);
    }

    fn write_config(root: &Path, contents: &str) {
        let path = app_config_path(APP_DIR, APP_CONFIG_FILE, Some(root), None).unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            "mirage",
            "settings.json",
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/config-root/mirage/settings.json"));
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path("mirage", "settings.json", None, Some(Path::new("/tmp/home")))
            .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/mirage/settings.json"));
    }

    #[test]
    fn app_config_path_ignores_empty_xdg_config_home() {
        let path = app_config_path(
            "mirage",
            "language",
            Some(Path::new("")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/mirage/language"));
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path("mirage", "settings.json", None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        with_temp_root(|root| {
            let config = load_app_config_with(Some(root), None);
            assert_eq!(config, AppConfig::default());
            assert_eq!(config.config_entry_id(), None);
        });
    }

    #[test]
    fn config_file_is_read() {
        with_temp_root(|root| {
            write_config(
                root,
                r#"{
                    "language": "de",
                    "render_theme": "light",
                    "home_assistant": { "config_entry_id": "01HXYZ" }
                }"#,
            );
            let config = load_app_config_with(Some(root), None);
            assert_eq!(config.language.as_deref(), Some("de"));
            assert_eq!(config.render_theme, Some(RenderTheme::Light));
            assert_eq!(config.config_entry_id(), Some("01HXYZ"));
        });
    }

    #[test]
    fn malformed_config_file_falls_back_to_defaults() {
        with_temp_root(|root| {
            write_config(root, r#"{ "render_theme": "sepia" "#);
            assert_eq!(load_app_config_with(Some(root), None), AppConfig::default());
        });
    }
}

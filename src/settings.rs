use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

const APP_SETTINGS_FILE: &str = "settings.json";
const APP_CONFIG_DIR_NAME: &str = "update-notifier-tray";

pub(crate) const DEFAULT_ICON_PATH: &str =
    "/usr/share/icons/Tango/scalable/status/software-update-available.svg";

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Overrides the backend's check interval.
    #[serde(default)]
    pub check_interval_secs: Option<u64>,
    #[serde(default = "default_notify_updates")]
    pub notify_updates: bool,
    #[serde(default)]
    pub icon_path: Option<String>,
    /// Terminal used by backends whose updater runs in a shell.
    #[serde(default)]
    pub terminal: Option<String>,
}

fn default_notify_updates() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            check_interval_secs: None,
            notify_updates: default_notify_updates(),
            icon_path: None,
            terminal: None,
        }
    }
}

impl AppSettings {
    pub(crate) fn icon_path(&self) -> PathBuf {
        self.icon_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ICON_PATH))
    }
}

/// Picks the poll interval: command line first, then settings, then the
/// backend. Never shorter than one second.
pub(crate) fn effective_interval(
    cli_secs: Option<u64>,
    settings: &AppSettings,
    backend: Duration,
) -> Duration {
    cli_secs
        .or(settings.check_interval_secs)
        .map(Duration::from_secs)
        .unwrap_or(backend)
        .max(Duration::from_secs(1))
}

pub fn load_app_settings() -> AppSettings {
    let Some(path) = app_settings_path() else {
        return AppSettings::default();
    };
    load_app_settings_from(&path)
}

pub(crate) fn load_app_settings_from(path: &Path) -> AppSettings {
    let Ok(content) = fs::read_to_string(path) else {
        return AppSettings::default();
    };

    match serde_json::from_str(&content) {
        Ok(settings) => settings,
        Err(err) => {
            warn!("Ignoring invalid settings file {}: {}", path.display(), err);
            AppSettings::default()
        }
    }
}

fn app_config_dir() -> Option<PathBuf> {
    if let Ok(custom) = env::var("UPDATE_NOTIFIER_TRAY_CONFIG_DIR") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        let trimmed = config_home.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed).join(APP_CONFIG_DIR_NAME));
        }
    }

    if let Ok(home) = env::var("HOME") {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return Some(
                PathBuf::from(trimmed)
                    .join(".config")
                    .join(APP_CONFIG_DIR_NAME),
            );
        }
    }

    None
}

fn app_settings_path() -> Option<PathBuf> {
    app_config_dir().map(|dir| dir.join(APP_SETTINGS_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = load_app_settings_from(&dir.path().join(APP_SETTINGS_FILE));
        assert_eq!(settings, AppSettings::default());
        assert!(settings.notify_updates);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(APP_SETTINGS_FILE);
        fs::write(&path, r#"{ "check_interval_secs": 300, "terminal": "xterm" }"#)
            .expect("write settings");

        let settings = load_app_settings_from(&path);
        assert_eq!(settings.check_interval_secs, Some(300));
        assert_eq!(settings.terminal.as_deref(), Some("xterm"));
        assert!(settings.notify_updates);
        assert_eq!(settings.icon_path(), PathBuf::from(DEFAULT_ICON_PATH));
    }

    #[test]
    fn invalid_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(APP_SETTINGS_FILE);
        fs::write(&path, "{ not json").expect("write settings");
        assert_eq!(load_app_settings_from(&path), AppSettings::default());
    }

    #[test]
    fn interval_precedence() {
        let backend = Duration::from_secs(60);
        let mut settings = AppSettings::default();
        assert_eq!(effective_interval(None, &settings, backend), backend);

        settings.check_interval_secs = Some(600);
        assert_eq!(
            effective_interval(None, &settings, backend),
            Duration::from_secs(600)
        );
        assert_eq!(
            effective_interval(Some(5), &settings, backend),
            Duration::from_secs(5)
        );
        assert_eq!(
            effective_interval(Some(0), &settings, backend),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn blank_icon_path_uses_default() {
        let settings = AppSettings {
            icon_path: Some("   ".to_string()),
            ..AppSettings::default()
        };
        assert_eq!(settings.icon_path(), PathBuf::from(DEFAULT_ICON_PATH));
    }
}

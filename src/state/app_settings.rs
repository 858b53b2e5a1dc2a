use cricket_api::client::ApiConfig;
use log::{LevelFilter, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_REFRESH: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub refresh_interval: Duration,
    pub api: ApiConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: Some(LevelFilter::Info),
            refresh_interval: DEFAULT_REFRESH,
            api: ApiConfig::default(),
        }
    }
}

/// On-disk settings, all optional. Secrets belong here or in the environment,
/// never in source.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SettingsFile {
    pub cricapi_key: Option<String>,
    pub cricapi_url: Option<String>,
    pub rapidapi_key: Option<String>,
    pub rapidapi_url: Option<String>,
    pub rapidapi_host: Option<String>,
    pub refresh_secs: Option<u64>,
    pub log_level: Option<String>,
    pub full_screen: Option<bool>,
}

impl AppSettings {
    /// Defaults, then the config file, then `CRICTUI_*` environment variables.
    pub fn load() -> Self {
        let env = |name: &str| {
            std::env::var(name)
                .ok()
                .filter(|v| !v.trim().is_empty())
        };

        let file = env("CRICTUI_CONFIG")
            .map(PathBuf::from)
            .or_else(default_config_path)
            .and_then(|path| read_settings_file(&path))
            .unwrap_or_default();

        Self::resolve(file, env)
    }

    pub fn resolve(file: SettingsFile, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let pick = |var: &str, from_file: Option<String>| env(var).or(from_file);

        let api = ApiConfig {
            cricapi_url: pick("CRICTUI_CRICAPI_URL", file.cricapi_url)
                .unwrap_or(defaults.api.cricapi_url),
            cricapi_key: pick("CRICTUI_CRICAPI_KEY", file.cricapi_key),
            rapidapi_url: pick("CRICTUI_RAPIDAPI_URL", file.rapidapi_url)
                .unwrap_or(defaults.api.rapidapi_url),
            rapidapi_key: pick("CRICTUI_RAPIDAPI_KEY", file.rapidapi_key),
            rapidapi_host: pick("CRICTUI_RAPIDAPI_HOST", file.rapidapi_host)
                .unwrap_or(defaults.api.rapidapi_host),
        };

        let refresh_interval = env("CRICTUI_REFRESH_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .or(file.refresh_secs)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.refresh_interval);

        let log_level = pick("CRICTUI_LOG_LEVEL", file.log_level)
            .and_then(|v| v.trim().parse::<LevelFilter>().ok())
            .or(defaults.log_level);

        Self {
            full_screen: file.full_screen.unwrap_or(defaults.full_screen),
            log_level,
            refresh_interval,
            api,
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    if let Ok(config_dir) = std::env::var("XDG_CONFIG_HOME")
        && !config_dir.trim().is_empty()
    {
        return Some(PathBuf::from(config_dir).join("crictui").join("config.json"));
    }
    if let Ok(home) = std::env::var("HOME")
        && !home.trim().is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("crictui")
                .join("config.json"),
        );
    }
    None
}

fn read_settings_file(path: &Path) -> Option<SettingsFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(file) => Some(file),
        Err(e) => {
            warn!("ignoring invalid config at {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_sources() {
        let settings = AppSettings::resolve(SettingsFile::default(), env_from(&[]));
        assert_eq!(settings.refresh_interval, Duration::from_secs(60));
        assert_eq!(settings.api, ApiConfig::default());
        assert!(settings.api.cricapi_key.is_none());
        assert_eq!(settings.log_level, Some(LevelFilter::Info));
    }

    #[test]
    fn file_values_apply() {
        let file: SettingsFile = serde_json::from_str(
            r#"{
                "cricapi_key": "from-file",
                "refresh_secs": 30,
                "log_level": "debug",
                "full_screen": true
            }"#,
        )
        .unwrap();
        let settings = AppSettings::resolve(file, env_from(&[]));
        assert_eq!(settings.api.cricapi_key.as_deref(), Some("from-file"));
        assert_eq!(settings.refresh_interval, Duration::from_secs(30));
        assert_eq!(settings.log_level, Some(LevelFilter::Debug));
        assert!(settings.full_screen);
    }

    #[test]
    fn env_overrides_file() {
        let file = SettingsFile {
            cricapi_key: Some("from-file".into()),
            rapidapi_host: Some("file-host".into()),
            refresh_secs: Some(30),
            ..Default::default()
        };
        let settings = AppSettings::resolve(
            file,
            env_from(&[
                ("CRICTUI_CRICAPI_KEY", "from-env"),
                ("CRICTUI_RAPIDAPI_KEY", "rapid-env"),
                ("CRICTUI_REFRESH_SECS", "90"),
            ]),
        );
        assert_eq!(settings.api.cricapi_key.as_deref(), Some("from-env"));
        assert_eq!(settings.api.rapidapi_key.as_deref(), Some("rapid-env"));
        assert_eq!(settings.api.rapidapi_host, "file-host");
        assert_eq!(settings.refresh_interval, Duration::from_secs(90));
    }

    #[test]
    fn bad_refresh_values_fall_back() {
        for value in ["0", "soon", "-5"] {
            let settings = AppSettings::resolve(
                SettingsFile::default(),
                env_from(&[("CRICTUI_REFRESH_SECS", value)]),
            );
            assert_eq!(settings.refresh_interval, DEFAULT_REFRESH, "value {value}");
        }
    }

    #[test]
    fn unknown_log_level_keeps_default() {
        let settings = AppSettings::resolve(
            SettingsFile::default(),
            env_from(&[("CRICTUI_LOG_LEVEL", "chatty")]),
        );
        assert_eq!(settings.log_level, Some(LevelFilter::Info));
    }

    #[test]
    fn invalid_config_file_is_ignored() {
        let path = std::env::temp_dir().join(format!("crictui-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        assert!(read_settings_file(&path).is_none());
        std::fs::remove_file(&path).unwrap();
        assert!(read_settings_file(&path).is_none());
    }
}

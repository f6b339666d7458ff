//! Completion behavior knobs, persisted as JSON under the cache dir.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const CONFIG_DIR: &str = ".zintel";
const CONFIG_FILE: &str = "setting.json";

fn default_true() -> bool {
    true
}

fn default_indent_width() -> u8 {
    4
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Append call parentheses when committing function-like items.
    #[serde(default = "default_true")]
    pub auto_insert_brackets: bool,
    /// Put a space between the function name and its parentheses.
    #[serde(default)]
    pub space_after_function_name: bool,
    /// Indent unit for keyword-pattern re-indentation.
    #[serde(default = "default_indent_width")]
    pub indent_width: u8,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            auto_insert_brackets: true,
            space_after_function_name: false,
            indent_width: 4,
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

pub fn ensure_config_file() -> std::io::Result<PathBuf> {
    let path = config_path().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine config directory",
        )
    })?;
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content = serde_json::to_string_pretty(&CompletionConfig::default())
            .unwrap_or_else(|_| "{}".to_string());
        std::fs::write(&path, content)?;
    }
    Ok(path)
}

pub fn load_config() -> Option<CompletionConfig> {
    let path = config_path()?;
    let data = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&data).ok()
}

fn cache_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Caches"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
            return Some(PathBuf::from(xdg));
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".cache"));
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            return Some(PathBuf::from(local));
        }
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_brackets_without_spacing() {
        let config = CompletionConfig::default();

        assert!(config.auto_insert_brackets);
        assert!(!config.space_after_function_name);
        assert_eq!(config.indent_width, 4);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: CompletionConfig =
            serde_json::from_str(r#"{"space_after_function_name": true}"#).unwrap();

        assert!(config.auto_insert_brackets);
        assert!(config.space_after_function_name);
        assert_eq!(config.indent_width, 4);
    }

    #[test]
    fn round_trips_through_json() {
        let config = CompletionConfig {
            auto_insert_brackets: false,
            space_after_function_name: true,
            indent_width: 2,
        };

        let json = serde_json::to_string(&config).unwrap();
        let back: CompletionConfig = serde_json::from_str(&json).unwrap();

        assert!(!back.auto_insert_brackets);
        assert!(back.space_after_function_name);
        assert_eq!(back.indent_width, 2);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn ensure_config_file_writes_defaults_under_cache_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("XDG_CACHE_HOME", dir.path());

        let path = ensure_config_file().unwrap();
        assert!(path.ends_with(".zintel/setting.json"));

        let loaded = load_config().unwrap();
        assert!(loaded.auto_insert_brackets);
        assert_eq!(loaded.indent_width, 4);
    }
}

//! Runtime configuration.
//!
//! Values are resolved in this order:
//! 1. process environment (native targets, after loading `.env`)
//! 2. the bundled `assets/config.env`
//! 3. built-in defaults

use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::Level;

/// Bundled config for builds without a usable process environment (web, mobile)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_STORAGE_KEY: &str = "rbacAuth";

const API_BASE_VAR: &str = "RBAC_API_BASE";
const LOG_LEVEL_VAR: &str = "RBAC_LOG_LEVEL";

static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::load);

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    pub log_level: Level,
    pub storage_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            log_level: Level::INFO,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl AppConfig {
    /// Process-wide configuration, resolved on first access.
    pub fn global() -> &'static AppConfig {
        &CONFIG
    }

    fn load() -> Self {
        load_dotenv();
        let bundled = parse_env_file(BUNDLED_CONFIG);
        Self::resolve(|key| env_var(key).or_else(|| bundled.get(key).cloned()))
    }

    /// Build a config from a key lookup, falling back to defaults.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let api_base = lookup(API_BASE_VAR)
            .map(|value| normalize_base(&value))
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.api_base);
        let log_level = lookup(LOG_LEVEL_VAR)
            .and_then(|value| value.trim().parse::<Level>().ok())
            .unwrap_or(defaults.log_level);

        Self {
            api_base,
            log_level,
            storage_key: defaults.storage_key,
        }
    }
}

fn normalize_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// Parse `KEY=VALUE` lines, skipping comments and blanks.
pub fn parse_env_file(contents: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            values.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    values
}

#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv() {
    // A missing .env is the normal case outside development.
    let _ = dotenvy::dotenv();
}

#[cfg(target_arch = "wasm32")]
fn load_dotenv() {}

#[cfg(not(target_arch = "wasm32"))]
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(target_arch = "wasm32")]
fn env_var(_key: &str) -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_env_lines() {
        let parsed = parse_env_file("# comment\n\nRBAC_API_BASE = http://api:9000/ \nbroken line\n");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed["RBAC_API_BASE"], "http://api:9000/");
    }

    #[test]
    fn resolve_strips_trailing_slash() {
        let config = AppConfig::resolve(|key| match key {
            "RBAC_API_BASE" => Some("https://chat.example.com/".into()),
            "RBAC_LOG_LEVEL" => Some("debug".into()),
            _ => None,
        });
        assert_eq!(config.api_base, "https://chat.example.com");
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.storage_key, "rbacAuth");
    }

    #[test]
    fn resolve_falls_back_to_defaults() {
        let config = AppConfig::resolve(|key| match key {
            "RBAC_API_BASE" => Some("   ".into()),
            "RBAC_LOG_LEVEL" => Some("loud".into()),
            _ => None,
        });
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn bundled_config_is_well_formed() {
        let parsed = parse_env_file(BUNDLED_CONFIG);
        assert!(parsed.contains_key("RBAC_API_BASE"));
    }
}

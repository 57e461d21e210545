//! Runtime configuration
//!
//! Read once from the environment at startup.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("MEDINOVA_USER_ID must be an integer, got {0:?}")]
    InvalidUserId(String),

    #[error("MEDINOVA_API_URL must start with http:// or https://, got {0:?}")]
    InvalidApiUrl(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Local plan store
    pub database_path: PathBuf,
    /// Plan backend base URL; the local store is used when unset
    pub api_url: Option<String>,
    /// Bearer token attached to backend requests
    pub auth_token: Option<String>,
    /// User whose plans are loaded by default
    pub user_id: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_path = get("MEDINOVA_DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path);

        let api_url = match get("MEDINOVA_API_URL") {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                Some(url.trim_end_matches('/').to_string())
            }
            Some(url) => return Err(ConfigError::InvalidApiUrl(url)),
            None => None,
        };

        let user_id = match get("MEDINOVA_USER_ID") {
            Some(raw) => raw.parse::<i64>().map_err(|_| ConfigError::InvalidUserId(raw))?,
            None => 1,
        };

        Ok(Self {
            database_path,
            api_url,
            auth_token: get("MEDINOVA_AUTH_TOKEN"),
            user_id,
        })
    }
}

/// `<project>/data/medinova.db` when running from `target/`, else next to the binary
fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    // Go up from target/release or target/debug to project root
    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
            path = grandparent.to_path_buf();
        }
    }

    path.push("data");
    path.push("medinova.db");
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.api_url, None);
        assert_eq!(config.auth_token, None);
        assert_eq!(config.user_id, 1);
        assert!(config.database_path.ends_with("data/medinova.db"));
    }

    #[test]
    fn test_all_set() {
        let config = config(&[
            ("MEDINOVA_DATABASE_PATH", "/tmp/plans.db"),
            ("MEDINOVA_API_URL", "https://medinova.example.com/"),
            ("MEDINOVA_AUTH_TOKEN", "abc123"),
            ("MEDINOVA_USER_ID", "42"),
        ])
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/plans.db"));
        assert_eq!(config.api_url.as_deref(), Some("https://medinova.example.com"));
        assert_eq!(config.auth_token.as_deref(), Some("abc123"));
        assert_eq!(config.user_id, 42);
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = config(&[("MEDINOVA_API_URL", "  "), ("MEDINOVA_AUTH_TOKEN", "")]).unwrap();
        assert_eq!(config.api_url, None);
        assert_eq!(config.auth_token, None);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            config(&[("MEDINOVA_USER_ID", "me")]),
            Err(ConfigError::InvalidUserId("me".into()))
        );
        assert_eq!(
            config(&[("MEDINOVA_API_URL", "medinova.example.com")]),
            Err(ConfigError::InvalidApiUrl("medinova.example.com".into()))
        );
    }
}

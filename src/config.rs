//! Process configuration read from the environment

use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_PAGE_SIZE: usize = 5;
const DEFAULT_HEIGHT: usize = 1;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("PAGE_SIZE must be at least 1")]
    ZeroPageSize,
}

/// Users allowed past the entry gate
///
/// An empty list admits nobody.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedUsers {
    ids: HashSet<String>,
}

impl AllowedUsers {
    /// Parse a comma-separated list of user ids
    pub fn parse(raw: &str) -> Self {
        let ids = raw
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect();
        Self { ids }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.ids.contains(user_id)
    }
}

/// Configuration for the notekeeper process
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub port: u16,
    /// Scroller width (`PAGE_SIZE`)
    pub page_width: usize,
    /// Scroller height (`HEIGHT`)
    pub page_height: usize,
    pub allowed_users: AllowedUsers,
    /// Default tracing level when `RUST_LOG` is unset
    pub log_level: String,
    /// Optional JSON file overriding the built-in labels
    pub locale_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let db_path = get("NOTEKEEPER_DB_PATH").map_or_else(
            || {
                let home = get("HOME").unwrap_or_else(|| "/tmp".to_string());
                PathBuf::from(home).join(".notekeeper").join("notes.db")
            },
            PathBuf::from,
        );

        let port = parse_var(&get, "NOTEKEEPER_PORT")?.unwrap_or(DEFAULT_PORT);
        let page_width = parse_var(&get, "PAGE_SIZE")?.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_width == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        let page_height = parse_var(&get, "HEIGHT")?.unwrap_or(DEFAULT_HEIGHT);

        Ok(Self {
            db_path,
            port,
            page_width,
            page_height,
            allowed_users: AllowedUsers::parse(&get("ALLOWED_USERS").unwrap_or_default()),
            log_level: get("LOGS_LEVEL")
                .map(|level| normalize_log_level(&level))
                .filter(|level| !level.is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            locale_path: get("NOTEKEEPER_LOCALE").map(PathBuf::from),
        })
    }

    /// Notes per page
    pub fn capacity(&self) -> usize {
        crate::pagination::capacity(self.page_width, self.page_height)
    }
}

/// Map level names from other logging stacks onto tracing's
fn normalize_log_level(raw: &str) -> String {
    match raw.trim().to_lowercase().as_str() {
        "warning" => "warn".to_string(),
        "critical" | "fatal" => "error".to_string(),
        level => level.to_string(),
    }
}

fn parse_var<T: std::str::FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    match get(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("HOME", "/home/alice")]).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/home/alice/.notekeeper/notes.db"));
        assert_eq!(config.port, 8000);
        assert_eq!(config.capacity(), 5);
        assert!(config.allowed_users.is_empty());
        assert!(!config.allowed_users.contains("42"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.locale_path, None);
    }

    #[test]
    fn test_height_multiplies_capacity() {
        let config = config_from(&[("PAGE_SIZE", "3"), ("HEIGHT", "2")]).unwrap();
        assert_eq!(config.capacity(), 6);
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        assert_eq!(
            config_from(&[("PAGE_SIZE", "five")]).unwrap_err(),
            ConfigError::InvalidNumber {
                name: "PAGE_SIZE",
                value: "five".to_string()
            }
        );
        assert_eq!(
            config_from(&[("PAGE_SIZE", "0")]).unwrap_err(),
            ConfigError::ZeroPageSize
        );
        assert!(config_from(&[("NOTEKEEPER_PORT", "70000")]).is_err());
    }

    #[test]
    fn test_allowed_users() {
        let config = config_from(&[("ALLOWED_USERS", " 101, 202 ,,")]).unwrap();
        let allowed = &config.allowed_users;
        assert!(!allowed.is_empty());
        assert!(allowed.contains("101"));
        assert!(allowed.contains("202"));
        assert!(!allowed.contains("10"));
        assert!(!allowed.contains("303"));
    }

    #[test]
    fn test_log_level_normalized() {
        let config = config_from(&[("LOGS_LEVEL", " WARNING ")]).unwrap();
        assert_eq!(config.log_level, "warn");

        let config = config_from(&[("LOGS_LEVEL", "DEBUG")]).unwrap();
        assert_eq!(config.log_level, "debug");
    }
}

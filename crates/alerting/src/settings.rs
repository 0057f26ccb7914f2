//! Alerting configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::AlertError;

/// Environment prefix, e.g. `CONVEYOR_ALERTS__UNKNOWN_USER_LABEL`
pub const ENV_PREFIX: &str = "CONVEYOR_ALERTS";

/// Alerting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertingConfig {
    /// Users alerts may be assigned to
    pub known_users: Vec<String>,
    /// Recorded as the actor when nobody is assigned
    pub unknown_user_label: String,
    /// Rows shown by compact alert lists (None = no limit)
    pub default_list_limit: Option<usize>,
    /// Refuse assignment to names missing from `known_users`
    pub enforce_roster: bool,
}

impl Default for AlertingConfig {
    fn default() -> Self {
        Self {
            known_users: vec![
                "Kartik More".to_string(),
                "Rajveer Singh".to_string(),
                "Siddharth Jha".to_string(),
                "Hritik Sawant".to_string(),
                "Sachi Gupta".to_string(),
            ],
            unknown_user_label: "Unknown user".to_string(),
            default_list_limit: None,
            enforce_roster: true,
        }
    }
}

impl AlertingConfig {
    /// Load defaults, then the TOML file at `path` (which must exist), then
    /// `CONVEYOR_ALERTS__*` environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, AlertError> {
        // Missing keys fall back to `Default` through `#[serde(default)]`
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            info!("Loading alerting config from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("known_users")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::{Mutex, MutexGuard};

    // Environment variables are process-wide; loads run one at a time
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_temp_config(lines: &[&str]) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "alerting-config-{}.toml",
            uuid::Uuid::new_v4()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    #[test]
    fn test_defaults() {
        let config = AlertingConfig::default();
        assert_eq!(config.known_users.len(), 5);
        assert!(config.known_users.iter().any(|u| u == "Sachi Gupta"));
        assert_eq!(config.unknown_user_label, "Unknown user");
        assert!(config.enforce_roster);
    }

    #[test]
    fn test_load_without_file_gives_defaults() {
        let _guard = env_lock();
        let config = AlertingConfig::load(None).unwrap();
        assert_eq!(config.known_users, AlertingConfig::default().known_users);
    }

    #[test]
    fn test_load_from_toml_file() {
        let _guard = env_lock();
        let path = write_temp_config(&[
            "known_users = [\"Ana\", \"Bo\"]",
            "unknown_user_label = \"Nobody\"",
            "default_list_limit = 3",
        ]);

        let config = AlertingConfig::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.known_users, vec!["Ana".to_string(), "Bo".to_string()]);
        assert_eq!(config.unknown_user_label, "Nobody");
        assert_eq!(config.default_list_limit, Some(3));
        assert!(config.enforce_roster);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let _guard = env_lock();
        let path = std::env::temp_dir().join(format!(
            "alerting-missing-{}.toml",
            uuid::Uuid::new_v4()
        ));

        let result = AlertingConfig::load(Some(&path));
        assert!(matches!(result, Err(AlertError::Config(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _guard = env_lock();
        std::env::set_var("CONVEYOR_ALERTS__KNOWN_USERS", "Ana,Bo");
        std::env::set_var("CONVEYOR_ALERTS__ENFORCE_ROSTER", "false");

        let from_env = AlertingConfig::load(None);

        let path = write_temp_config(&[
            "known_users = [\"Kartik More\"]",
            "unknown_user_label = \"Nobody\"",
            "enforce_roster = true",
        ]);
        let layered = AlertingConfig::load(Some(&path));
        std::fs::remove_file(&path).ok();

        std::env::remove_var("CONVEYOR_ALERTS__KNOWN_USERS");
        std::env::remove_var("CONVEYOR_ALERTS__ENFORCE_ROSTER");

        let config = from_env.unwrap();
        assert_eq!(config.known_users, vec!["Ana".to_string(), "Bo".to_string()]);
        assert!(!config.enforce_roster);
        assert_eq!(config.unknown_user_label, "Unknown user");

        let config = layered.unwrap();
        assert_eq!(config.known_users, vec!["Ana".to_string(), "Bo".to_string()]);
        assert!(!config.enforce_roster);
        assert_eq!(config.unknown_user_label, "Nobody");
    }
}

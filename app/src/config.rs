//! Application configuration.
//!
//! Configuration is loaded from environment variables. The vendor app id is
//! redacted in Debug output.

use std::collections::HashMap;
use std::env;
use std::fmt;

use thiserror::Error;

use livestream_ipc::{ChannelProfile, ClientRole, SessionConfig};

/// Vendor application identifier (required).
pub const APP_ID_VAR: &str = "LIVESTREAM_APP_ID";

/// Role selected at startup: `broadcaster`/`host` or `audience`.
pub const DEFAULT_ROLE_VAR: &str = "LIVESTREAM_DEFAULT_ROLE";

/// Whether the loopback engine confirms joins and leaves by itself.
pub const LOOPBACK_AUTO_CONFIRM_VAR: &str = "LIVESTREAM_LOOPBACK_AUTO_CONFIRM";

/// Application configuration.
#[derive(Clone)]
pub struct Config {
    /// Vendor application identifier.
    pub app_id: String,

    /// Role applied before the first join (default: broadcaster).
    pub default_role: ClientRole,

    /// Loopback engine raises join/leave confirmations (default: true).
    pub loopback_auto_confirm: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("app_id", &"[REDACTED]")
            .field("default_role", &self.default_role)
            .field("loopback_auto_confirm", &self.loopback_auto_confirm)
            .finish()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {var}: {value}")]
    InvalidValue { var: String, value: String },
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a `HashMap` (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let app_id = vars
            .get(APP_ID_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(APP_ID_VAR.to_string()))?
            .clone();

        let default_role = match vars.get(DEFAULT_ROLE_VAR) {
            Some(value) => parse_role(value).ok_or_else(|| ConfigError::InvalidValue {
                var: DEFAULT_ROLE_VAR.to_string(),
                value: value.clone(),
            })?,
            None => ClientRole::Broadcaster,
        };

        let loopback_auto_confirm = match vars.get(LOOPBACK_AUTO_CONFIRM_VAR) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                var: LOOPBACK_AUTO_CONFIRM_VAR.to_string(),
                value: value.clone(),
            })?,
            None => true,
        };

        Ok(Self {
            app_id,
            default_role,
            loopback_auto_confirm,
        })
    }

    /// Session settings derived from this configuration.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            app_id: self.app_id.clone(),
            channel_profile: ChannelProfile::LiveBroadcasting,
        }
    }
}

/// Parse a role name as typed by a user.
pub fn parse_role(value: &str) -> Option<ClientRole> {
    match value.trim().to_ascii_lowercase().as_str() {
        "broadcaster" | "host" => Some(ClientRole::Broadcaster),
        "audience" => Some(ClientRole::Audience),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(&vars(&[(APP_ID_VAR, "abc123")])).unwrap();
        assert_eq!(config.app_id, "abc123");
        assert_eq!(config.default_role, ClientRole::Broadcaster);
        assert!(config.loopback_auto_confirm);
        assert_eq!(
            config.session_config().channel_profile,
            ChannelProfile::LiveBroadcasting
        );
    }

    #[test]
    fn test_missing_app_id() {
        let err = Config::from_vars(&HashMap::new()).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar(APP_ID_VAR.to_string()));

        let err = Config::from_vars(&vars(&[(APP_ID_VAR, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar(APP_ID_VAR.to_string()));
    }

    #[test]
    fn test_audience_role_and_manual_confirm() {
        let config = Config::from_vars(&vars(&[
            (APP_ID_VAR, "abc123"),
            (DEFAULT_ROLE_VAR, "Audience"),
            (LOOPBACK_AUTO_CONFIRM_VAR, "false"),
        ]))
        .unwrap();
        assert_eq!(config.default_role, ClientRole::Audience);
        assert!(!config.loopback_auto_confirm);
    }

    #[test]
    fn test_invalid_role() {
        let err = Config::from_vars(&vars(&[(APP_ID_VAR, "abc123"), (DEFAULT_ROLE_VAR, "moderator")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_debug_redacts_app_id() {
        let config = Config::from_vars(&vars(&[(APP_ID_VAR, "abc123")])).unwrap();
        assert!(!format!("{:?}", config).contains("abc123"));
    }
}

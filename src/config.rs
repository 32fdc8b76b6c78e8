//! Runtime settings and credential loading.
//!
//! Values come from the environment (a `.env` file is loaded by the binary)
//! with a credentials file as fallback for login/password.

use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://www.peeringdb.com/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Credentials file: login on the first line, password on the second.
pub const DEFAULT_CONFIG_FILE: &str = "pdb-intersect.conf";

pub const ENV_BASE_URL: &str = "PEERINGDB_URL";
pub const ENV_USER: &str = "PEERINGDB_USER";
pub const ENV_PASSWORD: &str = "PEERINGDB_PASSWORD";
pub const ENV_TIMEOUT: &str = "PEERINGDB_TIMEOUT_SECS";

/// Directory login. The password never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Read credentials from the environment, then from `config_file`.
    ///
    /// Returns `None` (anonymous access) when neither source has a login.
    pub fn load(config_file: Option<&Path>) -> Option<Credentials> {
        if let Ok(user) = std::env::var(ENV_USER) {
            if !user.is_empty() {
                log::info!("Using directory credentials from ${ENV_USER}");
                return Some(Credentials {
                    user,
                    password: std::env::var(ENV_PASSWORD).unwrap_or_default(),
                });
            }
        }

        let path = config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let creds = Credentials::parse(&content);
                if creds.is_none() {
                    log::warn!("No login in config file {}", path.display());
                }
                creds
            }
            Err(e) => {
                log::warn!(
                    "Config file {} not readable ({e}), using anonymous access",
                    path.display()
                );
                None
            }
        }
    }

    fn parse(content: &str) -> Option<Credentials> {
        let mut lines = content.lines();
        let user = lines.next()?.trim_end().to_string();
        if user.is_empty() {
            return None;
        }
        let password = lines.next().unwrap_or_default().trim_end().to_string();
        Some(Credentials { user, password })
    }
}

/// Settings for the HTTP directory client.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub credentials: Option<Credentials>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            credentials: None,
        }
    }
}

impl Settings {
    /// Build settings from the environment and the optional credentials file.
    pub fn load(config_file: Option<&Path>) -> Settings {
        let base_url = std::env::var(ENV_BASE_URL)
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match std::env::var(ENV_TIMEOUT) {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid ${ENV_TIMEOUT}={raw}");
                DEFAULT_TIMEOUT_SECS
            }),
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Settings {
            base_url,
            timeout_secs,
            credentials: Credentials::load(config_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_credentials() {
        let creds = Credentials::parse("alice  \nsecret\r\n").unwrap();
        assert_eq!(creds.user, "alice");
        assert_eq!(creds.password, "secret");
    }

    #[test]
    fn test_parse_credentials_missing_password() {
        let creds = Credentials::parse("alice").unwrap();
        assert_eq!(creds.password, "");
    }

    #[test]
    fn test_parse_credentials_empty() {
        assert!(Credentials::parse("").is_none());
        assert!(Credentials::parse("\nsecret").is_none());
    }

    #[test]
    fn test_credentials_debug_redacted() {
        let creds = Credentials {
            user: "alice".to_string(),
            password: "secret".to_string(),
        };
        let dbg = format!("{creds:?}");
        assert!(dbg.contains("alice"));
        assert!(!dbg.contains("secret"));
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.timeout_secs, 30);
        assert!(settings.credentials.is_none());
    }
}

//! Environment-driven configuration shared by the club API crates.
//!
//! Each config struct implements [`FromEnv`]; the binary composes them into
//! its own `Config` at startup and fails fast on the first bad variable.

pub mod server;
pub mod tracing;

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Name and version of the running binary, reported by `/health`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// [`AppInfo`] of the crate this macro is expanded in
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::AppInfo {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
        }
    };
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Deployment flavour, from `APP_ENV`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// `production` (any case) selects [`Environment::Production`]; anything else is development
    pub fn from_env() -> Self {
        match env_optional("APP_ENV") {
            Some(value) if value.eq_ignore_ascii_case("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

pub fn env_or_default(key: &str, default: &str) -> String {
    env_optional(key).unwrap_or_else(|| default.to_string())
}

pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env_optional(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Blank values count as unset
pub fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse `key` into `T`, or `default` when unset
pub fn env_parse_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_optional(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment() {
        temp_env::with_var_unset("APP_ENV", || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
        temp_env::with_var("APP_ENV", Some("Production"), || {
            assert!(Environment::from_env().is_production());
        });
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_required_and_default() {
        temp_env::with_var("CLUB_REQUIRED", Some("value"), || {
            assert_eq!(env_required("CLUB_REQUIRED").unwrap(), "value");
        });
        temp_env::with_var("CLUB_REQUIRED", Some(""), || {
            let err = env_required("CLUB_REQUIRED").unwrap_err();
            assert!(matches!(err, ConfigError::MissingEnvVar(_)));
        });
        temp_env::with_var_unset("CLUB_DEFAULTED", || {
            assert_eq!(env_or_default("CLUB_DEFAULTED", "fallback"), "fallback");
        });
    }

    #[test]
    fn test_app_info_macro_uses_crate_metadata() {
        let info = app_info!();
        assert_eq!(info.name, "core_config");
        assert!(!info.version.is_empty());
    }

    #[test]
    fn test_env_optional_treats_blank_as_unset() {
        temp_env::with_var("BLANK_VAR", Some("  "), || {
            assert_eq!(env_optional("BLANK_VAR"), None);
        });
        temp_env::with_var("SET_VAR", Some("x"), || {
            assert_eq!(env_optional("SET_VAR").as_deref(), Some("x"));
        });
    }

    #[test]
    fn test_env_parse_or() {
        temp_env::with_var_unset("TTL_VAR", || {
            assert_eq!(env_parse_or("TTL_VAR", 3600u64).unwrap(), 3600);
        });
        temp_env::with_var("TTL_VAR", Some(" 60 "), || {
            assert_eq!(env_parse_or("TTL_VAR", 3600u64).unwrap(), 60);
        });
        temp_env::with_var("TTL_VAR", Some("soon"), || {
            let err = env_parse_or("TTL_VAR", 3600u64).unwrap_err();
            assert!(err.to_string().contains("TTL_VAR"));
        });
    }
}

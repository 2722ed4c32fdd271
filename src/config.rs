//! Environment-driven configuration.
//!
//! The environment is snapshotted and validated exactly once at boot; the
//! resulting `Config` is immutable and handed to consumers through
//! `AppState`. Nothing else in the crate reads `std::env`.

use {
    crate::domain::package::{Package, default_catalog},
    std::{collections::HashMap, env, time::Duration},
    thiserror::Error,
};

const TRIPAY_PRODUCTION_URL: &str = "https://tripay.co.id/api";
const TRIPAY_SANDBOX_URL: &str = "https://tripay.co.id/api-sandbox";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{name} must be an integer, got: {value}")]
    InvalidInt { name: &'static str, value: String },

    #[error("unknown APP_ENV: {0} (expected development, production or testing)")]
    UnknownProfile(String),

    #[error("ADMIN_EMAIL and ADMIN_PASSWORD are required in production")]
    MissingAdminCredentials,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Development,
    Production,
    Testing,
}

impl Profile {
    fn parse(s: &str) -> Result<Self, ConfigError> {
        match s {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            "testing" => Ok(Self::Testing),
            other => Err(ConfigError::UnknownProfile(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct TripayConfig {
    pub api_key: String,
    pub merchant_code: String,
    pub private_key: String,
    pub callback_url: String,
    pub callback_path: String,
    pub base_url: String,
    pub is_production: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub profile: Profile,
    pub secret_key: String,
    pub database_url: String,
    pub bind_addr: String,
    pub api_base_url: String,
    pub frontend_url: String,
    pub allowed_origins: Vec<String>,
    pub http_timeout: Duration,
    pub order_expiry_hours: u64,
    pub tripay: TripayConfig,
    pub admin: Option<AdminCredentials>,
    pub packages: Vec<Package>,
}

impl Config {
    /// Snapshot the process environment and assemble. The separate
    /// `from_map` step keeps tests off process-global state.
    pub fn from_env() -> Result<Self, ConfigError> {
        let vars: HashMap<String, String> = env::vars().collect();
        Self::from_map(&vars)
    }

    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let profile = match vars.get("APP_ENV").map(String::as_str) {
            None | Some("") => Profile::Development,
            Some(s) => Profile::parse(s)?,
        };

        let secret_key = required(vars, "SECRET_KEY")?;
        let mut database_url = required(vars, "DATABASE_URL")?;
        if profile == Profile::Testing {
            database_url = "sqlite::memory:".to_string();
        }

        let is_production = flag(vars, "TRIPAY_IS_PRODUCTION");
        let default_base = if is_production {
            TRIPAY_PRODUCTION_URL
        } else {
            TRIPAY_SANDBOX_URL
        };
        let tripay = TripayConfig {
            api_key: required(vars, "TRIPAY_API_KEY")?,
            merchant_code: required(vars, "TRIPAY_MERCHANT_CODE")?,
            private_key: required(vars, "TRIPAY_PRIVATE_KEY")?,
            callback_url: required(vars, "TRIPAY_CALLBACK_URL")?,
            callback_path: optional(vars, "TRIPAY_CALLBACK_PATH", "/callback/tripay"),
            base_url: optional(vars, "TRIPAY_BASE_URL", default_base),
            is_production,
        };

        let admin = match (nonempty(vars, "ADMIN_EMAIL"), nonempty(vars, "ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminCredentials { email, password }),
            _ => None,
        };
        if profile == Profile::Production && admin.is_none() {
            return Err(ConfigError::MissingAdminCredentials);
        }

        Ok(Config {
            profile,
            secret_key,
            database_url,
            bind_addr: optional(vars, "BIND_ADDR", "0.0.0.0:3000"),
            api_base_url: optional(vars, "API_BASE_URL", "http://localhost:3000"),
            frontend_url: optional(vars, "FRONTEND_URL", "http://localhost:3000"),
            allowed_origins: list(vars, "ALLOWED_ORIGINS", "http://localhost:3000"),
            http_timeout: Duration::from_secs(integer(vars, "HTTP_TIMEOUT_SECS", 30)?),
            order_expiry_hours: integer(vars, "ORDER_EXPIRY_HOURS", 24)?,
            tripay,
            admin,
            packages: default_catalog(),
        })
    }

    pub fn package(&self, id: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }
}

/// Absent and empty are the same failure — an empty secret is no secret.
fn required(vars: &HashMap<String, String>, name: &'static str) -> Result<String, ConfigError> {
    match vars.get(name) {
        Some(v) if !v.trim().is_empty() => Ok(v.clone()),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn nonempty(vars: &HashMap<String, String>, name: &str) -> Option<String> {
    vars.get(name)
        .filter(|v| !v.trim().is_empty())
        .cloned()
}

fn optional(vars: &HashMap<String, String>, name: &str, default: &str) -> String {
    nonempty(vars, name).unwrap_or_else(|| default.to_string())
}

/// Only the literal `true`, case-insensitively, switches a flag on.
fn flag(vars: &HashMap<String, String>, name: &str) -> bool {
    vars.get(name)
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Comma-separated list: entries trimmed, empties dropped.
fn list(vars: &HashMap<String, String>, name: &str, default: &str) -> Vec<String> {
    let raw = optional(vars, name, default);
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Numeric variables parse as integers; non-numeric input is fatal, never
/// silently defaulted.
fn integer(
    vars: &HashMap<String, String>,
    name: &'static str,
    default: u64,
) -> Result<u64, ConfigError> {
    match nonempty(vars, name) {
        None => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::InvalidInt {
            name,
            value: v.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED_VARS: [&str; 6] = [
        "SECRET_KEY",
        "DATABASE_URL",
        "TRIPAY_API_KEY",
        "TRIPAY_MERCHANT_CODE",
        "TRIPAY_PRIVATE_KEY",
        "TRIPAY_CALLBACK_URL",
    ];

    fn base_env() -> HashMap<String, String> {
        REQUIRED_VARS
            .iter()
            .map(|k| (k.to_string(), format!("{}-value", k.to_lowercase())))
            .collect()
    }

    #[test]
    fn assembles_with_defaults() {
        let config = Config::from_map(&base_env()).unwrap();
        assert_eq!(config.profile, Profile::Development);
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.tripay.callback_path, "/callback/tripay");
        assert_eq!(config.tripay.base_url, TRIPAY_SANDBOX_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.order_expiry_hours, 24);
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.packages.len(), 2);
    }

    #[test]
    fn each_missing_required_var_fails_naming_it() {
        for missing in REQUIRED_VARS {
            let mut env = base_env();
            env.remove(missing);
            let err = Config::from_map(&env).unwrap_err();
            assert!(
                err.to_string().contains(missing),
                "error for {missing} was: {err}"
            );
        }
    }

    #[test]
    fn empty_required_var_fails_like_missing() {
        let mut env = base_env();
        env.insert("SECRET_KEY".into(), "   ".into());
        let err = Config::from_map(&env).unwrap_err();
        assert!(err.to_string().contains("SECRET_KEY"));
    }

    #[test]
    fn flag_accepts_only_literal_true() {
        for (value, expected) in [
            ("true", true),
            ("TRUE", true),
            ("True", true),
            (" true ", true),
            ("false", false),
            ("1", false),
            ("yes", false),
            ("on", false),
            ("", false),
        ] {
            let mut env = base_env();
            env.insert("TRIPAY_IS_PRODUCTION".into(), value.into());
            let config = Config::from_map(&env).unwrap();
            assert_eq!(config.tripay.is_production, expected, "value: {value:?}");
        }
    }

    #[test]
    fn production_flag_switches_base_url() {
        let mut env = base_env();
        env.insert("TRIPAY_IS_PRODUCTION".into(), "true".into());
        let config = Config::from_map(&env).unwrap();
        assert_eq!(config.tripay.base_url, TRIPAY_PRODUCTION_URL);
    }

    #[test]
    fn explicit_base_url_wins_over_flag() {
        let mut env = base_env();
        env.insert("TRIPAY_IS_PRODUCTION".into(), "true".into());
        env.insert("TRIPAY_BASE_URL".into(), "http://localhost:9090".into());
        let config = Config::from_map(&env).unwrap();
        assert_eq!(config.tripay.base_url, "http://localhost:9090");
    }

    #[test]
    fn origin_list_is_trimmed_and_empties_dropped() {
        let mut env = base_env();
        env.insert(
            "ALLOWED_ORIGINS".into(),
            " https://a.example , ,https://b.example,, ".into(),
        );
        let config = Config::from_map(&env).unwrap();
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn non_numeric_integer_is_fatal() {
        let mut env = base_env();
        env.insert("HTTP_TIMEOUT_SECS".into(), "thirty".into());
        let err = Config::from_map(&env).unwrap_err();
        assert!(err.to_string().contains("HTTP_TIMEOUT_SECS"));
        assert!(err.to_string().contains("thirty"));
    }

    #[test]
    fn production_requires_admin_credentials() {
        let mut env = base_env();
        env.insert("APP_ENV".into(), "production".into());
        assert!(matches!(
            Config::from_map(&env),
            Err(ConfigError::MissingAdminCredentials)
        ));

        env.insert("ADMIN_EMAIL".into(), "ops@example.com".into());
        assert!(matches!(
            Config::from_map(&env),
            Err(ConfigError::MissingAdminCredentials)
        ));

        env.insert("ADMIN_PASSWORD".into(), "hunter2".into());
        let config = Config::from_map(&env).unwrap();
        assert_eq!(config.profile, Profile::Production);
        assert!(config.admin.is_some());
    }

    #[test]
    fn development_does_not_require_admin_credentials() {
        let config = Config::from_map(&base_env()).unwrap();
        assert!(config.admin.is_none());
    }

    #[test]
    fn testing_profile_forces_memory_database() {
        let mut env = base_env();
        env.insert("APP_ENV".into(), "testing".into());
        let config = Config::from_map(&env).unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
    }

    #[test]
    fn unknown_profile_is_fatal() {
        let mut env = base_env();
        env.insert("APP_ENV".into(), "staging".into());
        assert!(matches!(
            Config::from_map(&env),
            Err(ConfigError::UnknownProfile(_))
        ));
    }

    #[test]
    fn package_lookup_by_id() {
        let config = Config::from_map(&base_env()).unwrap();
        let package = config.package("chatgpt_plus_1_month").unwrap();
        assert_eq!(package.price.value(), 25_000);
        assert!(config.package("nonexistent").is_none());
    }
}

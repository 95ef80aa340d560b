use std::time::Duration;

use serde::Deserialize;
use tour_api::middleware::access::AccessPolicy;

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub access: AccessConfig,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct BackendConfig {
    /// REST backend serving tours, articles, banners and bookings.
    pub api_url: String,
    /// Hosted auth service; `/api/auth/*` is proxied here.
    pub auth_url: String,
    pub timeout_secs: u64,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct AccessConfig {
    pub protected_prefixes: Vec<String>,
    pub admin_prefixes: Vec<String>,
    pub admin_role: String,
    pub login_path: String,
    pub unauthorized_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:4000".into(),
            auth_url: "http://localhost:4001".into(),
            timeout_secs: 10,
        }
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        let policy = AccessPolicy::default();
        Self {
            protected_prefixes: policy.protected_prefixes,
            admin_prefixes: policy.admin_prefixes,
            admin_role: policy.admin_role,
            login_path: policy.login_path,
            unauthorized_path: policy.unauthorized_path,
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl AccessConfig {
    pub fn policy(&self) -> AccessPolicy {
        AccessPolicy {
            protected_prefixes: self.protected_prefixes.clone(),
            admin_prefixes: self.admin_prefixes.clone(),
            admin_role: self.admin_role.clone(),
            login_path: self.login_path.clone(),
            unauthorized_path: self.unauthorized_path.clone(),
        }
    }
}

pub fn parse(contents: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(contents)
}

pub fn load(path: &str) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => match parse(&contents) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("failed to parse config {path}: {e}, using defaults");
                Config::default()
            }
        },
        Err(e) => {
            tracing::warn!("failed to read config {path}: {e}, using defaults");
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.backend.timeout(), Duration::from_secs(10));
        assert_eq!(config.access.admin_prefixes, vec!["/dashboard", "/admin"]);
        assert_eq!(config.access.protected_prefixes, vec!["/profile"]);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = parse(
            r#"
            [backend]
            api_url = "https://api.example.com/v1"

            [access]
            admin_role = "staff"
            "#,
        )
        .unwrap();
        assert_eq!(config.backend.api_url, "https://api.example.com/v1");
        assert_eq!(config.backend.auth_url, "http://localhost:4001");

        let policy = config.access.policy();
        assert_eq!(policy.admin_role, "staff");
        assert_eq!(policy.login_path, "/login");
        assert!(policy.requires_admin("/dashboard/tours"));
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let config = parse("[backend]\ntimeout_secs = 0\n").unwrap();
        assert_eq!(config.backend.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(parse("[server]\nport = \"eighty\"\n").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load("/nonexistent/tour-site.toml");
        assert_eq!(config.server.bind, "0.0.0.0");
    }
}

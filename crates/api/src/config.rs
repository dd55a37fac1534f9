//! Runtime configuration.
//!
//! Sources, later ones winning: an optional `shopdash.toml` in the working
//! directory, then `SHOPDASH__*` environment variables with `__` between
//! nesting levels (`SHOPDASH__ACCESS__ALLOWED_EMAILS=a@x.io,b@x.io`).

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use shopdash_auth::{AccessPolicy, Role};
use shopdash_store::{ContentStore, HttpContentStore, HttpStoreSettings, InMemoryContentStore};

const ENV_PREFIX: &str = "SHOPDASH";
const CONFIG_FILE: &str = "shopdash";
const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Http,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_dataset")]
    pub dataset: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            base_url: None,
            dataset: default_dataset(),
            api_version: default_api_version(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct AccessConfig {
    #[serde(default)]
    pub allowed_emails: Vec<String>,
    #[serde(default)]
    pub admin_role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default)]
    pub jwt_secret: Option<String>,
    #[serde(default)]
    pub access: AccessConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_dataset() -> String {
    "production".to_string()
}

fn default_api_version() -> String {
    "2021-10-21".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            jwt_secret: None,
            access: AccessConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `shopdash.toml` (optional) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let environment = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("access.allowed_emails");

        let settings = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(environment)
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Parse a TOML document (used for tests and embedded defaults).
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn jwt_secret(&self) -> String {
        match &self.jwt_secret {
            Some(secret) if !secret.is_empty() => secret.clone(),
            _ => {
                tracing::warn!("jwt_secret not set; using insecure dev default");
                DEV_JWT_SECRET.to_string()
            }
        }
    }

    pub fn access_policy(&self) -> AccessPolicy {
        let admin_role = self
            .access
            .admin_role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(|r| Role::new(r.to_string()));
        let policy = AccessPolicy::new(&self.access.allowed_emails, admin_role);

        if policy.allowed_emails().next().is_none() && policy.admin_role().is_none() {
            tracing::warn!("access policy is empty; nobody can reach the admin routes");
        }
        policy
    }

    pub fn build_store(&self) -> Result<Arc<dyn ContentStore>, ConfigError> {
        match self.store.backend {
            StoreBackend::Memory => {
                tracing::info!("using in-memory content store");
                Ok(Arc::new(InMemoryContentStore::new()))
            }
            StoreBackend::Http => {
                let base_url = self
                    .store
                    .base_url
                    .clone()
                    .filter(|u| !u.trim().is_empty())
                    .ok_or_else(|| {
                        ConfigError::Invalid("store.base_url is required for the http backend".to_string())
                    })?;

                tracing::info!(%base_url, dataset = %self.store.dataset, "using hosted content store");
                Ok(Arc::new(HttpContentStore::new(HttpStoreSettings {
                    base_url,
                    dataset: self.store.dataset.clone(),
                    api_version: self.store.api_version.clone(),
                    token: self.store.token.clone(),
                })))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use shopdash_auth::{Principal, PrincipalId};

    #[test]
    fn empty_document_gives_defaults() {
        let cfg = AppConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080");
        assert_eq!(cfg.store.backend, StoreBackend::Memory);
        assert_eq!(cfg.store.api_version, "2021-10-21");
    }

    #[test]
    fn parses_nested_sections() {
        let cfg = AppConfig::from_toml_str(
            r#"
            bind_addr = "127.0.0.1:9000"
            jwt_secret = "s3cret"

            [access]
            allowed_emails = ["owner@example.com"]
            admin_role = "admin"

            [store]
            backend = "http"
            base_url = "https://abc.api.sanity.io"
            dataset = "staging"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.bind_addr, "127.0.0.1:9000");
        assert_eq!(cfg.jwt_secret(), "s3cret");
        assert_eq!(cfg.store.backend, StoreBackend::Http);
        assert_eq!(cfg.store.dataset, "staging");
        assert!(cfg.build_store().is_ok());

        let policy = cfg.access_policy();
        let principal = Principal {
            principal_id: PrincipalId::new("user_1"),
            email: Some("owner@example.com".to_string()),
            roles: vec![],
        };
        assert!(policy.check(&principal).is_ok());
    }

    #[test]
    fn http_backend_needs_base_url() {
        let cfg = AppConfig::from_toml_str("[store]\nbackend = \"http\"\n").unwrap();
        assert!(matches!(cfg.build_store(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn missing_secret_falls_back_to_dev_default() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.jwt_secret(), DEV_JWT_SECRET);
    }

    #[test]
    fn blank_admin_role_is_ignored() {
        let cfg = AppConfig::from_toml_str("[access]\nadmin_role = \"  \"\n").unwrap();
        assert!(cfg.access_policy().admin_role().is_none());
    }
}

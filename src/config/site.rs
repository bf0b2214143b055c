//! Application configuration loading from `storefront.toml` and the environment.
//!
//! The TOML file is optional. Every setting it can hold may also be supplied (and
//! overridden) through an environment variable, which is how `.env` files loaded with
//! `dotenvy` reach the application.

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Config file used when `STOREFRONT_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "storefront.toml";

/// Raw contents of the TOML config file; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub database_url: Option<String>,
    pub bind: Option<String>,
    pub upload_dir: Option<PathBuf>,
    pub public_upload_base: Option<String>,
    pub login_url: Option<String>,
    /// Session tokens accepted by the auth gate
    pub admin_tokens: Vec<AdminToken>,
}

/// A session token and the role it grants.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdminToken {
    pub token: String,
    pub role: String,
}

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `SeaORM` connection URL
    pub database_url: String,
    /// Address the HTTP server listens on
    pub bind_address: SocketAddr,
    /// Directory the blob store writes uploads into
    pub upload_dir: PathBuf,
    /// URL prefix uploads are served from
    pub public_upload_base: String,
    /// Where unauthenticated admin requests are redirected
    pub login_url: String,
    pub admin_tokens: Vec<AdminToken>,
}

/// Loads the TOML config file at `path`.
///
/// # Errors
/// Returns an error if the file cannot be read or is not valid TOML for [`FileConfig`].
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads the application configuration: optional TOML file, then environment overrides.
pub fn load_app_config() -> Result<AppConfig> {
    let path = std::env::var("STOREFRONT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let file = if Path::new(&path).exists() {
        load_config(&path)?
    } else {
        info!("No config file at {}, using environment and defaults", path);
        FileConfig::default()
    };

    resolve_config(file, |key| std::env::var(key).ok())
}

/// Merges a parsed config file with environment lookups into an [`AppConfig`].
///
/// `env` is injected so tests do not depend on the process environment.
pub fn resolve_config<F>(file: FileConfig, env: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let database_url = env("DATABASE_URL")
        .or(file.database_url)
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

    let bind = env("STOREFRONT_BIND")
        .or(file.bind)
        .unwrap_or_else(|| "127.0.0.1:3000".to_string());
    let bind_address = bind.parse::<SocketAddr>().map_err(|e| Error::Config {
        message: format!("Invalid bind address {bind:?}: {e}"),
    })?;

    let upload_dir = env("STOREFRONT_UPLOAD_DIR")
        .map(PathBuf::from)
        .or(file.upload_dir)
        .unwrap_or_else(|| PathBuf::from("data/uploads"));

    let public_upload_base = env("STOREFRONT_PUBLIC_UPLOAD_BASE")
        .or(file.public_upload_base)
        .unwrap_or_else(|| "/uploads".to_string());

    let login_url = env("STOREFRONT_LOGIN_URL")
        .or(file.login_url)
        .unwrap_or_else(|| "/login".to_string());

    let admin_tokens = match env("STOREFRONT_ADMIN_TOKENS") {
        Some(raw) => parse_admin_tokens(&raw)?,
        None => file.admin_tokens,
    };

    Ok(AppConfig {
        database_url,
        bind_address,
        upload_dir,
        public_upload_base: public_upload_base.trim_end_matches('/').to_string(),
        login_url,
        admin_tokens,
    })
}

/// Parses `token:role` pairs separated by commas.
fn parse_admin_tokens(raw: &str) -> Result<Vec<AdminToken>> {
    raw.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (token, role) = pair.split_once(':').ok_or_else(|| Error::Config {
                message: format!("Admin token entry {pair:?} must be token:role"),
            })?;
            if token.is_empty() || role.is_empty() {
                return Err(Error::Config {
                    message: format!("Admin token entry {pair:?} has an empty part"),
                });
            }
            Ok(AdminToken {
                token: token.to_string(),
                role: role.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_parse_file_config() {
        let toml_str = r#"
            database_url = "sqlite::memory:"
            bind = "0.0.0.0:8080"
            login_url = "/auth/login"

            [[admin_tokens]]
            token = "s3cret"
            role = "admin"
        "#;

        let file: FileConfig = toml::from_str(toml_str).unwrap();
        let config = resolve_config(file, env_of(&[])).unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_address.port(), 8080);
        assert_eq!(config.login_url, "/auth/login");
        assert_eq!(config.admin_tokens.len(), 1);
        assert_eq!(config.admin_tokens[0].role, "admin");
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = resolve_config(FileConfig::default(), env_of(&[])).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_address.to_string(), "127.0.0.1:3000");
        assert_eq!(config.public_upload_base, "/uploads");
        assert!(config.admin_tokens.is_empty());
    }

    #[test]
    fn test_env_overrides_file() {
        let file = FileConfig {
            bind: Some("127.0.0.1:1".to_string()),
            public_upload_base: Some("/files/".to_string()),
            ..FileConfig::default()
        };
        let config = resolve_config(
            file,
            env_of(&[
                ("STOREFRONT_BIND", "127.0.0.1:4000"),
                ("STOREFRONT_ADMIN_TOKENS", "a:admin, b:editor"),
            ]),
        )
        .unwrap();
        assert_eq!(config.bind_address.port(), 4000);
        assert_eq!(config.public_upload_base, "/files");
        assert_eq!(
            config.admin_tokens,
            vec![
                AdminToken {
                    token: "a".into(),
                    role: "admin".into()
                },
                AdminToken {
                    token: "b".into(),
                    role: "editor".into()
                },
            ]
        );
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let bad_bind = resolve_config(
            FileConfig::default(),
            env_of(&[("STOREFRONT_BIND", "not-an-address")]),
        );
        assert!(matches!(bad_bind, Err(Error::Config { .. })));

        let bad_tokens = resolve_config(
            FileConfig::default(),
            env_of(&[("STOREFRONT_ADMIN_TOKENS", "missing-role")]),
        );
        assert!(matches!(bad_tokens, Err(Error::Config { .. })));
    }
}

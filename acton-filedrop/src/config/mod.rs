//! Configuration management for acton-filedrop
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. `PORT` and `STORAGE_DIR` environment variables (highest priority)
//! 2. Environment variables with the `FILEDROP_` prefix
//! 3. `./filedrop.toml`, or the file passed with `--config`
//! 4. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # filedrop.toml
//! host = "0.0.0.0"
//! port = 8080
//! storage_dir = "/srv/filedrop/uploads"
//! public_dir = "/srv/filedrop/public"
//! allowed_extensions = [".pdf", ".png"]
//! max_upload_bytes = 26214400
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use acton_filedrop::config::FiledropConfig;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = FiledropConfig::load(None)?;
//! println!("listening on {}", config.listen_addr());
//! # Ok(())
//! # }
//! ```

use crate::storage::{UploadPolicy, DEFAULT_ALLOWED_EXTENSIONS};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file read from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "filedrop.toml";

/// Prefix for namespaced environment overrides
pub const ENV_PREFIX: &str = "FILEDROP_";

/// Complete service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiledropConfig {
    /// Interface to bind
    pub host: String,

    /// Listen port
    pub port: u16,

    /// Directory holding uploaded files; created at startup if missing
    pub storage_dir: PathBuf,

    /// Static asset tree served at `/`
    pub public_dir: PathBuf,

    /// Accepted upload extensions, e.g. `".pdf"`
    pub allowed_extensions: Vec<String>,

    /// Request body cap for uploads; `None` means unlimited
    pub max_upload_bytes: Option<u64>,
}

impl Default for FiledropConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            storage_dir: PathBuf::from("./uploads"),
            public_dir: PathBuf::from("./public"),
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_string())
                .collect(),
            max_upload_bytes: None,
        }
    }
}

impl FiledropConfig {
    /// Load configuration from defaults, file and environment
    ///
    /// With `path` set, that file is read instead of `./filedrop.toml`.
    /// A missing file is not an error; its values are simply absent.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration file contains invalid TOML
    /// - A value has the wrong type (e.g. `PORT=http`)
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = Self::figment(path).extract()?;
        Ok(config)
    }

    /// The provider chain behind [`FiledropConfig::load`]
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let file = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);

        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Env::raw().only(&["PORT", "STORAGE_DIR"]))
    }

    /// `host:port` string suitable for binding
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Upload policy built from the configured allow-list
    #[must_use]
    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::new(&self.allowed_extensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = FiledropConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.storage_dir, PathBuf::from("./uploads"));
        assert_eq!(config.public_dir, PathBuf::from("./public"));
        assert_eq!(config.allowed_extensions.len(), 10);
        assert_eq!(config.max_upload_bytes, None);
        assert_eq!(config.listen_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_load_without_sources_yields_defaults() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let config: FiledropConfig = FiledropConfig::figment(None).extract()?;
            assert_eq!(config, FiledropConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                port = 8080
                storage_dir = "/srv/uploads"
                allowed_extensions = ["pdf", ".TXT"]
                max_upload_bytes = 1024
                "#,
            )?;

            let config: FiledropConfig = FiledropConfig::figment(None).extract()?;
            assert_eq!(config.port, 8080);
            assert_eq!(config.storage_dir, PathBuf::from("/srv/uploads"));
            assert_eq!(config.max_upload_bytes, Some(1024));
            assert_eq!(config.host, "127.0.0.1");

            let policy = config.upload_policy();
            let allowed: Vec<&str> = policy.allowed_extensions().collect();
            assert_eq!(allowed, vec![".pdf", ".txt"]);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_path() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(DEFAULT_CONFIG_FILE, "port = 1111")?;
            jail.create_file("prod.toml", "port = 2222")?;

            let config: FiledropConfig =
                FiledropConfig::figment(Some(Path::new("prod.toml"))).extract()?;
            assert_eq!(config.port, 2222);
            Ok(())
        });
    }

    #[test]
    fn test_env_precedence() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(DEFAULT_CONFIG_FILE, "port = 1111\nhost = \"0.0.0.0\"")?;
            jail.set_env("FILEDROP_PORT", "2222");
            jail.set_env("FILEDROP_STORAGE_DIR", "/from/prefixed");

            let config: FiledropConfig = FiledropConfig::figment(None).extract()?;
            assert_eq!(config.port, 2222);
            assert_eq!(config.host, "0.0.0.0");
            assert_eq!(config.storage_dir, PathBuf::from("/from/prefixed"));

            jail.set_env("PORT", "3333");
            jail.set_env("STORAGE_DIR", "/from/bare");

            let config: FiledropConfig = FiledropConfig::figment(None).extract()?;
            assert_eq!(config.port, 3333);
            assert_eq!(config.storage_dir, PathBuf::from("/from/bare"));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("PORT", "http");
            assert!(FiledropConfig::load(None).is_err());
            Ok(())
        });
    }
}

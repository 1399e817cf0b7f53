//
//  jenkins-cli
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Configuration is read once at startup from a TOML file in the
//! platform-specific configuration directory, then overridden by command-line
//! flags and environment variables (see [`crate::cli::GlobalOptions`]). The
//! resolved [`JenkinsConfig`] is passed by reference to
//! [`JenkinsClient::new`](crate::api::JenkinsClient::new).
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/jenkins-cli/config.toml`
//! - **macOS**: `~/Library/Application Support/jenkins-cli/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\jenkins-cli\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [jenkins]
//! url = "https://ci.example.com"
//! user = "ci-bot"
//! token = "115a52070b"            # produced by `jenkins-cli token encode`
//! default_job = "jenkins-demo"
//! timeout_secs = 30
//! key_derivation = "consistent"   # or "legacy"
//!
//! [jenkins.default_parameters]
//! BRANCH_NAME = "master"
//! BUILD_TYPE = "release"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::codec::{KeyDerivation, Obfuscator, DEFAULT_SALT};

/// Default Jenkins server address.
pub const DEFAULT_URL: &str = "http://localhost:8080";

/// Job used when none is given on the command line.
pub const DEFAULT_JOB: &str = "jenkins-demo";

/// Per-call timeout applied to every request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Prefix addressing one entry of `default_parameters`, as in
/// `default_parameters.BRANCH_NAME`.
pub const PARAMETER_KEY_PREFIX: &str = "default_parameters.";

/// Keys accepted by [`Config::get`] and [`Config::set`], besides
/// [`PARAMETER_KEY_PREFIX`] keys.
pub const VALID_KEYS: &[&str] = &[
    "url",
    "user",
    "token",
    "default_job",
    "timeout_secs",
    "key_derivation",
    "salt",
];

/// Top-level configuration file contents.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Connection settings for the Jenkins server.
    #[serde(default)]
    pub jenkins: JenkinsConfig,
}

/// Connection settings for a Jenkins server.
///
/// Immutable once handed to the client. All fields fall back to their
/// defaults when missing from the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JenkinsConfig {
    /// Base address of the server, e.g. `https://ci.example.com`.
    #[serde(default = "default_url")]
    pub url: String,

    /// Username used for Basic authentication.
    #[serde(default)]
    pub user: String,

    /// Obfuscated API token (hex), never the plain token.
    #[serde(default)]
    pub token: String,

    /// Job triggered or queried when no job name is given.
    #[serde(default = "default_job")]
    pub default_job: String,

    /// Timeout for a single request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How the obfuscation key is derived.
    #[serde(default)]
    pub key_derivation: KeyDerivation,

    /// Salt the obfuscation key is derived from.
    #[serde(default = "default_salt")]
    pub salt: String,

    /// Parameters sent with every `job` trigger unless overridden.
    #[serde(default)]
    pub default_parameters: BTreeMap<String, String>,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_job() -> String {
    DEFAULT_JOB.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_salt() -> String {
    DEFAULT_SALT.to_string()
}

impl Default for JenkinsConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            user: String::new(),
            token: String::new(),
            default_job: default_job(),
            timeout_secs: default_timeout_secs(),
            key_derivation: KeyDerivation::default(),
            salt: default_salt(),
            default_parameters: BTreeMap::new(),
        }
    }
}

impl JenkinsConfig {
    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the obfuscator matching this configuration's salt and mode.
    pub fn codec(&self) -> Obfuscator {
        Obfuscator::new(self.salt.clone(), self.key_derivation)
    }

    /// Parses and checks the base address.
    ///
    /// Job paths are appended to the address as text, so a query or fragment
    /// is rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is not an absolute `http` or `https`
    /// URL, or carries a query or fragment.
    pub fn base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.url)
            .with_context(|| format!("Invalid Jenkins URL '{}'", self.url))?;

        if !matches!(url.scheme(), "http" | "https") {
            bail!(
                "Invalid Jenkins URL '{}': unsupported scheme '{}'",
                self.url,
                url.scheme()
            );
        }
        if url.query().is_some() || url.fragment().is_some() {
            bail!(
                "Invalid Jenkins URL '{}': must not contain a query or fragment",
                self.url
            );
        }
        Ok(url)
    }
}

impl Config {
    /// Loads configuration from the default location.
    ///
    /// A missing file is not an error; defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from `path`, returning defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Saves configuration to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves configuration to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file cannot
    /// be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Returns the path to the default configuration file.
    ///
    /// The file may not exist; this only returns where it would be.
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Gets a configuration value by key.
    ///
    /// Returns `None` for unknown keys.
    ///
    /// ```rust
    /// use jenkins_cli::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.get("timeout_secs"), Some("30".to_string()));
    /// assert_eq!(config.get("unknown_key"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<String> {
        let jenkins = &self.jenkins;
        if let Some(name) = parameter_name(key) {
            return jenkins.default_parameters.get(name).cloned();
        }
        match key {
            "url" => Some(jenkins.url.clone()),
            "user" => Some(jenkins.user.clone()),
            "token" => Some(jenkins.token.clone()),
            "default_job" => Some(jenkins.default_job.clone()),
            "timeout_secs" => Some(jenkins.timeout_secs.to_string()),
            "key_derivation" => Some(jenkins.key_derivation.to_string()),
            "salt" => Some(jenkins.salt.clone()),
            _ => None,
        }
    }

    /// Sets a configuration value by key.
    ///
    /// Returns `Ok(false)` for unknown keys. Changes are only persisted by
    /// [`Config::save`] or [`Config::save_to`].
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be parsed for the key's type.
    pub fn set(&mut self, key: &str, value: String) -> Result<bool> {
        let jenkins = &mut self.jenkins;
        if let Some(name) = parameter_name(key) {
            jenkins.default_parameters.insert(name.to_string(), value);
            return Ok(true);
        }
        match key {
            "url" => jenkins.url = value,
            "user" => jenkins.user = value,
            "token" => jenkins.token = value,
            "default_job" => jenkins.default_job = value,
            "timeout_secs" => {
                let secs: u64 = value
                    .parse()
                    .with_context(|| format!("Invalid timeout '{value}'"))?;
                if secs == 0 {
                    bail!("Invalid timeout '{value}': must be at least 1 second");
                }
                jenkins.timeout_secs = secs;
            }
            "key_derivation" => {
                jenkins.key_derivation = value.parse().map_err(anyhow::Error::msg)?;
            }
            "salt" => jenkins.salt = value,
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Restores a key to its default, or removes a `default_parameters.NAME`
    /// entry.
    ///
    /// Returns `Ok(false)` for unknown keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the default value cannot be applied.
    pub fn unset(&mut self, key: &str) -> Result<bool> {
        if let Some(name) = parameter_name(key) {
            self.jenkins.default_parameters.remove(name);
            return Ok(true);
        }
        match Self::default().get(key) {
            Some(default) => self.set(key, default),
            None => Ok(false),
        }
    }

    /// Returns `true` if `key` names a configuration value.
    pub fn is_known_key(key: &str) -> bool {
        VALID_KEYS.contains(&key) || parameter_name(key).is_some()
    }
}

fn parameter_name(key: &str) -> Option<&str> {
    key.strip_prefix(PARAMETER_KEY_PREFIX)
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.jenkins.url, DEFAULT_URL);
        assert_eq!(config.jenkins.default_job, DEFAULT_JOB);
        assert_eq!(config.jenkins.timeout(), Duration::from_secs(30));
        assert_eq!(config.jenkins.key_derivation, KeyDerivation::Consistent);
        assert_eq!(config.jenkins.codec(), Obfuscator::default());
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[jenkins]
url = "https://ci.example.com"
user = "ci-bot"
key_derivation = "legacy"

[jenkins.default_parameters]
BRANCH_NAME = "master"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.jenkins.url, "https://ci.example.com");
        assert_eq!(config.jenkins.user, "ci-bot");
        assert_eq!(config.jenkins.key_derivation, KeyDerivation::Legacy);
        assert_eq!(config.jenkins.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(
            config.jenkins.default_parameters.get("BRANCH_NAME"),
            Some(&"master".to_string())
        );
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("user", "alice".to_string()).unwrap();
        config.set("timeout_secs", "5".to_string()).unwrap();
        config.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
        assert_eq!(reloaded.jenkins.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[jenkins\nurl = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_get_and_set() {
        let mut config = Config::default();
        assert!(config.set("default_job", "nightly".to_string()).unwrap());
        assert_eq!(config.get("default_job"), Some("nightly".to_string()));
        assert!(config.set("key_derivation", "legacy".to_string()).unwrap());
        assert_eq!(config.get("key_derivation"), Some("legacy".to_string()));
        assert!(!config.set("editor", "vim".to_string()).unwrap());
        assert!(config.set("timeout_secs", "soon".to_string()).is_err());
        assert!(config.set("timeout_secs", "0".to_string()).is_err());
        assert_eq!(config.jenkins.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.set("key_derivation", "sha1".to_string()).is_err());
    }

    #[test]
    fn test_base_url_validation() {
        let mut jenkins = JenkinsConfig::default();
        assert!(jenkins.base_url().is_ok());

        jenkins.url = "ftp://ci.example.com".to_string();
        assert!(jenkins.base_url().is_err());

        jenkins.url = "not a url".to_string();
        assert!(jenkins.base_url().is_err());

        jenkins.url = "http://ci.example.com/?a=1".to_string();
        assert!(jenkins.base_url().is_err());

        jenkins.url = "http://ci.example.com/jenkins#x".to_string();
        assert!(jenkins.base_url().is_err());

        jenkins.url = "http://ci.example.com/jenkins/".to_string();
        assert!(jenkins.base_url().is_ok());
    }

    #[test]
    fn test_default_parameter_keys() {
        let mut config = Config::default();
        assert!(Config::is_known_key("default_parameters.BRANCH_NAME"));
        assert!(!Config::is_known_key("default_parameters."));
        assert!(!Config::is_known_key("editor"));

        assert!(config
            .set("default_parameters.BRANCH_NAME", "master".to_string())
            .unwrap());
        assert_eq!(
            config.get("default_parameters.BRANCH_NAME"),
            Some("master".to_string())
        );

        assert!(config.unset("default_parameters.BRANCH_NAME").unwrap());
        assert!(config.jenkins.default_parameters.is_empty());
        assert_eq!(config.get("default_parameters.BRANCH_NAME"), None);
    }

    #[test]
    fn test_unset_restores_default() {
        let mut config = Config::default();
        config.set("default_job", "nightly".to_string()).unwrap();
        assert!(config.unset("default_job").unwrap());
        assert_eq!(config.jenkins.default_job, DEFAULT_JOB);
        assert!(!config.unset("editor").unwrap());
    }
}

//
//  jenkins-cli
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! This module provides commands for reading and writing the configuration
//! file. Every command honours `--config`/`JENKINS_CLI_CONFIG` so a file other
//! than the default one can be managed.

use std::path::Path;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::config::{Config, PARAMETER_KEY_PREFIX, VALID_KEYS};

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Reset a configuration value to its default, or remove a default parameter
    Unset(UnsetArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

#[derive(Args, Debug)]
pub struct UnsetArgs {
    /// Configuration key
    pub key: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let path = global.config_path()?;

        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, &path, global),
            ConfigSubcommand::Set(args) => self.set(args, &path, global),
            ConfigSubcommand::Unset(args) => self.unset(args, &path, global),
            ConfigSubcommand::List => self.list(&path, global),
            ConfigSubcommand::Path => self.path(&path, global),
        }
    }

    /// Get a configuration value
    fn get(&self, args: &GetArgs, path: &Path, global: &GlobalOptions) -> Result<()> {
        ensure_known_key(&args.key)?;
        let config = Config::load_from(path)?;
        let value = config.get(&args.key);

        if global.json {
            let result = serde_json::json!({
                "key": args.key,
                "value": value,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else if let Some(v) = value {
            println!("{}", v);
        }

        Ok(())
    }

    /// Set a configuration value
    fn set(&self, args: &SetArgs, path: &Path, global: &GlobalOptions) -> Result<()> {
        ensure_known_key(&args.key)?;
        let mut config = Config::load_from(path)?;
        config.set(&args.key, args.value.clone())?;
        config.save_to(path)?;

        if global.json {
            let result = serde_json::json!({
                "success": true,
                "key": args.key,
                "value": args.value,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!(
                "{} Set {} = {}",
                style("✓").green(),
                style(&args.key).cyan(),
                args.value
            );
        }

        Ok(())
    }

    /// Reset a configuration value to its default
    fn unset(&self, args: &UnsetArgs, path: &Path, global: &GlobalOptions) -> Result<()> {
        ensure_known_key(&args.key)?;
        let mut config = Config::load_from(path)?;
        config.unset(&args.key)?;
        config.save_to(path)?;

        if global.json {
            let result = serde_json::json!({
                "success": true,
                "key": args.key,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{} Unset {}", style("✓").green(), style(&args.key).cyan());
        }

        Ok(())
    }

    /// List all configuration values
    fn list(&self, path: &Path, global: &GlobalOptions) -> Result<()> {
        let config = Config::load_from(path)?;

        if global.json {
            println!("{}", serde_json::to_string_pretty(&config)?);
            return Ok(());
        }

        println!();
        println!("{}", style("Jenkins Configuration").bold());
        println!("{}", "-".repeat(50));
        for key in VALID_KEYS {
            let value = config.get(key).filter(|v| !v.is_empty());
            println!("  {}: {}", style(key).cyan(), value.as_deref().unwrap_or("-"));
        }

        if !config.jenkins.default_parameters.is_empty() {
            println!();
            println!("{}", style("Default Parameters").bold());
            println!("{}", "-".repeat(50));
            for (name, value) in &config.jenkins.default_parameters {
                println!("  {} = {}", style(name).cyan(), value);
            }
        }

        println!();
        Ok(())
    }

    /// Show configuration file path
    fn path(&self, path: &Path, global: &GlobalOptions) -> Result<()> {
        if global.json {
            let result = serde_json::json!({
                "path": path.display().to_string(),
                "exists": path.exists(),
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", path.display());
        }

        Ok(())
    }
}

fn ensure_known_key(key: &str) -> Result<()> {
    if !Config::is_known_key(key) {
        bail!(
            "Unknown configuration key '{}'. Valid keys: {}, {}<NAME>",
            key,
            VALID_KEYS.join(", "),
            PARAMETER_KEY_PREFIX
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global_for(path: &Path) -> GlobalOptions {
        GlobalOptions {
            config: Some(path.to_path_buf()),
            json: true,
            ..GlobalOptions::default()
        }
    }

    #[test]
    fn test_ensure_known_key() {
        assert!(ensure_known_key("default_job").is_ok());
        assert!(ensure_known_key("default_parameters.BUILD_TYPE").is_ok());
        assert!(ensure_known_key("editor").is_err());
    }

    #[tokio::test]
    async fn test_set_and_unset_default_parameter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let global = global_for(&path);

        let set = ConfigCommand {
            command: ConfigSubcommand::Set(SetArgs {
                key: "default_parameters.BRANCH_NAME".to_string(),
                value: "master".to_string(),
            }),
        };
        set.run(&global).await.unwrap();
        let params = Config::load_from(&path).unwrap().jenkins.default_parameters;
        assert_eq!(params.get("BRANCH_NAME").map(String::as_str), Some("master"));

        let unset = ConfigCommand {
            command: ConfigSubcommand::Unset(UnsetArgs {
                key: "default_parameters.BRANCH_NAME".to_string(),
            }),
        };
        unset.run(&global).await.unwrap();
        assert!(Config::load_from(&path)
            .unwrap()
            .jenkins
            .default_parameters
            .is_empty());
    }

    #[tokio::test]
    async fn test_set_then_unset_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let global = global_for(&path);

        let set = ConfigCommand {
            command: ConfigSubcommand::Set(SetArgs {
                key: "default_job".to_string(),
                value: "nightly".to_string(),
            }),
        };
        set.run(&global).await.unwrap();
        assert_eq!(
            Config::load_from(&path).unwrap().jenkins.default_job,
            "nightly"
        );

        let unset = ConfigCommand {
            command: ConfigSubcommand::Unset(UnsetArgs {
                key: "default_job".to_string(),
            }),
        };
        unset.run(&global).await.unwrap();
        assert_eq!(
            Config::load_from(&path).unwrap().jenkins.default_job,
            crate::config::DEFAULT_JOB
        );
    }

    #[tokio::test]
    async fn test_set_rejects_unknown_key_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cmd = ConfigCommand {
            command: ConfigSubcommand::Set(SetArgs {
                key: "editor".to_string(),
                value: "vim".to_string(),
            }),
        };
        assert!(cmd.run(&global_for(&path)).await.is_err());
        assert!(!path.exists());
    }
}

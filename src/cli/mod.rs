//
//  jenkins-cli
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod completion;
mod config;
mod job;
mod status;
mod token;

pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use job::JobCommand;
pub use status::StatusCommand;
pub use token::TokenCommand;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::api::JenkinsClient;
use crate::config::{Config, JenkinsConfig};
use crate::output::{OutputFormat, OutputWriter};

/// Jenkins CLI - trigger and inspect Jenkins jobs from the command line
#[derive(Parser, Debug)]
#[command(
    name = "jenkins-cli",
    version,
    about = "Trigger and inspect Jenkins jobs from the command line",
    long_about = "jenkins-cli triggers builds and queries job status through the Jenkins remote access API.\n\n\
                  The API token is stored obfuscated; create one with 'jenkins-cli token encode'.",
    propagate_version = true,
    after_help = "Use 'jenkins-cli <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Jenkins base URL
    #[arg(long, global = true, env = "JENKINS_URL")]
    pub url: Option<String>,

    /// Username for Basic authentication
    #[arg(long, short = 'u', global = true, env = "JENKINS_USER")]
    pub user: Option<String>,

    /// Obfuscated API token (see 'jenkins-cli token encode')
    #[arg(long, global = true, env = "JENKINS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds (at least 1)
    #[arg(
        long,
        global = true,
        env = "JENKINS_TIMEOUT",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,

    /// Path to the configuration file
    #[arg(long, global = true, env = "JENKINS_CLI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Returns the configuration file in effect.
    ///
    /// # Errors
    ///
    /// Returns an error if no `--config` is given and the default location
    /// cannot be determined.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_path(),
        }
    }

    /// Loads the configuration file and applies flag/environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_from(&self.config_path()?)?;
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut Config) {
        let jenkins = &mut config.jenkins;
        if let Some(url) = &self.url {
            jenkins.url = url.clone();
        }
        if let Some(user) = &self.user {
            jenkins.user = user.clone();
        }
        if let Some(token) = &self.token {
            jenkins.token = token.clone();
        }
        if let Some(timeout) = self.timeout {
            jenkins.timeout_secs = timeout;
        }
    }

    /// Returns the output writer selected by `--json`.
    pub fn writer(&self) -> OutputWriter {
        if self.json {
            OutputWriter::new(OutputFormat::Json)
        } else {
            OutputWriter::new(OutputFormat::Text)
        }
    }
}

/// Create the API client, warning when no usable token is configured
fn create_client(config: &JenkinsConfig, writer: &OutputWriter) -> Result<JenkinsClient> {
    let client = JenkinsClient::new(config).context("Failed to create Jenkins client")?;
    debug!(url = client.base_url(), user = client.identity(), "client ready");

    if !client.has_token() {
        writer.write_warning(
            "No usable API token; set JENKINS_TOKEN or run 'jenkins-cli config set token <HEX>'",
        );
    }

    Ok(client)
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Trigger a Jenkins job
    #[command(visible_alias = "build")]
    Job(JobCommand),

    /// Get job status
    Status(StatusCommand),

    /// Obfuscate and inspect API tokens
    Token(TokenCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}

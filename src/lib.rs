//
//  jenkins-cli
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Jenkins CLI Library
//!
//! A small command-line client for the Jenkins remote access API.
//!
//! ## Overview
//!
//! This library provides the core functionality for the `jenkins-cli` tool:
//! triggering jobs (with or without build parameters) and reading a job's
//! status. The API token is kept in an obfuscated hex form and only revealed
//! in memory when the client is built.
//!
//! ## Module Structure
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`api`]: HTTP client for the Jenkins JSON API
//! - [`auth`]: Basic authentication credentials
//! - [`codec`]: Token obfuscation
//! - [`config`]: Configuration file management
//! - [`output`]: Output formatting (text, JSON)
//! - [`util`]: Utility functions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use jenkins_cli::api::JobTriggerRequest;
//! use jenkins_cli::{Config, JenkinsClient};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let client = JenkinsClient::new(&config.jenkins)?;
//!
//! let request = JobTriggerRequest::new("deploy").with_parameter("BRANCH_NAME", "main");
//! client.trigger_job(&request).await?;
//!
//! let status = client.get_job_status("deploy").await?;
//! println!("last build: {:?}", status.last_build());
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// API client for the Jenkins remote access API.
///
/// The client handles authentication, request building, and error mapping.
pub mod api;

/// Basic authentication credentials.
pub mod auth;

/// Reversible token obfuscation.
///
/// An XOR cipher keyed on an MD5-derived key, encoded as lowercase hex. This
/// keeps tokens out of plain sight; it is not encryption.
pub mod codec;

/// Configuration file management.
///
/// Manages the CLI's configuration stored in platform-specific locations:
/// - Linux: `~/.config/jenkins-cli/config.toml`
/// - macOS: `~/Library/Application Support/jenkins-cli/config.toml`
/// - Windows: `%APPDATA%\jenkins-cli\config\config.toml`
pub mod config;

/// Output formatting for text and JSON modes.
pub mod output;

/// Utility functions and helpers.
pub mod util;

/// Re-export of the main CLI struct for convenient access.
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use jenkins_cli::Cli;
///
/// let cli = Cli::parse();
/// // Handle cli.command...
/// ```
pub use cli::Cli;

/// Re-export of the configuration struct.
///
/// # Example
///
/// ```rust,no_run
/// use jenkins_cli::Config;
///
/// let config = Config::load().expect("Failed to load config");
/// if let Some(job) = config.get("default_job") {
///     println!("Default job: {}", job);
/// }
/// ```
pub use config::Config;

/// Re-export of the API client.
pub use api::JenkinsClient;

/// Application name constant.
///
/// The name of the CLI binary, used for display, the `User-Agent` header and
/// configuration paths.
pub const APP_NAME: &str = "jenkins-cli";

/// Application version constant.
///
/// # Example
///
/// ```rust
/// use jenkins_cli::VERSION;
///
/// println!("jenkins-cli version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes following Unix conventions, allowing scripts
/// to programmatically detect the outcome of CLI operations.
///
/// # Example
///
/// ```rust,no_run
/// use jenkins_cli::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::AUTH_ERROR);
/// ```
pub mod exit_codes {
    use crate::api::ApiError;

    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// An unspecified error occurred during execution.
    /// Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    ///
    /// Reported by clap itself when arguments fail to parse.
    pub const USAGE: i32 = 2;

    /// Authentication failed.
    ///
    /// The server answered 401 or 403. Check the user name and that the
    /// token was encoded with the configured key derivation.
    pub const AUTH_ERROR: i32 = 4;

    /// Job not found.
    ///
    /// The server answered 404 for the job path.
    pub const NOT_FOUND: i32 = 8;

    /// Maps a command error to an exit code.
    ///
    /// Looks through the error chain for an [`ApiError`] carrying an HTTP
    /// status; everything else is [`ERROR`].
    pub fn from_error(err: &anyhow::Error) -> i32 {
        let status = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<ApiError>())
            .and_then(ApiError::status);

        match status {
            Some(401 | 403) => AUTH_ERROR,
            Some(404) => NOT_FOUND,
            _ => ERROR,
        }
    }

}

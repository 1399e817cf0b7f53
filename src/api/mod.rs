//
//  jenkins-cli
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! HTTP access to the Jenkins remote access API.
//!
//! ## Architecture
//!
//! - [`client`]: [`JenkinsClient`], authentication and request execution
//! - [`jobs`]: endpoint paths, trigger payloads and status decoding
//! - [`common`]: [`ApiError`] and [`ApiResult`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use jenkins_cli::api::JenkinsClient;
//! use jenkins_cli::config::Config;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let client = JenkinsClient::new(&config.jenkins)?;
//!
//! let status = client.get_job_status("jenkins-demo").await?;
//! match status.last_build() {
//!     Some(build) => println!("last build #{:?}", build.number),
//!     None => println!("never built"),
//! }
//! # Ok(())
//! # }
//! ```

/// Core HTTP client for a Jenkins server.
pub mod client;

/// Job endpoints: paths, payloads and response types.
pub mod jobs;

/// Error type shared by all API operations.
pub mod common;

pub use client::JenkinsClient;
pub use common::{ApiError, ApiResult};
pub use jobs::{JobStatus, JobTriggerRequest, LastBuild, TriggerOutcome};

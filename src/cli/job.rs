//
//  jenkins-cli
//  cli/job.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Job trigger command.
//!
//! Parameters configured under `[jenkins.default_parameters]` are sent with
//! every trigger; `-p KEY=VALUE` adds to or replaces them and `--no-params`
//! drops them all, selecting the plain `build` endpoint.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use tracing::debug;

use crate::api::{JobTriggerRequest, TriggerOutcome};
use crate::output::{print_field, TextOutput};
use crate::util::{merge_parameters, parse_key_value};

use super::{create_client, GlobalOptions};

/// Trigger a Jenkins job
#[derive(Args, Debug)]
pub struct JobCommand {
    /// Job to trigger (defaults to the configured default job)
    pub job: Option<String>,

    /// Set a build parameter (KEY=VALUE)
    #[arg(long = "param", short = 'p', value_parser = parse_key_value, action = clap::ArgAction::Append)]
    pub params: Vec<(String, String)>,

    /// Trigger without any parameters, ignoring configured defaults
    #[arg(long, conflicts_with = "params")]
    pub no_params: bool,
}

impl TextOutput for TriggerOutcome {
    fn print_text(&self, color: bool) {
        let message = format!("Job '{}' triggered successfully", self.job);
        if color {
            println!("{} {}", style("✓").green().bold(), message);
        } else {
            println!("✓ {message}");
        }

        if let Some(queue_url) = &self.queue_url {
            print_field("Queue URL", queue_url, color);
        }
    }
}

impl JobCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.load_config()?;
        let writer = global.writer();
        let client = create_client(&config.jenkins, &writer)?;

        let job = self
            .job
            .clone()
            .unwrap_or_else(|| config.jenkins.default_job.clone());

        let request = self.build_request(&job, &config.jenkins.default_parameters);
        debug!(parameters = ?request.parameters, "resolved build parameters");

        writer.write_info(&format!("Triggering Jenkins job: {job}"));

        let outcome = client
            .trigger_job(&request)
            .await
            .with_context(|| format!("Failed to trigger job '{job}'"))?;

        writer.write(&outcome)
    }

    fn build_request(
        &self,
        job: &str,
        defaults: &BTreeMap<String, String>,
    ) -> JobTriggerRequest {
        let request = JobTriggerRequest::new(job);
        if self.no_params {
            request
        } else {
            request.with_parameters(merge_parameters(defaults, &self.params))
        }
    }
}

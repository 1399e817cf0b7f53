//
//  jenkins-cli
//  cli/status.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Job status command

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::{JobStatus, LastBuild};
use crate::output::{print_field, print_header, TextOutput};

use super::{create_client, GlobalOptions};

/// Get the status of a Jenkins job
#[derive(Args, Debug)]
pub struct StatusCommand {
    /// Job to query (defaults to the configured default job)
    pub job: Option<String>,
}

/// Server fields rendered by [`JobStatusView`]'s own members, plus the
/// member names themselves so flattened fields cannot shadow them.
const VIEW_FIELDS: &[&str] = &["name", "buildable", "lastBuild", "job", "last_build"];

// Display type for job status
#[derive(Debug, Serialize, PartialEq)]
struct JobStatusView {
    job: String,
    name: Option<String>,
    buildable: Option<bool>,
    last_build: Option<LastBuild>,
    /// Every other field the server returned, for JSON consumers
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl JobStatusView {
    fn new(job: &str, status: &JobStatus) -> Self {
        let extra = status
            .fields()
            .iter()
            .filter(|(key, _)| !VIEW_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            job: job.to_string(),
            name: status.name().map(str::to_owned),
            buildable: status.buildable(),
            last_build: status.last_build(),
            extra,
        }
    }
}

impl TextOutput for JobStatusView {
    fn print_text(&self, color: bool) {
        print_header(&format!("Job Status for '{}'", self.job), color);
        print_field("Name", self.name.as_deref().unwrap_or("-"), color);
        print_field(
            "Buildable",
            &self
                .buildable
                .map(|b| b.to_string())
                .unwrap_or_else(|| "-".to_string()),
            color,
        );

        match &self.last_build {
            Some(build) => {
                let number = build
                    .number
                    .map(|n| format!("#{n}"))
                    .unwrap_or_else(|| "-".to_string());
                print_field("Last Build", &number, color);
                print_field("Last Build URL", build.url.as_deref().unwrap_or("-"), color);
            }
            None => print_field("Last Build", "never built", color),
        }
    }
}

impl StatusCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.load_config()?;
        let writer = global.writer();
        let client = create_client(&config.jenkins, &writer)?;

        let job = self.job.as_deref().unwrap_or(&config.jenkins.default_job);

        let status = client
            .get_job_status(job)
            .await
            .with_context(|| format!("Failed to get status of job '{job}'"))?;

        writer.write(&JobStatusView::new(job, &status))
    }
}

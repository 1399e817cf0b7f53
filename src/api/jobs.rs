//
//  jenkins-cli
//  api/jobs.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Jenkins job endpoints: request shapes and response interpretation.
//!
//! # Endpoints
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | Trigger | `POST` | `/job/{name}/build` |
//! | Trigger with parameters | `POST` | `/job/{name}/buildWithParameters` |
//! | Status | `GET` | `/job/{name}/api/json` |
//!
//! Jobs inside folders are addressed as `folder/name`, which maps to
//! `/job/folder/job/name`.
//!
//! # Example
//!
//! ```rust
//! use jenkins_cli::api::jobs::JobTriggerRequest;
//!
//! let request = JobTriggerRequest::new("deploy")
//!     .with_parameter("BRANCH_NAME", "master")
//!     .with_parameter("BUILD_TYPE", "release");
//!
//! assert_eq!(request.path(), "/job/deploy/buildWithParameters");
//! ```

use std::collections::BTreeMap;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{ApiError, ApiResult};

/// Maps a job name to its URL path, expanding folders.
///
/// ```rust
/// use jenkins_cli::api::jobs::job_path;
///
/// assert_eq!(job_path("demo"), "/job/demo");
/// assert_eq!(job_path("team/demo"), "/job/team/job/demo");
/// ```
pub fn job_path(job: &str) -> String {
    format!("/job/{}", job.trim_matches('/').replace('/', "/job/"))
}

/// Path of the status endpoint for `job`.
pub fn status_path(job: &str) -> String {
    format!("{}/api/json", job_path(job))
}

/// Returns `true` for the statuses Jenkins uses to acknowledge a trigger.
pub fn is_trigger_success(status: StatusCode) -> bool {
    status == StatusCode::CREATED || status == StatusCode::OK
}

/// A request to start a new build of a job.
///
/// An empty parameter map selects the plain `build` endpoint with no body;
/// any parameters select `buildWithParameters` with a JSON object body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobTriggerRequest {
    /// Name of the job, `folder/name` for nested jobs
    pub job: String,
    /// Build parameters, all sent as strings
    pub parameters: BTreeMap<String, String>,
}

impl JobTriggerRequest {
    /// Creates a parameterless trigger for `job`.
    pub fn new(job: impl Into<String>) -> Self {
        Self {
            job: job.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Adds a build parameter, replacing any previous value for `name`.
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Adds every parameter from `parameters`.
    pub fn with_parameters<I, K, V>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.parameters
            .extend(parameters.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Returns `true` if the trigger carries parameters.
    pub fn is_parameterized(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// Returns the endpoint path for this trigger.
    pub fn path(&self) -> String {
        if self.is_parameterized() {
            format!("{}/buildWithParameters", job_path(&self.job))
        } else {
            format!("{}/build", job_path(&self.job))
        }
    }

    /// Serializes the request body.
    ///
    /// Returns `Ok(None)` for parameterless triggers.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encoding`] if the parameters cannot be serialized.
    pub fn body(&self) -> ApiResult<Option<Vec<u8>>> {
        if !self.is_parameterized() {
            return Ok(None);
        }

        serde_json::to_vec(&self.parameters)
            .map(Some)
            .map_err(|e| ApiError::Encoding(e.to_string()))
    }
}

/// Result of a successful trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerOutcome {
    /// Job that was triggered
    pub job: String,
    /// Status returned by Jenkins (200 or 201)
    pub status: u16,
    /// Queue item address from the `Location` header, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_url: Option<String>,
}

/// The most recent build of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastBuild {
    /// Build number
    pub number: Option<u64>,
    /// Address of the build page
    pub url: Option<String>,
}

/// Job information returned by `/job/{name}/api/json`.
///
/// Jenkins does not fix the shape of this payload (it varies by job type and
/// installed plugins), so the whole object is kept and the fields this tool
/// uses are exposed through individually optional accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct JobStatus(Map<String, Value>);

impl JobStatus {
    /// Decodes a status response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MalformedPayload`] if the body is not a JSON object.
    pub fn from_body(body: &str) -> ApiResult<Self> {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(other) => Err(ApiError::MalformedPayload(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
            Err(e) => Err(ApiError::MalformedPayload(e.to_string())),
        }
    }

    /// The job's `name`.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// The job's `buildable` flag.
    pub fn buildable(&self) -> Option<bool> {
        self.0.get("buildable").and_then(Value::as_bool)
    }

    /// The job's `lastBuild`, or `None` if it has never been built.
    pub fn last_build(&self) -> Option<LastBuild> {
        let build = self.0.get("lastBuild").and_then(Value::as_object)?;
        Some(LastBuild {
            number: build.get("number").and_then(Value::as_u64),
            url: build.get("url").and_then(Value::as_str).map(str::to_owned),
        })
    }

    /// Any other top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// All fields as returned by the server.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

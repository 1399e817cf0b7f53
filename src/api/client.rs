//
//  jenkins-cli
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the Jenkins API
//!
//! [`JenkinsClient`] holds the immutable connection settings (base address,
//! credential, timeout) and performs one request/response exchange per
//! operation. It keeps no session state and never retries.
//!
//! ## Features
//!
//! - HTTP Basic authentication on every request
//! - `Content-Type: application/json` on every request
//! - A single timeout bounding each call, reported as a transport error
//! - Response bodies consumed on every exit path

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use tracing::{debug, info};

use crate::auth::AuthCredential;
use crate::config::JenkinsConfig;

use super::common::{ApiError, ApiResult};
use super::jobs::{is_trigger_success, status_path, JobStatus, JobTriggerRequest, TriggerOutcome};

/// The HTTP client for a single Jenkins server.
///
/// Cloning is cheap: clones share the underlying connection pool, and since
/// no operation mutates the client, clones can be used from concurrent tasks.
///
/// # Example
///
/// ```rust,no_run
/// use jenkins_cli::api::JenkinsClient;
/// use jenkins_cli::api::jobs::JobTriggerRequest;
/// use jenkins_cli::config::Config;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::load()?;
/// let client = JenkinsClient::new(&config.jenkins)?;
///
/// let outcome = client
///     .trigger_job(&JobTriggerRequest::new("deploy").with_parameter("ENV", "staging"))
///     .await?;
/// if let Some(queue_url) = outcome.queue_url {
///     println!("Queued at {queue_url}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct JenkinsClient {
    /// The underlying HTTP client
    http: Client,
    /// Base address without a trailing slash
    base_url: String,
    /// Identity and decoded token
    auth: AuthCredential,
    /// Upper bound for a single call
    timeout: Duration,
}

impl JenkinsClient {
    /// Creates a client from resolved configuration.
    ///
    /// The obfuscated token is decoded here, exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidConfig`] if the base address is not a valid
    /// `http`/`https` URL or the HTTP client cannot be built.
    pub fn new(config: &JenkinsConfig) -> ApiResult<Self> {
        config
            .base_url()
            .map_err(|e| ApiError::InvalidConfig(format!("{e:#}")))?;

        let auth = AuthCredential::from_obfuscated(&config.user, &config.token, &config.codec());
        Self::with_credential(&config.url, auth, config.timeout())
    }

    /// Creates a client from an already decoded credential.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidConfig`] if the timeout is zero or the HTTP
    /// client cannot be built.
    pub fn with_credential(base_url: &str, auth: AuthCredential, timeout: Duration) -> ApiResult<Self> {
        if timeout.is_zero() {
            return Err(ApiError::InvalidConfig(
                "timeout must be at least 1 second".to_string(),
            ));
        }

        let http = Client::builder()
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
            timeout,
        })
    }

    /// Returns the base address requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the username requests are authenticated as.
    pub fn identity(&self) -> &str {
        self.auth.username()
    }

    /// Returns the per-call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns `true` if requests carry a non-empty token.
    pub fn has_token(&self) -> bool {
        self.auth.has_token()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let request = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        self.auth.apply_to_request(request)
    }

    /// Starts a new build of a job.
    ///
    /// Parameterless requests go to `/job/{name}/build` with no body;
    /// parameterized ones go to `/job/{name}/buildWithParameters` with the
    /// parameters as a JSON object.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Encoding`] if the parameters cannot be serialized; no
    ///   request is sent
    /// - [`ApiError::Transport`] if the server cannot be reached in time
    /// - [`ApiError::UnexpectedStatus`] for any status other than 200 or 201
    pub async fn trigger_job(&self, request: &JobTriggerRequest) -> ApiResult<TriggerOutcome> {
        let path = request.path();
        let body = request.body()?;

        debug!(
            job = %request.job,
            parameters = request.parameters.len(),
            "POST {}",
            path
        );

        let mut builder = self.request(Method::POST, &path);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(ApiError::Transport)?;
        let status = response.status();

        if !is_trigger_success(status) {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let queue_url = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_owned);

        if let Err(err) = response.bytes().await {
            debug!("discarding unreadable trigger response body: {err}");
        }

        info!(job = %request.job, status = status.as_u16(), "job triggered");

        Ok(TriggerOutcome {
            job: request.job.clone(),
            status: status.as_u16(),
            queue_url,
        })
    }

    /// Fetches a job's current status.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] if the server cannot be reached in time
    /// - [`ApiError::UnexpectedStatus`] for any status other than 200
    /// - [`ApiError::MalformedPayload`] if a 200 body is not a JSON object
    pub async fn get_job_status(&self, job: &str) -> ApiResult<JobStatus> {
        let path = status_path(job);
        debug!(job = %job, "GET {}", path);

        let response = self
            .request(Method::GET, &path)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        let status = response.status();

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(ApiError::Transport)?;
        JobStatus::from_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Obfuscator;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn basic_header(user: &str, token: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{user}:{token}")))
    }

    fn client_for(server: &Server) -> JenkinsClient {
        JenkinsClient::with_credential(
            &server.url(),
            AuthCredential::basic("alice", "s3cret"),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_trigger_without_parameters() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/job/demo/build")
            .match_header("authorization", basic_header("alice", "s3cret").as_str())
            .match_header("content-type", "application/json")
            .match_body(Matcher::Exact(String::new()))
            .with_status(201)
            .with_header("location", "http://jenkins/queue/item/7/")
            .create_async()
            .await;

        let outcome = client_for(&server)
            .trigger_job(&JobTriggerRequest::new("demo"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(outcome.status, 201);
        assert_eq!(
            outcome.queue_url.as_deref(),
            Some("http://jenkins/queue/item/7/")
        );
    }

    #[tokio::test]
    async fn test_trigger_with_parameters() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/job/demo/buildWithParameters")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "BRANCH_NAME": "master",
                "BUILD_TYPE": "release",
            })))
            .with_status(200)
            .create_async()
            .await;

        let request = JobTriggerRequest::new("demo")
            .with_parameter("BRANCH_NAME", "master")
            .with_parameter("BUILD_TYPE", "release");
        let outcome = client_for(&server).trigger_job(&request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(outcome.status, 200);
        assert_eq!(outcome.queue_url, None);
    }

    #[tokio::test]
    async fn test_trigger_failure_statuses() {
        for status in [403_u16, 404, 500] {
            let mut server = Server::new_async().await;
            server
                .mock("POST", "/job/demo/build")
                .with_status(usize::from(status))
                .with_body("nope")
                .create_async()
                .await;

            let err = client_for(&server)
                .trigger_job(&JobTriggerRequest::new("demo"))
                .await
                .unwrap_err();

            match err {
                ApiError::UnexpectedStatus { status: got, body } => {
                    assert_eq!(got, status);
                    assert_eq!(body, "nope");
                }
                other => panic!("unexpected error for {status}: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_trigger_folder_job_with_trailing_slash_base() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/job/team/job/demo/build")
            .with_status(201)
            .create_async()
            .await;

        let client = JenkinsClient::with_credential(
            &format!("{}/", server.url()),
            AuthCredential::basic("alice", "s3cret"),
            Duration::from_secs(5),
        )
        .unwrap();
        client
            .trigger_job(&JobTriggerRequest::new("team/demo"))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_client_decodes_obfuscated_token_once() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/job/demo/api/json")
            .match_header("authorization", basic_header("ci-bot", "11a2b3").as_str())
            .with_status(200)
            .with_body(r#"{"name":"demo","buildable":true}"#)
            .create_async()
            .await;

        let config = JenkinsConfig {
            url: server.url(),
            user: "ci-bot".to_string(),
            token: Obfuscator::default().encode("11a2b3"),
            ..JenkinsConfig::default()
        };
        let client = JenkinsClient::new(&config).unwrap();
        assert_eq!(client.identity(), "ci-bot");
        assert_eq!(client.timeout(), Duration::from_secs(30));

        client.get_job_status("demo").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_status_never_built() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/job/demo/api/json")
            .with_status(200)
            .with_body(r#"{"name":"demo","buildable":true}"#)
            .create_async()
            .await;

        let status = client_for(&server).get_job_status("demo").await.unwrap();
        assert_eq!(status.name(), Some("demo"));
        assert_eq!(status.buildable(), Some(true));
        assert!(status.last_build().is_none());
    }

    #[tokio::test]
    async fn test_status_with_last_build() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/job/demo/api/json")
            .with_status(200)
            .with_body(r#"{"name":"demo","buildable":true,"lastBuild":{"number":42,"url":"http://x/42"}}"#)
            .create_async()
            .await;

        let status = client_for(&server).get_job_status("demo").await.unwrap();
        let last_build = status.last_build().unwrap();
        assert_eq!(last_build.number, Some(42));
        assert_eq!(last_build.url.as_deref(), Some("http://x/42"));
    }

    #[tokio::test]
    async fn test_status_not_found() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/job/missing/api/json")
            .with_status(404)
            .create_async()
            .await;

        let err = client_for(&server)
            .get_job_status("missing")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_status_malformed_body() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/job/demo/api/json")
            .with_status(200)
            .with_body("<html>Authentication required</html>")
            .create_async()
            .await;

        let err = client_for(&server).get_job_status("demo").await.unwrap_err();
        assert!(matches!(err, ApiError::MalformedPayload(_)));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_unresponsive_server_is_transport_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // accept connections and never answer
        let holder = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let client = JenkinsClient::with_credential(
            &format!("http://{addr}"),
            AuthCredential::basic("alice", "s3cret"),
            Duration::from_millis(200),
        )
        .unwrap();

        let err = client.get_job_status("demo").await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "connection error");

        let err = client
            .trigger_job(&JobTriggerRequest::new("demo"))
            .await
            .unwrap_err();
        assert!(err.is_transport());

        holder.abort();
    }

    #[tokio::test]
    async fn test_requests_carry_user_agent() {
        let mut server = Server::new_async().await;
        let user_agent = format!("jenkins-cli/{}", crate::VERSION);
        let status_mock = server
            .mock("GET", "/job/demo/api/json")
            .match_header("user-agent", user_agent.as_str())
            .with_status(200)
            .with_body(r#"{"name":"demo"}"#)
            .create_async()
            .await;
        let trigger_mock = server
            .mock("POST", "/job/demo/build")
            .match_header("user-agent", user_agent.as_str())
            .with_status(201)
            .create_async()
            .await;

        let client = client_for(&server);
        client.get_job_status("demo").await.unwrap();
        client
            .trigger_job(&JobTriggerRequest::new("demo"))
            .await
            .unwrap();

        status_mock.assert_async().await;
        trigger_mock.assert_async().await;
    }

    #[test]
    fn test_client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JenkinsClient>();
    }

    #[tokio::test]
    async fn test_clones_run_concurrently() {
        let mut server = Server::new_async().await;
        let status_mock = server
            .mock("GET", "/job/demo/api/json")
            .with_status(200)
            .with_body(r#"{"name":"demo","buildable":true}"#)
            .create_async()
            .await;
        let trigger_mock = server
            .mock("POST", "/job/demo/build")
            .with_status(201)
            .create_async()
            .await;

        let client = client_for(&server);
        let first = client.clone();
        let second = client.clone();
        let request = JobTriggerRequest::new("demo");

        let (status, outcome) = tokio::join!(
            first.get_job_status("demo"),
            second.trigger_job(&request)
        );

        assert_eq!(status.unwrap().name(), Some("demo"));
        assert_eq!(outcome.unwrap().status, 201);
        status_mock.assert_async().await;
        trigger_mock.assert_async().await;
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = JenkinsConfig {
            timeout_secs: 0,
            ..JenkinsConfig::default()
        };
        match JenkinsClient::new(&config) {
            Err(ApiError::InvalidConfig(msg)) => assert!(msg.contains("timeout")),
            other => panic!("expected invalid config, got {other:?}"),
        }

        assert!(matches!(
            JenkinsClient::with_credential(
                "http://localhost:8080",
                AuthCredential::basic("alice", "s3cret"),
                Duration::ZERO,
            ),
            Err(ApiError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_base_url_accessor_and_token_presence() {
        let client = JenkinsClient::with_credential(
            "http://localhost:8080/jenkins/",
            AuthCredential::basic("alice", ""),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/jenkins");
        assert!(!client.has_token());
    }

    #[test]
    fn test_base_url_with_query_is_rejected() {
        let config = JenkinsConfig {
            url: "http://localhost:8080/?a=1".to_string(),
            ..JenkinsConfig::default()
        };
        assert!(matches!(
            JenkinsClient::new(&config),
            Err(ApiError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = JenkinsConfig {
            url: "jenkins.local".to_string(),
            ..JenkinsConfig::default()
        };
        assert!(matches!(
            JenkinsClient::new(&config),
            Err(ApiError::InvalidConfig(_))
        ));
    }
}

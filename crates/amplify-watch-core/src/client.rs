//! Thin client for the two Amplify operations the watcher consumes.
//!
//! [`AmplifyApi`] is the seam the resolver and poll loop depend on;
//! [`AmplifyClient`] is the production implementation over `aws-sdk-amplify`,
//! with credentials from the standard AWS provider chain.

use async_trait::async_trait;
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_amplify::config::http::HttpResponse;
use aws_sdk_amplify::config::retry::RetryConfig;
use aws_sdk_amplify::config::{BehaviorVersion, Region};
use aws_sdk_amplify::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_amplify::primitives::DateTime as AwsDateTime;
use aws_sdk_amplify::types as aws;
use chrono::{DateTime, Utc};

use crate::config::WatchConfig;
use crate::error::{Result, WatchError};
use crate::types::{Branch, JobId, JobSnapshot, JobStatus, Step};

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait AmplifyApi: Send + Sync {
    /// One page of the app's branches. Pass the previous page's
    /// `next_token` to continue.
    async fn list_branches(&self, app_id: &str, next_token: Option<&str>) -> Result<BranchPage>;

    /// Current snapshot of a job. A missing job is `WatchError::NotFound`.
    async fn get_job(&self, app_id: &str, branch: &str, job_id: &JobId) -> Result<JobSnapshot>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BranchPage {
    pub branches: Vec<Branch>,
    pub next_token: Option<String>,
}

// ---------------------------------------------------------------------------
// AmplifyClient
// ---------------------------------------------------------------------------

pub struct AmplifyClient {
    inner: aws_sdk_amplify::Client,
}

impl AmplifyClient {
    /// Load profile and credentials the way the AWS CLI does, then check
    /// that credentials actually resolve before the first request.
    ///
    /// SDK retries are off: the poll loop owns retrying.
    pub async fn connect(config: &WatchConfig) -> Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .retry_config(RetryConfig::disabled());
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint) = config.endpoint_override() {
            loader = loader.endpoint_url(endpoint);
        }
        let shared = loader.load().await;

        let provider = shared.credentials_provider().ok_or_else(|| {
            WatchError::MissingCredentials("no credential provider configured".to_string())
        })?;
        provider
            .provide_credentials()
            .await
            .map_err(|e| WatchError::MissingCredentials(DisplayErrorContext(&e).to_string()))?;
        tracing::debug!(region = %config.region, profile = ?config.profile, "credentials resolved");

        Ok(Self {
            inner: aws_sdk_amplify::Client::new(&shared),
        })
    }

    /// Wrap an explicitly built SDK config.
    pub fn from_conf(conf: aws_sdk_amplify::Config) -> Self {
        Self {
            inner: aws_sdk_amplify::Client::from_conf(conf),
        }
    }
}

#[async_trait]
impl AmplifyApi for AmplifyClient {
    async fn list_branches(&self, app_id: &str, next_token: Option<&str>) -> Result<BranchPage> {
        tracing::debug!(app_id, next_token = ?next_token, "listing branches");
        let output = self
            .inner
            .list_branches()
            .app_id(app_id)
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(api_error)?;

        Ok(BranchPage {
            branches: output.branches().iter().map(branch_from).collect(),
            next_token: output.next_token().and_then(non_empty),
        })
    }

    async fn get_job(&self, app_id: &str, branch: &str, job_id: &JobId) -> Result<JobSnapshot> {
        tracing::debug!(app_id, branch, job = %job_id, "fetching job");
        let output = self
            .inner
            .get_job()
            .app_id(app_id)
            .branch_name(branch)
            .job_id(job_id.as_str())
            .send()
            .await
            .map_err(|e| match api_error(e) {
                WatchError::Api { status, code, .. }
                    if status == 404 || code == "NotFoundException" =>
                {
                    WatchError::NotFound(job_id.to_string())
                }
                other => other,
            })?;

        let job = output
            .job()
            .ok_or_else(|| WatchError::Malformed(format!("job {job_id} missing from response")))?;
        snapshot_from(job)
    }
}

/// Flatten an SDK failure into [`WatchError`].
///
/// Service errors keep the HTTP status, the error code (`HTTP<status>` when
/// the service sent none) and the message. Connection, timeout and
/// credential failures become [`WatchError::Request`].
fn api_error<E>(err: SdkError<E, HttpResponse>) -> WatchError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    match &err {
        SdkError::ServiceError(ctx) => {
            let status = ctx.raw().status().as_u16();
            let service_err = ctx.err();
            let code = service_err
                .code()
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP{status}"));
            let message = service_err
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| DisplayErrorContext(service_err).to_string());
            WatchError::Api {
                status,
                code,
                message,
            }
        }
        _ => WatchError::Request(DisplayErrorContext(&err).to_string()),
    }
}

// ---------------------------------------------------------------------------
// SDK shapes → domain types
// ---------------------------------------------------------------------------

fn snapshot_from(job: &aws::Job) -> Result<JobSnapshot> {
    let summary = job
        .summary()
        .ok_or_else(|| WatchError::Malformed("job has no summary".to_string()))?;
    Ok(JobSnapshot {
        job_id: JobId::new(summary.job_id()),
        status: JobStatus::from(summary.status().as_str()),
        commit_id: non_empty(summary.commit_id()),
        commit_message: non_empty(summary.commit_message()),
        start_time: to_utc(summary.start_time()),
        end_time: summary.end_time().and_then(to_utc),
        steps: job.steps().iter().map(step_from).collect(),
    })
}

fn step_from(step: &aws::Step) -> Step {
    Step {
        name: step.step_name().to_string(),
        status: JobStatus::from(step.status().as_str()),
        start_time: to_utc(step.start_time()),
        end_time: to_utc(step.end_time()),
        log_url: step.log_url().and_then(non_empty),
    }
}

fn branch_from(branch: &aws::Branch) -> Branch {
    Branch {
        branch_name: branch.branch_name().to_string(),
        active_job_id: non_empty(branch.active_job_id()).map(JobId::new),
    }
}

/// Required timestamps the service left out arrive as the epoch; treat
/// them as absent.
fn to_utc(ts: &AwsDateTime) -> Option<DateTime<Utc>> {
    if ts.secs() == 0 && ts.subsec_nanos() == 0 {
        return None;
    }
    DateTime::from_timestamp(ts.secs(), ts.subsec_nanos())
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

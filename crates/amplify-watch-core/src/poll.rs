use async_trait::async_trait;
use chrono::Utc;
use std::io::Write;
use std::time::Duration;

use crate::client::AmplifyApi;
use crate::config::WatchConfig;
use crate::error::{Result, WatchError};
use crate::report::{render, ReportContext};
use crate::types::{JobId, JobStatus};

/// Wait between polls.
#[async_trait]
pub trait Pause: Send + Sync {
    async fn pause(&self, duration: Duration);
}

pub struct TokioPause;

#[async_trait]
impl Pause for TokioPause {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// How a watch ended, other than by interruption or a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The job reached this terminal status.
    Finished(JobStatus),
    /// The provider does not know the job; retrying would not help.
    JobNotFound,
}

/// Poll `job_id` until it reaches a terminal status, writing one report per
/// successful fetch to `out`.
///
/// Transient failures are printed and retried after the normal interval.
/// They are retried forever unless `config.max_consecutive_errors` is set.
/// No pause follows the final report.
pub async fn watch<A, P, W>(
    api: &A,
    pause: &P,
    config: &WatchConfig,
    job_id: &JobId,
    out: &mut W,
) -> Result<PollOutcome>
where
    A: AmplifyApi + ?Sized,
    P: Pause + ?Sized,
    W: Write,
{
    let mut consecutive_failures: u32 = 0;
    loop {
        match api.get_job(&config.app_id, &config.branch, job_id).await {
            Ok(job) => {
                consecutive_failures = 0;
                let ctx = ReportContext {
                    now: Utc::now(),
                    poll_interval: config.poll_interval,
                    site_url: config.site_url.as_deref(),
                };
                write!(out, "{}", render(&job, &ctx))?;
                out.flush()?;
                tracing::debug!(job = %job_id, status = %job.status, "polled job");
                if job.status.is_terminal() {
                    return Ok(PollOutcome::Finished(job.status));
                }
            }
            Err(e) if e.is_not_found() => {
                writeln!(out, "❌ Job {job_id} not found")?;
                return Ok(PollOutcome::JobNotFound);
            }
            Err(e) => {
                consecutive_failures += 1;
                tracing::warn!(error = %e, consecutive_failures, "job status request failed");
                writeln!(out, "❌ AWS Error: {e}")?;
                out.flush()?;
                if let Some(max) = config.max_consecutive_errors {
                    if consecutive_failures >= max {
                        return Err(WatchError::TooManyErrors(consecutive_failures));
                    }
                }
            }
        }
        pause.pause(config.poll_interval).await;
    }
}

//! In-memory `AmplifyApi` and `Pause` doubles shared by unit tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::client::{AmplifyApi, BranchPage};
use crate::error::{Result, WatchError};
use crate::poll::Pause;
use crate::types::{Branch, JobId, JobSnapshot, JobStatus};

#[derive(Default)]
pub struct ScriptedApi {
    pages: Mutex<VecDeque<Result<BranchPage>>>,
    jobs: Mutex<VecDeque<Result<JobSnapshot>>>,
    pub tokens_seen: Mutex<Vec<Option<String>>>,
    pub job_calls: Mutex<u32>,
}

impl ScriptedApi {
    pub fn with_pages(pages: Vec<Result<BranchPage>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            ..Default::default()
        }
    }

    pub fn with_jobs(jobs: Vec<Result<JobSnapshot>>) -> Self {
        Self {
            jobs: Mutex::new(jobs.into()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl AmplifyApi for ScriptedApi {
    async fn list_branches(&self, _app_id: &str, next_token: Option<&str>) -> Result<BranchPage> {
        self.tokens_seen
            .lock()
            .unwrap()
            .push(next_token.map(str::to_string));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(exhausted("branch")))
    }

    async fn get_job(&self, _app_id: &str, _branch: &str, _job_id: &JobId) -> Result<JobSnapshot> {
        *self.job_calls.lock().unwrap() += 1;
        self.jobs
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(exhausted("job")))
    }
}

fn exhausted(what: &str) -> WatchError {
    WatchError::Api {
        status: 500,
        code: "ScriptExhausted".to_string(),
        message: format!("{what} script exhausted"),
    }
}

/// Records every requested pause instead of sleeping.
#[derive(Default)]
pub struct RecordingPause {
    pub pauses: Mutex<Vec<Duration>>,
}

impl RecordingPause {
    pub fn count(&self) -> usize {
        self.pauses.lock().unwrap().len()
    }
}

#[async_trait]
impl Pause for RecordingPause {
    async fn pause(&self, duration: Duration) {
        self.pauses.lock().unwrap().push(duration);
    }
}

pub fn branch(name: &str, active: Option<&str>) -> Branch {
    Branch {
        branch_name: name.to_string(),
        active_job_id: active.map(JobId::new),
    }
}

pub fn snapshot(status: JobStatus) -> JobSnapshot {
    JobSnapshot {
        job_id: JobId::new("0000000005"),
        status,
        commit_id: None,
        commit_message: None,
        start_time: None,
        end_time: None,
        steps: vec![],
    }
}

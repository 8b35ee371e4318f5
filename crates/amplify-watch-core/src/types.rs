use chrono::{DateTime, Utc};
use std::fmt;

use crate::error::WatchError;

/// Width job ids are zero-padded to when given on the command line.
pub const JOB_ID_WIDTH: usize = 10;

// ---------------------------------------------------------------------------
// JobStatus
// ---------------------------------------------------------------------------

/// Status of a job or of one of its steps, as reported by Amplify.
///
/// Unrecognised values are preserved verbatim in `Unknown` rather than
/// rejected, so a new provider status never breaks a watch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Pending,
    Provisioning,
    Running,
    Succeed,
    Failed,
    Cancelling,
    Cancelled,
    Unknown(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Pending => "PENDING",
            JobStatus::Provisioning => "PROVISIONING",
            JobStatus::Running => "RUNNING",
            JobStatus::Succeed => "SUCCEED",
            JobStatus::Failed => "FAILED",
            JobStatus::Cancelling => "CANCELLING",
            JobStatus::Cancelled => "CANCELLED",
            JobStatus::Unknown(s) => s,
        }
    }

    /// No further transitions happen after a terminal status.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Succeed | JobStatus::Failed | JobStatus::Cancelled
        )
    }

    /// Display symbol used in step lines; `❓` for anything unrecognised.
    pub fn symbol(&self) -> &'static str {
        match self {
            JobStatus::Pending | JobStatus::Provisioning => "⏳",
            JobStatus::Running => "🔄",
            JobStatus::Succeed => "✅",
            JobStatus::Failed => "❌",
            JobStatus::Cancelling | JobStatus::Cancelled => "🚫",
            JobStatus::Unknown(_) => "❓",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PENDING" => JobStatus::Pending,
            "PROVISIONING" => JobStatus::Provisioning,
            "RUNNING" => JobStatus::Running,
            "SUCCEED" => JobStatus::Succeed,
            "FAILED" => JobStatus::Failed,
            "CANCELLING" => JobStatus::Cancelling,
            "CANCELLED" => JobStatus::Cancelled,
            _ => JobStatus::Unknown(s),
        }
    }
}

impl From<&str> for JobStatus {
    fn from(s: &str) -> Self {
        JobStatus::from(s.to_string())
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        status.as_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// JobId
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        JobId(id.into())
    }

    /// Parse a user-supplied id: ASCII digits only, left-padded with zeros
    /// to [`JOB_ID_WIDTH`].
    pub fn parse_numeric(raw: &str) -> Result<Self, WatchError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(WatchError::InvalidJobId(raw.to_string()));
        }
        Ok(JobId(format!("{raw:0>width$}", width = JOB_ID_WIDTH)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for JobId {
    type Err = WatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobId::parse_numeric(s)
    }
}

// ---------------------------------------------------------------------------
// Step / JobSnapshot / Branch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub name: String,
    pub status: JobStatus,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub log_url: Option<String>,
}

/// The provider's view of one job at the moment of a single query.
#[derive(Debug, Clone, PartialEq)]
pub struct JobSnapshot {
    pub job_id: JobId,
    pub status: JobStatus,
    pub commit_id: Option<String>,
    pub commit_message: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub steps: Vec<Step>,
}

impl JobSnapshot {
    pub fn failed_steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|s| s.status == JobStatus::Failed)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub branch_name: String,
    /// `None` when nothing is deploying on the branch.
    pub active_job_id: Option<JobId>,
}

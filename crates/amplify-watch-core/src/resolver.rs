use crate::client::AmplifyApi;
use crate::error::Result;
use crate::types::JobId;

/// Outcome of looking up a branch's active job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Active(JobId),
    /// The branch exists but has no active job.
    NoActiveJob,
    /// No branch with that name in the app.
    UnknownBranch,
}

/// Find the job currently active on `branch`.
///
/// Walks every page of the app's branch list. Absence is reported through
/// [`Resolution`], never as an error; API failures are returned as-is and
/// not retried.
pub async fn resolve_active_job<A: AmplifyApi + ?Sized>(
    api: &A,
    app_id: &str,
    branch: &str,
) -> Result<Resolution> {
    let mut next_token: Option<String> = None;
    loop {
        let page = api.list_branches(app_id, next_token.as_deref()).await?;
        if let Some(found) = page.branches.into_iter().find(|b| b.branch_name == branch) {
            tracing::info!(branch, job = ?found.active_job_id, "resolved branch");
            return Ok(match found.active_job_id {
                Some(id) if !id.as_str().is_empty() => Resolution::Active(id),
                _ => Resolution::NoActiveJob,
            });
        }
        match page.next_token.filter(|t| !t.is_empty()) {
            Some(token) => next_token = Some(token),
            None => return Ok(Resolution::UnknownBranch),
        }
    }
}

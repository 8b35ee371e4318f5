//! Human-readable status report for one job snapshot.
//!
//! Rendering is pure: the caller supplies the wall-clock time and writes the
//! returned text wherever it wants.

use chrono::{DateTime, Local, Utc};
use std::time::Duration;

use crate::duration::{elapsed, NOT_AVAILABLE};
use crate::types::{JobSnapshot, JobStatus};

const RULE_WIDTH: usize = 60;
const COMMIT_PREFIX_LEN: usize = 8;

/// Inputs to [`render`] that do not come from the provider.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub now: DateTime<Utc>,
    pub poll_interval: Duration,
    pub site_url: Option<&'a str>,
}

pub fn render(job: &JobSnapshot, ctx: &ReportContext<'_>) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    out.push('\n');
    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!(
        "📱 Amplify Deployment Monitor - {}\n",
        ctx.now.with_timezone(&Local).format("%H:%M:%S")
    ));
    out.push_str(&format!("{rule}\n"));

    out.push_str(&format!("🔧 Job ID: {}\n", job.job_id));
    out.push_str(&format!("📊 Status: {}\n", job.status));
    out.push_str(&format!(
        "🔗 Commit: {}\n",
        short_commit(job.commit_id.as_deref())
    ));
    if let Some(message) = job.commit_message.as_deref().and_then(first_line) {
        out.push_str(&format!("💬 Message: {message}\n"));
    }
    out.push_str(&format!("⏰ Started: {}\n", format_time(job.start_time)));

    if job.status.is_terminal() {
        out.push_str(&format!("🏁 Finished: {}\n", format_time(job.end_time)));
        out.push_str(&format!(
            "⏱️  Total Duration: {}\n",
            elapsed(job.start_time, job.end_time, ctx.now)
        ));
    } else {
        out.push_str(&format!(
            "⏱️  Running for: {}\n",
            elapsed(job.start_time, None, ctx.now)
        ));
    }

    if !job.steps.is_empty() {
        out.push_str("\n📋 Steps Progress:\n");
        for (i, step) in job.steps.iter().enumerate() {
            out.push_str(&format!(
                "  {}. {} {}: {} ({})\n",
                i + 1,
                step.status.symbol(),
                step.name,
                step.status,
                elapsed(step.start_time, step.end_time, ctx.now)
            ));
        }
    }

    out.push('\n');
    match &job.status {
        JobStatus::Succeed => {
            out.push_str("🎉 Deployment completed successfully!\n");
            if let Some(url) = ctx.site_url {
                out.push_str(&format!("🌐 Your site should be live at: {url}\n"));
            }
        }
        JobStatus::Failed => {
            out.push_str("💥 Deployment failed!\n");
            let failed: Vec<_> = job.failed_steps().collect();
            if !failed.is_empty() {
                let names: Vec<&str> = failed.iter().map(|s| s.name.as_str()).collect();
                out.push_str(&format!("❌ Failed step(s): {}\n", names.join(", ")));
                for step in failed {
                    if let Some(url) = &step.log_url {
                        out.push_str(&format!("📄 Logs for {}: {url}\n", step.name));
                    }
                }
            }
        }
        JobStatus::Cancelled => out.push_str("🚫 Deployment was cancelled.\n"),
        _ => out.push_str(&format!(
            "🔄 Deployment in progress... (checking again in {}s)\n",
            ctx.poll_interval.as_secs()
        )),
    }

    out
}

fn format_time(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn short_commit(commit: Option<&str>) -> String {
    match commit {
        Some(id) if !id.is_empty() => {
            let prefix: String = id.chars().take(COMMIT_PREFIX_LEN).collect();
            format!("{prefix}...")
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|l| !l.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{JobId, Step};
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn ctx() -> ReportContext<'static> {
        ReportContext {
            now: t0() + chrono::Duration::seconds(300),
            poll_interval: Duration::from_secs(10),
            site_url: None,
        }
    }

    fn snapshot(status: JobStatus, steps: Vec<Step>) -> JobSnapshot {
        let terminal = status.is_terminal();
        JobSnapshot {
            job_id: JobId::new("0000000017"),
            status,
            commit_id: Some("0123456789abcdef".to_string()),
            commit_message: None,
            start_time: Some(t0()),
            end_time: terminal.then(|| t0() + chrono::Duration::seconds(125)),
            steps,
        }
    }

    fn step(name: &str, status: JobStatus) -> Step {
        Step {
            name: name.to_string(),
            status,
            start_time: Some(t0()),
            end_time: Some(t0() + chrono::Duration::seconds(30)),
            log_url: None,
        }
    }

    #[test]
    fn contains_job_id_and_status_verbatim() {
        for status in [
            JobStatus::Pending,
            JobStatus::Running,
            JobStatus::Succeed,
            JobStatus::Failed,
            JobStatus::Cancelled,
            JobStatus::Unknown("PAUSED".to_string()),
        ] {
            let text = render(&snapshot(status.clone(), vec![]), &ctx());
            assert!(text.contains("0000000017"), "{text}");
            assert!(text.contains(&format!("📊 Status: {status}")), "{text}");
        }
    }

    #[test]
    fn succeeded_without_steps_omits_steps_section() {
        let text = render(&snapshot(JobStatus::Succeed, vec![]), &ctx());
        assert!(!text.contains("Steps Progress"));
        assert!(text.contains("🎉 Deployment completed successfully!"));
        assert!(text.contains("⏱️  Total Duration: 2m 5s"));
        assert!(!text.contains("Your site should be live"));
    }

    #[test]
    fn succeeded_mentions_site_url_when_configured() {
        let ctx = ReportContext {
            site_url: Some("https://example.com"),
            ..ctx()
        };
        let text = render(&snapshot(JobStatus::Succeed, vec![]), &ctx);
        assert!(text.contains("🌐 Your site should be live at: https://example.com"));
    }

    #[test]
    fn failed_step_is_named_in_summary() {
        let steps = vec![
            step("BUILD", JobStatus::Succeed),
            step("DEPLOY", JobStatus::Failed),
        ];
        let text = render(&snapshot(JobStatus::Failed, steps), &ctx());
        assert!(text.contains("  1. ✅ BUILD: SUCCEED (30s)"), "{text}");
        assert!(text.contains("  2. ❌ DEPLOY: FAILED (30s)"), "{text}");
        assert!(text.contains("💥 Deployment failed!"));
        assert!(text.contains("❌ Failed step(s): DEPLOY"));
    }

    #[test]
    fn failed_step_log_url_is_listed() {
        let mut deploy = step("DEPLOY", JobStatus::Failed);
        deploy.log_url = Some("https://logs.example/deploy".to_string());
        let text = render(&snapshot(JobStatus::Failed, vec![deploy]), &ctx());
        assert!(text.contains("📄 Logs for DEPLOY: https://logs.example/deploy"));
    }

    #[test]
    fn running_job_shows_elapsed_and_next_check() {
        let text = render(&snapshot(JobStatus::Running, vec![]), &ctx());
        assert!(text.contains("⏱️  Running for: 5m 0s"));
        assert!(!text.contains("🏁 Finished"));
        assert!(text.contains("(checking again in 10s)"));
    }

    #[test]
    fn cancelled_job_is_reported_as_finished() {
        let text = render(&snapshot(JobStatus::Cancelled, vec![]), &ctx());
        assert!(text.contains("🏁 Finished:"));
        assert!(text.contains("🚫 Deployment was cancelled."));
    }

    #[test]
    fn missing_fields_render_placeholders() {
        let mut job = snapshot(JobStatus::Pending, vec![]);
        job.commit_id = None;
        job.start_time = None;
        let text = render(&job, &ctx());
        assert!(text.contains("🔗 Commit: N/A"));
        assert!(text.contains("⏰ Started: N/A"));
        assert!(text.contains("⏱️  Running for: N/A"));
    }

    #[test]
    fn commit_is_truncated() {
        let text = render(&snapshot(JobStatus::Running, vec![]), &ctx());
        assert!(text.contains("🔗 Commit: 01234567..."));
    }

    #[test]
    fn unknown_step_status_uses_fallback_symbol() {
        let steps = vec![step("VERIFY", JobStatus::Unknown("SKIPPED".into()))];
        let text = render(&snapshot(JobStatus::Running, steps), &ctx());
        assert!(text.contains("  1. ❓ VERIFY: SKIPPED (30s)"));
    }

    #[test]
    fn commit_message_shows_first_line() {
        let mut job = snapshot(JobStatus::Running, vec![]);
        job.commit_message = Some("\nFix header\n\nlonger body".to_string());
        let text = render(&job, &ctx());
        assert!(text.contains("💬 Message: Fix header"));
        assert!(!text.contains("longer body"));
    }

    #[test]
    fn start_time_is_rendered_in_local_time() {
        let text = render(&snapshot(JobStatus::Running, vec![]), &ctx());
        let expected = t0().with_timezone(&Local).format("%Y-%m-%d %H:%M:%S");
        assert!(text.contains(&format!("⏰ Started: {expected}")));
    }

    #[test]
    fn sections_appear_in_order_one_per_line() {
        let steps = vec![step("BUILD", JobStatus::Succeed)];
        let text = render(&snapshot(JobStatus::Succeed, steps), &ctx());
        let lines: Vec<&str> = text.lines().collect();
        let rule = "=".repeat(60);

        assert_eq!(lines[0], "");
        assert_eq!(lines[1], rule);
        assert!(lines[2].starts_with("📱 Amplify Deployment Monitor - "));
        assert_eq!(lines[3], rule);
        assert_eq!(lines[4], "🔧 Job ID: 0000000017");
        assert_eq!(lines[5], "📊 Status: SUCCEED");
        assert_eq!(lines[6], "🔗 Commit: 01234567...");
        assert!(lines[7].starts_with("⏰ Started: "));
        assert!(lines[8].starts_with("🏁 Finished: "));
        assert_eq!(lines[9], "⏱️  Total Duration: 2m 5s");
        assert_eq!(lines[10], "");
        assert_eq!(lines[11], "📋 Steps Progress:");
        assert_eq!(lines[12], "  1. ✅ BUILD: SUCCEED (30s)");
        assert_eq!(lines[13], "");
        assert_eq!(lines[14], "🎉 Deployment completed successfully!");
        assert_eq!(lines.len(), 15);
        assert!(text.ends_with('\n'));
    }
}

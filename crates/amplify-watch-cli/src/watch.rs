use amplify_watch_core::{
    poll, resolve_active_job, AmplifyClient, ConfigOverrides, FileConfig, JobId, JobStatus,
    PollOutcome, Resolution, TokioPause, WatchConfig,
};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct WatchArgs {
    pub job_id: Option<JobId>,
    pub config_path: Option<PathBuf>,
    pub overrides: ConfigOverrides,
    pub exit_code: bool,
}

/// Resolve settings, then watch until the job finishes or Ctrl+C.
/// Returns the process exit code.
pub fn run(args: WatchArgs) -> Result<i32> {
    let WatchArgs {
        job_id,
        config_path,
        overrides,
        exit_code,
    } = args;

    let file = match &config_path {
        Some(path) => Some(
            FileConfig::load(path)
                .with_context(|| format!("failed to read config {}", path.display()))?,
        ),
        None => None,
    };
    let config = WatchConfig::resolve(file, overrides)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        let client = AmplifyClient::connect(&config).await?;
        tokio::select! {
            res = monitor(&client, &config, job_id, exit_code) => res,
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for Ctrl+C")?;
                println!("\n\n⏹️  Monitoring stopped by user");
                Ok(0)
            }
        }
    })
}

async fn monitor(
    client: &AmplifyClient,
    config: &WatchConfig,
    job_id: Option<JobId>,
    exit_code: bool,
) -> Result<i32> {
    let job_id = match job_id {
        Some(id) => id,
        None => {
            println!("🔍 Getting latest deployment job...");
            let resolution = resolve_active_job(client, &config.app_id, &config.branch)
                .await
                .with_context(|| format!("failed to list branches of app {}", config.app_id))?;
            match resolution {
                Resolution::Active(id) => id,
                Resolution::NoActiveJob => {
                    println!("❌ No active job found for the {} branch", config.branch);
                    return Ok(0);
                }
                Resolution::UnknownBranch => {
                    println!(
                        "❌ Branch {} not found in app {}",
                        config.branch, config.app_id
                    );
                    return Ok(1);
                }
            }
        }
    };

    println!("👀 Monitoring job: {job_id}");
    println!("Press Ctrl+C to stop monitoring\n");

    let mut out = std::io::stdout();
    let outcome = poll::watch(client, &TokioPause, config, &job_id, &mut out).await?;
    tracing::info!(?outcome, "watch finished");

    Ok(match outcome {
        PollOutcome::Finished(JobStatus::Succeed) => 0,
        PollOutcome::Finished(_) if exit_code => 1,
        PollOutcome::Finished(_) => 0,
        PollOutcome::JobNotFound => 1,
    })
}

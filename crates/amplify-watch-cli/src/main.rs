mod watch;

use amplify_watch_core::{ConfigOverrides, JobId};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "amplify-watch",
    about = "Watch an AWS Amplify deployment job until it finishes",
    version
)]
struct Cli {
    /// Job to watch (digits only, zero-padded to 10). Defaults to the branch's active job
    #[arg(value_parser = parse_job_id)]
    job_id: Option<JobId>,

    /// Amplify application id
    #[arg(long, env = "AMPLIFY_APP_ID")]
    app_id: Option<String>,

    /// Branch whose active job is watched [default: main]
    #[arg(long, env = "AMPLIFY_BRANCH")]
    branch: Option<String>,

    /// AWS region of the app [default: us-east-1]
    #[arg(long, env = "AWS_REGION")]
    region: Option<String>,

    /// Seconds between status checks [default: 10]
    #[arg(long, env = "AMPLIFY_POLL_INTERVAL")]
    interval: Option<u64>,

    /// Named AWS profile for credentials
    #[arg(long, env = "AWS_PROFILE")]
    profile: Option<String>,

    /// URL announced once the deployment succeeds
    #[arg(long, env = "AMPLIFY_SITE_URL")]
    site_url: Option<String>,

    /// Give up after this many consecutive failed requests (default: never)
    #[arg(long, env = "AMPLIFY_MAX_ERRORS")]
    max_errors: Option<u32>,

    /// Override the Amplify API endpoint
    #[arg(long, env = "AMPLIFY_ENDPOINT", hide = true)]
    endpoint: Option<String>,

    /// YAML file with any of the settings above
    #[arg(long, env = "AMPLIFY_WATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Exit with status 1 when the job fails or is cancelled
    #[arg(long)]
    exit_code: bool,

    /// Log requests and retries to stderr (RUST_LOG takes precedence)
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn parse_job_id(raw: &str) -> Result<JobId, String> {
    JobId::parse_numeric(raw).map_err(|_| "Job ID must be numeric".to_string())
}

fn main() {
    let cli = Cli::parse();

    // An explicit RUST_LOG wins; otherwise WARN, or DEBUG for our own crates with -v.
    let filter = if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("warn,amplify_watch=debug,amplify_watch_core=debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = watch::WatchArgs {
        job_id: cli.job_id,
        config_path: cli.config,
        overrides: ConfigOverrides {
            app_id: cli.app_id,
            branch: cli.branch,
            region: cli.region,
            poll_interval_secs: cli.interval,
            site_url: cli.site_url,
            profile: cli.profile,
            endpoint: cli.endpoint,
            max_consecutive_errors: cli.max_errors,
        },
        exit_code: cli.exit_code,
    };

    match watch::run(args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            // Print the full error chain (anyhow's alternate Display)
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}

//! `amplify-watch-core` — job model, status report and polling loop for
//! watching an AWS Amplify deployment.
//!
//! # Architecture
//!
//! ```text
//! resolver::resolve_active_job   ← only when no job id was given
//!     │
//!     ▼
//! poll::watch  ── AmplifyApi::get_job ──▶ AmplifyClient (aws-sdk-amplify)
//!     │
//!     ▼
//! report::render  ← duration::elapsed
//! ```

pub mod client;
pub mod config;
pub mod duration;
pub mod error;
pub mod poll;
pub mod report;
pub mod resolver;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::{AmplifyApi, AmplifyClient, BranchPage};
pub use config::{ConfigOverrides, FileConfig, WatchConfig};
pub use error::{Result, WatchError};
pub use poll::{watch, Pause, PollOutcome, TokioPause};
pub use resolver::{resolve_active_job, Resolution};
pub use types::{Branch, JobId, JobSnapshot, JobStatus, Step};

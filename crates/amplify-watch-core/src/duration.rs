use chrono::{DateTime, Utc};

/// Placeholder rendered for any missing timestamp or duration.
pub const NOT_AVAILABLE: &str = "N/A";

/// Elapsed time between `start` and `end` (or `now` when the end is absent),
/// rendered as `"<m>m <s>s"`, or `"<s>s"` under a minute.
///
/// A missing start yields [`NOT_AVAILABLE`]. Negative spans clamp to zero.
pub fn elapsed(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> String {
    let Some(start) = start else {
        return NOT_AVAILABLE.to_string();
    };
    let end = end.unwrap_or(now);
    let total = (end - start).num_seconds().max(0);
    let (minutes, seconds) = (total / 60, total % 60);
    if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

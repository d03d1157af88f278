//! Logging helpers shared by the client and poller

use std::future::Future;
use std::time::{Duration, Instant};
use tracing::debug;

/// Await `future` and emit a debug event with its wall-clock duration.
///
/// The event carries `operation` and `elapsed` fields.
///
/// ```rust,ignore
/// let statuses = timed("status fetch", client.fetch_statuses()).await?;
/// ```
pub async fn timed<F: Future>(operation: &'static str, future: F) -> F::Output {
    let started = Instant::now();
    let output = future.await;
    debug!(
        operation,
        elapsed = %format_duration(started.elapsed()),
        "Operation finished"
    );
    output
}

/// Compact duration for log fields and poll intervals.
///
/// Sub-second values use the largest whole unit, seconds keep two decimals,
/// and anything from a minute up is split into minutes and seconds.
///
/// ```rust
/// use launcher_status::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_millis(2500)), "2.50s");
/// assert_eq!(format_duration(Duration::from_millis(480)), "480ms");
/// assert_eq!(format_duration(Duration::from_secs(300)), "5m");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    match secs {
        0 if duration.subsec_millis() == 0 => format!("{}μs", duration.subsec_micros()),
        0 => format!("{}ms", duration.subsec_millis()),
        1..=59 => format!("{:.2}s", duration.as_secs_f64()),
        _ if secs % 60 == 0 => format!("{}m", secs / 60),
        _ => format!("{}m{}s", secs / 60, secs % 60),
    }
}

//! Point-in-time telemetry snapshot attached to run events.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// Render a duration as `HH:MM:SS.nnnnnnnnn`.
///
/// Hours are not wrapped at 24.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    format!(
        "{:02}:{:02}:{:02}.{:09}",
        hours,
        minutes,
        seconds,
        duration.subsec_nanos()
    )
}

/// Telemetry captured when an event is emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TelemetryInfo {
    /// Time since the run started
    pub duration_since_start: Duration,
    /// Time since the previous event
    pub duration_since_previous: Duration,
    /// Memory in use, in bytes
    pub memory_usage: u64,
    /// Peak memory use so far, in bytes
    pub peak_memory_usage: u64,
}

impl TelemetryInfo {
    /// Create a snapshot from measured values.
    pub fn new(
        duration_since_start: Duration,
        duration_since_previous: Duration,
        memory_usage: u64,
        peak_memory_usage: u64,
    ) -> Self {
        Self {
            duration_since_start,
            duration_since_previous,
            memory_usage,
            peak_memory_usage,
        }
    }
}

impl fmt::Display for TelemetryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} / {}] [{} bytes]",
            format_duration(self.duration_since_start),
            format_duration(self.duration_since_previous),
            self.memory_usage
        )
    }
}

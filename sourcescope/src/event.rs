//! Run configuration and the event announcing it.
//!
//! Once the configuration loader has merged every input into a
//! [`Configuration`], a single [`ConfigurationCombined`] event is built and
//! handed to listeners. Delivering it is up to the host.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::source::Source;
use crate::telemetry::TelemetryInfo;

const CONFIGURATION_COMBINED: &str = "Test Runner Configuration Combined";

/// The merged configuration of a test run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    source: Source,
}

impl Configuration {
    /// Wrap the merged source scope.
    pub fn new(source: Source) -> Self {
        Self { source }
    }

    /// Source scope and issue policy of the run.
    pub fn source(&self) -> &Source {
        &self.source
    }
}

/// Something that happened during a run, rendered for listeners.
pub trait Event {
    /// Human-readable description, prefixed by the telemetry snapshot.
    fn as_string(&self) -> String;
}

/// Emitted once when configuration assembly has finished.
#[derive(Debug, Clone)]
pub struct ConfigurationCombined<T = TelemetryInfo> {
    telemetry_info: T,
    configuration: Arc<Configuration>,
}

impl<T: fmt::Display> ConfigurationCombined<T> {
    /// Record the event and log it at debug level.
    pub fn new(telemetry_info: T, configuration: Arc<Configuration>) -> Self {
        let event = Self {
            telemetry_info,
            configuration,
        };
        debug!(event = %event, "configuration combined");
        event
    }

    /// Snapshot taken when configuration finished.
    pub fn telemetry_info(&self) -> &T {
        &self.telemetry_info
    }

    /// The merged configuration, shared with the runner.
    pub fn configuration(&self) -> &Arc<Configuration> {
        &self.configuration
    }
}

impl<T: fmt::Display> fmt::Display for ConfigurationCombined<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.telemetry_info, CONFIGURATION_COMBINED)
    }
}

impl<T: fmt::Display> Event for ConfigurationCombined<T> {
    fn as_string(&self) -> String {
        self.to_string()
    }
}

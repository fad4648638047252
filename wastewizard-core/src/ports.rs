//! Traits describing telemetry sources and the errors they report.

use async_trait::async_trait;

use crate::model::{BinId, BinReading, DeploymentMeta};

#[derive(thiserror::Error, Debug)]
/// Errors that can occur while collecting telemetry.
pub enum PortError {
    /// The deployment has no registered source.
    #[error("Unknown deployment: {0}")]
    UnknownDeployment(String),
    /// The source returned a different set of readings than requested.
    #[error("Expected {expected} readings, got {actual}")]
    ReadingCountMismatch {
        /// Number of bins requested.
        expected: usize,
        /// Number of readings returned.
        actual: usize,
    },
    /// Internal source error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[async_trait]
/// Trait for anything able to produce a fresh set of bin readings.
///
/// Every call is an independent draw: one reading per requested bin, in the
/// order the bins were given, with nothing carried over from earlier calls.
pub trait TelemetrySource: Send + Sync {
    /// Metadata describing the deployment served by this source.
    fn deployment(&self) -> &DeploymentMeta;

    /// Take one sample for the given bins.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the source cannot produce readings.
    async fn sample(&self, bin_ids: &[BinId]) -> Result<Vec<BinReading>, PortError>;
}

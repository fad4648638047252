//! Domain data structures for deployments, bins, and their telemetry readings.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// Identifier for a monitored bin, unique within a deployment.
pub struct BinId(pub String);

impl fmt::Display for BinId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl From<&str> for BinId {
    fn from(label: &str) -> Self {
        BinId(label.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for a deployment site known to wastewizard.
pub struct DeploymentId(pub String);

impl fmt::Display for DeploymentId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Latitude/longitude pair in decimal degrees.
pub struct GeoPoint {
    /// Latitude, negative south of the equator.
    pub latitude: f64,
    /// Longitude, negative west of Greenwich.
    pub longitude: f64,
}

impl GeoPoint {
    /// Construct a point from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Metadata describing a deployment: its display name, location, and bins.
pub struct DeploymentMeta {
    /// Unique identifier.
    pub id: DeploymentId,
    /// Human-friendly name.
    pub name: String,
    /// Reference coordinate the bins are placed around.
    pub base: GeoPoint,
    /// Ordered list of bins installed at this deployment.
    pub bins: Vec<BinId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One telemetry reading for a single bin.
pub struct BinReading {
    /// Bin the reading belongs to.
    pub bin_id: BinId,
    /// Fill level in percent, 0 through 100.
    pub fill_percent: u8,
    /// Temperature inside the bin in degrees Celsius.
    pub temperature_c: f64,
    /// Relative humidity in percent.
    pub humidity_percent: f64,
    /// When the bin was last emptied.
    pub last_emptied: DateTime<Utc>,
    /// Reported latitude.
    pub latitude: f64,
    /// Reported longitude.
    pub longitude: f64,
}

impl BinReading {
    /// Reported position of the bin.
    #[must_use]
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
/// Column averages over one sample. `None` when the sample is empty.
pub struct Summary {
    /// Mean fill level in percent.
    pub average_fill: Option<f64>,
    /// Mean temperature in degrees Celsius.
    pub average_temperature: Option<f64>,
    /// Mean humidity in percent.
    pub average_humidity: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Efficiency KPIs shown on the dashboard.
///
/// These are placeholder display values, nothing computes them.
pub struct Scorecards {
    /// Collections per week.
    pub collection_frequency_per_week: u32,
    /// Route optimization in percent.
    pub route_optimization_percent: u8,
    /// Waste reduction in percent.
    pub waste_reduction_percent: u8,
}

impl Default for Scorecards {
    fn default() -> Self {
        Self {
            collection_frequency_per_week: 5,
            route_optimization_percent: 85,
            waste_reduction_percent: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Everything a single dashboard render needs.
pub struct Snapshot {
    /// Deployment the readings were taken from.
    pub deployment: DeploymentId,
    /// One reading per configured bin, in configuration order.
    pub readings: Vec<BinReading>,
    /// Averages over `readings`.
    pub summary: Summary,
    /// When the sample was taken.
    pub taken_at: DateTime<Utc>,
}

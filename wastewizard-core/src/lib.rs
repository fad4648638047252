//! Core types and service wiring for the wastewizard smart bin dashboard.

/// Fill-level severity bands and their display colors.
pub mod classify;
/// Projection of readings onto map markers.
pub mod map;
/// Summary metrics computed over a sample.
pub mod metrics;
/// Domain models and identifiers shared by all sources.
pub mod model;
/// Registry for plugging deployments and their sources into the service.
pub mod plugin;
/// Traits describing the telemetry source interface.
pub mod ports;
/// High-level service facade used by clients.
pub mod service;

pub use classify::*;
pub use map::*;
pub use metrics::*;
pub use model::*;
pub use plugin::*;
pub use ports::*;
pub use service::*;

//! Registry for all deployments and their telemetry sources.

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::{DeploymentId, DeploymentMeta, GeoPoint};
use crate::ports::{PortError, TelemetrySource};

/// Everything needed to monitor a single deployment.
pub struct DeploymentPlugin {
    /// Static metadata describing the deployment.
    pub meta: DeploymentMeta,
    /// Source of bin readings.
    pub source: Arc<dyn TelemetrySource>,
    /// Collection vehicle route drawn on the map.
    pub route: Vec<GeoPoint>,
}

/// Registry that resolves plugins by deployment identifier.
pub struct DeploymentRegistry {
    plugins: HashMap<DeploymentId, DeploymentPlugin>,
}

impl DeploymentRegistry {
    /// Build a registry from the provided plugin list.
    ///
    /// A later plugin replaces an earlier one with the same id.
    #[must_use]
    pub fn new(plugins: Vec<DeploymentPlugin>) -> Self {
        let plugins_map = plugins
            .into_iter()
            .map(|plugin| (plugin.meta.id.clone(), plugin))
            .collect();
        Self {
            plugins: plugins_map,
        }
    }

    /// Return metadata for all registered deployments, sorted by name.
    #[must_use]
    pub fn deployments(&self) -> Vec<DeploymentMeta> {
        let mut deployments: Vec<DeploymentMeta> = self
            .plugins
            .values()
            .map(|plugin| plugin.meta.clone())
            .collect();
        deployments.sort_by(|left, right| left.name.cmp(&right.name));
        deployments
    }

    /// Look up a plugin for the given deployment.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::UnknownDeployment`] when no plugin is registered.
    pub fn plugin(&self, id: &DeploymentId) -> Result<&DeploymentPlugin, PortError> {
        self.plugins
            .get(id)
            .ok_or_else(|| PortError::UnknownDeployment(id.0.clone()))
    }
}

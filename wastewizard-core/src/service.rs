//! High-level service facade combining all deployments.

use std::sync::Arc;

use chrono::Utc;
use log::{debug, warn};

use crate::metrics::summarize;
use crate::model::{DeploymentId, DeploymentMeta, GeoPoint, Scorecards, Snapshot};
use crate::plugin::DeploymentRegistry;
use crate::ports::PortError;

/// Public entry point for taking dashboard snapshots.
pub struct DashboardService {
    registry: Arc<DeploymentRegistry>,
    scorecards: Scorecards,
}

impl DashboardService {
    /// Create a new service bound to the provided registry.
    #[must_use]
    pub fn new(registry: Arc<DeploymentRegistry>) -> Self {
        Self {
            registry,
            scorecards: Scorecards::default(),
        }
    }

    /// List all available deployments.
    #[must_use]
    pub fn deployments(&self) -> Vec<DeploymentMeta> {
        self.registry.deployments()
    }

    /// Efficiency KPIs to display alongside the readings.
    #[must_use]
    pub fn scorecards(&self) -> Scorecards {
        self.scorecards
    }

    /// Collection vehicle route for a deployment.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::UnknownDeployment`] if the deployment is not registered.
    pub fn route(&self, id: &DeploymentId) -> Result<&[GeoPoint], PortError> {
        Ok(self.registry.plugin(id)?.route.as_slice())
    }

    /// Sample every bin of a deployment and summarize the result.
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] if the deployment is unknown, the source fails,
    /// or the source does not return exactly one reading per bin.
    pub async fn snapshot(&self, id: &DeploymentId) -> Result<Snapshot, PortError> {
        let plugin = self.registry.plugin(id)?;
        let bins = &plugin.meta.bins;

        let readings = plugin.source.sample(bins).await?;
        if readings.len() != bins.len() {
            warn!(
                "source for {id} returned {} readings for {} bins",
                readings.len(),
                bins.len()
            );
            return Err(PortError::ReadingCountMismatch {
                expected: bins.len(),
                actual: readings.len(),
            });
        }

        let summary = summarize(&readings);
        debug!("sampled {} bins for {id}", readings.len());

        Ok(Snapshot {
            deployment: id.clone(),
            readings,
            summary,
            taken_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::model::{BinId, BinReading};
    use crate::plugin::DeploymentPlugin;
    use crate::ports::TelemetrySource;

    struct FixedSource {
        meta: DeploymentMeta,
        drop_last: bool,
    }

    #[async_trait]
    impl TelemetrySource for FixedSource {
        fn deployment(&self) -> &DeploymentMeta {
            &self.meta
        }

        async fn sample(&self, bin_ids: &[BinId]) -> Result<Vec<BinReading>, PortError> {
            let mut readings: Vec<BinReading> = bin_ids
                .iter()
                .map(|bin_id| BinReading {
                    bin_id: bin_id.clone(),
                    fill_percent: 40,
                    temperature_c: 22.0,
                    humidity_percent: 44.0,
                    last_emptied: Utc::now(),
                    latitude: self.meta.base.latitude,
                    longitude: self.meta.base.longitude,
                })
                .collect();
            if self.drop_last {
                readings.pop();
            }
            Ok(readings)
        }
    }

    fn meta(id: &str, name: &str) -> DeploymentMeta {
        DeploymentMeta {
            id: DeploymentId(id.to_owned()),
            name: name.to_owned(),
            base: GeoPoint::new(-15.4167, 28.2833),
            bins: vec![BinId::from("Bin 1"), BinId::from("Bin 2")],
        }
    }

    fn service(drop_last: bool) -> DashboardService {
        let plugins = ["beta", "alpha"]
            .into_iter()
            .map(|id| {
                let meta = meta(id, &id.to_uppercase());
                DeploymentPlugin {
                    meta: meta.clone(),
                    source: Arc::new(FixedSource { meta, drop_last }),
                    route: vec![GeoPoint::new(-15.4167, 28.2833)],
                }
            })
            .collect();
        DashboardService::new(Arc::new(DeploymentRegistry::new(plugins)))
    }

    #[tokio::test]
    async fn snapshot_summarizes_readings() {
        let snapshot = service(false)
            .snapshot(&DeploymentId("alpha".into()))
            .await
            .expect("registered deployment");

        assert_eq!(snapshot.readings.len(), 2);
        assert_eq!(snapshot.summary.average_fill, Some(40.0));
        assert_eq!(snapshot.deployment, DeploymentId("alpha".into()));
    }

    #[tokio::test]
    async fn unknown_deployment_is_rejected() {
        let result = service(false)
            .snapshot(&DeploymentId("gamma".into()))
            .await;

        assert!(matches!(result, Err(PortError::UnknownDeployment(id)) if id == "gamma"));
    }

    #[tokio::test]
    async fn short_sample_is_rejected() {
        let result = service(true)
            .snapshot(&DeploymentId("beta".into()))
            .await;

        assert!(matches!(
            result,
            Err(PortError::ReadingCountMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn deployments_are_sorted_by_name() {
        let names: Vec<String> = service(false)
            .deployments()
            .into_iter()
            .map(|meta| meta.name)
            .collect();

        assert_eq!(names, vec!["ALPHA".to_owned(), "BETA".to_owned()]);
    }

    #[test]
    fn route_and_scorecards_are_exposed() {
        let service = service(false);

        assert_eq!(
            service
                .route(&DeploymentId("alpha".into()))
                .map(<[GeoPoint]>::len)
                .ok(),
            Some(1)
        );
        assert_eq!(service.scorecards().route_optimization_percent, 85);
    }
}

use std::sync::Arc;

use wastewizard_core::{
    model::{DeploymentId, DeploymentMeta, GeoPoint, Scorecards, Snapshot},
    service::DashboardService,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    DeploymentSelect,
    Dashboard,
}

pub(crate) struct App {
    pub service: Arc<DashboardService>,

    pub screen: Screen,
    pub deployments: Vec<DeploymentMeta>,
    pub deployment_list_index: usize,
    pub selected_deployment: Option<DeploymentMeta>,

    pub snapshot: Option<Snapshot>,
    pub route: Vec<GeoPoint>,
    pub scorecards: Scorecards,

    pub is_loading: bool,
    pub error_message: Option<String>,
    pub info_message: Option<String>,
}

impl App {
    pub(crate) fn new(service: Arc<DashboardService>) -> Self {
        let deployments = service.deployments();
        let scorecards = service.scorecards();
        Self {
            service,
            screen: Screen::DeploymentSelect,
            deployments,
            deployment_list_index: 0,
            selected_deployment: None,
            snapshot: None,
            route: Vec::new(),
            scorecards,
            is_loading: false,
            error_message: None,
            info_message: None,
        }
    }

    /// Jump straight to the dashboard of a deployment given by id.
    ///
    /// Returns `false` when no such deployment is registered.
    pub(crate) fn preselect(&mut self, id: &str) -> bool {
        let Some(index) = self
            .deployments
            .iter()
            .position(|meta| meta.id.0 == id)
        else {
            return false;
        };
        self.deployment_list_index = index;
        self.select_current_deployment().is_some()
    }

    pub(crate) fn select_current_deployment(&mut self) -> Option<DeploymentId> {
        let meta = self.deployments.get(self.deployment_list_index).cloned()?;
        self.route = self
            .service
            .route(&meta.id)
            .map(<[GeoPoint]>::to_vec)
            .unwrap_or_default();
        let id = meta.id.clone();
        self.selected_deployment = Some(meta);
        self.snapshot = None;
        self.screen = Screen::Dashboard;
        Some(id)
    }

    pub(crate) fn back_to_deployments(&mut self) {
        self.screen = Screen::DeploymentSelect;
        self.selected_deployment = None;
        self.snapshot = None;
        self.route.clear();
        self.info_message = None;
        self.error_message = None;
    }

    pub(crate) fn selected_id(&self) -> Option<DeploymentId> {
        self.selected_deployment.as_ref().map(|meta| meta.id.clone())
    }
}

#[cfg(test)]
pub(crate) fn test_app() -> App {
    let registry = wastewizard_core::plugin::DeploymentRegistry::new(
        wastewizard_provider_simulated::plugins(Some(5)),
    );
    App::new(Arc::new(DashboardService::new(Arc::new(registry))))
}

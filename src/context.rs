use crate::config::{Config, ConfigError};
use crate::model::balances::Balances;
use crate::service::ZoneService;
use crate::service::mock::MockZoneService;
use crate::utils::tasks::TaskManager;
use std::sync::Arc;

/// Everything backend tasks and screens share for the lifetime of the app.
#[derive(Debug)]
pub struct AppContext {
    pub(crate) config: Config,
    pub(crate) service: Arc<dyn ZoneService>,
    pub(crate) task_manager: TaskManager,
    balances: Balances,
}

impl AppContext {
    /// Context backed by the in-process mock service.
    pub fn new(config: Config) -> Result<Arc<Self>, ConfigError> {
        let service = Arc::new(MockZoneService::new(config.mock_latency()));
        Self::with_service(config, service)
    }

    pub fn with_service(
        config: Config,
        service: Arc<dyn ZoneService>,
    ) -> Result<Arc<Self>, ConfigError> {
        let balances = config.balances()?;
        tracing::debug!(?balances, ?service, "creating app context");

        Ok(Arc::new(AppContext {
            config,
            service,
            task_manager: TaskManager::new(),
            balances,
        }))
    }

    /// Balances snapshot handed to the withdrawal form.
    pub fn balances(&self) -> &Balances {
        &self.balances
    }

    pub fn tutorial_url(&self) -> &str {
        &self.config.tutorial_url
    }

    pub fn task_manager(&self) -> &TaskManager {
        &self.task_manager
    }
}

//! The application shell: wires configuration, transport, services, and the
//! warmup overlay together, and maps paths to pages.

use std::sync::Arc;

use tracing::info;
use trippy_core::WarmupState;

use crate::api::ApiClient;
use crate::config::{Config, ConfigError};
use crate::health::HealthMonitor;
use crate::pages::{AuthModal, HomePage, PlanPage};
use crate::services::{AuthService, DestinationService, ServiceContext, TripService};
use crate::storage::ClientStorage;
use crate::transport::{ReqwestTransport, Transport};
use crate::warmup::WarmupContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Plan,
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let path = path.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
        match path.trim_end_matches('/') {
            "" => Route::Home,
            "/plan" => Route::Plan,
            _ => Route::NotFound,
        }
    }
}

pub struct App {
    config: Config,
    api: ApiClient,
    warmup: WarmupContext,
    destinations: DestinationService,
    trips: TripService,
    auth: AuthService,
}

impl App {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.request_timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Build the app over any transport. The configuration is assumed valid.
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self::with_parts(config, transport, ClientStorage::default())
    }

    pub fn with_parts(config: Config, transport: Arc<dyn Transport>, storage: ClientStorage) -> Self {
        let api = ApiClient::new(&config, transport, storage);
        let warmup = WarmupContext::new();
        api.register_warmup_handler(Arc::new(warmup.clone()));
        let ctx = Arc::new(ServiceContext::new(&config, api.clone()));
        info!(
            base_url = %config.api_base_url,
            warmup = config.warmup_enabled(),
            "client ready"
        );
        Self {
            destinations: DestinationService::new(ctx.clone()),
            trips: TripService::new(ctx.clone()),
            auth: AuthService::new(ctx),
            config,
            api,
            warmup,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn destinations(&self) -> &DestinationService {
        &self.destinations
    }

    pub fn trips(&self) -> &TripService {
        &self.trips
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn warmup(&self) -> &WarmupContext {
        &self.warmup
    }

    /// The overlay state while the backend warms up, `None` when hidden.
    pub fn warmup_overlay(&self) -> Option<WarmupState> {
        Some(self.warmup.snapshot()).filter(|s| s.is_warming_up)
    }

    pub fn home_page(&self) -> HomePage {
        HomePage::new(&self.destinations)
    }

    pub fn plan_page(&self) -> PlanPage {
        PlanPage::new(&self.trips, &self.destinations, self.config.maps_api_key.clone())
    }

    pub fn auth_modal(&self) -> AuthModal {
        AuthModal::new(self.auth.clone())
    }

    pub fn health_monitor(&self) -> HealthMonitor {
        HealthMonitor::new(&self.config, self.api.transport())
    }
}

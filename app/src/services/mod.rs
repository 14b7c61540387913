//! Domain services: the API first, the mock catalogue when the API fails.
//!
//! Every service method sends its request through `ApiClient`. Any failure on
//! the real path, including server errors, is logged and replaced by a
//! result from `MockStore` after an artificial delay. The only errors a
//! caller sees are not-found lookups on the mock path.

mod auth;
mod destinations;
mod trips;

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::warn;
use trippy_core::{ApiError, ApiResponse, HttpRequest, MockStore, TrippyClient};

use crate::api::ApiClient;
use crate::config::Config;

pub use auth::AuthService;
pub use destinations::DestinationService;
pub use trips::TripService;

/// Simulated network delay on the mock path. Disabled in some tests and
/// from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockLatency {
    enabled: bool,
}

impl MockLatency {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub async fn wait(self, millis: u64) {
        if self.enabled {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }
}

/// State shared by all services.
pub struct ServiceContext {
    pub api: ApiClient,
    pub client: TrippyClient,
    pub mock: Arc<MockStore>,
    pub latency: MockLatency,
}

impl ServiceContext {
    pub fn new(config: &Config, api: ApiClient) -> Self {
        Self {
            api,
            client: TrippyClient::new(&config.api_base_url),
            mock: Arc::new(MockStore::seeded()),
            latency: MockLatency::new(config.mock_latency),
        }
    }

    pub fn with_mock(mut self, mock: Arc<MockStore>) -> Self {
        self.mock = mock;
        self
    }

    async fn envelope<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<ApiResponse<T>, ApiError> {
        let response = self.api.send(request).await?;
        self.client.parse_envelope(response)
    }

    async fn payload<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, ApiError> {
        let response = self.api.send(request).await?;
        self.client.parse_payload(response)
    }

    async fn empty(&self, request: HttpRequest) -> Result<(), ApiError> {
        let response = self.api.send(request).await?;
        self.client.parse_empty(response)
    }

    /// Log the failed real call and sleep before the mock result is served.
    async fn fall_back(&self, operation: &'static str, err: &ApiError, delay_ms: u64) {
        warn!(operation, code = %err.code(), error = %err, "API unavailable, serving mock data");
        self.latency.wait(delay_ms).await;
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use crate::api::ApiClient;
    use crate::config::Config;
    use crate::storage::ClientStorage;
    use crate::transport::testing::ScriptedTransport;

    use super::ServiceContext;

    /// A context whose local backend never answers, so every call falls back
    /// immediately without warmup retries.
    pub fn offline_context() -> (Arc<ServiceContext>, Arc<ScriptedTransport>) {
        context_with(ScriptedTransport::offline())
    }

    pub fn context_with(
        transport: ScriptedTransport,
    ) -> (Arc<ServiceContext>, Arc<ScriptedTransport>) {
        let config = Config {
            api_base_url: "http://localhost:3000/api".to_string(),
            ..Config::default()
        };
        let transport = Arc::new(transport);
        let api = ApiClient::new(&config, transport.clone(), ClientStorage::default());
        (Arc::new(ServiceContext::new(&config, api)), transport)
    }
}

//! Backend readiness probe.
//!
//! Polls the backend root (the API base without `/api`) until it answers
//! 200. Probes go straight to the transport: they use their own timeout and
//! never trigger the warmup retry loop.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use trippy_core::TrippyClient;

use crate::config::Config;
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BackendStatus {
    pub is_ready: bool,
    pub is_checking: bool,
    pub check_count: u32,
}

#[derive(Clone)]
pub struct HealthMonitor {
    transport: Arc<dyn Transport>,
    client: TrippyClient,
    timeout: Duration,
    interval: Duration,
    state: Arc<watch::Sender<BackendStatus>>,
}

impl HealthMonitor {
    pub fn new(config: &Config, transport: Arc<dyn Transport>) -> Self {
        let (state, _) = watch::channel(BackendStatus::default());
        Self {
            transport,
            client: TrippyClient::new(&config.api_base_url),
            timeout: config.health_timeout,
            interval: config.health_interval,
            state: Arc::new(state),
        }
    }

    pub fn status(&self) -> BackendStatus {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<BackendStatus> {
        self.state.subscribe()
    }

    /// One probe. Any transport failure or non-200 status counts as not
    /// ready.
    pub async fn check_once(&self) -> bool {
        self.state.send_modify(|s| s.is_checking = true);
        let mut request = self.client.build_health_check();
        request.timeout = Some(self.timeout);
        let ready = match self.transport.execute(&request).await {
            Ok(response) => self.client.parse_health(&response),
            Err(err) => {
                debug!(error = %err, "health probe failed");
                false
            }
        };
        self.state.send_modify(|s| {
            s.is_ready = ready;
            s.is_checking = false;
            s.check_count += 1;
        });
        ready
    }

    /// Probe every `interval` until the backend is ready.
    pub async fn run_until_ready(&self) {
        loop {
            if self.check_once().await {
                info!(checks = self.status().check_count, "backend is ready");
                return;
            }
            tokio::time::sleep(self.interval).await;
        }
    }

    pub fn spawn(&self) -> JoinHandle<()> {
        let monitor = self.clone();
        tokio::spawn(async move { monitor.run_until_ready().await })
    }
}

//! The HTTP client every service goes through.
//!
//! # Design
//! `ApiClient::send` injects the bearer token and executes the request. When
//! the backend is remote, a timeout or network failure is taken to mean the
//! host is cold-starting: the registered `WarmupHandler` shows its overlay
//! and the request is retried on a fixed schedule until it gets a response
//! or the attempt budget runs out.
//!
//! Retries are coalesced per request key (`HttpRequest::dedup_key`). The
//! first caller to fail spawns the retry loop and installs a shared handle
//! to it in `in_flight`; later callers with the same key await that same
//! handle. The loop runs to completion even if every caller goes away. The
//! entry is removed when the loop ends either way, so a later call with the
//! same key starts fresh, and the overlay is hidden once no key is left
//! retrying. Attempts within one key are sequential; different keys
//! retry independently.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, info, warn};
use trippy_core::{ApiError, HttpRequest, HttpResponse, KEY_BODY_LIMIT};

use crate::config::{Config, RetryPolicy};
use crate::storage::ClientStorage;
use crate::transport::Transport;
use crate::warmup::WarmupHandler;

type RetryOutcome = Shared<BoxFuture<'static, Result<HttpResponse, ApiError>>>;

#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    transport: Arc<dyn Transport>,
    storage: ClientStorage,
    retry: RetryPolicy,
    warmup_enabled: bool,
    warmup: RwLock<Option<Arc<dyn WarmupHandler>>>,
    in_flight: Mutex<HashMap<String, RetryOutcome>>,
}

impl ApiClient {
    pub fn new(config: &Config, transport: Arc<dyn Transport>, storage: ClientStorage) -> Self {
        Self {
            inner: Arc::new(Inner {
                transport,
                storage,
                retry: config.retry,
                warmup_enabled: config.warmup_enabled(),
                warmup: RwLock::new(None),
                in_flight: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Late-bound: the UI registers its handler after the client exists.
    pub fn register_warmup_handler(&self, handler: Arc<dyn WarmupHandler>) {
        *self
            .inner
            .warmup
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(handler);
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.inner.transport)
    }

    pub fn storage(&self) -> &ClientStorage {
        &self.inner.storage
    }

    /// Number of request keys with a retry loop currently running.
    pub fn in_flight_retries(&self) -> usize {
        self.inner.in_flight().len()
    }

    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let request = self.inner.authorize(request);
        debug!(method = %request.method, url = %request.display_url(), "sending request");
        match self.inner.transport.execute(&request).await {
            Ok(response) => Ok(response),
            Err(err) if self.inner.warmup_enabled && err.is_network_class() => {
                self.retry_coalesced(request, err).await
            }
            Err(err) => Err(err),
        }
    }

    async fn retry_coalesced(
        &self,
        request: HttpRequest,
        original: ApiError,
    ) -> Result<HttpResponse, ApiError> {
        self.inner.notify(|h| h.show_warmup());
        let key = request.dedup_key(KEY_BODY_LIMIT);
        let outcome = {
            let mut in_flight = self.inner.in_flight();
            match in_flight.get(&key) {
                Some(outcome) => {
                    debug!(%key, "joining in-flight retry");
                    outcome.clone()
                }
                None => {
                    info!(%key, error = %original, "backend unreachable, retrying while it warms up");
                    let handle = tokio::spawn(retry_loop(
                        Arc::clone(&self.inner),
                        key.clone(),
                        request,
                        original.clone(),
                    ));
                    let inner = Arc::downgrade(&self.inner);
                    let task_key = key.clone();
                    let outcome = handle
                        .map(move |joined| {
                            joined.unwrap_or_else(|err| {
                                warn!(key = %task_key, error = %err, "retry task aborted");
                                if let Some(inner) = inner.upgrade() {
                                    inner.finish(&task_key);
                                }
                                Err(original)
                            })
                        })
                        .boxed()
                        .shared();
                    in_flight.insert(key, outcome.clone());
                    outcome
                }
            }
        };
        outcome.await
    }
}

impl Inner {
    fn in_flight(&self) -> std::sync::MutexGuard<'_, HashMap<String, RetryOutcome>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, f: impl FnOnce(&dyn WarmupHandler)) {
        let handler = self
            .warmup
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(handler) = handler {
            f(handler.as_ref());
        }
    }

    /// Request interceptor: attach the stored bearer token, if any.
    fn authorize(&self, mut request: HttpRequest) -> HttpRequest {
        if let Some(token) = self.storage.request_token() {
            request.set_header("authorization", format!("Bearer {token}"));
        }
        request
    }

    /// The overlay stays up while any other key is still retrying.
    fn finish(&self, key: &str) {
        let idle = {
            let mut in_flight = self.in_flight();
            in_flight.remove(key);
            in_flight.is_empty()
        };
        if idle {
            self.notify(|h| h.hide_warmup());
        }
    }
}

async fn retry_loop(
    inner: Arc<Inner>,
    key: String,
    request: HttpRequest,
    original: ApiError,
) -> Result<HttpResponse, ApiError> {
    let RetryPolicy {
        delay,
        max_attempts,
    } = inner.retry;
    for attempt in 1..=max_attempts {
        tokio::time::sleep(delay).await;
        inner.notify(|h| h.increment_check_count());
        debug!(%key, attempt, max_attempts, "retry attempt");
        match inner.transport.execute(&request).await {
            Ok(response) => {
                info!(%key, attempt, status = response.status, "backend answered");
                inner.finish(&key);
                return Ok(response);
            }
            Err(err) if err.is_network_class() => continue,
            Err(err) => {
                inner.finish(&key);
                return Err(err);
            }
        }
    }
    warn!(%key, max_attempts, "backend still unreachable, giving up");
    inner.finish(&key);
    Err(original)
}

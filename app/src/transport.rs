//! Executes core `HttpRequest`s over the network.
//!
//! Transports only fail for requests that got no response: timeouts and
//! connection-level errors. Any HTTP status, including 4xx/5xx, comes back as
//! an `HttpResponse` for the core client to interpret.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;
use trippy_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};

use crate::config::ConfigError;

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `reqwest`-backed transport with a default per-request timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, timeout })
    }
}

fn method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let timeout = request.timeout.unwrap_or(self.timeout);
        let mut builder = self
            .client
            .request(method(request.method), &request.url)
            .query(&request.query)
            .timeout(timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let classify = |e: reqwest::Error| {
            debug!(error = %e, url = %request.url, "transport failure");
            if e.is_timeout() {
                ApiError::timeout(timeout.as_millis())
            } else {
                ApiError::network()
            }
        };

        let response = builder.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response.text().await.map_err(classify)?;
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! A scripted transport: each request pops the next queued outcome, or
    //! falls back to a fixed default once the queue is empty.

    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;

    pub struct ScriptedTransport {
        script: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
        fallback: Result<HttpResponse, ApiError>,
        latency: Duration,
        pub requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        pub fn new(fallback: Result<HttpResponse, ApiError>) -> Self {
            Self {
                script: Mutex::new(VecDeque::new()),
                fallback,
                latency: Duration::ZERO,
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Every request fails with a network error.
        pub fn offline() -> Self {
            Self::new(Err(ApiError::network()))
        }

        pub fn with_latency(mut self, latency: Duration) -> Self {
            self.latency = latency;
            self
        }

        pub fn then(self, outcome: Result<HttpResponse, ApiError>) -> Self {
            self.script.lock().unwrap().push_back(outcome);
            self
        }

        pub fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        pub fn last_request(&self) -> Option<HttpRequest> {
            self.requests.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.lock().unwrap().push(request.clone());
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            let next = self.script.lock().unwrap().pop_front();
            next.unwrap_or_else(|| self.fallback.clone())
        }
    }
}

//! Stateless HTTP request builder and response parser for the trippy API.
//!
//! # Design
//! `TrippyClient` holds only a `base_url` and carries no mutable state between
//! calls. Each endpoint has a `build_*` method producing an `HttpRequest`;
//! responses are consumed by the generic `parse_*` methods, since every read
//! shares the `ApiResponse<T>` envelope. The host executes the round-trip,
//! adds auth headers, and decides about retries.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    ApiResponse, CreateDestinationRequest, CreateTripRequest, LoginRequest, LoginResponse,
    UpdateDestinationRequest, UpdateTripRequest,
};

/// Synchronous, stateless client for the trippy API.
#[derive(Debug, Clone)]
pub struct TrippyClient {
    base_url: String,
}

impl TrippyClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn get(&self, path: &str) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.url(path))
    }

    fn with_body<B: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest::new(method, self.url(path)).json(body))
    }

    // --- destinations ---

    pub fn build_list_destinations(&self) -> HttpRequest {
        self.get("/destinations")
    }

    pub fn build_get_destination(&self, id: &str) -> HttpRequest {
        self.get(&format!("/destinations/{id}"))
    }

    pub fn build_create_destination(
        &self,
        input: &CreateDestinationRequest,
    ) -> Result<HttpRequest, ApiError> {
        self.with_body(HttpMethod::Post, "/destinations", input)
    }

    pub fn build_update_destination(
        &self,
        id: &str,
        input: &UpdateDestinationRequest,
    ) -> Result<HttpRequest, ApiError> {
        self.with_body(HttpMethod::Put, &format!("/destinations/{id}"), input)
    }

    pub fn build_delete_destination(&self, id: &str) -> HttpRequest {
        HttpRequest::new(HttpMethod::Delete, self.url(&format!("/destinations/{id}")))
    }

    pub fn build_search_destinations(&self, query: &str) -> HttpRequest {
        self.get("/destinations/search").query("q", query)
    }

    pub fn build_popular_destinations(&self, limit: usize) -> HttpRequest {
        self.get("/destinations/popular").query("limit", limit)
    }

    pub fn build_toggle_favorite(&self, id: &str) -> HttpRequest {
        HttpRequest::new(
            HttpMethod::Post,
            self.url(&format!("/destinations/{id}/favorite")),
        )
    }

    // --- trips ---

    pub fn build_list_trips(&self) -> HttpRequest {
        self.get("/trips")
    }

    pub fn build_get_trip(&self, id: &str) -> HttpRequest {
        self.get(&format!("/trips/{id}"))
    }

    pub fn build_create_trip(&self, input: &CreateTripRequest) -> Result<HttpRequest, ApiError> {
        self.with_body(HttpMethod::Post, "/trips", input)
    }

    pub fn build_update_trip(
        &self,
        id: &str,
        input: &UpdateTripRequest,
    ) -> Result<HttpRequest, ApiError> {
        self.with_body(HttpMethod::Put, &format!("/trips/{id}"), input)
    }

    pub fn build_delete_trip(&self, id: &str) -> HttpRequest {
        HttpRequest::new(HttpMethod::Delete, self.url(&format!("/trips/{id}")))
    }

    pub fn build_public_trips(&self, page: u32, limit: u32) -> HttpRequest {
        self.get("/trips/public")
            .query("page", page)
            .query("limit", limit)
    }

    pub fn build_clone_trip(&self, id: &str) -> HttpRequest {
        HttpRequest::new(HttpMethod::Post, self.url(&format!("/trips/{id}/clone")))
    }

    // --- auth & health ---

    pub fn build_login(&self, input: &LoginRequest) -> Result<HttpRequest, ApiError> {
        self.with_body(HttpMethod::Post, "/auth/login", input)
    }

    /// The backend root answers health checks; it sits above the `/api` prefix.
    pub fn health_url(&self) -> String {
        self.base_url
            .strip_suffix("/api")
            .unwrap_or(&self.base_url)
            .to_string()
    }

    pub fn build_health_check(&self) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.health_url())
    }

    // --- parsing ---

    /// Parse an `ApiResponse<T>` envelope from any 2xx response.
    pub fn parse_envelope<T: DeserializeOwned>(
        &self,
        response: HttpResponse,
    ) -> Result<ApiResponse<T>, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Parse the envelope and keep only its payload, as mutations do.
    pub fn parse_payload<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        self.parse_envelope(response).map(|envelope| envelope.data)
    }

    pub fn parse_empty(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    /// The login endpoint answers with a bare `{token}` object.
    pub fn parse_login(&self, response: HttpResponse) -> Result<LoginResponse, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_health(&self, response: &HttpResponse) -> bool {
        response.status == 200
    }
}

/// Normalize a non-2xx response into `ApiError::Status`.
///
/// The message comes from the body's `message` field when the body is JSON
/// and carries one; the parsed body is kept as `details`.
pub fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let details: Option<Value> = serde_json::from_str(&response.body).ok();
    let message = details
        .as_ref()
        .and_then(|d| d.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status code {}", response.status));
    Err(ApiError::Status {
        status: response.status,
        message,
        details,
    })
}

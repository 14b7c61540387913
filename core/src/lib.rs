//! API client core for the trippy travel planner.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The host executes the HTTP
//! round-trip, adds credentials, and owns retry policy, which keeps this
//! crate deterministic and testable.
//!
//! # Design
//! - `TrippyClient` is stateless; it holds only `base_url`.
//! - Each endpoint has a `build_*` method; responses share one envelope and
//!   are parsed by the generic `parse_*` methods.
//! - `MockStore` holds the fallback catalogue used when the API fails.
//! - `forms` and `view` hold the UI logic that needs no I/O: validation,
//!   pagination, the map panel, and warmup overlay state.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod forms;
pub mod http;
pub mod mock;
pub mod types;
pub mod view;

pub use client::TrippyClient;
pub use error::{ApiError, ErrorPayload};
pub use forms::{ActivityDraft, FormError, LoginForm, TripForm};
pub use http::{HttpMethod, HttpRequest, HttpResponse, KEY_BODY_LIMIT};
pub use mock::MockStore;
pub use types::{
    Activity, ActivityKind, ApiResponse, CreateDestinationRequest, CreateTripRequest, Destination,
    LoginRequest, LoginResponse, NewActivity, Trip, UpdateDestinationRequest, UpdateTripRequest,
};
pub use view::{MapRender, TripMap, WarmupState};

//! Client runtime for the trippy travel planner.
//!
//! # Overview
//! `trippy-core` builds requests and parses responses; this crate performs
//! the I/O and holds the UI state around it.
//!
//! # Design
//! - `api::ApiClient` executes requests through a `transport::Transport`,
//!   adds the bearer token, and retries network failures against a remote
//!   backend while the `warmup` overlay is shown. Identical requests share
//!   one retry loop.
//! - `services` try the API first and fall back to the in-memory mock
//!   catalogue on any failure.
//! - `hooks` publish `{data, loading, error}` state through `watch` channels.
//! - `pages` are view-models built on hooks; `app::App` wires everything and
//!   routes paths to pages.
//! - `health` polls the backend root until it is awake.

pub mod api;
pub mod app;
pub mod config;
pub mod health;
pub mod hooks;
pub mod pages;
pub mod services;
pub mod storage;
pub mod transport;
pub mod warmup;

pub use api::ApiClient;
pub use app::{App, Route};
pub use config::{Config, ConfigError, RetryPolicy};
pub use health::{BackendStatus, HealthMonitor};
pub use hooks::{FetchState, Mutation, Query};
pub use storage::ClientStorage;
pub use transport::{ReqwestTransport, Transport};
pub use warmup::{WarmupContext, WarmupHandler};

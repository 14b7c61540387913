//! Page view-models. Each page owns its hooks and UI state and renders a
//! plain view struct; nothing here draws anything.

pub mod auth;
pub mod home;
pub mod plan;

use thiserror::Error;
use trippy_core::{ApiError, FormError};

/// Why a form submission did not go through.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubmitError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub use auth::AuthModal;
pub use home::{HomePage, HomeView};
pub use plan::{PlanPage, PlanView, TripListView};

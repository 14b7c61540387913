//! The home page: popular destinations with a favorite toggle.

use tracing::error;
use trippy_core::view::DestinationCard;
use trippy_core::{ApiError, Destination};

use crate::hooks::{destinations, Mutation, Query};
use crate::services::DestinationService;

pub const POPULAR_LIMIT: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub enum HomeView {
    Loading,
    Error { message: String },
    Destinations(Vec<DestinationCard>),
}

#[derive(Clone)]
pub struct HomePage {
    popular: Query<Vec<Destination>, usize>,
    toggle: Mutation<Destination, String>,
}

impl HomePage {
    pub fn new(service: &DestinationService) -> Self {
        Self {
            popular: destinations::popular_destinations(service, POPULAR_LIMIT),
            toggle: destinations::toggle_favorite(service),
        }
    }

    pub fn popular(&self) -> &Query<Vec<Destination>, usize> {
        &self.popular
    }

    pub fn view(&self) -> HomeView {
        let state = self.popular.snapshot();
        if state.loading {
            return HomeView::Loading;
        }
        if let Some(err) = state.error {
            return HomeView::Error {
                message: err.message(),
            };
        }
        let cards = state
            .data
            .unwrap_or_default()
            .iter()
            .map(DestinationCard::from)
            .collect();
        HomeView::Destinations(cards)
    }

    /// Flip the favorite flag and swap the returned destination into the
    /// loaded list.
    pub async fn toggle_favorite(&self, id: &str) -> Result<Destination, ApiError> {
        let updated = match self.toggle.mutate(id.to_string()).await {
            Ok(updated) => updated,
            Err(err) => {
                error!(%id, error = %err, "failed to toggle favorite");
                return Err(err);
            }
        };
        self.popular.update(|data| {
            if let Some(slot) = data
                .as_mut()
                .and_then(|all| all.iter_mut().find(|d| d.id == updated.id))
            {
                *slot = updated.clone();
            }
        });
        Ok(updated)
    }
}

//! The plan page: the user's trips, a map overview, and the create-trip
//! form.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{error, info};
use trippy_core::view::{paginate, TripCard, TRIPS_PER_PAGE};
use trippy_core::{
    ApiError, CreateTripRequest, Destination, FormError, MapRender, Trip, TripForm, TripMap,
};

use super::SubmitError;
use crate::hooks::{destinations, trips, Mutation, Query};
use crate::services::{DestinationService, TripService};

/// How long a submission runs before the warming-up hint appears.
pub const SLOW_SUBMIT_AFTER: Duration = Duration::from_millis(1200);
pub const SLOW_SUBMIT_MESSAGE: &str = "Warming up the server... This may take a moment.";

#[derive(Debug, Clone, PartialEq)]
pub enum TripListView {
    Loading,
    /// Shown with a retry action that calls `PlanPage::refresh`.
    Error { message: String },
    /// Shown with a "Create Your First Trip" action.
    Empty,
    Trips {
        cards: Vec<TripCard>,
        current_page: usize,
        page_numbers: Vec<usize>,
        show_controls: bool,
        has_prev: bool,
        has_next: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanView {
    pub trips: TripListView,
    pub map: MapRender,
    pub form_open: bool,
    pub submitting: bool,
    pub loading_message: Option<String>,
    /// `(id, "name, country")` pairs for the destination picker.
    pub destination_options: Vec<(String, String)>,
}

#[derive(Debug, Default)]
struct PlanUi {
    page: usize,
    form_open: bool,
    form: TripForm,
    submitting: bool,
    loading_message: Option<String>,
}

#[derive(Clone)]
pub struct PlanPage {
    trips: Query<Vec<Trip>, ()>,
    destinations: Query<Vec<Destination>, ()>,
    create: Mutation<Trip, CreateTripRequest>,
    map: TripMap,
    maps_api_key: Option<String>,
    ui: Arc<Mutex<PlanUi>>,
}

impl PlanPage {
    /// Mounts the page: the trip and destination lists start loading.
    pub fn new(
        trip_service: &TripService,
        destination_service: &DestinationService,
        maps_api_key: Option<String>,
    ) -> Self {
        Self {
            trips: trips::user_trips(trip_service),
            destinations: destinations::destinations(destination_service),
            create: trips::create_trip(trip_service),
            map: TripMap::plan_overview(),
            maps_api_key,
            ui: Arc::new(Mutex::new(PlanUi {
                page: 1,
                ..PlanUi::default()
            })),
        }
    }

    fn ui(&self) -> MutexGuard<'_, PlanUi> {
        self.ui.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn trips(&self) -> &Query<Vec<Trip>, ()> {
        &self.trips
    }

    pub fn view(&self) -> PlanView {
        let ui = self.ui();
        let state = self.trips.snapshot();
        let trips = if state.loading {
            TripListView::Loading
        } else if let Some(err) = &state.error {
            TripListView::Error {
                message: err.message(),
            }
        } else {
            match state.data.as_deref() {
                None | Some([]) => TripListView::Empty,
                Some(all) => {
                    let page = paginate(all, TRIPS_PER_PAGE, ui.page);
                    TripListView::Trips {
                        cards: page.items.iter().map(TripCard::from).collect(),
                        current_page: page.current,
                        page_numbers: page.page_numbers(),
                        show_controls: page.show_controls(),
                        has_prev: page.has_prev(),
                        has_next: page.has_next(),
                    }
                }
            }
        };
        let destination_options = self
            .destinations
            .snapshot()
            .data
            .unwrap_or_default()
            .iter()
            .map(|d| (d.id.clone(), format!("{}, {}", d.name, d.country)))
            .collect();
        PlanView {
            trips,
            map: self.map.render(self.maps_api_key.as_deref()),
            form_open: ui.form_open,
            submitting: ui.submitting,
            loading_message: ui.loading_message.clone(),
            destination_options,
        }
    }

    fn total_pages(&self) -> usize {
        let count = self.trips.snapshot().data.map_or(0, |t| t.len());
        count.div_ceil(TRIPS_PER_PAGE)
    }

    pub fn set_page(&self, page: usize) {
        self.ui().page = page.clamp(1, self.total_pages().max(1));
    }

    pub fn next_page(&self) {
        let current = self.ui().page;
        self.set_page(current + 1);
    }

    pub fn prev_page(&self) {
        let current = self.ui().page;
        self.set_page(current.saturating_sub(1));
    }

    /// Reload the trip list and return to the first page.
    pub async fn refresh(&self) {
        if let Err(err) = self.trips.fetch().await {
            error!(error = %err, "failed to load trips");
        }
        self.ui().page = 1;
    }

    pub fn open_form(&self) {
        self.ui().form_open = true;
    }

    /// Closing keeps the entered values.
    pub fn close_form(&self) {
        self.ui().form_open = false;
    }

    pub fn form(&self) -> TripForm {
        self.ui().form.clone()
    }

    pub fn edit_form(&self, f: impl FnOnce(&mut TripForm)) {
        f(&mut self.ui().form);
    }

    /// Append the activity draft if it is complete.
    pub fn add_activity(&self) -> bool {
        self.ui().form.add_activity()
    }

    pub fn remove_activity(&self, index: usize) {
        self.ui().form.remove_activity(index);
    }

    /// Validate and create the trip. While a submission runs, further
    /// submissions are rejected; after `SLOW_SUBMIT_AFTER` the view shows
    /// `SLOW_SUBMIT_MESSAGE`. Success clears and closes the form and reloads
    /// the list.
    pub async fn submit(&self) -> Result<Trip, SubmitError> {
        let request = {
            let mut ui = self.ui();
            if ui.submitting {
                return Err(FormError::SubmitInProgress.into());
            }
            let request = ui.form.validate()?;
            ui.submitting = true;
            ui.loading_message = None;
            request
        };

        let result = self.create_with_hint(request).await;
        {
            let mut ui = self.ui();
            ui.submitting = false;
            ui.loading_message = None;
            if result.is_ok() {
                ui.form.clear();
                ui.form_open = false;
            }
        }

        match result {
            Ok(trip) => {
                info!(id = %trip.id, name = %trip.name, "trip created");
                self.refresh().await;
                Ok(trip)
            }
            Err(err) => {
                error!(error = %err, "failed to create trip");
                Err(err.into())
            }
        }
    }

    async fn create_with_hint(&self, request: CreateTripRequest) -> Result<Trip, ApiError> {
        let create = self.create.mutate(request);
        tokio::pin!(create);
        tokio::select! {
            result = &mut create => result,
            () = tokio::time::sleep(SLOW_SUBMIT_AFTER) => {
                self.ui().loading_message = Some(SLOW_SUBMIT_MESSAGE.to_string());
                create.await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use trippy_core::{ActivityDraft, ActivityKind};

    use super::*;
    use crate::services::testing::{context_with, offline_context};
    use crate::transport::testing::ScriptedTransport;

    fn page() -> PlanPage {
        let (ctx, _) = offline_context();
        PlanPage::new(
            &TripService::new(ctx.clone()),
            &DestinationService::new(ctx),
            None,
        )
    }

    async fn loaded(page: &PlanPage) {
        let mut rx = page.trips().subscribe();
        while rx.borrow_and_update().data.is_none() {
            rx.changed().await.unwrap();
        }
    }

    fn fill(page: &PlanPage) {
        page.edit_form(|form| {
            form.name = "Weekend".into();
            form.description = "short break".into();
            form.start_date = "2024-07-01".into();
            form.end_date = "2024-07-03".into();
            form.destination_id = "3".into();
            form.draft = ActivityDraft {
                name: "Surf".into(),
                description: "lesson".into(),
                cost: 60.0,
                kind: ActivityKind::Other,
                ..Default::default()
            };
        });
        assert!(page.add_activity());
        page.edit_form(|form| {
            form.draft = ActivityDraft {
                name: "Temple".into(),
                description: "visit".into(),
                cost: 15.0,
                ..Default::default()
            };
        });
        assert!(page.add_activity());
    }

    #[tokio::test(start_paused = true)]
    async fn shows_loading_then_first_page() {
        let page = page();
        assert_eq!(page.view().trips, TripListView::Loading);
        loaded(&page).await;

        match page.view().trips {
            TripListView::Trips {
                cards,
                current_page,
                page_numbers,
                show_controls,
                has_prev,
                has_next,
            } => {
                assert_eq!(cards.len(), 3);
                assert_eq!(current_page, 1);
                assert_eq!(page_numbers, vec![1, 2]);
                assert!(show_controls);
                assert!(!has_prev);
                assert!(has_next);
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn paging_is_clamped() {
        let page = page();
        loaded(&page).await;
        page.next_page();
        page.next_page();
        match page.view().trips {
            TripListView::Trips { cards, current_page, has_next, .. } => {
                assert_eq!(current_page, 2);
                assert_eq!(cards.len(), 1);
                assert!(!has_next);
            }
            other => panic!("unexpected view {other:?}"),
        }
        page.prev_page();
        page.prev_page();
        assert!(matches!(
            page.view().trips,
            TripListView::Trips { current_page: 1, .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn map_without_key_is_placeholder() {
        let page = page();
        assert!(matches!(page.view().map, MapRender::Placeholder { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_form_is_rejected_without_request() {
        let page = page();
        page.open_form();
        page.edit_form(|form| form.name = "Only a name".into());
        let err = page.submit().await.unwrap_err();
        assert_eq!(err, SubmitError::Form(FormError::MissingField("destination")));
        assert!(page.view().form_open);
    }

    #[tokio::test(start_paused = true)]
    async fn incomplete_activity_draft_is_not_added() {
        let page = page();
        page.edit_form(|form| form.draft.name = "No description".into());
        assert!(!page.add_activity());
        assert!(page.form().activities.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn submit_creates_trip_and_resets_form() {
        let page = page();
        loaded(&page).await;
        page.next_page();
        page.open_form();
        fill(&page);
        page.remove_activity(5);
        assert_eq!(page.form().activity_total(), 75.0);

        let trip = page.submit().await.unwrap();
        assert_eq!(trip.total_cost, 75.0);
        assert_eq!(trip.destination.name, "Bali");

        let view = page.view();
        assert!(!view.form_open);
        assert!(!view.submitting);
        assert_eq!(page.form(), TripForm::default());
        match view.trips {
            TripListView::Trips { current_page, page_numbers, .. } => {
                assert_eq!(current_page, 1);
                // the mock store keeps the new trip
                assert_eq!(page_numbers, vec![1, 2]);
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_submission_shows_hint_and_blocks_resubmit() {
        let (ctx, _) =
            context_with(ScriptedTransport::offline().with_latency(Duration::from_secs(2)));
        let page = PlanPage::new(
            &TripService::new(ctx.clone()),
            &DestinationService::new(ctx),
            None,
        );
        fill(&page);

        let running = page.clone();
        let submission = tokio::spawn(async move { running.submit().await });
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(page.view().submitting);
        assert_eq!(page.view().loading_message, None);
        assert_eq!(
            page.submit().await.unwrap_err(),
            SubmitError::Form(FormError::SubmitInProgress)
        );

        tokio::time::sleep(Duration::from_millis(1200)).await;
        assert_eq!(
            page.view().loading_message.as_deref(),
            Some(SLOW_SUBMIT_MESSAGE)
        );

        submission.await.unwrap().unwrap();
        let view = page.view();
        assert!(!view.submitting);
        assert_eq!(view.loading_message, None);
    }
}

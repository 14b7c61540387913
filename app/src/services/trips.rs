use std::sync::Arc;

use chrono::Utc;
use trippy_core::mock::MOCK_MESSAGE;
use trippy_core::{ApiError, ApiResponse, CreateTripRequest, Trip, UpdateTripRequest};

use super::ServiceContext;

const NOT_SIGNED_IN_MESSAGE: &str = "Mock trips (user not logged in)";
const UNAVAILABLE_MESSAGE: &str = "Mock trips (API unavailable)";

#[derive(Clone)]
pub struct TripService {
    ctx: Arc<ServiceContext>,
}

impl TripService {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Trips of the signed-in user. Without a session token the API is not
    /// contacted at all.
    pub async fn get_user_trips(&self) -> Result<ApiResponse<Vec<Trip>>, ApiError> {
        if self.ctx.api.storage().session_token().is_none() {
            self.ctx.latency.wait(300).await;
            return Ok(ApiResponse::with_message(
                self.ctx.mock.trips(),
                NOT_SIGNED_IN_MESSAGE,
            ));
        }
        let request = self.ctx.client.build_list_trips();
        match self.ctx.envelope(request).await {
            Ok(response) => Ok(response),
            Err(err) => {
                self.ctx.fall_back("trips.get_user_trips", &err, 400).await;
                Ok(ApiResponse::with_message(self.ctx.mock.trips(), UNAVAILABLE_MESSAGE))
            }
        }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<ApiResponse<Trip>, ApiError> {
        let request = self.ctx.client.build_get_trip(id);
        match self.ctx.envelope(request).await {
            Ok(response) => Ok(response),
            Err(err) => {
                self.ctx.fall_back("trips.get_by_id", &err, 300).await;
                let trip = self.ctx.mock.trip(id)?;
                Ok(ApiResponse::with_message(trip, MOCK_MESSAGE))
            }
        }
    }

    pub async fn create(&self, input: CreateTripRequest) -> Result<Trip, ApiError> {
        let real = async {
            let request = self.ctx.client.build_create_trip(&input)?;
            self.ctx.payload(request).await
        }
        .await;
        match real {
            Ok(trip) => Ok(trip),
            Err(err) => {
                self.ctx.fall_back("trips.create", &err, 500).await;
                Ok(self.ctx.mock.create_trip(input, Utc::now()))
            }
        }
    }

    pub async fn update(&self, id: &str, input: UpdateTripRequest) -> Result<Trip, ApiError> {
        let real = async {
            let request = self.ctx.client.build_update_trip(id, &input)?;
            self.ctx.payload(request).await
        }
        .await;
        match real {
            Ok(trip) => Ok(trip),
            Err(err) => {
                self.ctx.fall_back("trips.update", &err, 400).await;
                self.ctx.mock.update_trip(id, input, Utc::now())
            }
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let request = self.ctx.client.build_delete_trip(id);
        if let Err(err) = self.ctx.empty(request).await {
            self.ctx.fall_back("trips.delete", &err, 300).await;
            self.ctx.mock.delete_trip(id);
        }
        Ok(())
    }

    /// `page` and `limit` go to the API; the mock path returns every public
    /// trip.
    pub async fn get_public_trips(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<ApiResponse<Vec<Trip>>, ApiError> {
        let request = self.ctx.client.build_public_trips(page, limit);
        match self.ctx.envelope(request).await {
            Ok(response) => Ok(response),
            Err(err) => {
                self.ctx.fall_back("trips.get_public_trips", &err, 400).await;
                Ok(ApiResponse::with_message(self.ctx.mock.public_trips(), MOCK_MESSAGE))
            }
        }
    }

    pub async fn clone_trip(&self, id: &str) -> Result<Trip, ApiError> {
        let request = self.ctx.client.build_clone_trip(id);
        match self.ctx.payload(request).await {
            Ok(trip) => Ok(trip),
            Err(err) => {
                self.ctx.fall_back("trips.clone_trip", &err, 400).await;
                self.ctx.mock.clone_trip(id, Utc::now())
            }
        }
    }
}

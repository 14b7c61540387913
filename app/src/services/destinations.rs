use std::sync::Arc;

use chrono::Utc;
use trippy_core::mock::MOCK_MESSAGE;
use trippy_core::{
    ApiError, ApiResponse, CreateDestinationRequest, Destination, UpdateDestinationRequest,
};

use super::ServiceContext;

#[derive(Clone)]
pub struct DestinationService {
    ctx: Arc<ServiceContext>,
}

impl DestinationService {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub async fn get_all(&self) -> Result<ApiResponse<Vec<Destination>>, ApiError> {
        let request = self.ctx.client.build_list_destinations();
        match self.ctx.envelope(request).await {
            Ok(response) => Ok(response),
            Err(err) => {
                self.ctx.fall_back("destinations.get_all", &err, 500).await;
                Ok(ApiResponse::with_message(self.ctx.mock.destinations(), MOCK_MESSAGE))
            }
        }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<ApiResponse<Destination>, ApiError> {
        let request = self.ctx.client.build_get_destination(id);
        match self.ctx.envelope(request).await {
            Ok(response) => Ok(response),
            Err(err) => {
                self.ctx.fall_back("destinations.get_by_id", &err, 300).await;
                let destination = self.ctx.mock.destination(id)?;
                Ok(ApiResponse::with_message(destination, MOCK_MESSAGE))
            }
        }
    }

    pub async fn create(&self, input: CreateDestinationRequest) -> Result<Destination, ApiError> {
        let real = async {
            let request = self.ctx.client.build_create_destination(&input)?;
            self.ctx.payload(request).await
        }
        .await;
        match real {
            Ok(destination) => Ok(destination),
            Err(err) => {
                self.ctx.fall_back("destinations.create", &err, 500).await;
                Ok(self.ctx.mock.create_destination(input, Utc::now()))
            }
        }
    }

    pub async fn update(
        &self,
        id: &str,
        input: UpdateDestinationRequest,
    ) -> Result<Destination, ApiError> {
        let real = async {
            let request = self.ctx.client.build_update_destination(id, &input)?;
            self.ctx.payload(request).await
        }
        .await;
        match real {
            Ok(destination) => Ok(destination),
            Err(err) => {
                self.ctx.fall_back("destinations.update", &err, 400).await;
                self.ctx.mock.update_destination(id, input)
            }
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let request = self.ctx.client.build_delete_destination(id);
        if let Err(err) = self.ctx.empty(request).await {
            self.ctx.fall_back("destinations.delete", &err, 300).await;
            self.ctx.mock.delete_destination(id);
        }
        Ok(())
    }

    pub async fn search(&self, query: &str) -> Result<ApiResponse<Vec<Destination>>, ApiError> {
        let request = self.ctx.client.build_search_destinations(query);
        match self.ctx.envelope(request).await {
            Ok(response) => Ok(response),
            Err(err) => {
                self.ctx.fall_back("destinations.search", &err, 400).await;
                let found = self.ctx.mock.search_destinations(query);
                Ok(ApiResponse::with_message(found, MOCK_MESSAGE))
            }
        }
    }

    pub async fn get_popular(
        &self,
        limit: usize,
    ) -> Result<ApiResponse<Vec<Destination>>, ApiError> {
        let request = self.ctx.client.build_popular_destinations(limit);
        match self.ctx.envelope(request).await {
            Ok(response) => Ok(response),
            Err(err) => {
                self.ctx.fall_back("destinations.get_popular", &err, 300).await;
                let popular = self.ctx.mock.popular_destinations(limit);
                Ok(ApiResponse::with_message(popular, MOCK_MESSAGE))
            }
        }
    }

    pub async fn toggle_favorite(&self, id: &str) -> Result<Destination, ApiError> {
        let request = self.ctx.client.build_toggle_favorite(id);
        match self.ctx.payload(request).await {
            Ok(destination) => Ok(destination),
            Err(err) => {
                self.ctx.fall_back("destinations.toggle_favorite", &err, 200).await;
                self.ctx.mock.toggle_favorite(id)
            }
        }
    }
}

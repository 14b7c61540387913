//! Domain DTOs for the trippy API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Field names follow the API's camelCase JSON; integration tests catch any
//! schema drift between the two crates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Envelope wrapping every read from the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data,
            success: true,
            message: None,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            success: true,
            message: Some(message.into()),
        }
    }
}

/// A destination listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub country: String,
    pub description: String,
    pub price: f64,
    pub rating: f64,
    pub review_count: u32,
    pub image_url: String,
    #[serde(default)]
    pub is_favorite: bool,
}

/// Request payload for creating a destination (admin only on the server).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateDestinationRequest {
    pub name: String,
    pub country: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
}

/// Partial destination update. Omitted fields remain unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDestinationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Category of a scheduled activity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    #[default]
    Attraction,
    Restaurant,
    Transport,
    Accommodation,
    Other,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 5] = [
        ActivityKind::Attraction,
        ActivityKind::Restaurant,
        ActivityKind::Transport,
        ActivityKind::Accommodation,
        ActivityKind::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ActivityKind::Attraction => "Attraction",
            ActivityKind::Restaurant => "Restaurant",
            ActivityKind::Transport => "Transport",
            ActivityKind::Accommodation => "Accommodation",
            ActivityKind::Other => "Other",
        }
    }
}

/// A single scheduled item within a trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub cost: f64,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
}

/// An activity as submitted by the client, before an id is assigned.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    pub name: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub cost: f64,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
}

impl NewActivity {
    pub fn with_id(self, id: String) -> Activity {
        Activity {
            id,
            name: self.name,
            description: self.description,
            start_time: self.start_time,
            end_time: self.end_time,
            cost: self.cost,
            location: self.location,
            kind: self.kind,
        }
    }
}

/// A trip itinerary with its embedded destination snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub destination: Destination,
    #[serde(default)]
    pub activities: Vec<Activity>,
    pub total_cost: f64,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    /// Sum of activity costs. Only the mock creation path stores this as
    /// `total_cost`; server-provided trips may disagree.
    pub fn activity_cost(&self) -> f64 {
        self.activities.iter().map(|a| a.cost).sum()
    }
}

/// Request payload for creating a trip. `location` carries the destination id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: String,
    #[serde(default)]
    pub activities: Vec<NewActivity>,
    #[serde(default)]
    pub is_public: bool,
}

/// Partial trip update. Omitted fields remain unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTripRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<NewActivity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

/// Credentials posted to the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub token: String,
}

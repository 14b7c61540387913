use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub mod error;

use error::AppError;

#[derive(Clone, Debug, Serialize, Deserialize)]
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
    pub is_favorite: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub cost: f64,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub destination: Destination,
    pub activities: Vec<Activity>,
    pub total_cost: f64,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Envelope<T> {
    pub data: T,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn ok<T>(data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        data,
        success: true,
        message: None,
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDestination {
    pub name: String,
    pub country: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDestination {
    pub name: Option<String>,
    pub country: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrip {
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTrip {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Deserialize)]
pub struct Login {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Deserialize)]
pub struct LimitParams {
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Default)]
pub struct Data {
    pub destinations: Vec<Destination>,
    pub trips: Vec<Trip>,
}

pub type Db = Arc<RwLock<Data>>;

/// Two destinations and no trips.
pub fn seed() -> Data {
    let destination = |id: &str, name: &str, country: &str, rating: f64| Destination {
        id: id.to_string(),
        name: name.to_string(),
        country: country.to_string(),
        description: format!("{name} travel guide"),
        price: 1000.0,
        rating,
        review_count: 100,
        image_url: String::new(),
        is_favorite: false,
    };
    Data {
        destinations: vec![
            destination("lisbon", "Lisbon", "Portugal", 4.6),
            destination("kyoto", "Kyoto", "Japan", 4.9),
        ],
        trips: Vec::new(),
    }
}

pub fn app() -> Router {
    app_with(seed())
}

pub fn app_with(data: Data) -> Router {
    let db: Db = Arc::new(RwLock::new(data));
    let api = Router::new()
        .route("/destinations", get(list_destinations).post(create_destination))
        .route("/destinations/search", get(search_destinations))
        .route("/destinations/popular", get(popular_destinations))
        .route(
            "/destinations/{id}",
            get(get_destination).put(update_destination).delete(delete_destination),
        )
        .route("/destinations/{id}/favorite", post(toggle_favorite))
        .route("/trips", get(list_trips).post(create_trip))
        .route("/trips/public", get(public_trips))
        .route("/trips/{id}", get(get_trip).put(update_trip).delete(delete_trip))
        .route("/trips/{id}/clone", post(clone_trip))
        .route("/auth/login", post(login));
    Router::new()
        .route("/", get(health))
        .nest("/api", api)
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!("mock api serving on http://{addr}/api");
    }
    axum::serve(listener, app()).await
}

async fn health() -> &'static str {
    "ok"
}

// --- destinations ---

async fn list_destinations(State(db): State<Db>) -> Json<Envelope<Vec<Destination>>> {
    ok(db.read().await.destinations.clone())
}

async fn search_destinations(
    State(db): State<Db>,
    Query(params): Query<SearchParams>,
) -> Json<Envelope<Vec<Destination>>> {
    let needle = params.q.to_lowercase();
    let data = db.read().await;
    ok(data
        .destinations
        .iter()
        .filter(|d| {
            d.name.to_lowercase().contains(&needle) || d.country.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect())
}

async fn popular_destinations(
    State(db): State<Db>,
    Query(params): Query<LimitParams>,
) -> Json<Envelope<Vec<Destination>>> {
    let mut destinations = db.read().await.destinations.clone();
    destinations.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    destinations.truncate(params.limit.unwrap_or(6));
    ok(destinations)
}

async fn create_destination(
    State(db): State<Db>,
    Json(input): Json<CreateDestination>,
) -> (StatusCode, Json<Envelope<Destination>>) {
    let destination = Destination {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        country: input.country,
        description: input.description,
        price: input.price,
        rating: 0.0,
        review_count: 0,
        image_url: input.image_url,
        is_favorite: false,
    };
    db.write().await.destinations.push(destination.clone());
    (StatusCode::CREATED, ok(destination))
}

async fn get_destination(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Destination>>, AppError> {
    let data = db.read().await;
    data.destinations
        .iter()
        .find(|d| d.id == id)
        .cloned()
        .map(ok)
        .ok_or(AppError::NotFound("Destination"))
}

async fn update_destination(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateDestination>,
) -> Result<Json<Envelope<Destination>>, AppError> {
    let mut data = db.write().await;
    let destination = data
        .destinations
        .iter_mut()
        .find(|d| d.id == id)
        .ok_or(AppError::NotFound("Destination"))?;
    if let Some(name) = input.name {
        destination.name = name;
    }
    if let Some(country) = input.country {
        destination.country = country;
    }
    if let Some(description) = input.description {
        destination.description = description;
    }
    if let Some(price) = input.price {
        destination.price = price;
    }
    if let Some(image_url) = input.image_url {
        destination.image_url = image_url;
    }
    Ok(ok(destination.clone()))
}

async fn delete_destination(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut data = db.write().await;
    let before = data.destinations.len();
    data.destinations.retain(|d| d.id != id);
    if data.destinations.len() == before {
        return Err(AppError::NotFound("Destination"));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn toggle_favorite(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Destination>>, AppError> {
    let mut data = db.write().await;
    let destination = data
        .destinations
        .iter_mut()
        .find(|d| d.id == id)
        .ok_or(AppError::NotFound("Destination"))?;
    destination.is_favorite = !destination.is_favorite;
    Ok(ok(destination.clone()))
}

// --- trips ---

async fn list_trips(State(db): State<Db>) -> Json<Envelope<Vec<Trip>>> {
    ok(db.read().await.trips.clone())
}

async fn public_trips(
    State(db): State<Db>,
    Query(params): Query<PageParams>,
) -> Json<Envelope<Vec<Trip>>> {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(10);
    let data = db.read().await;
    ok(data
        .trips
        .iter()
        .filter(|t| t.is_public)
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .cloned()
        .collect())
}

async fn create_trip(
    State(db): State<Db>,
    Json(input): Json<CreateTrip>,
) -> Result<(StatusCode, Json<Envelope<Trip>>), AppError> {
    let mut data = db.write().await;
    let destination = data
        .destinations
        .iter()
        .find(|d| d.id == input.location)
        .cloned()
        .ok_or_else(|| AppError::UnknownDestination(input.location.clone()))?;
    let activities: Vec<Activity> = input
        .activities
        .into_iter()
        .map(|a| Activity {
            id: Uuid::new_v4().to_string(),
            ..a
        })
        .collect();
    let now = Utc::now();
    let trip = Trip {
        id: Uuid::new_v4().to_string(),
        name: input.name,
        description: input.description,
        start_date: input.start_date,
        end_date: input.end_date,
        destination,
        total_cost: activities.iter().map(|a| a.cost).sum(),
        activities,
        is_public: input.is_public,
        created_at: now,
        updated_at: now,
    };
    data.trips.push(trip.clone());
    Ok((StatusCode::CREATED, ok(trip)))
}

async fn get_trip(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Trip>>, AppError> {
    let data = db.read().await;
    data.trips
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(ok)
        .ok_or(AppError::NotFound("Trip"))
}

async fn update_trip(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTrip>,
) -> Result<Json<Envelope<Trip>>, AppError> {
    let mut data = db.write().await;
    let trip = data
        .trips
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or(AppError::NotFound("Trip"))?;
    if let Some(name) = input.name {
        trip.name = name;
    }
    if let Some(description) = input.description {
        trip.description = description;
    }
    if let Some(start_date) = input.start_date {
        trip.start_date = start_date;
    }
    if let Some(end_date) = input.end_date {
        trip.end_date = end_date;
    }
    if let Some(is_public) = input.is_public {
        trip.is_public = is_public;
    }
    trip.updated_at = Utc::now();
    Ok(ok(trip.clone()))
}

async fn delete_trip(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut data = db.write().await;
    let before = data.trips.len();
    data.trips.retain(|t| t.id != id);
    if data.trips.len() == before {
        return Err(AppError::NotFound("Trip"));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn clone_trip(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<Envelope<Trip>>), AppError> {
    let mut data = db.write().await;
    let original = data
        .trips
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .ok_or(AppError::NotFound("Trip"))?;
    let now = Utc::now();
    let cloned = Trip {
        id: Uuid::new_v4().to_string(),
        name: format!("{} (Copy)", original.name),
        is_public: false,
        created_at: now,
        updated_at: now,
        ..original
    };
    data.trips.push(cloned.clone());
    Ok((StatusCode::CREATED, ok(cloned)))
}

// --- auth ---

async fn login(Json(input): Json<Login>) -> Result<Json<serde_json::Value>, AppError> {
    if input.username.trim().is_empty() || input.password.is_empty() {
        return Err(AppError::InvalidCredentials);
    }
    Ok(Json(serde_json::json!({ "token": Uuid::new_v4().to_string() })))
}

//! In-memory fallback data served when the API cannot be used.
//!
//! `MockStore` is seeded with a fixed catalogue of destinations and sample
//! trips. Mutating operations (favorite toggles, creation, updates, deletes)
//! apply to the store so consecutive calls observe each other. Identifiers of
//! created entities derive from the caller-supplied clock in milliseconds, so
//! two creations within the same millisecond produce the same id.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::ApiError;
use crate::types::{
    Activity, ActivityKind, CreateDestinationRequest, CreateTripRequest, Destination, Trip,
    UpdateDestinationRequest, UpdateTripRequest,
};

pub const MOCK_MESSAGE: &str = "Using mock data - API not available";

#[derive(Debug)]
pub struct MockStore {
    destinations: RwLock<Vec<Destination>>,
    trips: RwLock<Vec<Trip>>,
}

impl Default for MockStore {
    fn default() -> Self {
        Self::seeded()
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl MockStore {
    pub fn new(destinations: Vec<Destination>, trips: Vec<Trip>) -> Self {
        Self {
            destinations: RwLock::new(destinations),
            trips: RwLock::new(trips),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_destinations(), seed_trips())
    }

    // --- destinations ---

    pub fn destinations(&self) -> Vec<Destination> {
        read(&self.destinations).clone()
    }

    pub fn destination(&self, id: &str) -> Result<Destination, ApiError> {
        read(&self.destinations)
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Destination", id))
    }

    pub fn create_destination(
        &self,
        input: CreateDestinationRequest,
        now: DateTime<Utc>,
    ) -> Destination {
        let destination = Destination {
            id: now.timestamp_millis().to_string(),
            name: input.name,
            country: input.country,
            description: input.description,
            price: input.price,
            rating: 4.5,
            review_count: 0,
            image_url: input.image_url,
            is_favorite: false,
        };
        write(&self.destinations).push(destination.clone());
        destination
    }

    pub fn update_destination(
        &self,
        id: &str,
        input: UpdateDestinationRequest,
    ) -> Result<Destination, ApiError> {
        let mut destinations = write(&self.destinations);
        let destination = destinations
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| ApiError::not_found("Destination", id))?;
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
        Ok(destination.clone())
    }

    /// Returns whether an entry was removed.
    pub fn delete_destination(&self, id: &str) -> bool {
        let mut destinations = write(&self.destinations);
        let before = destinations.len();
        destinations.retain(|d| d.id != id);
        destinations.len() != before
    }

    /// Case-insensitive substring match on name, country, or description.
    pub fn search_destinations(&self, query: &str) -> Vec<Destination> {
        let needle = query.to_lowercase();
        read(&self.destinations)
            .iter()
            .filter(|d| {
                d.name.to_lowercase().contains(&needle)
                    || d.country.to_lowercase().contains(&needle)
                    || d.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Highest rated first, at most `limit` entries.
    pub fn popular_destinations(&self, limit: usize) -> Vec<Destination> {
        let mut popular = self.destinations();
        popular.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        popular.truncate(limit);
        popular
    }

    pub fn toggle_favorite(&self, id: &str) -> Result<Destination, ApiError> {
        let mut destinations = write(&self.destinations);
        let destination = destinations
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| ApiError::not_found("Destination", id))?;
        destination.is_favorite = !destination.is_favorite;
        Ok(destination.clone())
    }

    // --- trips ---

    pub fn trips(&self) -> Vec<Trip> {
        read(&self.trips).clone()
    }

    pub fn trip(&self, id: &str) -> Result<Trip, ApiError> {
        read(&self.trips)
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Trip", id))
    }

    pub fn public_trips(&self) -> Vec<Trip> {
        read(&self.trips)
            .iter()
            .filter(|t| t.is_public)
            .cloned()
            .collect()
    }

    /// Build a trip locally: activity ids are `<millis>-<index>` and the total
    /// cost is the sum of the activity costs.
    pub fn create_trip(&self, input: CreateTripRequest, now: DateTime<Utc>) -> Trip {
        let millis = now.timestamp_millis();
        let destination = self
            .destination(&input.location)
            .unwrap_or_else(|_| unknown_destination(&input.location));
        let activities: Vec<Activity> = input
            .activities
            .into_iter()
            .enumerate()
            .map(|(index, activity)| activity.with_id(format!("{millis}-{index}")))
            .collect();
        let total_cost = activities.iter().map(|a| a.cost).sum();
        let trip = Trip {
            id: millis.to_string(),
            name: input.name,
            description: input.description,
            start_date: input.start_date,
            end_date: input.end_date,
            destination,
            activities,
            total_cost,
            is_public: input.is_public,
            created_at: now,
            updated_at: now,
        };
        write(&self.trips).push(trip.clone());
        trip
    }

    /// Applies name, description, dates, and visibility. Activities and the
    /// total cost are left as stored.
    pub fn update_trip(
        &self,
        id: &str,
        input: UpdateTripRequest,
        now: DateTime<Utc>,
    ) -> Result<Trip, ApiError> {
        let mut trips = write(&self.trips);
        let trip = trips
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ApiError::not_found("Trip", id))?;
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
        trip.updated_at = now;
        Ok(trip.clone())
    }

    pub fn delete_trip(&self, id: &str) -> bool {
        let mut trips = write(&self.trips);
        let before = trips.len();
        trips.retain(|t| t.id != id);
        trips.len() != before
    }

    pub fn clone_trip(&self, id: &str, now: DateTime<Utc>) -> Result<Trip, ApiError> {
        let original = self.trip(id)?;
        let cloned = Trip {
            id: now.timestamp_millis().to_string(),
            name: format!("{} (Copy)", original.name),
            is_public: false,
            created_at: now,
            updated_at: now,
            ..original
        };
        write(&self.trips).push(cloned.clone());
        Ok(cloned)
    }
}

fn unknown_destination(id: &str) -> Destination {
    Destination {
        id: id.to_string(),
        name: "Unknown Destination".to_string(),
        country: "Unknown".to_string(),
        description: "Destination details not available".to_string(),
        price: 0.0,
        rating: 4.0,
        review_count: 0,
        image_url: String::new(),
        is_favorite: false,
    }
}

fn destination(
    id: &str,
    name: &str,
    country: &str,
    description: &str,
    price: f64,
    rating: f64,
    review_count: u32,
    image_url: &str,
) -> Destination {
    Destination {
        id: id.to_string(),
        name: name.to_string(),
        country: country.to_string(),
        description: description.to_string(),
        price,
        rating,
        review_count,
        image_url: image_url.to_string(),
        is_favorite: false,
    }
}

pub fn seed_destinations() -> Vec<Destination> {
    vec![
        destination(
            "1",
            "Tokyo",
            "Japan",
            "Experience the perfect blend of traditional culture and modern innovation in Japan's bustling capital.",
            1200.0,
            4.8,
            2300,
            "https://images.unsplash.com/photo-1540959733332-eab4deabeeaf?w=800",
        ),
        destination(
            "2",
            "Santorini",
            "Greece",
            "Discover stunning sunsets, white-washed buildings, and crystal-clear waters in this Aegean paradise.",
            950.0,
            4.9,
            1800,
            "https://images.unsplash.com/photo-1570077188670-e3a8d69ac5ff?w=800",
        ),
        destination(
            "3",
            "Bali",
            "Indonesia",
            "Immerse yourself in tropical paradise with pristine beaches, lush jungles, and rich cultural heritage.",
            800.0,
            4.7,
            3100,
            "https://images.unsplash.com/photo-1537953773345-d172ccf13cf1?w=800",
        ),
        destination(
            "4",
            "Paris",
            "France",
            "The City of Light offers iconic landmarks, world-class cuisine, and unparalleled romance.",
            1100.0,
            4.6,
            2800,
            "https://images.unsplash.com/photo-1502602898536-47ad22581b52?w=800",
        ),
        destination(
            "5",
            "New York",
            "USA",
            "The city that never sleeps with iconic skyscrapers, Broadway shows, and endless possibilities.",
            1300.0,
            4.5,
            4200,
            "https://images.unsplash.com/photo-1496442226666-8d4d0e62e6e9?w=800",
        ),
        destination(
            "6",
            "Sydney",
            "Australia",
            "Harbor views, iconic opera house, and vibrant culture in Australia's largest city.",
            1400.0,
            4.4,
            1900,
            "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=800",
        ),
    ]
}

fn activity(
    id: &str,
    name: &str,
    description: &str,
    (start_time, end_time): (&str, &str),
    cost: f64,
    location: &str,
    kind: ActivityKind,
) -> Activity {
    Activity {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        start_time: start_time.to_string(),
        end_time: end_time.to_string(),
        cost,
        location: location.to_string(),
        kind,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn timestamp(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}

struct TripSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    dates: (NaiveDate, NaiveDate),
    destination: Destination,
    activities: Vec<Activity>,
    total_cost: f64,
    is_public: bool,
    created_at: &'static str,
}

impl From<TripSeed> for Trip {
    fn from(seed: TripSeed) -> Self {
        let created_at = timestamp(seed.created_at);
        Trip {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            start_date: seed.dates.0,
            end_date: seed.dates.1,
            destination: seed.destination,
            activities: seed.activities,
            total_cost: seed.total_cost,
            is_public: seed.is_public,
            created_at,
            updated_at: created_at,
        }
    }
}

/// Sample itineraries. Their `total_cost` includes travel and lodging, so it
/// exceeds the activity sum.
pub fn seed_trips() -> Vec<Trip> {
    let mut bali = destination(
        "3",
        "Bali",
        "Indonesia",
        "Tropical paradise known for temples and lush landscapes.",
        1000.0,
        4.9,
        3200,
        "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?w=800",
    );
    bali.is_favorite = true;

    let seeds = vec![
        TripSeed {
            id: "1",
            name: "(Sample) Tokyo Adventure",
            description: "A week-long exploration of Tokyo's best attractions, food, and culture.",
            dates: (date(2024, 6, 15), date(2024, 6, 22)),
            destination: destination(
                "1",
                "Tokyo",
                "Japan",
                "Experience the perfect blend of traditional culture and modern innovation.",
                1200.0,
                4.8,
                2300,
                "https://images.unsplash.com/photo-1540959733332-eab4deabeeaf?w=800",
            ),
            activities: vec![
                activity("1", "Visit Senso-ji Temple", "Explore Tokyo's oldest temple", ("09:00", "11:00"), 0.0, "Asakusa", ActivityKind::Attraction),
                activity("2", "Lunch at Tsukiji Market", "Fresh sushi and local delicacies", ("12:00", "14:00"), 50.0, "Tsukiji", ActivityKind::Restaurant),
            ],
            total_cost: 1800.0,
            is_public: true,
            created_at: "2024-01-15T10:00:00Z",
        },
        TripSeed {
            id: "2",
            name: "(Sample) Santorini Getaway",
            description: "Relaxing island escape with sunsets, beaches, and Greek cuisine.",
            dates: (date(2024, 8, 5), date(2024, 8, 12)),
            destination: destination(
                "2",
                "Santorini",
                "Greece",
                "Whitewashed villages, blue domes, and stunning sunsets.",
                1500.0,
                4.7,
                1800,
                "https://images.unsplash.com/photo-1505731132164-cca903c93345?w=800",
            ),
            activities: vec![
                activity("3", "Sunset in Oia", "Watch the famous Santorini sunset", ("18:30", "20:00"), 0.0, "Oia", ActivityKind::Attraction),
                activity("4", "Boat Tour", "Sail around the caldera and hot springs", ("10:00", "15:00"), 120.0, "Caldera", ActivityKind::Transport),
            ],
            total_cost: 2100.0,
            is_public: true,
            created_at: "2024-02-10T09:00:00Z",
        },
        TripSeed {
            id: "3",
            name: "(Sample) Bali Wellness Retreat",
            description: "A peaceful retreat focused on yoga, nature, and relaxation.",
            dates: (date(2024, 9, 1), date(2024, 9, 10)),
            destination: bali,
            activities: vec![
                activity("5", "Morning Yoga", "Daily guided yoga sessions", ("07:00", "08:30"), 20.0, "Ubud", ActivityKind::Other),
                activity("6", "Rice Terrace Walk", "Explore Tegallalang rice terraces", ("16:00", "18:00"), 0.0, "Tegallalang", ActivityKind::Attraction),
            ],
            total_cost: 1700.0,
            is_public: false,
            created_at: "2024-03-05T12:00:00Z",
        },
        TripSeed {
            id: "4",
            name: "(Sample) New York City Weekend",
            description: "Fast-paced city break packed with sights, shows, and food.",
            dates: (date(2024, 11, 15), date(2024, 11, 18)),
            destination: destination(
                "4",
                "New York City",
                "USA",
                "The city that never sleeps.",
                900.0,
                4.6,
                5400,
                "https://images.unsplash.com/photo-1549924231-f129b911e442?w=800",
            ),
            activities: vec![
                activity("7", "Broadway Show", "Watch a live Broadway performance", ("19:00", "22:00"), 150.0, "Manhattan", ActivityKind::Attraction),
                activity("8", "Central Park Walk", "Explore Central Park on foot", ("10:00", "12:00"), 0.0, "Central Park", ActivityKind::Attraction),
            ],
            total_cost: 1300.0,
            is_public: true,
            created_at: "2024-04-01T08:30:00Z",
        },
    ];
    seeds.into_iter().map(Trip::from).collect()
}

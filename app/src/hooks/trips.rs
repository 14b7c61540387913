use trippy_core::{CreateTripRequest, Trip, UpdateTripRequest};

use super::{Mutation, Query};
use crate::services::TripService;

pub fn user_trips(service: &TripService) -> Query<Vec<Trip>, ()> {
    let service = service.clone();
    Query::new((), move |()| {
        let service = service.clone();
        async move { service.get_user_trips().await.map(|r| r.data) }
    })
    .mount(true)
}

pub fn trip(service: &TripService, id: &str, enabled: bool) -> Query<Trip, (String, bool)> {
    let service = service.clone();
    Query::with_condition(
        (id.to_string(), enabled),
        |(id, enabled): &(String, bool)| *enabled && !id.is_empty(),
        move |(id, _)| {
            let service = service.clone();
            async move { service.get_by_id(&id).await.map(|r| r.data) }
        },
    )
    .mount(true)
}

/// Dependencies are `(page, limit)`.
pub fn public_trips(service: &TripService, page: u32, limit: u32) -> Query<Vec<Trip>, (u32, u32)> {
    let service = service.clone();
    Query::new((page, limit), move |(page, limit)| {
        let service = service.clone();
        async move { service.get_public_trips(page, limit).await.map(|r| r.data) }
    })
    .mount(true)
}

pub fn create_trip(service: &TripService) -> Mutation<Trip, CreateTripRequest> {
    let service = service.clone();
    Mutation::new(move |input| {
        let service = service.clone();
        async move { service.create(input).await }
    })
}

pub fn update_trip(service: &TripService) -> Mutation<Trip, (String, UpdateTripRequest)> {
    let service = service.clone();
    Mutation::new(move |(id, input): (String, UpdateTripRequest)| {
        let service = service.clone();
        async move { service.update(&id, input).await }
    })
}

pub fn delete_trip(service: &TripService) -> Mutation<(), String> {
    let service = service.clone();
    Mutation::new(move |id: String| {
        let service = service.clone();
        async move { service.delete(&id).await }
    })
}

pub fn clone_trip(service: &TripService) -> Mutation<Trip, String> {
    let service = service.clone();
    Mutation::new(move |id: String| {
        let service = service.clone();
        async move { service.clone_trip(&id).await }
    })
}

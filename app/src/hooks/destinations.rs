//! Destination queries and mutations. Queries are mounted and start
//! fetching immediately.

use trippy_core::{CreateDestinationRequest, Destination, UpdateDestinationRequest};

use super::{Mutation, Query};
use crate::services::DestinationService;

pub fn destinations(service: &DestinationService) -> Query<Vec<Destination>, ()> {
    let service = service.clone();
    Query::new((), move |()| {
        let service = service.clone();
        async move { service.get_all().await.map(|r| r.data) }
    })
    .mount(true)
}

pub fn popular_destinations(
    service: &DestinationService,
    limit: usize,
) -> Query<Vec<Destination>, usize> {
    let service = service.clone();
    Query::new(limit, move |limit| {
        let service = service.clone();
        async move { service.get_popular(limit).await.map(|r| r.data) }
    })
    .mount(true)
}

/// Dependencies are `(query, enabled)`; nothing is fetched for an empty
/// query.
pub fn search_destinations(
    service: &DestinationService,
    query: &str,
    enabled: bool,
) -> Query<Vec<Destination>, (String, bool)> {
    let service = service.clone();
    Query::with_condition(
        (query.to_string(), enabled),
        |(query, enabled): &(String, bool)| *enabled && !query.is_empty(),
        move |(query, _)| {
            let service = service.clone();
            async move { service.search(&query).await.map(|r| r.data) }
        },
    )
    .mount(true)
}

/// Dependencies are `(id, enabled)`; nothing is fetched for an empty id.
pub fn destination(
    service: &DestinationService,
    id: &str,
    enabled: bool,
) -> Query<Destination, (String, bool)> {
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

pub fn create_destination(
    service: &DestinationService,
) -> Mutation<Destination, CreateDestinationRequest> {
    let service = service.clone();
    Mutation::new(move |input| {
        let service = service.clone();
        async move { service.create(input).await }
    })
}

pub fn update_destination(
    service: &DestinationService,
) -> Mutation<Destination, (String, UpdateDestinationRequest)> {
    let service = service.clone();
    Mutation::new(move |(id, input): (String, UpdateDestinationRequest)| {
        let service = service.clone();
        async move { service.update(&id, input).await }
    })
}

pub fn delete_destination(service: &DestinationService) -> Mutation<(), String> {
    let service = service.clone();
    Mutation::new(move |id: String| {
        let service = service.clone();
        async move { service.delete(&id).await }
    })
}

pub fn toggle_favorite(service: &DestinationService) -> Mutation<Destination, String> {
    let service = service.clone();
    Mutation::new(move |id: String| {
        let service = service.clone();
        async move { service.toggle_favorite(&id).await }
    })
}

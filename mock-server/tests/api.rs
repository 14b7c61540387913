use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Destination, Envelope, Trip};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn empty(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

const NEW_TRIP: &str = r#"{"name":"Temple run","description":"Shrines","startDate":"2025-04-01",
    "endDate":"2025-04-05","location":"kyoto","isPublic":true,"activities":[
    {"name":"Fushimi Inari","description":"Gates","startTime":"08:00","endTime":"11:00","cost":0,"location":"Fushimi","type":"attraction"},
    {"name":"Kaiseki","description":"Dinner","startTime":"19:00","endTime":"21:00","cost":180,"location":"Gion","type":"restaurant"}]}"#;

// --- health ---

#[tokio::test]
async fn health_answers_ok() {
    let resp = app().oneshot(get("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await.as_ref(), b"ok");
}

// --- destinations ---

#[tokio::test]
async fn list_destinations_is_enveloped() {
    let resp = app().oneshot(get("/api/destinations")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: Envelope<Vec<Destination>> = body_json(resp).await;
    assert!(envelope.success);
    assert_eq!(envelope.data.len(), 2);
}

#[tokio::test]
async fn search_is_not_shadowed_by_id_route() {
    let resp = app()
        .oneshot(get("/api/destinations/search?q=japan"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: Envelope<Vec<Destination>> = body_json(resp).await;
    assert_eq!(envelope.data.len(), 1);
    assert_eq!(envelope.data[0].id, "kyoto");
}

#[tokio::test]
async fn popular_sorts_by_rating_and_limits() {
    let resp = app()
        .oneshot(get("/api/destinations/popular?limit=1"))
        .await
        .unwrap();
    let envelope: Envelope<Vec<Destination>> = body_json(resp).await;
    assert_eq!(envelope.data.len(), 1);
    assert_eq!(envelope.data[0].id, "kyoto");
}

#[tokio::test]
async fn get_destination_not_found_has_message() {
    let resp = app().oneshot(get("/api/destinations/atlantis")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "Destination not found");
}

#[tokio::test]
async fn create_destination_returns_201() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/destinations",
            r#"{"name":"Oslo","country":"Norway","description":"Fjords","price":900,"imageUrl":""}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let envelope: Envelope<Destination> = body_json(resp).await;
    assert_eq!(envelope.data.name, "Oslo");
}

#[tokio::test]
async fn create_destination_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/api/destinations", r#"{"name":1}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- trips ---

#[tokio::test]
async fn create_trip_unknown_destination_returns_422() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/trips",
            r#"{"name":"n","description":"d","startDate":"2025-01-01","endDate":"2025-01-02","location":"atlantis"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "Unknown destination: atlantis");
}

#[tokio::test]
async fn delete_trip_not_found() {
    let resp = app()
        .oneshot(empty("DELETE", "/api/trips/00000000-0000-0000-0000-000000000000"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- auth ---

#[tokio::test]
async fn login_issues_token() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            r#"{"username":"ana@example.com","password":"pw"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn login_rejects_empty_password() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            r#"{"username":"ana@example.com","password":""}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- full trip lifecycle ---

#[tokio::test]
async fn trip_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/api/trips", NEW_TRIP))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Envelope<Trip> = body_json(resp).await;
    let trip = created.data;
    assert_eq!(trip.destination.name, "Kyoto");
    assert_eq!(trip.total_cost, 180.0);
    assert!(trip.activities.iter().all(|a| !a.id.is_empty()));
    let id = trip.id.clone();

    // public listing contains it
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/trips/public?page=1&limit=10"))
        .await
        .unwrap();
    let public: Envelope<Vec<Trip>> = body_json(resp).await;
    assert_eq!(public.data.len(), 1);

    // update visibility
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/api/trips/{id}"),
            r#"{"isPublic":false}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Envelope<Trip> = body_json(resp).await;
    assert!(!updated.data.is_public);
    assert_eq!(updated.data.name, "Temple run"); // unchanged

    // clone
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty("POST", &format!("/api/trips/{id}/clone")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let cloned: Envelope<Trip> = body_json(resp).await;
    assert_eq!(cloned.data.name, "Temple run (Copy)");
    assert_ne!(cloned.data.id, id);

    // list has both
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/api/trips"))
        .await
        .unwrap();
    let trips: Envelope<Vec<Trip>> = body_json(resp).await;
    assert_eq!(trips.data.len(), 2);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty("DELETE", &format!("/api/trips/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    // get after delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/api/trips/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn favorite_toggles_back_and_forth() {
    use tower::Service;

    let mut app = app().into_service();
    for expected in [true, false] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(empty("POST", "/api/destinations/lisbon/favorite"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let envelope: Envelope<Destination> = body_json(resp).await;
        assert_eq!(envelope.data.is_favorite, expected);
    }
}

#[tokio::test]
async fn public_trips_far_past_the_end_is_empty() {
    let uri = format!("/api/trips/public?page={}&limit={}", usize::MAX, usize::MAX);
    let resp = app().oneshot(get(&uri)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let public: Envelope<Vec<Trip>> = body_json(resp).await;
    assert!(public.data.is_empty());
}

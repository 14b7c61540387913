//! End-to-end runs of the client against the mock API server.
//!
//! # Design
//! Each test binds the mock server to a random local port and points an
//! `App` with the real reqwest transport at it. Local URLs never enter the
//! warmup retry loop, so failures fall back to mock data immediately.

use std::net::SocketAddr;
use std::time::Duration;

use trippy_app::pages::{HomeView, TripListView};
use trippy_app::storage::SESSION_TOKEN_KEY;
use trippy_app::{App, Config};
use trippy_core::mock::MOCK_MESSAGE;
use trippy_core::{ActivityDraft, ActivityKind, LoginRequest};

async fn start_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    addr
}

/// An address nothing listens on.
async fn dead_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

fn app(addr: SocketAddr) -> App {
    let config = Config {
        api_base_url: format!("http://{addr}/api"),
        request_timeout: Duration::from_secs(5),
        mock_latency: false,
        ..Config::default()
    };
    App::new(config).unwrap()
}

#[tokio::test]
async fn signed_in_user_plans_a_trip() {
    let app = app(start_server().await);

    app.auth()
        .login(&LoginRequest {
            username: "ana@example.com".into(),
            password: "secret".into(),
        })
        .await
        .unwrap();
    assert!(app.auth().is_signed_in());
    assert!(app.api().storage().session.get(SESSION_TOKEN_KEY).is_some());

    let trips = app.trips().get_user_trips().await.unwrap();
    assert!(trips.data.is_empty());
    assert!(trips.message.is_none());

    let page = app.plan_page();
    page.trips().settled().await;
    assert_eq!(page.view().trips, TripListView::Empty);

    page.open_form();
    page.edit_form(|form| {
        form.name = "Kyoto in spring".into();
        form.description = "temples and blossoms".into();
        form.start_date = "2025-04-01".into();
        form.end_date = "2025-04-07".into();
        form.destination_id = "kyoto".into();
        form.draft = ActivityDraft {
            name: "Fushimi Inari".into(),
            description: "hike the gates".into(),
            cost: 0.0,
            kind: ActivityKind::Attraction,
            ..Default::default()
        };
    });
    assert!(page.add_activity());
    page.edit_form(|form| {
        form.draft = ActivityDraft {
            name: "Kaiseki dinner".into(),
            description: "multi-course".into(),
            cost: 180.0,
            kind: ActivityKind::Restaurant,
            ..Default::default()
        };
    });
    assert!(page.add_activity());

    let trip = page.submit().await.unwrap();
    assert_eq!(trip.destination.name, "Kyoto");
    assert_eq!(trip.total_cost, 180.0);
    assert_eq!(trip.total_cost, trip.activity_cost());

    let view = page.view();
    assert!(!view.form_open);
    match view.trips {
        TripListView::Trips { cards, show_controls, .. } => {
            assert_eq!(cards.len(), 1);
            assert_eq!(cards[0].destination, "Kyoto, Japan");
            assert_eq!(cards[0].activity_count, 2);
            assert_eq!(cards[0].total_cost, "$180");
            assert!(!show_controls);
        }
        other => panic!("unexpected view {other:?}"),
    }

    let copy = app.trips().clone_trip(&trip.id).await.unwrap();
    assert_eq!(copy.name, "Kyoto in spring (Copy)");
    app.trips().delete(&copy.id).await.unwrap();
}

#[tokio::test]
async fn server_rejection_is_masked_by_mock_data() {
    let app = app(start_server().await);
    let trip = app
        .trips()
        .create(trippy_core::CreateTripRequest {
            name: "Nowhere".into(),
            description: "no such place".into(),
            start_date: chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            location: "atlantis".into(),
            activities: Vec::new(),
            is_public: false,
        })
        .await
        .unwrap();
    assert_eq!(trip.destination.name, "Unknown Destination");
    assert_eq!(trip.total_cost, 0.0);
}

#[tokio::test]
async fn home_page_toggles_favorites_on_the_server() {
    let app = app(start_server().await);
    let page = app.home_page();
    page.popular().settled().await;

    let titles = |view: HomeView| match view {
        HomeView::Destinations(cards) => cards
            .into_iter()
            .map(|c| (c.title, c.is_favorite))
            .collect::<Vec<_>>(),
        other => panic!("unexpected view {other:?}"),
    };
    assert_eq!(
        titles(page.view()),
        vec![
            ("Kyoto, Japan".to_string(), false),
            ("Lisbon, Portugal".to_string(), false)
        ]
    );

    assert!(page.toggle_favorite("kyoto").await.unwrap().is_favorite);
    assert!(titles(page.view())[0].1);
    assert!(!page.toggle_favorite("kyoto").await.unwrap().is_favorite);
    assert!(!titles(page.view())[0].1);
}

#[tokio::test]
async fn health_monitor_sees_running_server() {
    let app = app(start_server().await);
    let monitor = app.health_monitor();
    assert!(monitor.check_once().await);
    assert!(monitor.status().is_ready);
}

#[tokio::test]
async fn unreachable_local_backend_falls_back_without_warmup() {
    let app = app(dead_addr().await);
    assert!(!app.config().warmup_enabled());

    let destinations = app.destinations().get_all().await.unwrap();
    assert_eq!(destinations.data.len(), 6);
    assert_eq!(destinations.message.as_deref(), Some(MOCK_MESSAGE));
    assert_eq!(app.warmup_overlay(), None);
    assert_eq!(app.api().in_flight_retries(), 0);

    assert!(!app.health_monitor().check_once().await);

    let err = app
        .auth()
        .login(&LoginRequest {
            username: "ana".into(),
            password: "pw".into(),
        })
        .await
        .unwrap_err();
    assert!(err.is_network_class());
}

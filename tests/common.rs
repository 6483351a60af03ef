use ticketing_backend::{
    api::router::create_router,
    config::Config,
    domain::ports::{BookingRepository, EventRepository},
    domain::services::{booking_service::BookingService, inventory::InventoryLedger},
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo, sqlite_event_repo::SqliteEventRepo,
    },
    state::AppState,
};

use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
        };

        let event_repo: Arc<dyn EventRepository> = Arc::new(SqliteEventRepo::new(pool.clone()));
        let booking_repo: Arc<dyn BookingRepository> =
            Arc::new(SqliteBookingRepo::new(pool.clone()));
        let inventory = Arc::new(InventoryLedger::new(event_repo.clone()));
        let booking_service = Arc::new(BookingService::new(
            event_repo.clone(),
            booking_repo.clone(),
            inventory.clone(),
        ));

        let state = Arc::new(AppState {
            config,
            event_repo,
            booking_repo,
            inventory,
            booking_service,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

/// Builds a request carrying the gateway identity headers the auth
/// collaborator would normally attach.
#[allow(dead_code)]
pub fn request(
    method: &str,
    uri: &str,
    actor: Option<(&str, &str)>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some((user_id, role)) = actor {
        builder = builder.header("X-User-Id", user_id).header("X-User-Role", role);
    }

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

#[allow(dead_code)]
pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Creates an event through the API as the given organizer and returns
/// the created event JSON.
#[allow(dead_code)]
pub async fn seed_event(
    app: &TestApp,
    organizer_id: &str,
    title: &str,
    category: &str,
    price: f64,
    capacity: i32,
) -> Value {
    let payload = serde_json::json!({
        "title": title,
        "description": format!("{} description", title),
        "date": "2030-05-01",
        "time": "19:30",
        "location": "Main Hall",
        "price": price,
        "capacity": capacity,
        "category": category,
    });

    let response = app
        .router
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/events",
            Some((organizer_id, "organizer")),
            Some(payload),
        ))
        .await
        .unwrap();

    assert!(
        response.status().is_success(),
        "seed_event failed: {}",
        response.status()
    );
    parse_body(response).await
}

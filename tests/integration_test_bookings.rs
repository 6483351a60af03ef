mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{parse_body, request, seed_event, TestApp};
use serde_json::json;
use std::sync::Arc;
use ticketing_backend::{
    domain::models::actor::{Actor, Role},
    domain::models::booking::{Booking, BookingView},
    domain::ports::BookingRepository,
    domain::services::booking_service::BookingService,
    error::AppError,
};
use tower::ServiceExt;

async fn book(
    app: &TestApp,
    user: (&str, &str),
    event_id: &str,
    seats: i32,
) -> axum::response::Response {
    app.router
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/bookings",
            Some(user),
            Some(json!({"event_id": event_id, "seats": seats})),
        ))
        .await
        .unwrap()
}

async fn available_seats(app: &TestApp, event_id: &str) -> i64 {
    let res = app
        .router
        .clone()
        .oneshot(request("GET", &format!("/api/v1/events/{}", event_id), None, None))
        .await
        .unwrap();
    parse_body(res).await["available_seats"].as_i64().unwrap()
}

#[tokio::test]
async fn test_booking_lifecycle_scenario() {
    let app = TestApp::new().await;
    let event = seed_event(&app, "o1", "Gala", "music", 20.0, 10).await;
    let event_id = event["id"].as_str().unwrap().to_string();

    // U1 books 3 of 10 seats at 20 each
    let res = book(&app, ("u1", "user"), &event_id, 3).await;
    assert_eq!(res.status(), StatusCode::OK);
    let booking = parse_body(res).await;
    assert_eq!(booking["status"], "confirmed");
    assert_eq!(booking["seats"], 3);
    assert_eq!(booking["total_amount"], 60.0);
    assert_eq!(available_seats(&app, &event_id).await, 7);

    // U2 asks for 8 with only 7 left
    let res = book(&app, ("u2", "user"), &event_id, 8).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(available_seats(&app, &event_id).await, 7);

    // U1 cancels and the seats come back
    let booking_id = booking["id"].as_str().unwrap();
    let res = app
        .router
        .clone()
        .oneshot(request(
            "PUT",
            &format!("/api/v1/bookings/{}/cancel", booking_id),
            Some(("u1", "user")),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let cancelled = parse_body(res).await;
    assert_eq!(cancelled["status"], "cancelled");
    assert_eq!(cancelled["seats"], 3);
    assert_eq!(available_seats(&app, &event_id).await, 10);
}

#[tokio::test]
async fn test_booking_missing_event() {
    let app = TestApp::new().await;
    let res = book(&app, ("u1", "user"), "no-such-event", 1).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_booking_rejects_non_positive_seat_count() {
    let app = TestApp::new().await;
    let event = seed_event(&app, "o1", "Matinee", "art", 8.0, 5).await;
    let event_id = event["id"].as_str().unwrap();

    let res = book(&app, ("u1", "user"), event_id, 0).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = book(&app, ("u1", "user"), event_id, -2).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    assert_eq!(available_seats(&app, event_id).await, 5);
}

/// Booking store that goes down on every insert, as a pool outage would.
struct UnavailableBookingRepo;

#[async_trait]
impl BookingRepository for UnavailableBookingRepo {
    async fn create(&self, _booking: &Booking) -> Result<Booking, AppError> {
        Err(AppError::Database(sqlx::Error::PoolClosed))
    }
    async fn find_by_id(&self, _id: &str) -> Result<Option<Booking>, AppError> {
        unreachable!()
    }
    async fn find_view_by_id(&self, _id: &str) -> Result<Option<BookingView>, AppError> {
        unreachable!()
    }
    async fn list_by_user(&self, _user_id: &str) -> Result<Vec<BookingView>, AppError> {
        unreachable!()
    }
    async fn list_by_event(&self, _event_id: &str) -> Result<Vec<Booking>, AppError> {
        unreachable!()
    }
    async fn cancel(&self, _id: &str) -> Result<Booking, AppError> {
        unreachable!()
    }
}

#[tokio::test]
async fn test_failed_booking_insert_releases_reserved_seats() {
    let app = TestApp::new().await;
    let event = seed_event(&app, "o1", "Night Market", "food", 12.0, 10).await;
    let event_id = event["id"].as_str().unwrap().to_string();

    let service = BookingService::new(
        app.state.event_repo.clone(),
        Arc::new(UnavailableBookingRepo),
        app.state.inventory.clone(),
    );
    let actor = Actor {
        id: "u1".to_string(),
        role: Role::User,
    };

    let result = service.create_booking(&actor, &event_id, 4).await;
    assert!(matches!(result, Err(AppError::Database(_))));

    // The reservation made before the failed insert must be handed back
    let fresh = app
        .state
        .event_repo
        .find_by_id(&event_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fresh.available_seats, 10);
}

#[tokio::test]
async fn test_cancel_is_terminal() {
    let app = TestApp::new().await;
    let event = seed_event(&app, "o1", "Derby", "sports", 30.0, 6).await;
    let event_id = event["id"].as_str().unwrap().to_string();

    let res = book(&app, ("u1", "user"), &event_id, 2).await;
    let booking = parse_body(res).await;
    let booking_id = booking["id"].as_str().unwrap().to_string();

    let cancel_uri = format!("/api/v1/bookings/{}/cancel", booking_id);

    let res = app
        .router
        .clone()
        .oneshot(request("PUT", &cancel_uri, Some(("u1", "user")), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(available_seats(&app, &event_id).await, 6);

    // Second cancel is a conflict and must not double-credit seats
    let res = app
        .router
        .clone()
        .oneshot(request("PUT", &cancel_uri, Some(("u1", "user")), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(available_seats(&app, &event_id).await, 6);
}

#[tokio::test]
async fn test_booking_authorization_matrix() {
    let app = TestApp::new().await;
    let event = seed_event(&app, "o1", "Recital", "music", 10.0, 8).await;
    let event_id = event["id"].as_str().unwrap().to_string();

    let res = book(&app, ("u1", "user"), &event_id, 1).await;
    let booking = parse_body(res).await;
    let booking_id = booking["id"].as_str().unwrap().to_string();
    let get_uri = format!("/api/v1/bookings/{}", booking_id);
    let cancel_uri = format!("/api/v1/bookings/{}/cancel", booking_id);

    // A stranger can neither view nor cancel
    let res = app
        .router
        .clone()
        .oneshot(request("GET", &get_uri, Some(("u2", "user")), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app
        .router
        .clone()
        .oneshot(request("PUT", &cancel_uri, Some(("u2", "user")), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The owner can view; the view carries the event snapshot
    let res = app
        .router
        .clone()
        .oneshot(request("GET", &get_uri, Some(("u1", "user")), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let view = parse_body(res).await;
    assert_eq!(view["event_title"], "Recital");
    assert_eq!(view["event_location"], "Main Hall");
    assert_eq!(view["event_time"], "19:30");

    // Admin passes regardless of ownership
    let res = app
        .router
        .clone()
        .oneshot(request("GET", &get_uri, Some(("root", "admin")), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .router
        .clone()
        .oneshot(request("PUT", &cancel_uri, Some(("root", "admin")), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_my_bookings_newest_first() {
    let app = TestApp::new().await;
    let first = seed_event(&app, "o1", "First Show", "music", 5.0, 10).await;
    let second = seed_event(&app, "o1", "Second Show", "music", 5.0, 10).await;

    book(&app, ("u1", "user"), first["id"].as_str().unwrap(), 1).await;
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    book(&app, ("u1", "user"), second["id"].as_str().unwrap(), 2).await;
    // Another user's booking must not leak into the list
    book(&app, ("u2", "user"), first["id"].as_str().unwrap(), 1).await;

    let res = app
        .router
        .clone()
        .oneshot(request("GET", "/api/v1/bookings/my", Some(("u1", "user")), None))
        .await
        .unwrap();
    let body = parse_body(res).await;
    let bookings = body.as_array().unwrap();
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0]["event_title"], "Second Show");
    assert_eq!(bookings[1]["event_title"], "First Show");
}

#[tokio::test]
async fn test_event_bookings_restricted_to_organizer() {
    let app = TestApp::new().await;
    let event = seed_event(&app, "o1", "Workshop", "business", 25.0, 12).await;
    let event_id = event["id"].as_str().unwrap().to_string();
    let uri = format!("/api/v1/events/{}/bookings", event_id);

    book(&app, ("u1", "user"), &event_id, 2).await;

    // Attendee and foreign organizer are both rejected
    let res = app
        .router
        .clone()
        .oneshot(request("GET", &uri, Some(("u1", "user")), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app
        .router
        .clone()
        .oneshot(request("GET", &uri, Some(("o2", "organizer")), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Owning organizer and admin both see the booking
    for viewer in [("o1", "organizer"), ("root", "admin")] {
        let res = app
            .router
            .clone()
            .oneshot(request("GET", &uri, Some(viewer), None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = parse_body(res).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }
}

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::NaiveTime;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateEventRequest, UpdateEventRequest};
use crate::api::extractors::actor::AuthActor;
use crate::domain::models::event::{Event, EventFilter, NewEventParams, CATEGORIES};
use crate::domain::services::access;
use crate::error::AppError;
use crate::state::AppState;

fn validate_category(category: &str) -> Result<(), AppError> {
    if CATEGORIES.contains(&category) {
        Ok(())
    } else {
        Err(AppError::Validation(format!("Unknown category: {}", category)))
    }
}

fn validate_time(time: &str) -> Result<(), AppError> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map(|_| ())
        .map_err(|_| AppError::Validation("Invalid time format (HH:MM)".into()))
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !access::can_create_events(&actor) {
        return Err(AppError::Forbidden("Not authorized to create events".into()));
    }

    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("Title must not be empty".into()));
    }
    if payload.price < 0.0 {
        return Err(AppError::Validation("Price must not be negative".into()));
    }
    if payload.capacity < 1 {
        return Err(AppError::Validation("Capacity must be at least 1".into()));
    }
    validate_category(&payload.category)?;
    validate_time(&payload.time)?;

    let event = Event::new(NewEventParams {
        title: payload.title,
        description: payload.description,
        image_url: payload.image_url,
        date: payload.date,
        time: payload.time,
        location: payload.location,
        organizer_id: actor.id.clone(),
        ticket_price: payload.price,
        capacity: payload.capacity,
        category: payload.category,
    });

    let created = state.event_repo.create(&event).await?;
    info!(event_id = %created.id, organizer_id = %actor.id, "event created");
    Ok(Json(created))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<EventFilter>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list(&filter).await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state
        .event_repo
        .find_by_id(&event_id)
        .await?
        .ok_or(AppError::NotFound("Event not found".into()))?;
    Ok(Json(event))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state
        .event_repo
        .find_by_id(&event_id)
        .await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if !access::can_manage_event(&actor, &event.organizer_id) {
        return Err(AppError::Forbidden(
            "Not authorized to update this event".into(),
        ));
    }

    // Capacity edits go through a dedicated guarded statement: folding
    // them into the generic update would write seat counts back from the
    // read above and erase any reservation that landed in between.
    if let Some(capacity) = payload.capacity {
        if capacity < 1 {
            return Err(AppError::Validation("Capacity must be at least 1".into()));
        }
        event = state.event_repo.resize_capacity(&event_id, capacity).await?;
    }

    // Explicit allow-list; organizer and id fields are not editable, and
    // seat availability never moves through this path.
    if let Some(title) = payload.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation("Title must not be empty".into()));
        }
        event.title = title;
    }
    if let Some(description) = payload.description {
        event.description = description;
    }
    if let Some(image_url) = payload.image_url {
        event.image_url = Some(image_url);
    }
    if let Some(date) = payload.date {
        event.date = date;
    }
    if let Some(time) = payload.time {
        validate_time(&time)?;
        event.time = time;
    }
    if let Some(location) = payload.location {
        event.location = location;
    }
    if let Some(price) = payload.price {
        if price < 0.0 {
            return Err(AppError::Validation("Price must not be negative".into()));
        }
        event.ticket_price = price;
    }
    if let Some(category) = payload.category {
        validate_category(&category)?;
        event.category = category;
    }

    let updated = state.event_repo.update(&event).await?;
    info!(event_id = %updated.id, "event updated");
    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state
        .event_repo
        .find_by_id(&event_id)
        .await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if !access::can_manage_event(&actor, &event.organizer_id) {
        return Err(AppError::Forbidden(
            "Not authorized to delete this event".into(),
        ));
    }

    state.event_repo.delete(&event_id).await?;
    info!(event_id = %event_id, "event deleted");
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::dtos::requests::CreateBookingRequest;
use crate::api::extractors::actor::AuthActor;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state
        .booking_service
        .create_booking(&actor, &payload.event_id, payload.seats)
        .await?;
    Ok(Json(booking))
}

pub async fn my_bookings(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_service.list_for_user(&actor).await?;
    Ok(Json(bookings))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let view = state.booking_service.get_booking(&actor, &booking_id).await?;
    Ok(Json(view))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let cancelled = state
        .booking_service
        .cancel_booking(&actor, &booking_id)
        .await?;
    Ok(Json(cancelled))
}

pub async fn list_event_bookings(
    State(state): State<Arc<AppState>>,
    AuthActor(actor): AuthActor,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state
        .booking_service
        .list_for_event(&actor, &event_id)
        .await?;
    Ok(Json(bookings))
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_CONFIRMED: &str = "confirmed";
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_CANCELLED: &str = "cancelled";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    /// Number of seats reserved. Fixed for the life of the booking;
    /// cancellation flips the status and releases this count back to the
    /// event, it never rewrites the count itself.
    pub seats: i32,
    /// Price x seats, computed once at creation. Later price edits on the
    /// event do not reprice existing bookings.
    pub total_amount: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(user_id: String, event_id: String, seats: i32, total_amount: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            event_id,
            seats,
            total_amount,
            // Payment is settled upstream before this service is called.
            status: STATUS_CONFIRMED.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == STATUS_CANCELLED
    }
}

/// Booking joined with the event snapshot fields the UI displays.
/// Denormalized at read time, never stored.
#[derive(Debug, Serialize, FromRow, Clone)]
pub struct BookingView {
    pub id: String,
    pub user_id: String,
    pub event_id: String,
    pub seats: i32,
    pub total_amount: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub event_title: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub event_location: String,
    pub event_image_url: Option<String>,
}

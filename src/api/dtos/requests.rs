use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub price: f64,
    pub capacity: i32,
    pub category: String,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub capacity: Option<i32>,
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub event_id: String,
    /// The UI collects individual seat selections; the core only needs
    /// how many.
    pub seats: i32,
}

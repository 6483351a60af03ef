use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const CATEGORIES: &[&str] = &[
    "music", "sports", "art", "food", "business", "technology", "other",
];

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub date: NaiveDate,
    /// Local start time as entered by the organizer, e.g. "19:30".
    pub time: String,
    pub location: String,
    pub organizer_id: String,
    pub ticket_price: f64,
    /// Capacity fixed at creation; seat mutations only ever touch
    /// `available_seats`, and `0 <= available_seats <= total_seats` holds
    /// after every write.
    pub total_seats: i32,
    pub available_seats: i32,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewEventParams {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub organizer_id: String,
    pub ticket_price: f64,
    pub capacity: i32,
    pub category: String,
}

impl Event {
    pub fn new(params: NewEventParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            description: params.description,
            image_url: params.image_url,
            date: params.date,
            time: params.time,
            location: params.location,
            organizer_id: params.organizer_id,
            ticket_price: params.ticket_price,
            total_seats: params.capacity,
            available_seats: params.capacity,
            category: params.category,
            created_at: Utc::now(),
        }
    }
}

/// Search criteria for the public event listing. Both filters combine
/// with AND when present; results are ordered by event date ascending.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct EventFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl EventFilter {
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}

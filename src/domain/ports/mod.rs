use crate::domain::models::{
    booking::{Booking, BookingView},
    event::{Event, EventFilter},
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError>;

    /// Persists the editable fields of an event. Deliberately does NOT
    /// touch `total_seats` or `available_seats`: writing them back from a
    /// previously read copy would silently undo any reservation that
    /// landed in between. Seat counts only move through `reserve_seats`,
    /// `release_seats` and `resize_capacity`.
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;

    /// Changes `total_seats` to `new_total` and recomputes
    /// `available_seats = new_total - booked` in one guarded statement,
    /// evaluated against the current row rather than a prior read. Fails
    /// with a validation error when `new_total` is below the seats
    /// already booked.
    async fn resize_capacity(&self, id: &str, new_total: i32) -> Result<Event, AppError>;

    /// Atomically decrements `available_seats` by `seats`, guarded by
    /// `available_seats >= seats` in the same statement. The guard and the
    /// decrement must never be split into a read followed by a write, or
    /// two concurrent reservations can both pass a stale check and
    /// jointly oversell the event. Returns the post-decrement count.
    async fn reserve_seats(&self, id: &str, seats: i32) -> Result<i32, AppError>;

    /// Atomically increments `available_seats` by `seats`, clamped to
    /// `total_seats`. The clamp makes a retried release safe after an
    /// ambiguous failure. Returns the post-increment count.
    async fn release_seats(&self, id: &str, seats: i32) -> Result<i32, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn find_view_by_id(&self, id: &str) -> Result<Option<BookingView>, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<BookingView>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Booking>, AppError>;

    /// Flips status to `cancelled`, guarded by `status != 'cancelled'` so
    /// the transition fires at most once. Returns the updated booking, or
    /// `AlreadyCancelled` if the guard rejected the write.
    async fn cancel(&self, id: &str) -> Result<Booking, AppError>;
}

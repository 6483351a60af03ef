use crate::domain::ports::EventRepository;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

/// Owns the seat-count invariant: `available_seats` only ever moves
/// through `reserve` and `release`, which map onto single guarded UPDATE
/// statements in the repository. Nothing else in the service is allowed
/// to read-modify-write that column.
pub struct InventoryLedger {
    events: Arc<dyn EventRepository>,
}

impl InventoryLedger {
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    /// Takes `seats` out of the event's availability. Linearizable with
    /// respect to all other reserve/release calls on the same event.
    pub async fn reserve(&self, event_id: &str, seats: i32) -> Result<i32, AppError> {
        if seats < 1 {
            return Err(AppError::Validation("Seat count must be at least 1".into()));
        }

        let remaining = self.events.reserve_seats(event_id, seats).await?;
        info!(event_id, seats, remaining, "seats reserved");
        Ok(remaining)
    }

    /// Returns `seats` to the event's availability, clamped to the total
    /// capacity. Safe to retry after a transient store failure.
    pub async fn release(&self, event_id: &str, seats: i32) -> Result<i32, AppError> {
        if seats < 1 {
            return Err(AppError::Validation("Seat count must be at least 1".into()));
        }

        let remaining = self.events.release_seats(event_id, seats).await?;
        info!(event_id, seats, remaining, "seats released");
        Ok(remaining)
    }
}

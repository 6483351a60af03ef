use crate::domain::models::{
    actor::Actor,
    booking::{Booking, BookingView},
};
use crate::domain::ports::{BookingRepository, EventRepository};
use crate::domain::services::{access, inventory::InventoryLedger};
use crate::error::AppError;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Booking lifecycle: `(none) -> confirmed -> cancelled`, with no way out
/// of `cancelled`. Coordinates the inventory ledger with the booking
/// store and enforces the authorization policy on every entry point.
pub struct BookingService {
    events: Arc<dyn EventRepository>,
    bookings: Arc<dyn BookingRepository>,
    ledger: Arc<InventoryLedger>,
}

impl BookingService {
    pub fn new(
        events: Arc<dyn EventRepository>,
        bookings: Arc<dyn BookingRepository>,
        ledger: Arc<InventoryLedger>,
    ) -> Self {
        Self {
            events,
            bookings,
            ledger,
        }
    }

    pub async fn create_booking(
        &self,
        actor: &Actor,
        event_id: &str,
        seats: i32,
    ) -> Result<Booking, AppError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(AppError::NotFound("Event not found".into()))?;

        let total_amount = event.ticket_price * seats as f64;

        let remaining = self.ledger.reserve(event_id, seats).await?;

        let booking = Booking::new(actor.id.clone(), event.id.clone(), seats, total_amount);

        // Seats are already taken out at this point. If the insert fails
        // we must hand them back, otherwise the event leaks capacity.
        match self.bookings.create(&booking).await {
            Ok(created) => {
                info!(
                    booking_id = %created.id,
                    event_id,
                    seats,
                    remaining,
                    "booking confirmed"
                );
                Ok(created)
            }
            Err(err) => {
                error!(event_id, seats, "booking insert failed, releasing reserved seats");
                if let Err(release_err) = self.ledger.release(event_id, seats).await {
                    error!(event_id, seats, ?release_err, "compensating release failed");
                }
                Err(err)
            }
        }
    }

    pub async fn cancel_booking(&self, actor: &Actor, booking_id: &str) -> Result<Booking, AppError> {
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or(AppError::NotFound("Booking not found".into()))?;

        if !access::can_access_booking(actor, &booking.user_id) {
            return Err(AppError::Forbidden(
                "Not authorized to cancel this booking".into(),
            ));
        }

        if booking.is_cancelled() {
            return Err(AppError::AlreadyCancelled);
        }

        // Record the cancellation first; release only once it is durable.
        // A crash in between is recoverable because a retried release is
        // clamped and cannot credit seats past the event's capacity.
        let cancelled = self.bookings.cancel(booking_id).await?;

        match self.ledger.release(&cancelled.event_id, cancelled.seats).await {
            Ok(_) => {}
            Err(err) => {
                warn!(
                    booking_id,
                    event_id = %cancelled.event_id,
                    ?err,
                    "cancellation recorded but seat release failed; release is retryable"
                );
                return Err(err);
            }
        }

        info!(booking_id, event_id = %cancelled.event_id, "booking cancelled");
        Ok(cancelled)
    }

    pub async fn get_booking(&self, actor: &Actor, booking_id: &str) -> Result<BookingView, AppError> {
        let view = self
            .bookings
            .find_view_by_id(booking_id)
            .await?
            .ok_or(AppError::NotFound("Booking not found".into()))?;

        if !access::can_access_booking(actor, &view.user_id) {
            return Err(AppError::Forbidden(
                "Not authorized to view this booking".into(),
            ));
        }

        Ok(view)
    }

    /// The actor's own bookings, most recent first.
    pub async fn list_for_user(&self, actor: &Actor) -> Result<Vec<BookingView>, AppError> {
        self.bookings.list_by_user(&actor.id).await
    }

    /// All bookings on an event, restricted to its organizer or an admin.
    pub async fn list_for_event(
        &self,
        actor: &Actor,
        event_id: &str,
    ) -> Result<Vec<Booking>, AppError> {
        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or(AppError::NotFound("Event not found".into()))?;

        if !access::can_manage_event(actor, &event.organizer_id) {
            return Err(AppError::Forbidden(
                "Not authorized to view these bookings".into(),
            ));
        }

        self.bookings.list_by_event(event_id).await
    }
}

use crate::config::Config;
use crate::domain::ports::{BookingRepository, EventRepository};
use crate::domain::services::{booking_service::BookingService, inventory::InventoryLedger};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_repo: Arc<dyn EventRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub inventory: Arc<InventoryLedger>,
    pub booking_service: Arc<BookingService>,
}

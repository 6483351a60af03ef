pub mod actor;
pub mod booking;
pub mod event;

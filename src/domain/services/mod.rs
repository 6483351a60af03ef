pub mod access;
pub mod booking_service;
pub mod inventory;

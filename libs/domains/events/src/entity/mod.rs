//! Sea-ORM entities for the `events`, `participants` and `registrations` tables

pub mod event;
pub mod participant;
pub mod registration;

/// OpenAPI tag shared by the event routes
pub const TAG: &str = "events";

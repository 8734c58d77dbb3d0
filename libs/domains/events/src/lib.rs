//! Events Domain
//!
//! Club events and the registration workflow: capacity ceilings, one
//! registration per person per event, admin listing and cancellation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, audit log
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, admin checks, notifications
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Atomic register/cancel per event (Postgres or in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Event, Participant, Registration, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_events::{handlers, InMemoryEventRepository, EventService};
//!
//! let service = EventService::new(InMemoryEventRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod resolution;
pub mod service;

pub use error::{EventError, EventResult};
pub use models::{
    CreateEvent, Event, EventFilter, EventStatus, NewParticipant, Participant,
    RegisterParticipant, Registration, RegistrationEntry, UpdateEvent,
};
pub use postgres::PgEventRepository;
pub use repository::{EventRepository, InMemoryEventRepository};
pub use resolution::{ParticipantResolution, resolve_participant};
pub use service::EventService;

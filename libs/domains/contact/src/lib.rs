//! Contact Domain
//!
//! Messages from the public contact form and the admin inbox that works
//! through them. Every new message raises a `contact_received` notification.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ContactError, ContactResult};
pub use models::{ContactFilter, ContactMessage, SubmitContact};
pub use postgres::PgContactRepository;
pub use repository::{ContactRepository, InMemoryContactRepository};
pub use service::ContactService;

//! Team Domain
//!
//! The roster on the club's team page.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{TeamError, TeamResult};
pub use models::{CreateTeamMember, TeamMember, UpdateTeamMember};
pub use postgres::PgTeamRepository;
pub use repository::{InMemoryTeamRepository, TeamRepository};
pub use service::TeamService;

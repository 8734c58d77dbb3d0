use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{EventError, EventResult};

/// Lifecycle of an event; only `open` events take registrations
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "event_status")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventStatus {
    /// Being prepared, hidden from registration
    #[sea_orm(string_value = "draft")]
    Draft,
    #[default]
    #[sea_orm(string_value = "open")]
    Open,
    /// Registration period is over
    #[sea_orm(string_value = "closed")]
    Closed,
}

/// A club event with an optional capacity ceiling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    /// Maximum number of registrations; unbounded when absent
    pub capacity: Option<i32>,
    /// Number of active registrations
    pub current_count: i32,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn new(input: CreateEvent) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            location: input.location,
            starts_at: input.starts_at,
            ends_at: input.ends_at,
            capacity: input.capacity,
            current_count: 0,
            status: input.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Status and capacity checks, in that order
    pub fn ensure_accepting_registrations(&self) -> EventResult<()> {
        if self.status != EventStatus::Open {
            return Err(EventError::RegistrationClosed {
                event_id: self.id,
                status: self.status,
            });
        }

        if let Some(capacity) = self.capacity {
            if self.current_count >= capacity {
                return Err(EventError::CapacityExceeded {
                    event_id: self.id,
                    capacity,
                });
            }
        }

        Ok(())
    }

    /// Apply a partial update. Rejects a capacity below the number of
    /// registrations already taken.
    pub fn apply_update(&mut self, update: UpdateEvent) -> EventResult<()> {
        if let Some(Some(capacity)) = update.capacity {
            if capacity < self.current_count {
                return Err(EventError::Validation(format!(
                    "capacity {} is below the {} existing registrations",
                    capacity, self.current_count
                )));
            }
        }

        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(starts_at) = update.starts_at {
            self.starts_at = starts_at;
        }
        if let Some(ends_at) = update.ends_at {
            self.ends_at = ends_at;
        }
        if let Some(capacity) = update.capacity {
            self.capacity = capacity;
        }
        if let Some(status) = update.status {
            self.status = status;
        }

        if let Some(ends_at) = self.ends_at {
            if ends_at < self.starts_at {
                return Err(EventError::Validation(
                    "ends_at must not be before starts_at".to_string(),
                ));
            }
        }

        self.updated_at = Utc::now();
        Ok(())
    }
}

fn validate_event_window(input: &CreateEvent) -> Result<(), ValidationError> {
    match input.ends_at {
        Some(ends_at) if ends_at < input.starts_at => {
            Err(ValidationError::new("ends_before_start"))
        }
        _ => Ok(()),
    }
}

fn validate_capacity_update(input: &UpdateEvent) -> Result<(), ValidationError> {
    match input.capacity {
        Some(Some(capacity)) if capacity < 1 => Err(ValidationError::new("capacity_range")),
        _ => Ok(()),
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Distinguishes an explicit `null` from an absent field
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// DTO for creating an event
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_event_window"))]
pub struct CreateEvent {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    /// Defaults to `open`
    pub status: Option<EventStatus>,
}

/// DTO for a partial event update. `current_count` is not writable.
///
/// `"capacity": null` removes the ceiling; omitting it leaves it unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_capacity_update"))]
pub struct UpdateEvent {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub ends_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    #[schema(value_type = Option<i32>)]
    pub capacity: Option<Option<i32>>,
    pub status: Option<EventStatus>,
}

/// Query filters for listing events
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct EventFilter {
    pub status: Option<EventStatus>,
    /// Only events starting now or later
    pub upcoming: Option<bool>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

impl Default for EventFilter {
    fn default() -> Self {
        Self {
            status: None,
            upcoming: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

/// Registration form submitted by a visitor
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterParticipant {
    #[serde(alias = "displayName")]
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    /// Student number
    #[serde(default, alias = "externalId")]
    #[validate(length(min = 1, max = 32))]
    pub external_id: Option<String>,
    #[serde(alias = "affiliationProgram")]
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub program: String,
    #[serde(alias = "affiliationYear")]
    #[validate(range(min = 1, max = 4))]
    pub year: i32,
}

/// Emails are compared case-insensitively
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalized participant data ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewParticipant {
    pub name: String,
    pub email: String,
    pub external_id: Option<String>,
    pub program: String,
    pub year: i32,
}

impl From<RegisterParticipant> for NewParticipant {
    fn from(input: RegisterParticipant) -> Self {
        Self {
            name: input.name.trim().to_string(),
            email: normalize_email(&input.email),
            external_id: input
                .external_id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty()),
            program: input.program.trim().to_string(),
            year: input.year,
        }
    }
}

/// A person who has registered for at least one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub external_id: Option<String>,
    pub program: String,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}

impl Participant {
    pub fn new(input: NewParticipant) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            external_id: input.external_id,
            program: input.program,
            year: input.year,
            created_at: Utc::now(),
        }
    }
}

/// Link between a participant and an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Registration {
    pub id: Uuid,
    pub participant_id: Uuid,
    pub event_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    pub fn new(event_id: Uuid, participant_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            participant_id,
            event_id,
            created_at: Utc::now(),
        }
    }
}

/// Registration joined with its participant, as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RegistrationEntry {
    pub id: Uuid,
    pub event_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub participant: Participant,
}

impl RegistrationEntry {
    pub fn new(registration: Registration, participant: Participant) -> Self {
        Self {
            id: registration.id,
            event_id: registration.event_id,
            created_at: registration.created_at,
            participant,
        }
    }
}

/// Result of a successful registration: the stored records and the event
/// with its incremented counter.
#[derive(Debug, Clone)]
pub struct RegistrationOutcome {
    pub registration: Registration,
    pub participant: Participant,
    pub event: Event,
}

/// Result of a cancellation: the removed registration and the event with
/// its decremented counter.
#[derive(Debug, Clone)]
pub struct CancelledRegistration {
    pub registration: Registration,
    pub participant: Option<Participant>,
    pub event: Event,
}

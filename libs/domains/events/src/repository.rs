use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{EventError, EventResult};
use crate::models::{
    CancelledRegistration, CreateEvent, Event, EventFilter, NewParticipant, Participant,
    Registration, RegistrationEntry, RegistrationOutcome, UpdateEvent,
};
use crate::resolution::{ParticipantResolution, resolve_participant};

/// Persistence for events, participants and registrations.
///
/// `register` and `cancel_registration` are atomic per event: the status and
/// capacity checks, participant resolution, duplicate check and the counter
/// change happen as one unit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, input: CreateEvent) -> EventResult<Event>;

    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>>;

    /// Ordered by `starts_at` ascending
    async fn list(&self, filter: EventFilter) -> EventResult<Vec<Event>>;

    async fn update(&self, id: Uuid, input: UpdateEvent) -> EventResult<Event>;

    /// Deletes the event and its registrations
    async fn delete(&self, id: Uuid) -> EventResult<bool>;

    async fn register(
        &self,
        event_id: Uuid,
        participant: NewParticipant,
    ) -> EventResult<RegistrationOutcome>;

    /// Ordered by registration time
    async fn list_registrations(&self, event_id: Uuid) -> EventResult<Vec<RegistrationEntry>>;

    async fn cancel_registration(
        &self,
        event_id: Uuid,
        registration_id: Uuid,
    ) -> EventResult<CancelledRegistration>;
}

#[derive(Debug, Default)]
struct Store {
    events: HashMap<Uuid, Event>,
    participants: HashMap<Uuid, Participant>,
    /// Insertion order is registration order
    registrations: Vec<Registration>,
}

impl Store {
    fn resolve(&self, info: NewParticipant) -> ParticipantResolution {
        let by_email = self
            .participants
            .values()
            .find(|p| p.email == info.email)
            .cloned();
        let by_external_id = info.external_id.as_ref().and_then(|external_id| {
            self.participants
                .values()
                .find(|p| p.external_id.as_ref() == Some(external_id))
                .cloned()
        });

        resolve_participant(by_email, by_external_id, info)
    }
}

/// In-memory implementation of EventRepository (for development/testing).
///
/// Every write takes the single store lock, which serializes registrations
/// for all events.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(&self, input: CreateEvent) -> EventResult<Event> {
        let mut store = self.store.write().await;

        let event = Event::new(input);
        store.events.insert(event.id, event.clone());

        tracing::info!(event_id = %event.id, "Created event");
        Ok(event)
    }

    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>> {
        let store = self.store.read().await;
        Ok(store.events.get(&id).cloned())
    }

    async fn list(&self, filter: EventFilter) -> EventResult<Vec<Event>> {
        let store = self.store.read().await;
        let now = Utc::now();

        let mut result: Vec<Event> = store
            .events
            .values()
            .filter(|e| filter.status.is_none_or(|status| e.status == status))
            .filter(|e| !filter.upcoming.unwrap_or(false) || e.starts_at >= now)
            .cloned()
            .collect();

        result.sort_by(|a, b| a.starts_at.cmp(&b.starts_at).then(a.id.cmp(&b.id)));

        Ok(result
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect())
    }

    async fn update(&self, id: Uuid, input: UpdateEvent) -> EventResult<Event> {
        let mut store = self.store.write().await;

        let event = store.events.get_mut(&id).ok_or(EventError::NotFound(id))?;
        let mut updated = event.clone();
        updated.apply_update(input)?;
        *event = updated.clone();

        tracing::info!(event_id = %id, "Updated event");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> EventResult<bool> {
        let mut store = self.store.write().await;

        if store.events.remove(&id).is_some() {
            store.registrations.retain(|r| r.event_id != id);
            tracing::info!(event_id = %id, "Deleted event");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn register(
        &self,
        event_id: Uuid,
        participant: NewParticipant,
    ) -> EventResult<RegistrationOutcome> {
        let mut store = self.store.write().await;

        let event = store
            .events
            .get(&event_id)
            .ok_or(EventError::NotFound(event_id))?;
        event.ensure_accepting_registrations()?;

        let participant = match store.resolve(participant) {
            ParticipantResolution::MatchedByEmail(p)
            | ParticipantResolution::MatchedByExternalId(p) => p,
            ParticipantResolution::New(info) => {
                let p = Participant::new(info);
                store.participants.insert(p.id, p.clone());
                p
            }
        };

        let duplicate = store
            .registrations
            .iter()
            .any(|r| r.event_id == event_id && r.participant_id == participant.id);
        if duplicate {
            return Err(EventError::AlreadyRegistered { event_id });
        }

        let registration = Registration::new(event_id, participant.id);
        store.registrations.push(registration.clone());

        let event = store
            .events
            .get_mut(&event_id)
            .ok_or(EventError::NotFound(event_id))?;
        event.current_count += 1;
        event.updated_at = Utc::now();

        tracing::info!(
            event_id = %event_id,
            registration_id = %registration.id,
            participant_id = %participant.id,
            current_count = event.current_count,
            "Registered participant"
        );

        Ok(RegistrationOutcome {
            registration,
            participant,
            event: event.clone(),
        })
    }

    async fn list_registrations(&self, event_id: Uuid) -> EventResult<Vec<RegistrationEntry>> {
        let store = self.store.read().await;

        if !store.events.contains_key(&event_id) {
            return Err(EventError::NotFound(event_id));
        }

        store
            .registrations
            .iter()
            .filter(|r| r.event_id == event_id)
            .map(|r| {
                let participant = store
                    .participants
                    .get(&r.participant_id)
                    .cloned()
                    .ok_or_else(|| {
                        EventError::Internal(format!("Participant {} missing", r.participant_id))
                    })?;
                Ok(RegistrationEntry::new(r.clone(), participant))
            })
            .collect()
    }

    async fn cancel_registration(
        &self,
        event_id: Uuid,
        registration_id: Uuid,
    ) -> EventResult<CancelledRegistration> {
        let mut store = self.store.write().await;

        if !store.events.contains_key(&event_id) {
            return Err(EventError::NotFound(event_id));
        }

        let position = store
            .registrations
            .iter()
            .position(|r| r.id == registration_id && r.event_id == event_id)
            .ok_or(EventError::RegistrationNotFound(registration_id))?;
        let registration = store.registrations.remove(position);
        let participant = store.participants.get(&registration.participant_id).cloned();

        let event = store
            .events
            .get_mut(&event_id)
            .ok_or(EventError::NotFound(event_id))?;
        event.current_count = (event.current_count - 1).max(0);
        event.updated_at = Utc::now();

        tracing::info!(
            event_id = %event_id,
            registration_id = %registration_id,
            current_count = event.current_count,
            "Cancelled registration"
        );

        Ok(CancelledRegistration {
            registration,
            participant,
            event: event.clone(),
        })
    }
}

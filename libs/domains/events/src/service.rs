use notifications::{LogNotifier, Notification, SharedNotifier, dispatch};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{EventError, EventResult};
use crate::models::{
    CreateEvent, Event, EventFilter, RegisterParticipant, RegistrationEntry, UpdateEvent,
};
use crate::repository::EventRepository;

/// Event administration and the registration workflow
#[derive(Clone)]
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
    notifier: SharedNotifier,
}

impl<R: EventRepository> EventService<R> {
    /// Notifications go to the log until [`EventService::with_notifier`] is used
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            notifier: Arc::new(LogNotifier),
        }
    }

    pub fn with_notifier(mut self, notifier: SharedNotifier) -> Self {
        self.notifier = notifier;
        self
    }

    /// Register a visitor for an event.
    ///
    /// Input is validated before the store is touched. The store then checks,
    /// atomically for this event: event exists, status is open, a seat is
    /// left, the participant resolves, and the participant is not registered
    /// yet. The confirmation notification is sent after commit and cannot
    /// fail the registration.
    #[instrument(skip(self, input), fields(event_id = %event_id))]
    pub async fn register(
        &self,
        event_id: Uuid,
        input: RegisterParticipant,
    ) -> EventResult<RegistrationEntry> {
        input.validate()?;

        let outcome = self.repository.register(event_id, input.into()).await?;

        dispatch(
            self.notifier.clone(),
            Notification::RegistrationConfirmed {
                event_id,
                event_title: outcome.event.title.clone(),
                registration_id: outcome.registration.id,
                participant_name: outcome.participant.name.clone(),
                participant_email: outcome.participant.email.clone(),
            },
        );

        Ok(RegistrationEntry::new(
            outcome.registration,
            outcome.participant,
        ))
    }

    /// Registrations for an event, oldest first. Admin only.
    #[instrument(skip(self), fields(event_id = %event_id))]
    pub async fn list_registrations(
        &self,
        event_id: Uuid,
        is_admin: bool,
    ) -> EventResult<Vec<RegistrationEntry>> {
        if !is_admin {
            return Err(EventError::Forbidden);
        }

        self.repository.list_registrations(event_id).await
    }

    /// Force-cancel a registration and give the seat back. Admin only.
    #[instrument(skip(self), fields(event_id = %event_id, registration_id = %registration_id))]
    pub async fn cancel_registration(
        &self,
        event_id: Uuid,
        registration_id: Uuid,
        is_admin: bool,
    ) -> EventResult<()> {
        if !is_admin {
            return Err(EventError::Forbidden);
        }

        let cancelled = self
            .repository
            .cancel_registration(event_id, registration_id)
            .await?;

        if let Some(participant) = cancelled.participant {
            dispatch(
                self.notifier.clone(),
                Notification::RegistrationCancelled {
                    event_id,
                    event_title: cancelled.event.title,
                    registration_id,
                    participant_email: participant.email,
                },
            );
        }

        Ok(())
    }

    #[instrument(skip(self, input), fields(event_title = %input.title))]
    pub async fn create_event(&self, input: CreateEvent) -> EventResult<Event> {
        input.validate()?;
        self.repository.create(input).await
    }

    pub async fn get_event(&self, id: Uuid) -> EventResult<Event> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    pub async fn list_events(&self, filter: EventFilter) -> EventResult<Vec<Event>> {
        self.repository.list(filter).await
    }

    #[instrument(skip(self, input), fields(event_id = %id))]
    pub async fn update_event(&self, id: Uuid, input: UpdateEvent) -> EventResult<Event> {
        input.validate()?;
        self.repository.update(id, input).await
    }

    #[instrument(skip(self), fields(event_id = %id))]
    pub async fn delete_event(&self, id: Uuid) -> EventResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(EventError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CancelledRegistration, EventStatus, Participant, Registration, RegistrationOutcome,
    };
    use crate::repository::{InMemoryEventRepository, MockEventRepository};
    use chrono::{Duration, Utc};
    use notifications::RecordingNotifier;

    fn create_event(capacity: Option<i32>) -> CreateEvent {
        CreateEvent {
            title: "Intro to Rust".to_string(),
            description: "Workshop".to_string(),
            location: "Lab 3".to_string(),
            starts_at: Utc::now() + Duration::days(2),
            ends_at: None,
            capacity,
            status: None,
        }
    }

    fn form(email: &str) -> RegisterParticipant {
        RegisterParticipant {
            name: "Linus".to_string(),
            email: email.to_string(),
            external_id: None,
            program: "Physics".to_string(),
            year: 1,
        }
    }

    /// Wait for fire-and-forget notifications to land
    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_store() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_register().never();

        let service = EventService::new(mock_repo);
        let mut input = form("linus@uni.test");
        input.year = 0;

        let result = service.register(Uuid::now_v7(), input).await;
        assert!(matches!(result, Err(EventError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_blank_name_never_reaches_store() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_register().never();

        let service = EventService::new(mock_repo);
        let mut input = form("linus@uni.test");
        input.name = "   ".to_string();

        let result = service.register(Uuid::now_v7(), input).await;
        assert!(matches!(result, Err(EventError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_register_dispatches_confirmation() {
        let recorder = Arc::new(RecordingNotifier::new());
        let service =
            EventService::new(InMemoryEventRepository::new()).with_notifier(recorder.clone());
        let event = service.create_event(create_event(None)).await.unwrap();

        let entry = service
            .register(event.id, form("Linus@Uni.Test"))
            .await
            .unwrap();
        assert_eq!(entry.participant.email, "linus@uni.test");

        settle().await;
        let sent = recorder.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind(), "registration_confirmed");
        assert_eq!(sent[0].recipient(), Some("linus@uni.test"));
    }

    #[tokio::test]
    async fn test_notification_failure_does_not_fail_registration() {
        let service = EventService::new(InMemoryEventRepository::new())
            .with_notifier(Arc::new(RecordingNotifier::failing("smtp down")));
        let event = service.create_event(create_event(Some(5))).await.unwrap();

        service
            .register(event.id, form("linus@uni.test"))
            .await
            .unwrap();
        settle().await;

        let event = service.get_event(event.id).await.unwrap();
        assert_eq!(event.current_count, 1);
    }

    #[tokio::test]
    async fn test_listing_requires_admin() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_list_registrations().never();

        let service = EventService::new(mock_repo);
        let result = service.list_registrations(Uuid::now_v7(), false).await;
        assert!(matches!(result, Err(EventError::Forbidden)));
    }

    #[tokio::test]
    async fn test_cancel_requires_admin() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_cancel_registration().never();

        let service = EventService::new(mock_repo);
        let result = service
            .cancel_registration(Uuid::now_v7(), Uuid::now_v7(), false)
            .await;
        assert!(matches!(result, Err(EventError::Forbidden)));
    }

    #[tokio::test]
    async fn test_cancel_dispatches_notification() {
        let event = Event::new(create_event(None));
        let participant = Participant::new(form("linus@uni.test").into());
        let registration = Registration::new(event.id, participant.id);
        let registration_id = registration.id;
        let event_id = event.id;

        let mut mock_repo = MockEventRepository::new();
        let returned = CancelledRegistration {
            registration,
            participant: Some(participant),
            event,
        };
        mock_repo
            .expect_cancel_registration()
            .withf(move |e, r| *e == event_id && *r == registration_id)
            .return_once(move |_, _| Ok(returned));

        let recorder = Arc::new(RecordingNotifier::new());
        let service = EventService::new(mock_repo).with_notifier(recorder.clone());

        service
            .cancel_registration(event_id, registration_id, true)
            .await
            .unwrap();
        settle().await;

        let sent = recorder.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind(), "registration_cancelled");
    }

    #[tokio::test]
    async fn test_store_unavailable_propagates() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_register()
            .returning(|_, _| Err(EventError::StoreUnavailable("pool timed out".to_string())));

        let recorder = Arc::new(RecordingNotifier::new());
        let service = EventService::new(mock_repo).with_notifier(recorder.clone());

        let result = service.register(Uuid::now_v7(), form("a@uni.test")).await;
        assert!(matches!(result, Err(EventError::StoreUnavailable(_))));

        settle().await;
        assert_eq!(recorder.sent_count().await, 0);
    }

    #[tokio::test]
    async fn test_register_returns_stored_participant() {
        let event = Event::new(create_event(None));
        let existing = Participant::new(form("linus@uni.test").into());
        let registration = Registration::new(event.id, existing.id);

        let mut mock_repo = MockEventRepository::new();
        let outcome = RegistrationOutcome {
            registration: registration.clone(),
            participant: existing.clone(),
            event: Event {
                current_count: 1,
                ..event.clone()
            },
        };
        mock_repo
            .expect_register()
            .return_once(move |_, _| Ok(outcome));

        let service = EventService::new(mock_repo);
        let mut input = form("linus@uni.test");
        input.name = "Different Name".to_string();

        let entry = service.register(event.id, input).await.unwrap();
        assert_eq!(entry.id, registration.id);
        assert_eq!(entry.participant, existing);
    }

    #[tokio::test]
    async fn test_delete_missing_event() {
        let service = EventService::new(InMemoryEventRepository::new());
        let result = service.delete_event(Uuid::now_v7()).await;
        assert!(matches!(result, Err(EventError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_event_validates_window() {
        let service = EventService::new(InMemoryEventRepository::new());
        let mut input = create_event(None);
        input.ends_at = Some(input.starts_at - Duration::hours(1));

        let result = service.create_event(input).await;
        assert!(matches!(result, Err(EventError::InvalidInput(_))));

        let mut draft = create_event(None);
        draft.status = Some(EventStatus::Draft);
        let created = service.create_event(draft).await.unwrap();
        assert_eq!(created.status, EventStatus::Draft);
    }
}

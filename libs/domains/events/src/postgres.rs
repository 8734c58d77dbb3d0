use async_trait::async_trait;
use chrono::Utc;
use database::BaseRepository;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity::{event, participant, registration},
    error::{EventError, EventResult},
    models::{
        CancelledRegistration, CreateEvent, Event, EventFilter, NewParticipant, Participant,
        Registration, RegistrationEntry, RegistrationOutcome, UpdateEvent,
    },
    repository::EventRepository,
    resolution::{ParticipantResolution, resolve_participant},
};

/// PostgreSQL store. Registration and cancellation run in one transaction
/// that starts with `SELECT ... FOR UPDATE` on the event row, so concurrent
/// requests for the same event queue up behind each other.
pub struct PgEventRepository {
    base: BaseRepository<event::Entity>,
}

impl PgEventRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn db(&self) -> &DatabaseConnection {
        self.base.db()
    }

    async fn lock_event(txn: &DatabaseTransaction, id: Uuid) -> EventResult<event::Model> {
        event::Entity::find_by_id(id)
            .lock_exclusive()
            .one(txn)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    async fn save_event(txn: &DatabaseTransaction, event: Event) -> EventResult<Event> {
        let active_model: event::ActiveModel = event.into();
        let model = active_model.update(txn).await?;
        Ok(model.into())
    }

    /// Candidates for both identity keys
    async fn find_candidates<C: ConnectionTrait>(
        conn: &C,
        info: &NewParticipant,
    ) -> EventResult<(Option<Participant>, Option<Participant>)> {
        let by_email = participant::Entity::find()
            .filter(participant::Column::Email.eq(&info.email))
            .one(conn)
            .await?;

        let by_external_id = match &info.external_id {
            Some(external_id) => {
                participant::Entity::find()
                    .filter(participant::Column::ExternalId.eq(external_id))
                    .one(conn)
                    .await?
            }
            None => None,
        };

        Ok((by_email.map(Into::into), by_external_id.map(Into::into)))
    }

    /// Insert inside a savepoint. A unique violation means a registration for
    /// another event created the same person a moment ago; reuse that row.
    async fn create_participant(
        txn: &DatabaseTransaction,
        info: NewParticipant,
    ) -> EventResult<Participant> {
        let savepoint = txn.begin().await?;
        let active_model: participant::ActiveModel = Participant::new(info.clone()).into();

        match active_model.insert(&savepoint).await {
            Ok(model) => {
                savepoint.commit().await?;
                Ok(model.into())
            }
            Err(e) if database::common::is_unique_violation(&e) => {
                savepoint.rollback().await?;
                let (by_email, by_external_id) = Self::find_candidates(txn, &info).await?;
                resolve_participant(by_email, by_external_id, info)
                    .existing()
                    .cloned()
                    .ok_or_else(|| {
                        EventError::Internal("participant vanished after conflict".to_string())
                    })
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn create(&self, input: CreateEvent) -> EventResult<Event> {
        let active_model: event::ActiveModel = Event::new(input).into();
        let model = self.base.insert(active_model).await?;

        tracing::info!(event_id = %model.id, "Created event");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: EventFilter) -> EventResult<Vec<Event>> {
        let mut query = event::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(event::Column::Status.eq(status));
        }

        if filter.upcoming.unwrap_or(false) {
            query = query.filter(event::Column::StartsAt.gte(Utc::now()));
        }

        let models = query
            .order_by_asc(event::Column::StartsAt)
            .order_by_asc(event::Column::Id)
            .limit(filter.limit as u64)
            .offset(filter.offset as u64)
            .all(self.db())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateEvent) -> EventResult<Event> {
        let txn = self.db().begin().await?;

        let mut event: Event = Self::lock_event(&txn, id).await?.into();
        event.apply_update(input)?;
        let updated = Self::save_event(&txn, event).await?;

        txn.commit().await?;

        tracing::info!(event_id = %id, "Updated event");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> EventResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await?;

        if rows_affected > 0 {
            tracing::info!(event_id = %id, "Deleted event");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn register(
        &self,
        event_id: Uuid,
        info: NewParticipant,
    ) -> EventResult<RegistrationOutcome> {
        let txn = self.db().begin().await?;

        let mut event: Event = Self::lock_event(&txn, event_id).await?.into();
        event.ensure_accepting_registrations()?;

        let (by_email, by_external_id) = Self::find_candidates(&txn, &info).await?;
        let participant = match resolve_participant(by_email, by_external_id, info) {
            ParticipantResolution::MatchedByEmail(p)
            | ParticipantResolution::MatchedByExternalId(p) => p,
            ParticipantResolution::New(info) => Self::create_participant(&txn, info).await?,
        };

        let duplicate = registration::Entity::find()
            .filter(registration::Column::EventId.eq(event_id))
            .filter(registration::Column::ParticipantId.eq(participant.id))
            .one(&txn)
            .await?
            .is_some();
        if duplicate {
            return Err(EventError::AlreadyRegistered { event_id });
        }

        let active_model: registration::ActiveModel =
            Registration::new(event_id, participant.id).into();
        let registration: Registration = active_model
            .insert(&txn)
            .await
            .map_err(|e| EventError::from_registration_insert(e, event_id))?
            .into();

        event.current_count += 1;
        let event = Self::save_event(&txn, event).await?;

        txn.commit().await?;

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
            event,
        })
    }

    async fn list_registrations(&self, event_id: Uuid) -> EventResult<Vec<RegistrationEntry>> {
        if self.base.find_by_id(event_id).await?.is_none() {
            return Err(EventError::NotFound(event_id));
        }

        let rows = registration::Entity::find()
            .filter(registration::Column::EventId.eq(event_id))
            .find_also_related(participant::Entity)
            .order_by_asc(registration::Column::CreatedAt)
            .order_by_asc(registration::Column::Id)
            .all(self.db())
            .await?;

        rows.into_iter()
            .map(|(registration, participant)| {
                let participant = participant.ok_or_else(|| {
                    EventError::Internal(format!(
                        "Participant {} missing",
                        registration.participant_id
                    ))
                })?;
                Ok(RegistrationEntry::new(
                    registration.into(),
                    participant.into(),
                ))
            })
            .collect()
    }

    async fn cancel_registration(
        &self,
        event_id: Uuid,
        registration_id: Uuid,
    ) -> EventResult<CancelledRegistration> {
        let txn = self.db().begin().await?;

        let mut event: Event = Self::lock_event(&txn, event_id).await?.into();

        let registration: Registration = registration::Entity::find_by_id(registration_id)
            .filter(registration::Column::EventId.eq(event_id))
            .one(&txn)
            .await?
            .ok_or(EventError::RegistrationNotFound(registration_id))?
            .into();

        let participant = participant::Entity::find_by_id(registration.participant_id)
            .one(&txn)
            .await?
            .map(Into::into);

        registration::Entity::delete_by_id(registration.id)
            .exec(&txn)
            .await?;

        event.current_count = (event.current_count - 1).max(0);
        let event = Self::save_event(&txn, event).await?;

        txn.commit().await?;

        tracing::info!(
            event_id = %event_id,
            registration_id = %registration_id,
            current_count = event.current_count,
            "Cancelled registration"
        );

        Ok(CancelledRegistration {
            registration,
            participant,
            event,
        })
    }
}

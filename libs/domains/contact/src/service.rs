use notifications::{LogNotifier, Notification, SharedNotifier, dispatch};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ContactError, ContactResult};
use crate::models::{ContactFilter, ContactMessage, SubmitContact};
use crate::repository::ContactRepository;

#[derive(Clone)]
pub struct ContactService<R: ContactRepository> {
    repository: Arc<R>,
    notifier: SharedNotifier,
}

impl<R: ContactRepository> ContactService<R> {
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

    /// Store a message from the public form and tell the board about it.
    /// A failed notification does not fail the submission.
    #[instrument(skip(self, input))]
    pub async fn submit(&self, input: SubmitContact) -> ContactResult<ContactMessage> {
        input.validate()?;

        let message = self.repository.create(ContactMessage::new(input)).await?;
        tracing::info!(message_id = %message.id, "Contact message received");

        dispatch(
            self.notifier.clone(),
            Notification::ContactReceived {
                message_id: message.id,
                name: message.name.clone(),
                email: message.email.clone(),
                subject: message.subject.clone(),
            },
        );

        Ok(message)
    }

    pub async fn list_messages(&self, filter: ContactFilter) -> ContactResult<Vec<ContactMessage>> {
        let filter = ContactFilter {
            limit: filter.limit.min(200),
            ..filter
        };
        self.repository.list(filter).await
    }

    pub async fn resolve(&self, id: Uuid) -> ContactResult<ContactMessage> {
        self.repository
            .mark_resolved(id)
            .await?
            .ok_or(ContactError::NotFound(id))
    }

    pub async fn delete(&self, id: Uuid) -> ContactResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ContactError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryContactRepository, MockContactRepository};
    use notifications::RecordingNotifier;

    fn form(subject: &str) -> SubmitContact {
        SubmitContact {
            name: "Sam".to_string(),
            email: "sam@uni.test".to_string(),
            subject: subject.to_string(),
            message: "Can our company sponsor the hackathon?".to_string(),
        }
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_submit_notifies_board() {
        let recorder = Arc::new(RecordingNotifier::new());
        let service =
            ContactService::new(InMemoryContactRepository::new()).with_notifier(recorder.clone());

        let message = service.submit(form("Sponsorship")).await.unwrap();
        settle().await;

        let sent = recorder.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind(), "contact_received");
        match &sent[0] {
            Notification::ContactReceived { message_id, .. } => assert_eq!(*message_id, message.id),
            other => panic!("unexpected notification {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_notifier_failure_keeps_message() {
        let service = ContactService::new(InMemoryContactRepository::new())
            .with_notifier(Arc::new(RecordingNotifier::failing("smtp down")));

        service.submit(form("Hello")).await.unwrap();
        settle().await;

        let all = service.list_messages(ContactFilter::default()).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_store() {
        let mut mock_repo = MockContactRepository::new();
        mock_repo.expect_create().never();

        let service = ContactService::new(mock_repo);
        let result = service.submit(form("")).await;
        assert!(matches!(result, Err(ContactError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_resolve_and_filter() {
        let service = ContactService::new(InMemoryContactRepository::new());
        let first = service.submit(form("First")).await.unwrap();
        service.submit(form("Second")).await.unwrap();

        let resolved = service.resolve(first.id).await.unwrap();
        assert!(resolved.resolved);

        let open = service
            .list_messages(ContactFilter {
                resolved: Some(false),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].subject, "Second");

        let missing = service.resolve(Uuid::now_v7()).await;
        assert!(matches!(missing, Err(ContactError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let service = ContactService::new(InMemoryContactRepository::new());
        let message = service.submit(form("Bye")).await.unwrap();

        service.delete(message.id).await.unwrap();
        assert!(matches!(
            service.delete(message.id).await,
            Err(ContactError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_store_outage_surfaces() {
        let mut mock_repo = MockContactRepository::new();
        mock_repo
            .expect_create()
            .returning(|_| Err(ContactError::StoreUnavailable("down".to_string())));

        let recorder = Arc::new(RecordingNotifier::new());
        let service = ContactService::new(mock_repo).with_notifier(recorder.clone());

        let result = service.submit(form("Hello")).await;
        assert!(matches!(result, Err(ContactError::StoreUnavailable(_))));
        settle().await;
        assert_eq!(recorder.sent_count().await, 0);
    }
}

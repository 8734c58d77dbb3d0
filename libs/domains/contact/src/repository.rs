use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ContactResult;
use crate::models::{ContactFilter, ContactMessage};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn create(&self, message: ContactMessage) -> ContactResult<ContactMessage>;

    /// Newest first
    async fn list(&self, filter: ContactFilter) -> ContactResult<Vec<ContactMessage>>;

    /// `None` when the message does not exist
    async fn mark_resolved(&self, id: Uuid) -> ContactResult<Option<ContactMessage>>;

    async fn delete(&self, id: Uuid) -> ContactResult<bool>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryContactRepository {
    messages: Arc<RwLock<HashMap<Uuid, ContactMessage>>>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn create(&self, message: ContactMessage) -> ContactResult<ContactMessage> {
        let mut messages = self.messages.write().await;
        messages.insert(message.id, message.clone());
        Ok(message)
    }

    async fn list(&self, filter: ContactFilter) -> ContactResult<Vec<ContactMessage>> {
        let messages = self.messages.read().await;
        let mut result: Vec<ContactMessage> = messages
            .values()
            .filter(|m| filter.resolved.is_none_or(|resolved| m.resolved == resolved))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

        Ok(result
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .collect())
    }

    async fn mark_resolved(&self, id: Uuid) -> ContactResult<Option<ContactMessage>> {
        let mut messages = self.messages.write().await;
        Ok(messages.get_mut(&id).map(|m| {
            m.resolved = true;
            m.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> ContactResult<bool> {
        let mut messages = self.messages.write().await;
        Ok(messages.remove(&id).is_some())
    }
}

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{TeamError, TeamResult};
use crate::models::TeamMember;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn create(&self, member: TeamMember) -> TeamResult<TeamMember>;

    async fn get_by_id(&self, id: Uuid) -> TeamResult<Option<TeamMember>>;

    /// Ordered by `display_order`, then name
    async fn list(&self, active_only: bool) -> TeamResult<Vec<TeamMember>>;

    async fn update(&self, member: TeamMember) -> TeamResult<TeamMember>;

    async fn delete(&self, id: Uuid) -> TeamResult<bool>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryTeamRepository {
    members: Arc<RwLock<HashMap<Uuid, TeamMember>>>,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn create(&self, member: TeamMember) -> TeamResult<TeamMember> {
        let mut members = self.members.write().await;
        members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn get_by_id(&self, id: Uuid) -> TeamResult<Option<TeamMember>> {
        let members = self.members.read().await;
        Ok(members.get(&id).cloned())
    }

    async fn list(&self, active_only: bool) -> TeamResult<Vec<TeamMember>> {
        let members = self.members.read().await;
        let mut result: Vec<TeamMember> = members
            .values()
            .filter(|m| !active_only || m.active)
            .cloned()
            .collect();
        result.sort_by(|a, b| {
            a.display_order
                .cmp(&b.display_order)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(result)
    }

    async fn update(&self, member: TeamMember) -> TeamResult<TeamMember> {
        let mut members = self.members.write().await;
        match members.get_mut(&member.id) {
            Some(stored) => {
                *stored = member.clone();
                Ok(member)
            }
            None => Err(TeamError::NotFound(member.id)),
        }
    }

    async fn delete(&self, id: Uuid) -> TeamResult<bool> {
        let mut members = self.members.write().await;
        Ok(members.remove(&id).is_some())
    }
}

use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{TeamError, TeamResult};
use crate::models::{CreateTeamMember, TeamMember, UpdateTeamMember};
use crate::repository::TeamRepository;

#[derive(Clone)]
pub struct TeamService<R: TeamRepository> {
    repository: Arc<R>,
}

impl<R: TeamRepository> TeamService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Active members for the public page; admins also see inactive ones
    pub async fn list_members(&self, is_admin: bool) -> TeamResult<Vec<TeamMember>> {
        self.repository.list(!is_admin).await
    }

    pub async fn create_member(&self, input: CreateTeamMember) -> TeamResult<TeamMember> {
        input.validate()?;
        self.repository.create(TeamMember::new(input)).await
    }

    pub async fn update_member(&self, id: Uuid, input: UpdateTeamMember) -> TeamResult<TeamMember> {
        input.validate()?;

        let mut member = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(TeamError::NotFound(id))?;
        member.apply_update(input);

        self.repository.update(member).await
    }

    pub async fn delete_member(&self, id: Uuid) -> TeamResult<()> {
        if !self.repository.delete(id).await? {
            return Err(TeamError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryTeamRepository, MockTeamRepository};

    fn input(name: &str, order: i32, active: bool) -> CreateTeamMember {
        CreateTeamMember {
            name: name.to_string(),
            position: "Board".to_string(),
            bio: String::new(),
            photo_url: None,
            email: None,
            display_order: order,
            active,
        }
    }

    #[tokio::test]
    async fn test_public_list_is_ordered_and_active_only() {
        let service = TeamService::new(InMemoryTeamRepository::new());
        service.create_member(input("Zoe", 1, true)).await.unwrap();
        service.create_member(input("Adam", 1, true)).await.unwrap();
        service.create_member(input("Chair", 0, true)).await.unwrap();
        service.create_member(input("Alumni", 0, false)).await.unwrap();

        let public = service.list_members(false).await.unwrap();
        let names: Vec<_> = public.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Chair", "Adam", "Zoe"]);

        assert_eq!(service.list_members(true).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let mut mock = MockTeamRepository::new();
        mock.expect_get_by_id().returning(|_| Ok(None));
        mock.expect_delete().returning(|_| Ok(false));
        mock.expect_update().never();

        let service = TeamService::new(mock);
        let id = Uuid::now_v7();

        assert!(matches!(
            service.update_member(id, UpdateTeamMember::default()).await,
            Err(TeamError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_member(id).await,
            Err(TeamError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_input_rejected() {
        let mut mock = MockTeamRepository::new();
        mock.expect_create().never();

        let service = TeamService::new(mock);
        let result = service.create_member(input("", 0, true)).await;
        assert!(matches!(result, Err(TeamError::InvalidInput(_))));
    }
}

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum_helpers::JwtAuth;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{AuthResponse, LoginRequest, RegisterUser, Role, User, UserResponse};
use crate::repository::UserRepository;

/// Accounts, credentials and token issuance
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
        }
    }

    /// Create a member account and sign it in
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register_user(&self, input: RegisterUser) -> UserResult<AuthResponse> {
        input.validate()?;
        validate_password(&input.password)?;

        let password_hash = hash_password(&input.password)?;
        let user = User::new(&input.email, input.name, password_hash, Role::Member);

        let created = self.repository.create(user).await?;
        self.issue(created)
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<AuthResponse> {
        input.validate()?;

        let user = self
            .repository
            .get_by_email(&input.email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash)? {
            tracing::info!(user_id = %user.id, "Rejected login");
            return Err(UserError::InvalidCredentials);
        }

        self.issue(user)
    }

    /// Account behind a verified token subject
    pub async fn me(&self, subject: &str) -> UserResult<UserResponse> {
        let id = Uuid::parse_str(subject).map_err(|_| UserError::Unauthorized)?;

        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::Unauthorized)?;

        Ok(user.into())
    }

    /// Make sure an admin account exists for `email`.
    ///
    /// An existing account is promoted and keeps its password; otherwise a new
    /// admin is created with `password`. Running it twice is a no-op.
    #[instrument(skip(self, name, password))]
    pub async fn ensure_admin(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> UserResult<UserResponse> {
        if let Some(mut user) = self.repository.get_by_email(email).await? {
            if user.is_admin() {
                return Ok(user.into());
            }

            user.promote_to_admin();
            let updated = self.repository.update(user).await?;
            tracing::info!(user_id = %updated.id, "Promoted existing account to admin");
            return Ok(updated.into());
        }

        validate_password(password)?;
        let user = User::new(email, name.to_string(), hash_password(password)?, Role::Admin);

        let created = self.repository.create(user).await?;
        tracing::info!(user_id = %created.id, "Created admin account");
        Ok(created.into())
    }

    fn issue(&self, user: User) -> UserResult<AuthResponse> {
        let token = self
            .jwt
            .issue_token(&user.id.to_string(), &user.email, &user.name, &user.roles())
            .map_err(|e| {
                tracing::error!("Failed to create access token: {:?}", e);
                UserError::Internal("Failed to create token".to_string())
            })?;

        Ok(AuthResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt.ttl_secs(),
            user: user.into(),
        })
    }
}

// Password helpers

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

fn validate_password(password: &str) -> UserResult<()> {
    let length = password.chars().count();
    if length < 8 {
        return Err(UserError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    if length > 128 {
        return Err(UserError::Validation(
            "Password cannot exceed 128 characters".to_string(),
        ));
    }

    if !password.chars().any(|c| c.is_uppercase()) {
        return Err(UserError::Validation(
            "Password must contain at least one uppercase letter".to_string(),
        ));
    }

    if !password.chars().any(|c| c.is_lowercase()) {
        return Err(UserError::Validation(
            "Password must contain at least one lowercase letter".to_string(),
        ));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(UserError::Validation(
            "Password must contain at least one digit".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};
    use axum_helpers::JwtConfig;

    const SECRET: &str = "unit-test-secret-with-at-least-32-chars";

    fn jwt() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new(SECRET).unwrap())
    }

    fn service() -> UserService<InMemoryUserRepository> {
        UserService::new(InMemoryUserRepository::new(), jwt())
    }

    fn sign_up(email: &str) -> RegisterUser {
        RegisterUser {
            email: email.to_string(),
            name: "Ada Lovelace".to_string(),
            password: "Analytical1".to_string(),
        }
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("Secret123").is_ok());
        assert!(validate_password("Sh0rt").is_err());
        assert!(validate_password("alllowercase1").is_err());
        assert!(validate_password("ALLUPPERCASE1").is_err());
        assert!(validate_password("NoDigitsHere").is_err());
        assert!(validate_password(&format!("Aa1{}", "x".repeat(126))).is_err());
    }

    #[test]
    fn test_hash_roundtrip() {
        let hash = hash_password("Secret123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Secret123", &hash).unwrap());
        assert!(!verify_password("Secret124", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_register_issues_member_token() {
        let service = service();
        let auth = service.register_user(sign_up("Ada@Club.test")).await.unwrap();

        assert_eq!(auth.token_type, "Bearer");
        assert_eq!(auth.user.email, "ada@club.test");
        assert_eq!(auth.user.role, Role::Member);

        let claims = jwt().verify_token(&auth.token).unwrap();
        assert_eq!(claims.sub, auth.user.id.to_string());
        assert!(!claims.is_admin());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let service = service();
        service.register_user(sign_up("ada@club.test")).await.unwrap();

        let result = service.register_user(sign_up("ADA@club.test")).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_register_weak_password_never_reaches_store() {
        let mut mock = MockUserRepository::new();
        mock.expect_create().never();

        let service = UserService::new(mock, jwt());
        let mut input = sign_up("ada@club.test");
        input.password = "password".to_string();

        let result = service.register_user(input).await;
        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login() {
        let service = service();
        service.register_user(sign_up("ada@club.test")).await.unwrap();

        let ok = service
            .login(LoginRequest {
                email: "ADA@club.test".to_string(),
                password: "Analytical1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(ok.user.email, "ada@club.test");

        let wrong_password = service
            .login(LoginRequest {
                email: "ada@club.test".to_string(),
                password: "Analytical2".to_string(),
            })
            .await;
        assert!(matches!(wrong_password, Err(UserError::InvalidCredentials)));

        let unknown = service
            .login(LoginRequest {
                email: "nobody@club.test".to_string(),
                password: "Analytical1".to_string(),
            })
            .await;
        assert!(matches!(unknown, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_me() {
        let service = service();
        let auth = service.register_user(sign_up("ada@club.test")).await.unwrap();

        let me = service.me(&auth.user.id.to_string()).await.unwrap();
        assert_eq!(me, auth.user);

        assert!(matches!(service.me("not-a-uuid").await, Err(UserError::Unauthorized)));
        assert!(matches!(
            service.me(&Uuid::now_v7().to_string()).await,
            Err(UserError::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_ensure_admin_creates_once() {
        let service = service();

        let first = service
            .ensure_admin("admin@club.test", "Admin", "Sup3rSecret")
            .await
            .unwrap();
        assert_eq!(first.role, Role::Admin);

        let second = service
            .ensure_admin("Admin@club.test", "Admin", "Sup3rSecret")
            .await
            .unwrap();
        assert_eq!(second.id, first.id);
    }

    #[tokio::test]
    async fn test_ensure_admin_promotes_existing_member() {
        let service = service();
        let member = service.register_user(sign_up("ada@club.test")).await.unwrap();

        let admin = service
            .ensure_admin("ada@club.test", "Ignored", "Different1")
            .await
            .unwrap();
        assert_eq!(admin.id, member.user.id);
        assert_eq!(admin.role, Role::Admin);

        // original password still works and the new token carries the admin role
        let auth = service
            .login(LoginRequest {
                email: "ada@club.test".to_string(),
                password: "Analytical1".to_string(),
            })
            .await
            .unwrap();
        assert!(jwt().verify_token(&auth.token).unwrap().is_admin());
    }
}

//! Caller identity taken from claims that the JWT middleware placed in
//! request extensions.

use crate::auth::JwtClaims;
use crate::errors::{ErrorCode, error_response};
use axum::{extract::FromRequestParts, http::request::Parts, response::Response};
use std::convert::Infallible;

/// Anonymous callers yield `CurrentUser(None)`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<JwtClaims>);

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.0.as_ref().is_some_and(JwtClaims::is_admin)
    }

    pub fn user_id(&self) -> Option<String> {
        self.0.as_ref().map(|c| c.sub.clone())
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentUser(parts.extensions.get::<JwtClaims>().cloned()))
    }
}

/// Admin caller; 401 without a token, 403 for non-admin tokens.
#[derive(Debug, Clone)]
pub struct AdminUser(pub JwtClaims);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<JwtClaims>()
            .cloned()
            .ok_or_else(|| error_response("Authentication required", ErrorCode::Unauthorized))?;

        if !claims.is_admin() {
            tracing::info!(user_id = %claims.sub, "Admin role required");
            return Err(error_response("Admin role required", ErrorCode::Forbidden));
        }

        Ok(AdminUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};

    fn claims(roles: &[&str]) -> JwtClaims {
        JwtClaims {
            sub: "user-1".to_string(),
            email: "user@club.test".to_string(),
            name: "User".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: 0,
            iat: 0,
            jti: "jti".to_string(),
        }
    }

    fn parts_with(claims: Option<JwtClaims>) -> Parts {
        let mut request = Request::builder().uri("/").body(()).unwrap();
        if let Some(c) = claims {
            request.extensions_mut().insert(c);
        }
        request.into_parts().0
    }

    #[tokio::test]
    async fn test_current_user_anonymous() {
        let mut parts = parts_with(None);
        let user = CurrentUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(user.0.is_none());
        assert!(!user.is_admin());
    }

    #[tokio::test]
    async fn test_current_user_admin() {
        let mut parts = parts_with(Some(claims(&["admin"])));
        let user = CurrentUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(user.is_admin());
        assert_eq!(user.user_id().as_deref(), Some("user-1"));
    }

    #[tokio::test]
    async fn test_admin_user_rejections() {
        let mut anonymous = parts_with(None);
        let err = AdminUser::from_request_parts(&mut anonymous, &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);

        let mut member = parts_with(Some(claims(&["member"])));
        let err = AdminUser::from_request_parts(&mut member, &())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);

        let mut admin = parts_with(Some(claims(&["admin"])));
        assert!(AdminUser::from_request_parts(&mut admin, &()).await.is_ok());
    }
}

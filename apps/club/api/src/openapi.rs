use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    modifiers(&BearerAuth),
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Club API",
        version = "0.1.0",
        description = "Student club website backend: events and registrations, accounts, blog, team, gallery and contact form"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/auth", api = domain_users::handlers::ApiDoc),
        (path = "/events", api = domain_events::handlers::ApiDoc),
        (path = "/posts", api = domain_posts::handlers::ApiDoc),
        (path = "/team", api = domain_team::handlers::ApiDoc),
        (path = "/gallery", api = domain_gallery::handlers::ApiDoc),
        (path = "/contact", api = domain_contact::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme that admin routes refer to
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_domain_is_documented() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        for path in [
            "/auth/login",
            "/events/{id}/register",
            "/events/{id}/registrations",
            "/posts/{slug}",
            "/team/{id}",
            "/gallery/{id}",
            "/contact/{id}/resolve",
        ] {
            assert!(paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}

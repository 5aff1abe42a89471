//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:3000/docs`
//! - OpenAPI JSON: `http://localhost:3000/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::catalog::{Genre, Track, TrackRequest};
use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::ResourceId;
use crate::user_auth::service::{AuthResponse, LoginRequest, RegisterRequest};

/// Bearer JWT issued by `/login`
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Authorization: Bearer {token from /login}"))
                        .build(),
                ),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Zenestreaming API",
        version = "1.0.0",
        description = "Music streaming catalog: songs and podcast episodes, with token-protected writes.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::music::root,
        crate::gateway::handlers::health::health_check,
        crate::user_auth::handlers::register,
        crate::user_auth::handlers::login,
        crate::gateway::handlers::music::create_track,
        crate::gateway::handlers::music::list_tracks,
        crate::gateway::handlers::music::get_track,
        crate::gateway::handlers::music::update_track,
        crate::gateway::handlers::music::delete_track,
        crate::gateway::handlers::music::new_episodes,
    ),
    components(
        schemas(
            Track,
            Genre,
            TrackRequest,
            ResourceId,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Music", description = "Catalog reads (public) and writes (bearer token)"),
        (name = "Auth", description = "Registration and login"),
        (name = "System", description = "Liveness and health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi;

    #[test]
    fn test_openapi_spec_generates() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "Zenestreaming API");
        assert_eq!(spec.info.version, "1.0.0");
    }

    #[test]
    fn test_openapi_json_serializable() {
        let json_str = ApiDoc::openapi().to_json().unwrap();
        assert!(json_str.contains("Zenestreaming API"));
        assert!(json_str.contains("podcast"));
    }

    #[test]
    fn test_endpoints_registered() {
        let paths = ApiDoc::openapi().paths;
        for path in [
            "/",
            "/health",
            "/register",
            "/login",
            "/music",
            "/music/{id}",
            "/newepisodes",
        ] {
            assert!(paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_security_scheme_registered() {
        let spec = ApiDoc::openapi();
        let components = spec.components.expect("should have components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}

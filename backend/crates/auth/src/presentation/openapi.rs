//! OpenAPI document for the auth endpoints

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::dto::{LoginRequest, ProfileResponse, RegisterRequest, StatusResponse};
use crate::presentation::handlers;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::register,
        handlers::login,
        handlers::refresh,
        handlers::logout,
        handlers::profile,
    ),
    components(schemas(RegisterRequest, LoginRequest, StatusResponse, ProfileResponse)),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Registration, login and session tokens"),
        (name = "profile", description = "Endpoints behind the bearer gate"),
    )
)]
pub struct ApiDoc;

/// `Authorization: Bearer <access token>`
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub fn api_doc() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_endpoint_documented() {
        let doc = serde_json::to_value(api_doc()).unwrap();

        for (path, method) in [
            ("/api/auth/register", "post"),
            ("/api/auth/login", "post"),
            ("/api/auth/refresh", "post"),
            ("/api/auth/logout", "post"),
            ("/api/profile", "get"),
        ] {
            assert!(
                doc["paths"][path][method].is_object(),
                "{method} {path} missing"
            );
        }
    }

    #[test]
    fn test_schemas_use_wire_names() {
        let doc = serde_json::to_value(api_doc()).unwrap();
        let schemas = &doc["components"]["schemas"];

        assert!(schemas["RegisterRequest"]["properties"]["fullName"].is_object());
        assert!(schemas["ProfileResponse"]["properties"]["fullName"].is_object());
        assert!(schemas["StatusResponse"]["properties"]["status"].is_object());
    }

    #[test]
    fn test_profile_requires_bearer() {
        let doc = serde_json::to_value(api_doc()).unwrap();

        assert_eq!(
            doc["components"]["securitySchemes"]["bearer"]["scheme"],
            "bearer"
        );
        assert!(doc["paths"]["/api/profile"]["get"]["security"][0]["bearer"].is_array());
    }
}

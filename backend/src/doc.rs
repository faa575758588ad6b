//! OpenAPI document for the meal diary API.
//!
//! [`ApiDoc`] registers every handler from [`crate::inbound::http`], the
//! error schema wrappers and the `SessionCookie` security scheme. Swagger UI
//! serves it in debug builds.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "sessionId",
                "Session cookie issued by POST /users.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Daily Diet API",
        description = "Session-scoped meal diary with diet adherence metrics."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::register_user,
        crate::inbound::http::meals::create_meal,
        crate::inbound::http::meals::list_meals,
        crate::inbound::http::meals::meal_metrics,
        crate::inbound::http::meals::get_meal,
        crate::inbound::http::meals::update_meal,
        crate::inbound::http::meals::delete_meal,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "users", description = "Registration and session issue"),
        (name = "meals", description = "Meal diary for the session's user"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_has_field(schema: &RefOr<Schema>, field: &str) -> bool {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.contains_key(field),
            _ => false,
        }
    }

    #[rstest]
    fn error_schema_is_registered_with_wire_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error = schemas.get("crate.domain.Error").expect("Error schema");

        for field in ["code", "message", "traceId", "details"] {
            assert!(object_has_field(error, field), "missing {field}");
        }
    }

    #[rstest]
    #[case("/users")]
    #[case("/meals")]
    #[case("/meals/metrics")]
    #[case("/meals/{meal_id}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn session_cookie_scheme_names_the_cookie() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).expect("serialise document");
        let scheme = &json["components"]["securitySchemes"]["SessionCookie"];
        assert_eq!(scheme["in"], "cookie");
        assert_eq!(scheme["name"], "sessionId");
    }
}

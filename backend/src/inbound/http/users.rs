//! Registration handler.
//!
//! ```text
//! POST /users {"name":"Ada","email":"ada@example.com"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::RegisterUserRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_email, parse_user_name};

/// Registration request body.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserBody {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

/// Identifier of a newly created resource.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreatedBody {
    #[schema(format = "uuid")]
    pub id: String,
}

/// Register a user and start their session.
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterUserBody,
    responses(
        (status = 201, description = "User created", body = CreatedBody,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser",
    security([])
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterUserBody>,
) -> ApiResult<HttpResponse> {
    let RegisterUserBody { name, email } = payload.into_inner();
    let request = RegisterUserRequest {
        name: parse_user_name(&name)?,
        email: parse_email(&email)?,
    };

    let registered = state.registration.register(request).await?;
    session.persist_token(&registered.token)?;

    Ok(HttpResponse::Created().json(CreatedBody {
        id: registered.user_id.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use crate::inbound::http::test_utils::{SESSION_COOKIE, in_memory_state, test_session_middleware};

    fn test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(in_memory_state()))
            .wrap(test_session_middleware())
            .service(register_user)
    }

    #[actix_web::test]
    async fn registration_returns_id_and_sets_cookie() {
        let app = test::init_service(test_app()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/users")
                .set_json(json!({"name": "Ada", "email": "ada@example.com"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        assert!(
            res.response()
                .cookies()
                .any(|cookie| cookie.name() == SESSION_COOKIE)
        );
        let body: Value = test::read_body_json(res).await;
        let id = body.get("id").and_then(Value::as_str).expect("id");
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }

    #[actix_web::test]
    async fn duplicate_email_conflicts() {
        let app = test::init_service(test_app()).await;
        let register = |email: &str| {
            test::TestRequest::post()
                .uri("/users")
                .set_json(json!({"name": "Ada", "email": email}))
                .to_request()
        };

        let first = test::call_service(&app, register("ada@example.com")).await;
        let second = test::call_service(&app, register("Ada@Example.com")).await;

        assert_eq!(first.status(), StatusCode::CREATED);
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn invalid_email_is_rejected_with_field_details() {
        let app = test::init_service(test_app()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/users")
                .set_json(json!({"name": "Ada", "email": "not-an-email"}))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "email");
    }
}

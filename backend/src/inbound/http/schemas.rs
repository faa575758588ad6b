//! OpenAPI schema wrappers for domain types.
//!
//! The domain error types stay free of utoipa derives; these mirrors describe
//! their wire shape for the generated document.

use serde::Serialize;
use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// Malformed body, path parameter or field value.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Missing or unrecognised session.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// No such resource for the caller.
    #[schema(rename = "not_found")]
    NotFound,
    /// Email already registered.
    #[schema(rename = "conflict")]
    Conflict,
    /// Backing store unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = crate::domain::Error)]
pub struct ErrorSchema {
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    #[schema(example = "meal not found")]
    message: String,
    /// Request correlation id, echoed in the `trace-id` header.
    #[schema(example = "8d7c0f5e-2b1a-4c3d-9e8f-0a1b2c3d4e5f")]
    trace_id: Option<String>,
    /// Field-level context such as `{"field": "date", "code": "invalid_date"}`.
    details: Option<serde_json::Value>,
}

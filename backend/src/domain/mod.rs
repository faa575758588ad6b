//! Domain primitives, services and ports.
//!
//! Purpose: Define strongly typed entities shared by the HTTP and
//! persistence layers, plus the services that implement the driving ports.
//! Types are immutable once constructed; invariants are documented on each
//! type.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable identifier.
//! - User, UserId, UserName, EmailAddress: registered identity.
//! - SessionToken, SessionFingerprint: opaque session secret and its digest.
//! - Meal, MealId, MealDetails, MealTimestamp: diary entries.
//! - MealMetrics: adherence summary.

pub mod error;
pub mod meal;
pub mod meal_service;
pub mod metrics;
pub mod ports;
pub mod session;
pub mod session_service;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::meal::{
    MEAL_DESCRIPTION_MAX, MEAL_NAME_MAX, Meal, MealDetails, MealId, MealTimestamp,
    MealValidationError,
};
pub use self::meal_service::MealService;
pub use self::metrics::{MealMetrics, best_on_diet_streak};
pub use self::session::{SESSION_TOKEN_MAX, SessionFingerprint, SessionToken, SessionTokenError};
pub use self::session_service::UserSessionService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EMAIL_MAX, EmailAddress, USER_NAME_MAX, User, UserId, UserName, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use daily_diet::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such meal"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

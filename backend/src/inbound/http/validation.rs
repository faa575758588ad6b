//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper produces an `invalid_request` error whose `details` name the
//! offending field, e.g. `{"field": "date", "code": "invalid_date", "value": "..."}`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    EmailAddress, Error, MealId, MealTimestamp, MealValidationError, UserName,
    UserValidationError,
};

/// Field-level validation codes reported in error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldErrorCode {
    InvalidUuid,
    InvalidDate,
    InvalidName,
    InvalidDescription,
    InvalidEmail,
}

impl FieldErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidDate => "invalid_date",
            Self::InvalidName => "invalid_name",
            Self::InvalidDescription => "invalid_description",
            Self::InvalidEmail => "invalid_email",
        }
    }
}

/// Wire name of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: FieldErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn field_value_error(
    field: FieldName,
    code: FieldErrorCode,
    message: impl Into<String>,
    value: impl Into<String>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
        "value": value.into(),
    }))
}

/// Parse the `{meal_id}` path segment. Runs before any store access.
pub(crate) fn parse_meal_id(raw: &str) -> Result<MealId, Error> {
    let field = FieldName::new("mealId");
    MealId::new(raw).map_err(|_| {
        field_value_error(
            field,
            FieldErrorCode::InvalidUuid,
            "mealId must be a valid UUID",
            raw,
        )
    })
}

/// Date as sent by clients: epoch milliseconds or a date/time string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MealDateInput {
    /// Epoch milliseconds.
    Millis(i64),
    /// RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` (UTC) or `YYYY-MM-DD`.
    Text(String),
}

fn parse_date_text(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(value.with_timezone(&Utc));
    }
    if let Ok(value) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(value.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|value| value.and_utc())
}

/// Parse the `date` body field into a millisecond timestamp.
pub(crate) fn parse_meal_date(input: MealDateInput) -> Result<MealTimestamp, Error> {
    let field = FieldName::new("date");
    match input {
        MealDateInput::Millis(millis) => MealTimestamp::from_millis(millis).map_err(|err| {
            field_value_error(field, FieldErrorCode::InvalidDate, err.to_string(), millis.to_string())
        }),
        MealDateInput::Text(raw) => parse_date_text(raw.trim())
            .map(MealTimestamp::from_datetime)
            .ok_or_else(|| {
                field_value_error(
                    field,
                    FieldErrorCode::InvalidDate,
                    "date must be an ISO 8601 date or date-time, or epoch milliseconds",
                    raw,
                )
            }),
    }
}

/// Map meal validation failures onto the field that caused them.
pub(crate) fn map_meal_validation_error(error: MealValidationError) -> Error {
    let message = error.to_string();
    match error {
        MealValidationError::InvalidId => {
            field_error(FieldName::new("mealId"), FieldErrorCode::InvalidUuid, message)
        }
        MealValidationError::EmptyName | MealValidationError::NameTooLong { .. } => {
            field_error(FieldName::new("name"), FieldErrorCode::InvalidName, message)
        }
        MealValidationError::DescriptionTooLong { .. } => field_error(
            FieldName::new("description"),
            FieldErrorCode::InvalidDescription,
            message,
        ),
        MealValidationError::DateOutOfRange { .. } => {
            field_error(FieldName::new("date"), FieldErrorCode::InvalidDate, message)
        }
    }
}

/// Validate a registration name.
pub(crate) fn parse_user_name(raw: &str) -> Result<UserName, Error> {
    UserName::new(raw).map_err(|err| {
        field_error(FieldName::new("name"), FieldErrorCode::InvalidName, err.to_string())
    })
}

/// Validate a registration email.
pub(crate) fn parse_email(raw: &str) -> Result<EmailAddress, Error> {
    EmailAddress::new(raw).map_err(|err: UserValidationError| {
        field_value_error(
            FieldName::new("email"),
            FieldErrorCode::InvalidEmail,
            err.to_string(),
            raw,
        )
    })
}

//! Meal records and their validated components.
//!
//! A meal has exactly one owner, fixed at creation. Updates replace the
//! whole [`MealDetails`] value; the id and owner never change.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

use super::UserId;

/// Maximum length of a meal name, in characters.
pub const MEAL_NAME_MAX: usize = 120;
/// Maximum length of a meal description, in characters.
pub const MEAL_DESCRIPTION_MAX: usize = 2000;

/// Validation errors raised by the meal constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MealValidationError {
    /// Identifier was not a UUID.
    #[error("meal id must be a valid UUID")]
    InvalidId,
    /// Name was blank.
    #[error("name must not be empty")]
    EmptyName,
    /// Name exceeded [`MEAL_NAME_MAX`].
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    /// Description exceeded [`MEAL_DESCRIPTION_MAX`].
    #[error("description must be at most {max} characters")]
    DescriptionTooLong { max: usize },
    /// Epoch milliseconds outside the representable calendar range.
    #[error("date {millis} is outside the supported range")]
    DateOutOfRange { millis: i64 },
}

/// Server-generated meal identifier.
///
/// # Examples
/// ```
/// use daily_diet::domain::MealId;
///
/// let id = MealId::new("6e0b0b4e-9a3e-4f4a-8d0e-9a9f0d1c2b3a").expect("valid uuid");
/// assert_eq!(id.to_string(), "6e0b0b4e-9a3e-4f4a-8d0e-9a9f0d1c2b3a");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MealId(Uuid);

impl MealId {
    /// Parse an identifier received from a client.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, MealValidationError> {
        let raw = raw.as_ref();
        if raw.trim() != raw {
            return Err(MealValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| MealValidationError::InvalidId)
    }

    /// Generate a fresh identifier for a new meal.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID loaded from storage.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Point in time a meal was eaten, at millisecond precision.
///
/// Stored as signed epoch milliseconds; sub-millisecond input is truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MealTimestamp(i64);

impl MealTimestamp {
    /// Build from epoch milliseconds, rejecting values chrono cannot render.
    ///
    /// # Examples
    /// ```
    /// use daily_diet::domain::MealTimestamp;
    ///
    /// let ts = MealTimestamp::from_millis(1_700_000_000_000).expect("in range");
    /// assert_eq!(ts.to_rfc3339(), "2023-11-14T22:13:20.000Z");
    /// ```
    pub fn from_millis(millis: i64) -> Result<Self, MealValidationError> {
        DateTime::<Utc>::from_timestamp_millis(millis)
            .map(|_| Self(millis))
            .ok_or(MealValidationError::DateOutOfRange { millis })
    }

    /// Build from a UTC datetime, truncating to whole milliseconds.
    #[must_use]
    pub fn from_datetime(value: DateTime<Utc>) -> Self {
        Self(value.timestamp_millis())
    }

    /// Epoch milliseconds, as persisted.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// RFC 3339 rendering in UTC with millisecond precision.
    pub fn to_rfc3339(self) -> String {
        DateTime::<Utc>::from_timestamp_millis(self.0)
            .unwrap_or_default()
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// The four caller-controlled fields of a meal.
///
/// ## Invariants
/// - `name` is trimmed and non-empty, at most [`MEAL_NAME_MAX`] characters.
/// - `description` is at most [`MEAL_DESCRIPTION_MAX`] characters and may be
///   empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealDetails {
    name: String,
    description: String,
    is_on_diet: bool,
    date: MealTimestamp,
}

impl MealDetails {
    /// Validate caller-supplied fields.
    ///
    /// # Examples
    /// ```
    /// use daily_diet::domain::{MealDetails, MealTimestamp};
    ///
    /// let date = MealTimestamp::from_millis(0).expect("epoch");
    /// let details = MealDetails::try_new(" Salad ", "greens", true, date).expect("valid");
    /// assert_eq!(details.name(), "Salad");
    /// assert!(MealDetails::try_new("  ", "", false, date).is_err());
    /// ```
    pub fn try_new(
        name: impl AsRef<str>,
        description: impl Into<String>,
        is_on_diet: bool,
        date: MealTimestamp,
    ) -> Result<Self, MealValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(MealValidationError::EmptyName);
        }
        if name.chars().count() > MEAL_NAME_MAX {
            return Err(MealValidationError::NameTooLong {
                max: MEAL_NAME_MAX,
            });
        }
        let description = description.into();
        if description.chars().count() > MEAL_DESCRIPTION_MAX {
            return Err(MealValidationError::DescriptionTooLong {
                max: MEAL_DESCRIPTION_MAX,
            });
        }
        Ok(Self {
            name: name.to_owned(),
            description,
            is_on_diet,
            date,
        })
    }

    /// Meal name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Whether the meal complied with the diet.
    pub fn is_on_diet(&self) -> bool {
        self.is_on_diet
    }

    /// When the meal was eaten.
    pub fn date(&self) -> MealTimestamp {
        self.date
    }
}

/// A stored meal owned by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meal {
    id: MealId,
    user_id: UserId,
    details: MealDetails,
}

impl Meal {
    /// Assemble a meal from validated parts.
    pub fn new(id: MealId, user_id: UserId, details: MealDetails) -> Self {
        Self {
            id,
            user_id,
            details,
        }
    }

    /// Meal identifier.
    pub fn id(&self) -> MealId {
        self.id
    }

    /// Owning user.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Caller-controlled fields.
    pub fn details(&self) -> &MealDetails {
        &self.details
    }

    /// Return a copy with `details` replaced, keeping id and owner.
    #[must_use]
    pub fn with_details(&self, details: MealDetails) -> Self {
        Self {
            id: self.id,
            user_id: self.user_id,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn noon() -> MealTimestamp {
        MealTimestamp::from_millis(1_704_110_400_000).expect("2024-01-01T12:00Z")
    }

    #[rstest]
    #[case("")]
    #[case("not-a-uuid")]
    #[case(" 6e0b0b4e-9a3e-4f4a-8d0e-9a9f0d1c2b3a")]
    fn meal_id_rejects_malformed_input(#[case] raw: &str) {
        assert_eq!(MealId::new(raw), Err(MealValidationError::InvalidId));
    }

    #[rstest]
    fn details_trim_name_and_keep_description(noon: MealTimestamp) {
        let details = MealDetails::try_new("  Porridge ", "  oats  ", true, noon).expect("valid");
        assert_eq!(details.name(), "Porridge");
        assert_eq!(details.description(), "  oats  ");
        assert!(details.is_on_diet());
        assert_eq!(details.date(), noon);
    }

    #[rstest]
    fn details_accept_empty_description(noon: MealTimestamp) {
        let details = MealDetails::try_new("Toast", "", false, noon).expect("valid");
        assert_eq!(details.description(), "");
    }

    #[rstest]
    fn details_reject_blank_name(noon: MealTimestamp) {
        assert_eq!(
            MealDetails::try_new(" \t", "x", true, noon),
            Err(MealValidationError::EmptyName)
        );
    }

    #[rstest]
    fn details_reject_oversized_fields(noon: MealTimestamp) {
        let long_name = "n".repeat(MEAL_NAME_MAX + 1);
        assert_eq!(
            MealDetails::try_new(long_name, "", true, noon),
            Err(MealValidationError::NameTooLong { max: MEAL_NAME_MAX })
        );

        let long_description = "d".repeat(MEAL_DESCRIPTION_MAX + 1);
        assert_eq!(
            MealDetails::try_new("Soup", long_description, true, noon),
            Err(MealValidationError::DescriptionTooLong {
                max: MEAL_DESCRIPTION_MAX
            })
        );
    }

    #[rstest]
    fn timestamp_rejects_out_of_range_millis() {
        assert_eq!(
            MealTimestamp::from_millis(i64::MAX),
            Err(MealValidationError::DateOutOfRange { millis: i64::MAX })
        );
    }

    #[rstest]
    fn timestamp_truncates_sub_millisecond_precision() {
        let value = DateTime::parse_from_rfc3339("2024-01-01T00:00:00.123456Z")
            .expect("valid rfc3339")
            .with_timezone(&Utc);
        let ts = MealTimestamp::from_datetime(value);
        assert_eq!(ts.to_rfc3339(), "2024-01-01T00:00:00.123Z");
    }

    #[rstest]
    fn with_details_keeps_identity(noon: MealTimestamp) {
        let original = Meal::new(
            MealId::random(),
            UserId::random(),
            MealDetails::try_new("Eggs", "", true, noon).expect("valid"),
        );
        let replacement = MealDetails::try_new("Cake", "birthday", false, noon).expect("valid");

        let updated = original.with_details(replacement.clone());

        assert_eq!(updated.id(), original.id());
        assert_eq!(updated.user_id(), original.user_id());
        assert_eq!(updated.details(), &replacement);
    }
}

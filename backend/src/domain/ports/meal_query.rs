//! Driving port for meal reads and the adherence summary.

use async_trait::async_trait;

use crate::domain::{Error, Meal, MealId, MealMetrics, UserId};

/// Driving port for meal read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealQuery: Send + Sync {
    /// Meals owned by `user_id`, newest first.
    async fn list_meals(&self, user_id: &UserId) -> Result<Vec<Meal>, Error>;

    /// One meal owned by `user_id`; `NotFound` for missing or foreign ids.
    async fn get_meal(&self, user_id: &UserId, meal_id: &MealId) -> Result<Meal, Error>;

    /// Counts and best on-diet streak for `user_id`.
    async fn meal_metrics(&self, user_id: &UserId) -> Result<MealMetrics, Error>;
}

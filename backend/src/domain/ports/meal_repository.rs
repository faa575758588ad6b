//! Port for meal persistence.
//!
//! Every read and write is scoped by owner. Update and delete match on the
//! `(meal, owner)` pair in one store operation and report whether a row was
//! affected, so there is no window between an existence check and the
//! mutation.

use async_trait::async_trait;

use crate::domain::{Meal, MealDetails, MealId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by meal repository adapters.
    pub enum MealRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "meal repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "meal repository query failed: {message}",
    }
}

/// Port for storing and reading a user's meals.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealRepository: Send + Sync {
    /// Persist a new meal.
    async fn insert(&self, meal: &Meal) -> Result<(), MealRepositoryError>;

    /// All meals owned by `owner`, newest `date` first.
    ///
    /// Meals sharing a date come back most recently inserted first, so the
    /// order is stable across calls.
    async fn list_for_user(&self, owner: &UserId) -> Result<Vec<Meal>, MealRepositoryError>;

    /// Find one meal, only if `owner` owns it.
    async fn find_for_user(
        &self,
        meal_id: &MealId,
        owner: &UserId,
    ) -> Result<Option<Meal>, MealRepositoryError>;

    /// Replace the details of a meal owned by `owner`.
    ///
    /// Returns `false` when no such meal exists for that owner.
    async fn update_for_user(
        &self,
        meal_id: &MealId,
        owner: &UserId,
        details: &MealDetails,
    ) -> Result<bool, MealRepositoryError>;

    /// Delete a meal owned by `owner`.
    ///
    /// Returns `false` when no such meal exists for that owner.
    async fn delete_for_user(
        &self,
        meal_id: &MealId,
        owner: &UserId,
    ) -> Result<bool, MealRepositoryError>;
}

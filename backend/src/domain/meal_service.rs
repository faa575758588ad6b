//! Meal domain service.
//!
//! Implements the meal driving ports on top of a [`MealRepository`]. The
//! caller's id always scopes the store call; a meal owned by someone else is
//! reported exactly like a missing one.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    CreateMealRequest, DeleteMealRequest, MealCommand, MealQuery, MealRepository,
    MealRepositoryError, UpdateMealRequest,
};
use crate::domain::{Error, Meal, MealId, MealMetrics, UserId};

fn map_repository_error(error: MealRepositoryError) -> Error {
    match error {
        MealRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("meal repository unavailable: {message}"))
        }
        MealRepositoryError::Query { message } => {
            Error::internal(format!("meal repository error: {message}"))
        }
    }
}

fn meal_not_found(meal_id: &MealId) -> Error {
    Error::not_found(format!("meal {meal_id} not found"))
}

/// Meal service implementing [`MealCommand`] and [`MealQuery`].
#[derive(Clone)]
pub struct MealService<R> {
    meals: Arc<R>,
}

impl<R> MealService<R> {
    /// Create a service over the given meal repository.
    pub fn new(meals: Arc<R>) -> Self {
        Self { meals }
    }
}

#[async_trait]
impl<R> MealCommand for MealService<R>
where
    R: MealRepository,
{
    async fn create_meal(&self, request: CreateMealRequest) -> Result<MealId, Error> {
        let meal = Meal::new(MealId::random(), request.user_id, request.details);
        self.meals
            .insert(&meal)
            .await
            .map_err(map_repository_error)?;
        info!(meal_id = %meal.id(), user_id = %meal.user_id(), "meal created");
        Ok(meal.id())
    }

    async fn update_meal(&self, request: UpdateMealRequest) -> Result<(), Error> {
        let updated = self
            .meals
            .update_for_user(&request.meal_id, &request.user_id, &request.details)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            debug!(meal_id = %request.meal_id, user_id = %request.user_id, "update matched no meal");
            return Err(meal_not_found(&request.meal_id));
        }
        info!(meal_id = %request.meal_id, "meal updated");
        Ok(())
    }

    async fn delete_meal(&self, request: DeleteMealRequest) -> Result<(), Error> {
        let deleted = self
            .meals
            .delete_for_user(&request.meal_id, &request.user_id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            debug!(meal_id = %request.meal_id, user_id = %request.user_id, "delete matched no meal");
            return Err(meal_not_found(&request.meal_id));
        }
        info!(meal_id = %request.meal_id, "meal deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> MealQuery for MealService<R>
where
    R: MealRepository,
{
    async fn list_meals(&self, user_id: &UserId) -> Result<Vec<Meal>, Error> {
        self.meals
            .list_for_user(user_id)
            .await
            .map_err(map_repository_error)
    }

    async fn get_meal(&self, user_id: &UserId, meal_id: &MealId) -> Result<Meal, Error> {
        self.meals
            .find_for_user(meal_id, user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| meal_not_found(meal_id))
    }

    async fn meal_metrics(&self, user_id: &UserId) -> Result<MealMetrics, Error> {
        let meals = self.list_meals(user_id).await?;
        Ok(MealMetrics::from_meals(&meals))
    }
}

#[cfg(test)]
#[path = "meal_service_tests.rs"]
mod tests;

//! Driving port for meal mutations.
//!
//! Requests carry already-validated domain values; the inbound adapter owns
//! wire parsing. Each request names the acting user, and the service only
//! touches meals that user owns.

use async_trait::async_trait;

use crate::domain::{Error, MealDetails, MealId, UserId};

/// Request to record a new meal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMealRequest {
    pub user_id: UserId,
    pub details: MealDetails,
}

/// Request to replace every caller-controlled field of a meal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateMealRequest {
    pub user_id: UserId,
    pub meal_id: MealId,
    pub details: MealDetails,
}

/// Request to delete a meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteMealRequest {
    pub user_id: UserId,
    pub meal_id: MealId,
}

/// Driving port for meal write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealCommand: Send + Sync {
    /// Store a meal owned by the caller and return its new identifier.
    async fn create_meal(&self, request: CreateMealRequest) -> Result<MealId, Error>;

    /// Replace a meal's details. `NotFound` unless the caller owns it.
    async fn update_meal(&self, request: UpdateMealRequest) -> Result<(), Error>;

    /// Remove a meal permanently. `NotFound` unless the caller owns it.
    async fn delete_meal(&self, request: DeleteMealRequest) -> Result<(), Error>;
}

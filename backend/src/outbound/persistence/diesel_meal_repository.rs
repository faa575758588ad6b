//! PostgreSQL-backed `MealRepository` using Diesel.
//!
//! Update and delete filter on both `id` and `user_id` in a single statement
//! and report whether a row was touched.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MealRepository, MealRepositoryError};
use crate::domain::{Meal, MealDetails, MealId, MealTimestamp, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{MealDetailsUpdate, MealRow, NewMealRow};
use super::pool::{DbPool, PoolError};
use super::schema::meals;

/// Diesel-backed implementation of the meal repository port.
#[derive(Clone)]
pub struct DieselMealRepository {
    pool: DbPool,
}

impl DieselMealRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> MealRepositoryError {
    map_basic_pool_error(error, MealRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> MealRepositoryError {
    map_basic_diesel_error(
        error,
        MealRepositoryError::query,
        MealRepositoryError::connection,
    )
}

fn row_to_meal(row: MealRow) -> Result<Meal, MealRepositoryError> {
    let MealRow {
        id,
        user_id,
        name,
        description,
        is_on_diet,
        date,
    } = row;
    let date =
        MealTimestamp::from_millis(date).map_err(|err| MealRepositoryError::query(err.to_string()))?;
    let details = MealDetails::try_new(name, description, is_on_diet, date)
        .map_err(|err| MealRepositoryError::query(err.to_string()))?;
    Ok(Meal::new(
        MealId::from_uuid(id),
        UserId::from_uuid(user_id),
        details,
    ))
}

fn details_changeset(details: &MealDetails) -> MealDetailsUpdate<'_> {
    MealDetailsUpdate {
        name: details.name(),
        description: details.description(),
        is_on_diet: details.is_on_diet(),
        date: details.date().as_millis(),
    }
}

#[async_trait]
impl MealRepository for DieselMealRepository {
    async fn insert(&self, meal: &Meal) -> Result<(), MealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let details = meal.details();

        let row = NewMealRow {
            id: *meal.id().as_uuid(),
            user_id: *meal.user_id().as_uuid(),
            name: details.name(),
            description: details.description(),
            is_on_diet: details.is_on_diet(),
            date: details.date().as_millis(),
        };

        diesel::insert_into(meals::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_for_user(&self, owner: &UserId) -> Result<Vec<Meal>, MealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<MealRow> = meals::table
            .filter(meals::user_id.eq(owner.as_uuid()))
            .order((meals::date.desc(), meals::seq.desc()))
            .select(MealRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_meal).collect()
    }

    async fn find_for_user(
        &self,
        meal_id: &MealId,
        owner: &UserId,
    ) -> Result<Option<Meal>, MealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = meals::table
            .filter(
                meals::id
                    .eq(meal_id.as_uuid())
                    .and(meals::user_id.eq(owner.as_uuid())),
            )
            .select(MealRow::as_select())
            .first::<MealRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_meal).transpose()
    }

    async fn update_for_user(
        &self,
        meal_id: &MealId,
        owner: &UserId,
        details: &MealDetails,
    ) -> Result<bool, MealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(
            meals::table.filter(
                meals::id
                    .eq(meal_id.as_uuid())
                    .and(meals::user_id.eq(owner.as_uuid())),
            ),
        )
        .set((
            details_changeset(details),
            meals::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }

    async fn delete_for_user(
        &self,
        meal_id: &MealId,
        owner: &UserId,
    ) -> Result<bool, MealRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(
            meals::table.filter(
                meals::id
                    .eq(meal_id.as_uuid())
                    .and(meals::user_id.eq(owner.as_uuid())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }
}

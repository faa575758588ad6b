//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer; repositories convert them
//! into validated domain values.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{meals, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub session_token_hash: String,
}

/// Insertable struct for registering a user.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub session_token_hash: &'a str,
}

/// Row struct for reading from the meals table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = meals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MealRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub is_on_diet: bool,
    pub date: i64,
}

/// Insertable struct for new meals; `seq` and timestamps use column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = meals)]
pub(crate) struct NewMealRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: &'a str,
    pub description: &'a str,
    pub is_on_diet: bool,
    pub date: i64,
}

/// Changeset replacing every caller-controlled meal column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = meals)]
pub(crate) struct MealDetailsUpdate<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub is_on_diet: bool,
    pub date: i64,
}

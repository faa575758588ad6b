//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin: they translate between row structs and domain
//! types and map driver failures onto the port error enums. Row structs and
//! the schema stay private to this module.
//!
//! # Example
//!
//! ```ignore
//! use daily_diet::outbound::persistence::{DbPool, DieselMealRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/diary")).await?;
//! let meals = DieselMealRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_meal_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_meal_repository::DieselMealRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

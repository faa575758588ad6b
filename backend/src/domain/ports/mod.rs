//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters and
//! return typed errors. Driving ports are implemented by domain services and
//! return [`crate::domain::Error`] for the inbound layer to render.

mod macros;
pub(crate) use macros::define_port_error;

mod meal_command;
mod meal_query;
mod meal_repository;
mod user_registration;
mod user_repository;

pub use meal_command::{CreateMealRequest, DeleteMealRequest, MealCommand, UpdateMealRequest};
#[cfg(test)]
pub use meal_command::MockMealCommand;
pub use meal_query::MealQuery;
#[cfg(test)]
pub use meal_query::MockMealQuery;
pub use meal_repository::{MealRepository, MealRepositoryError};
#[cfg(test)]
pub use meal_repository::MockMealRepository;
pub use user_registration::{
    RegisterUserRequest, RegisteredUser, SessionValidator, UserRegistration,
};
#[cfg(test)]
pub use user_registration::{MockSessionValidator, MockUserRegistration};
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;

//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: a mutex-guarded store for development and tests.
//!
//! Adapters only translate between domain types and storage; they hold no
//! business rules beyond the owner filter each port requires.

pub mod memory;
pub mod persistence;

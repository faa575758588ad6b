//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{SessionFingerprint, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already registered this email address.
        DuplicateEmail { email: String } => "email {email} is already registered",
    }
}

/// Storage for registered users, keyed by id, email and session fingerprint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with `DuplicateEmail` when the email is taken.
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Find the user whose stored session fingerprint matches.
    async fn find_by_session(
        &self,
        fingerprint: &SessionFingerprint,
    ) -> Result<Option<User>, UserPersistenceError>;
}

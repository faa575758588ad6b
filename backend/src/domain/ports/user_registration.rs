//! Driving ports for registration and session validation.

use async_trait::async_trait;

use crate::domain::{EmailAddress, Error, SessionToken, UserId, UserName};

/// Validated registration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    pub name: UserName,
    pub email: EmailAddress,
}

/// Outcome of a registration: the new id plus the session token to hand to
/// the client. The token is not retrievable again.
#[derive(Debug, Clone)]
pub struct RegisteredUser {
    pub user_id: UserId,
    pub token: SessionToken,
}

/// Creates users and issues their single session token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Register a user. `Conflict` if the email is already in use.
    async fn register(&self, request: RegisterUserRequest) -> Result<RegisteredUser, Error>;
}

/// Gate in front of every meal operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Resolve a presented token to its owner, or fail with `Unauthorized`.
    async fn validate(&self, token: &SessionToken) -> Result<UserId, Error>;
}

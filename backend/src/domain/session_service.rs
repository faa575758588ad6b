//! Registration and session validation.
//!
//! A user receives exactly one session token, minted at registration. Only
//! its fingerprint reaches the repository, and validation hashes the
//! presented token before the lookup.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    RegisterUserRequest, RegisteredUser, SessionValidator, UserPersistenceError,
    UserRegistration, UserRepository,
};
use crate::domain::{Error, SessionToken, User, UserId};

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { email } => {
            Error::conflict(format!("email {email} is already registered"))
        }
    }
}

/// Service implementing [`UserRegistration`] and [`SessionValidator`].
#[derive(Clone)]
pub struct UserSessionService<R> {
    users: Arc<R>,
}

impl<R> UserSessionService<R> {
    /// Create a service over the given user repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R> UserRegistration for UserSessionService<R>
where
    R: UserRepository,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<RegisteredUser, Error> {
        let token = SessionToken::generate();
        let user = User::new(
            UserId::random(),
            request.name,
            request.email,
            token.fingerprint(),
        );
        self.users
            .create(&user)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %user.id(), "user registered");
        Ok(RegisteredUser {
            user_id: user.id(),
            token,
        })
    }
}

#[async_trait]
impl<R> SessionValidator for UserSessionService<R>
where
    R: UserRepository,
{
    async fn validate(&self, token: &SessionToken) -> Result<UserId, Error> {
        let user = self
            .users
            .find_by_session(&token.fingerprint())
            .await
            .map_err(|err| {
                warn!(error = %err, "session lookup failed");
                map_repository_error(err)
            })?;
        match user {
            Some(user) => Ok(user.id()),
            None => {
                debug!("session token matched no user");
                Err(Error::unauthorized("session is not valid"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUserRepository;
    use crate::domain::{EmailAddress, ErrorCode, UserName};
    use rstest::{fixture, rstest};

    #[fixture]
    fn request() -> RegisterUserRequest {
        RegisterUserRequest {
            name: UserName::new("Ada").expect("valid name"),
            email: EmailAddress::new("ada@example.com").expect("valid email"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn register_stores_fingerprint_of_issued_token(request: RegisterUserRequest) {
        let stored = Arc::new(std::sync::Mutex::new(None));
        let sink = Arc::clone(&stored);

        let mut repo = MockUserRepository::new();
        repo.expect_create().times(1).returning(move |user| {
            *sink.lock().expect("lock") = Some(user.clone());
            Ok(())
        });

        let service = UserSessionService::new(Arc::new(repo));
        let registered = service.register(request).await.expect("registration");

        let user = stored.lock().expect("lock").clone().expect("user stored");
        assert_eq!(user.id(), registered.user_id);
        assert_eq!(user.session(), &registered.token.fingerprint());
        assert_ne!(user.session().as_str(), registered.token.expose());
    }

    #[rstest]
    #[tokio::test]
    async fn register_maps_duplicate_email_to_conflict(request: RegisterUserRequest) {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .return_once(|_| Err(UserPersistenceError::duplicate_email("ada@example.com")));

        let service = UserSessionService::new(Arc::new(repo));
        let error = service.register(request).await.expect_err("duplicate");

        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn validate_returns_owner_for_known_token() {
        let token = SessionToken::generate();
        let expected_fingerprint = token.fingerprint();
        let user = User::new(
            UserId::random(),
            UserName::new("Grace").expect("valid name"),
            EmailAddress::new("grace@example.com").expect("valid email"),
            token.fingerprint(),
        );
        let user_id = user.id();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_session()
            .withf(move |fingerprint| *fingerprint == expected_fingerprint)
            .return_once(move |_| Ok(Some(user)));

        let service = UserSessionService::new(Arc::new(repo));
        let resolved = service.validate(&token).await.expect("valid session");

        assert_eq!(resolved, user_id);
    }

    #[rstest]
    #[tokio::test]
    async fn validate_rejects_unknown_token() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_session().return_once(|_| Ok(None));

        let service = UserSessionService::new(Arc::new(repo));
        let error = service
            .validate(&SessionToken::generate())
            .await
            .expect_err("unknown token");

        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn validate_maps_connection_error_to_service_unavailable() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_session()
            .return_once(|_| Err(UserPersistenceError::connection("pool timed out")));

        let service = UserSessionService::new(Arc::new(repo));
        let error = service
            .validate(&SessionToken::generate())
            .await
            .expect_err("store down");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}

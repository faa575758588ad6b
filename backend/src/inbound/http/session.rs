//! Session cookie helpers and the authenticated-user extractor.
//!
//! The private session cookie carries the opaque session token. Handlers on
//! gated routes take a [`CurrentUser`], which resolves the token through the
//! [`SessionValidator`](crate::domain::ports::SessionValidator) port before
//! the handler body runs. Handlers that also take a JSON body use
//! [`AuthenticatedJson`], which reads the body only once the session has
//! resolved, so an unauthenticated caller always sees 401.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::{Error, SessionToken, UserId};
use crate::inbound::http::state::HttpState;

pub(crate) const SESSION_TOKEN_KEY: &str = "session_token";

/// Newtype wrapper exposing token-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the session token in the cookie, replacing any previous one.
    pub fn persist_token(&self, token: &SessionToken) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(SESSION_TOKEN_KEY, token.expose())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Token held in the cookie, if present and well formed.
    pub fn session_token(&self) -> Result<Option<SessionToken>, Error> {
        let raw = self
            .0
            .get::<String>(SESSION_TOKEN_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|raw| match SessionToken::parse(raw) {
            Ok(token) => Some(token),
            Err(error) => {
                warn!(%error, "malformed session token in cookie");
                None
            }
        }))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

/// Identity of the caller on a session-gated route.
///
/// Extraction fails with `401 Unauthorized` when the cookie is missing,
/// unreadable or names no registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(UserId);

impl CurrentUser {
    /// The authenticated user's id.
    pub fn user_id(&self) -> UserId {
        self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            let token = session
                .await
                .map_err(Error::from)?
                .session_token()?
                .ok_or_else(|| Error::unauthorized("session required"))?;
            state.sessions.validate(&token).await.map(CurrentUser)
        })
    }
}

/// Authenticated caller plus a JSON body decoded after the session check.
///
/// Separate `CurrentUser` and `web::Json` extractors are polled together, so
/// a slow session lookup would let a body error answer first.
#[derive(Debug)]
pub struct AuthenticatedJson<T> {
    user: CurrentUser,
    body: T,
}

impl<T> AuthenticatedJson<T> {
    /// The authenticated user's id.
    pub fn user_id(&self) -> UserId {
        self.user.user_id()
    }

    /// Consume the extractor, returning the decoded body.
    pub fn into_inner(self) -> T {
        self.body
    }
}

impl<T> FromRequest for AuthenticatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let user = CurrentUser::from_request(req, payload);
        let req = req.clone();
        let mut payload = payload.take();
        Box::pin(async move {
            let user = user.await?;
            let body = web::Json::<T>::from_request(&req, &mut payload).await?;
            Ok(Self {
                user,
                body: body.into_inner(),
            })
        })
    }
}

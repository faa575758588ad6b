//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::{MealService, UserSessionService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::InMemoryStore;

/// Cookie name used by the production session middleware.
pub const SESSION_COOKIE: &str = "sessionId";

/// Session middleware with a fresh key and the `Secure` flag off, so plain
/// HTTP test requests round-trip the cookie.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// State wired to one shared in-memory store.
pub fn in_memory_state() -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    let sessions = Arc::new(UserSessionService::new(Arc::clone(&store)));
    let meals = Arc::new(MealService::new(store));
    HttpState::new(HttpStatePorts {
        registration: sessions.clone(),
        sessions,
        meals: meals.clone(),
        meals_query: meals,
    })
}

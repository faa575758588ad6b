//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving
//! ports, so tests can swap in mocks or the in-memory store.

use std::sync::Arc;

use crate::domain::ports::{MealCommand, MealQuery, SessionValidator, UserRegistration};

/// Parameter object bundling the port implementations.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub registration: Arc<dyn UserRegistration>,
    pub sessions: Arc<dyn SessionValidator>,
    pub meals: Arc<dyn MealCommand>,
    pub meals_query: Arc<dyn MealQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn UserRegistration>,
    pub sessions: Arc<dyn SessionValidator>,
    pub meals: Arc<dyn MealCommand>,
    pub meals_query: Arc<dyn MealQuery>,
}

impl HttpState {
    /// Build state from the port bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            registration,
            sessions,
            meals,
            meals_query,
        } = ports;
        Self {
            registration,
            sessions,
            meals,
            meals_query,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

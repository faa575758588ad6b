//! Wiring of driving ports onto the configured store.

use std::sync::Arc;

use actix_web::web;

use daily_diet::domain::ports::{MealRepository, UserRepository};
use daily_diet::domain::{MealService, UserSessionService};
use daily_diet::inbound::http::state::{HttpState, HttpStatePorts};
use daily_diet::outbound::memory::InMemoryStore;
use daily_diet::outbound::persistence::{DieselMealRepository, DieselUserRepository};

use super::ServerConfig;

fn ports_from<U, M>(users: Arc<U>, meals: Arc<M>) -> HttpStatePorts
where
    U: UserRepository + 'static,
    M: MealRepository + 'static,
{
    let sessions = Arc::new(UserSessionService::new(users));
    let meals = Arc::new(MealService::new(meals));
    HttpStatePorts {
        registration: sessions.clone(),
        sessions,
        meals: meals.clone(),
        meals_query: meals,
    }
}

/// Build handler state over PostgreSQL when a pool is configured, otherwise
/// over a fresh in-memory store shared by every worker.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => ports_from(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselMealRepository::new(pool.clone())),
        ),
        None => {
            let store = Arc::new(InMemoryStore::new());
            ports_from(Arc::clone(&store), store)
        }
    };
    web::Data::new(HttpState::new(ports))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Key;
    use daily_diet::domain::ports::{CreateMealRequest, RegisterUserRequest};
    use daily_diet::domain::{EmailAddress, MealDetails, MealTimestamp, UserName};
    use rstest::rstest;

    fn memory_config() -> ServerConfig {
        ServerConfig::new(
            Key::generate(),
            false,
            "127.0.0.1:0".parse().expect("literal address"),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn memory_ports_share_one_store() {
        let state = build_http_state(&memory_config());

        let registered = state
            .registration
            .register(RegisterUserRequest {
                name: UserName::new("Ada").expect("valid name"),
                email: EmailAddress::new("ada@example.com").expect("valid email"),
            })
            .await
            .expect("registration succeeds");
        let user_id = state
            .sessions
            .validate(&registered.token)
            .await
            .expect("token issued at registration validates");
        let date = MealTimestamp::from_millis(0).expect("epoch");
        state
            .meals
            .create_meal(CreateMealRequest {
                user_id,
                details: MealDetails::try_new("Soup", "", true, date).expect("valid"),
            })
            .await
            .expect("create succeeds");

        let meals = state
            .meals_query
            .list_meals(&user_id)
            .await
            .expect("list succeeds");
        assert_eq!(meals.len(), 1);
        assert_eq!(user_id, registered.user_id);
    }

    #[rstest]
    #[tokio::test]
    async fn each_build_starts_empty() {
        let config = memory_config();
        let first = build_http_state(&config);
        let second = build_http_state(&config);

        let registered = first
            .registration
            .register(RegisterUserRequest {
                name: UserName::new("Ada").expect("valid name"),
                email: EmailAddress::new("ada@example.com").expect("valid email"),
            })
            .await
            .expect("registration succeeds");

        assert!(second.sessions.validate(&registered.token).await.is_err());
    }
}

//! In-process store used when no database URL is configured.
//!
//! One mutex guards users and meals together, so every port call is a single
//! critical section: the owner check and the mutation in `update_for_user`
//! and `delete_for_user` cannot interleave with another request. Data is lost
//! on restart.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    MealRepository, MealRepositoryError, UserPersistenceError, UserRepository,
};
use crate::domain::{Meal, MealDetails, MealId, SessionFingerprint, User, UserId};

#[derive(Debug)]
struct StoredMeal {
    seq: u64,
    meal: Meal,
}

#[derive(Debug, Default)]
struct State {
    users: HashMap<UserId, User>,
    meals: HashMap<MealId, StoredMeal>,
    next_seq: u64,
}

/// Thread-safe in-memory implementation of both repository ports.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, String> {
        self.state
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        if state.users.values().any(|u| u.email() == user.email()) {
            return Err(UserPersistenceError::duplicate_email(user.email().as_ref()));
        }
        if state.users.values().any(|u| u.session() == user.session()) {
            return Err(UserPersistenceError::query("session fingerprint collision"));
        }
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_session(
        &self,
        fingerprint: &SessionFingerprint,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state
            .users
            .values()
            .find(|user| user.session() == fingerprint)
            .cloned())
    }
}

#[async_trait]
impl MealRepository for InMemoryStore {
    async fn insert(&self, meal: &Meal) -> Result<(), MealRepositoryError> {
        let mut state = self.lock().map_err(MealRepositoryError::query)?;
        state.next_seq += 1;
        let seq = state.next_seq;
        state.meals.insert(
            meal.id(),
            StoredMeal {
                seq,
                meal: meal.clone(),
            },
        );
        Ok(())
    }

    async fn list_for_user(&self, owner: &UserId) -> Result<Vec<Meal>, MealRepositoryError> {
        let state = self.lock().map_err(MealRepositoryError::query)?;
        let mut owned: Vec<&StoredMeal> = state
            .meals
            .values()
            .filter(|stored| stored.meal.user_id() == *owner)
            .collect();
        owned.sort_by(|a, b| {
            b.meal
                .details()
                .date()
                .cmp(&a.meal.details().date())
                .then(b.seq.cmp(&a.seq))
        });
        Ok(owned.into_iter().map(|stored| stored.meal.clone()).collect())
    }

    async fn find_for_user(
        &self,
        meal_id: &MealId,
        owner: &UserId,
    ) -> Result<Option<Meal>, MealRepositoryError> {
        let state = self.lock().map_err(MealRepositoryError::query)?;
        Ok(state
            .meals
            .get(meal_id)
            .filter(|stored| stored.meal.user_id() == *owner)
            .map(|stored| stored.meal.clone()))
    }

    async fn update_for_user(
        &self,
        meal_id: &MealId,
        owner: &UserId,
        details: &MealDetails,
    ) -> Result<bool, MealRepositoryError> {
        let mut state = self.lock().map_err(MealRepositoryError::query)?;
        match state.meals.get_mut(meal_id) {
            Some(stored) if stored.meal.user_id() == *owner => {
                stored.meal = stored.meal.with_details(details.clone());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_for_user(
        &self,
        meal_id: &MealId,
        owner: &UserId,
    ) -> Result<bool, MealRepositoryError> {
        let mut state = self.lock().map_err(MealRepositoryError::query)?;
        let owned = state
            .meals
            .get(meal_id)
            .is_some_and(|stored| stored.meal.user_id() == *owner);
        if owned {
            state.meals.remove(meal_id);
        }
        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmailAddress, MealTimestamp, SessionToken, UserName};
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryStore {
        InMemoryStore::new()
    }

    fn user(email: &str) -> User {
        User::new(
            UserId::random(),
            UserName::new("Someone").expect("valid name"),
            EmailAddress::new(email).expect("valid email"),
            SessionToken::generate().fingerprint(),
        )
    }

    fn meal(owner: UserId, name: &str, date_ms: i64, on_diet: bool) -> Meal {
        let date = MealTimestamp::from_millis(date_ms).expect("in range");
        let details = MealDetails::try_new(name, "", on_diet, date).expect("valid details");
        Meal::new(MealId::random(), owner, details)
    }

    fn names(meals: &[Meal]) -> Vec<&str> {
        meals.iter().map(|m| m.details().name()).collect()
    }

    #[rstest]
    #[tokio::test]
    async fn users_are_found_by_session_fingerprint(store: InMemoryStore) {
        let ada = user("ada@example.com");
        store.create(&ada).await.expect("create");

        let found = store
            .find_by_session(ada.session())
            .await
            .expect("lookup");
        let missing = store
            .find_by_session(&SessionToken::generate().fingerprint())
            .await
            .expect("lookup");

        assert_eq!(found, Some(ada));
        assert_eq!(missing, None);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_rejected(store: InMemoryStore) {
        store.create(&user("ada@example.com")).await.expect("first");

        let error = store
            .create(&user("ADA@example.com"))
            .await
            .expect_err("duplicate");

        assert!(matches!(error, UserPersistenceError::DuplicateEmail { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn listing_orders_by_date_then_insertion(store: InMemoryStore) {
        let owner = UserId::random();
        for entry in [
            meal(owner, "early", 1_000, true),
            meal(owner, "tie-first", 5_000, true),
            meal(owner, "late", 9_000, false),
            meal(owner, "tie-second", 5_000, false),
        ] {
            store.insert(&entry).await.expect("insert");
        }
        store
            .insert(&meal(UserId::random(), "foreign", 7_000, true))
            .await
            .expect("insert");

        let listed = store.list_for_user(&owner).await.expect("list");
        let again = store.list_for_user(&owner).await.expect("list");

        assert_eq!(
            names(&listed),
            vec!["late", "tie-second", "tie-first", "early"]
        );
        assert_eq!(listed, again);
    }

    #[rstest]
    #[tokio::test]
    async fn foreign_meals_are_invisible_and_immutable(store: InMemoryStore) {
        let owner = UserId::random();
        let intruder = UserId::random();
        let stored = meal(owner, "private", 1_000, true);
        store.insert(&stored).await.expect("insert");
        let replacement = MealDetails::try_new(
            "hijacked",
            "",
            false,
            MealTimestamp::from_millis(0).expect("epoch"),
        )
        .expect("valid");

        assert_eq!(
            store
                .find_for_user(&stored.id(), &intruder)
                .await
                .expect("find"),
            None
        );
        assert!(
            !store
                .update_for_user(&stored.id(), &intruder, &replacement)
                .await
                .expect("update")
        );
        assert!(
            !store
                .delete_for_user(&stored.id(), &intruder)
                .await
                .expect("delete")
        );
        assert_eq!(
            store
                .find_for_user(&stored.id(), &owner)
                .await
                .expect("find"),
            Some(stored)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn update_replaces_details_and_delete_removes(store: InMemoryStore) {
        let owner = UserId::random();
        let stored = meal(owner, "draft", 1_000, true);
        store.insert(&stored).await.expect("insert");
        let replacement = MealDetails::try_new(
            "final",
            "edited",
            false,
            MealTimestamp::from_millis(2_000).expect("in range"),
        )
        .expect("valid");

        assert!(
            store
                .update_for_user(&stored.id(), &owner, &replacement)
                .await
                .expect("update")
        );
        let updated = store
            .find_for_user(&stored.id(), &owner)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(updated.details(), &replacement);
        assert_eq!(updated.id(), stored.id());

        assert!(
            store
                .delete_for_user(&stored.id(), &owner)
                .await
                .expect("delete")
        );
        assert!(
            !store
                .delete_for_user(&stored.id(), &owner)
                .await
                .expect("second delete")
        );
    }
}

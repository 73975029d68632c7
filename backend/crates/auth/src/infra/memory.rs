//! In-Memory Repository Implementation
//!
//! Process-local credential store for tests and `DATABASE_URL=memory`
//! development runs. Contents are lost on restart.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entity::credential::{Credential, NewCredential};
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct MemoryState {
    last_id: i64,
    by_id: HashMap<i64, Credential>,
    by_email: HashMap<String, i64>,
}

/// Cloning shares the underlying map
#[derive(Clone, Default)]
pub struct InMemoryCredentialRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl CredentialRepository for InMemoryCredentialRepository {
    async fn create(&self, credential: &NewCredential) -> AuthResult<UserId> {
        let mut state = self.state.write().await;

        // Checked under the write lock, so concurrent creates cannot both win
        if state.by_email.contains_key(credential.email.as_str()) {
            return Err(AuthError::EmailTaken);
        }

        state.last_id += 1;
        let user_id = UserId::from_raw(state.last_id);
        let stored = credential.clone().into_credential(user_id, Utc::now());

        state
            .by_email
            .insert(credential.email.as_str().to_string(), user_id.get());
        state.by_id.insert(user_id.get(), stored);

        Ok(user_id)
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Credential>> {
        let state = self.state.read().await;
        Ok(state
            .by_email
            .get(email.as_str())
            .and_then(|id| state.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<Credential>> {
        Ok(self.state.read().await.by_id.get(&user_id.get()).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.state.read().await.by_email.contains_key(email.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{full_name::FullName, user_password::UserPassword};

    fn new_credential(email: &str) -> NewCredential {
        NewCredential {
            email: Email::new(email).unwrap(),
            password: UserPassword::from_db("$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaA"),
            full_name: FullName::new("Ana").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_serial_ids() {
        let repo = InMemoryCredentialRepository::new();
        let a = repo.create(&new_credential("a@x.com")).await.unwrap();
        let b = repo.create(&new_credential("b@x.com")).await.unwrap();

        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 2);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_taken() {
        let repo = InMemoryCredentialRepository::new();
        repo.create(&new_credential("a@x.com")).await.unwrap();

        let again = repo.create(&new_credential("A@X.com")).await;
        assert!(matches!(again, Err(AuthError::EmailTaken)));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_lookups() {
        let repo = InMemoryCredentialRepository::new();
        assert!(repo.is_empty().await);
        let id = repo.create(&new_credential("a@x.com")).await.unwrap();
        let email = Email::new("a@x.com").unwrap();

        let found = repo.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(found.user_id, id);
        assert_eq!(found.full_name.as_str(), "Ana");

        assert!(repo.find_by_id(id).await.unwrap().is_some());
        assert!(repo.find_by_id(UserId::from_raw(99)).await.unwrap().is_none());
        assert!(repo.exists_by_email(&email).await.unwrap());
        assert!(
            !repo
                .exists_by_email(&Email::new("b@x.com").unwrap())
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = InMemoryCredentialRepository::new();
        let clone = repo.clone();
        repo.create(&new_credential("a@x.com")).await.unwrap();
        assert_eq!(clone.len().await, 1);
    }
}

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::domain::account::models::User;
use crate::domain::account::models::UserId;
use crate::domain::account::ports::UserRepository;

/// Process-local user store with the same uniqueness rules as the Postgres table.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn email_taken(users: &HashMap<UserId, User>, user: &User) -> bool {
    users
        .values()
        .any(|other| other.id != user.id && other.email == user.email)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AccountError> {
        let mut users = self.users.write().await;
        if email_taken(&users, &user) || users.contains_key(&user.id) {
            return Err(AccountError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, AccountError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(AccountError::NotFound(user.id.to_string()));
        }
        if email_taken(&users, &user) {
            return Err(AccountError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }
}

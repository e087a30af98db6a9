use super::{DuplicateExternalIdError, IUserRepo};
use crate::repos::shared::inmemory_repo::*;
use pillbox_domain::{User, ID};

pub struct InMemoryUserRepo {
    users: std::sync::Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.external_id == user.external_id) {
            return Err(DuplicateExternalIdError(user.external_id.clone()).into());
        }
        users.push(user.clone());
        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        save(user, &self.users);
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        find(user_id, &self.users)
    }

    async fn find_by_external_id(&self, external_id: &str) -> Option<User> {
        find_by(&self.users, |u| u.external_id == external_id)
            .into_iter()
            .next()
    }
}

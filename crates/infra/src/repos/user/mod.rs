mod inmemory;
mod mongo;

pub use inmemory::InMemoryUserRepo;
pub use mongo::MongoUserRepo;
use pillbox_domain::{User, ID};
use thiserror::Error;

/// Returned by `IUserRepo::insert` when the external id is already taken
#[derive(Error, Debug)]
#[error("A user with the external id: `{0}` already exists")]
pub struct DuplicateExternalIdError(pub String);

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    /// Fails with `DuplicateExternalIdError` when a `User` with the same
    /// external id is stored
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn save(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    /// Finds the `User` provisioned for the given token subject
    async fn find_by_external_id(&self, external_id: &str) -> Option<User>;
}

#[cfg(test)]
mod tests {
    use super::DuplicateExternalIdError;
    use crate::PillboxContext;
    use pillbox_domain::User;

    #[tokio::test]
    async fn it_rejects_duplicate_external_ids() {
        let ctx = PillboxContext::create_inmemory();
        let user = User::new("google|123".into(), 0);
        ctx.repos.users.insert(&user).await.expect("To insert user");

        let err = ctx
            .repos
            .users
            .insert(&User::new("google|123".into(), 10))
            .await
            .expect_err("To reject second user");
        assert!(err.downcast_ref::<DuplicateExternalIdError>().is_some());

        let found = ctx
            .repos
            .users
            .find_by_external_id("google|123")
            .await
            .expect("To find user");
        assert_eq!(found.id, user.id);
        assert!(ctx
            .repos
            .users
            .insert(&User::new("google|456".into(), 10))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn it_finds_users_by_external_id() {
        let ctx = PillboxContext::create_inmemory();
        let mut user = User::new("google-oauth2|123".into(), 0);
        ctx.repos.users.insert(&user).await.expect("To insert user");

        let found = ctx
            .repos
            .users
            .find_by_external_id("google-oauth2|123")
            .await
            .expect("To find user");
        assert_eq!(found.id, user.id);
        assert!(ctx.repos.users.find_by_external_id("other").await.is_none());

        user.name = "Priya".into();
        ctx.repos.users.save(&user).await.expect("To save user");
        let found = ctx.repos.users.find(&user.id).await.expect("To find user");
        assert_eq!(found.name, "Priya");
    }
}

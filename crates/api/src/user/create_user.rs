use crate::error::PillboxError;
use crate::shared::{auth::Claims, usecase::UseCase};
use pillbox_domain::User;
use pillbox_infra::{DuplicateExternalIdError, PillboxContext};

/// Provisions the `User` of a verified token subject
#[derive(Debug)]
pub struct CreateUserUseCase {
    pub claims: Claims,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
    UserAlreadyExists,
}

impl From<UseCaseError> for PillboxError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
            UseCaseError::UserAlreadyExists => {
                Self::Conflict("A user for the token subject already exists".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateUserUseCase {
    type Response = User;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateUser";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        if ctx
            .repos
            .users
            .find_by_external_id(&self.claims.sub)
            .await
            .is_some()
        {
            return Err(UseCaseError::UserAlreadyExists);
        }

        let mut user = User::new(self.claims.sub.clone(), ctx.sys.get_timestamp_millis());
        if let Some(name) = self.claims.name.as_ref().filter(|n| !n.trim().is_empty()) {
            user.name = name.clone();
        }
        user.email = self.claims.email.clone();
        user.avatar = self.claims.picture.clone();

        match ctx.repos.users.insert(&user).await {
            Ok(_) => Ok(user),
            // Provisioned by a concurrent request after the lookup above
            Err(e) if e.downcast_ref::<DuplicateExternalIdError>().is_some() => {
                Err(UseCaseError::UserAlreadyExists)
            }
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}

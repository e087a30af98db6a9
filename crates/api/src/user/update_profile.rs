use crate::shared::usecase::{execute, UseCase};
use crate::{error::PillboxError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use pillbox_api_structs::update_profile::*;
use pillbox_domain::User;
use pillbox_infra::PillboxContext;

const MAX_NAME_LEN: usize = 100;

pub async fn update_profile_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateProfileUseCase {
        user,
        name: body.name,
        phone: body.phone,
        avatar: body.avatar,
        timezone: body.timezone,
    };

    execute(usecase, &ctx)
        .await
        .map(|user| HttpResponse::Ok().json(APIResponse::new(user)))
        .map_err(PillboxError::from)
}

#[derive(Debug)]
pub struct UpdateProfileUseCase {
    pub user: User,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidName,
    InvalidTimezone(String),
    StorageError,
}

impl From<UseCaseError> for PillboxError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidName => {
                Self::BadClientData("The name must be between 1 and 100 characters".into())
            }
            UseCaseError::InvalidTimezone(tz) => {
                Self::BadClientData(format!("Timezone: `{}` is not a valid IANA timezone", tz))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateProfileUseCase {
    type Response = User;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateProfile";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        let mut user = self.user.clone();

        if let Some(name) = &self.name {
            let name = name.trim();
            if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
                return Err(UseCaseError::InvalidName);
            }
            user.name = name.to_string();
        }
        if let Some(timezone) = &self.timezone {
            if !user.set_timezone(timezone) {
                return Err(UseCaseError::InvalidTimezone(timezone.clone()));
            }
        }
        if let Some(phone) = &self.phone {
            user.phone = Some(phone.clone()).filter(|p| !p.is_empty());
        }
        if let Some(avatar) = &self.avatar {
            user.avatar = Some(avatar.clone()).filter(|a| !a.is_empty());
        }

        ctx.repos
            .users
            .save(&user)
            .await
            .map(|_| user)
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    async fn setup() -> (PillboxContext, User) {
        let ctx = PillboxContext::create_inmemory();
        let user = User::new("google|1".into(), 0);
        ctx.repos.users.insert(&user).await.unwrap();
        (ctx, user)
    }

    fn new_usecase(user: User) -> UpdateProfileUseCase {
        UpdateProfileUseCase {
            user,
            name: None,
            phone: None,
            avatar: None,
            timezone: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn merges_given_fields() {
        let (ctx, user) = setup().await;
        let mut usecase = UpdateProfileUseCase {
            name: Some(" Priya ".into()),
            timezone: Some("Asia/Kolkata".into()),
            ..new_usecase(user.clone())
        };

        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.name, "Priya");
        assert_eq!(res.timezone.name(), "Asia/Kolkata");
        assert_eq!(res.email, user.email);

        let stored = ctx.repos.users.find(&user.id).await.unwrap();
        assert_eq!(stored.name, "Priya");
    }

    #[actix_web::main]
    #[test]
    async fn rejects_unknown_timezone() {
        let (ctx, user) = setup().await;
        let mut usecase = UpdateProfileUseCase {
            timezone: Some("Mars/Olympus".into()),
            ..new_usecase(user)
        };

        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidTimezone("Mars/Olympus".into())
        );
    }

    #[actix_web::main]
    #[test]
    async fn rejects_empty_name() {
        let (ctx, user) = setup().await;
        let mut usecase = UpdateProfileUseCase {
            name: Some("  ".into()),
            ..new_usecase(user)
        };

        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidName
        );
    }
}

use crate::error::PillboxError;
use crate::shared::{
    auth::{create_user_if_not_exists, decode_token},
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use pillbox_api_structs::google_login::*;
use pillbox_domain::User;
use pillbox_infra::PillboxContext;

pub async fn google_login_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let usecase = GoogleLoginUseCase {
        id_token: body.0.id_token.unwrap_or_default(),
    };

    execute(usecase, &ctx)
        .await
        .map(|(user, created)| HttpResponse::Ok().json(APIResponse::new(user, created)))
        .map_err(PillboxError::from)
}

/// Exchanges an identity token for the `User` it belongs to
#[derive(Debug)]
pub struct GoogleLoginUseCase {
    pub id_token: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    MissingToken,
    InvalidToken(String),
    Provisioning(PillboxError),
}

impl From<UseCaseError> for PillboxError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingToken => Self::BadClientData("ID token required".into()),
            UseCaseError::InvalidToken(e) => {
                Self::Unauthorized(format!("Authentication failed: {}", e))
            }
            UseCaseError::Provisioning(e) => e,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GoogleLoginUseCase {
    type Response = (User, bool);
    type Error = UseCaseError;

    const NAME: &'static str = "GoogleLogin";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        let token = self.id_token.trim();
        if token.is_empty() {
            return Err(UseCaseError::MissingToken);
        }

        let claims = decode_token(&ctx.config.jwt_secret, token)
            .map_err(|e| UseCaseError::InvalidToken(e.to_string()))?;

        create_user_if_not_exists(&claims, ctx)
            .await
            .map_err(UseCaseError::Provisioning)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::auth::test_helpers::get_token;

    fn setup_context() -> PillboxContext {
        let mut ctx = PillboxContext::create_inmemory();
        ctx.config.jwt_secret = "secret".into();
        ctx
    }

    #[actix_web::main]
    #[test]
    async fn creates_user_on_first_login_only() {
        let ctx = setup_context();
        let token = get_token("secret", "google|99", false);

        let mut usecase = GoogleLoginUseCase {
            id_token: token.clone(),
        };
        let (user, created) = usecase.execute(&ctx).await.unwrap();
        assert!(created);

        let mut usecase = GoogleLoginUseCase { id_token: token };
        let (same_user, created) = usecase.execute(&ctx).await.unwrap();
        assert!(!created);
        assert_eq!(same_user.id, user.id);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_missing_and_invalid_tokens() {
        let ctx = setup_context();

        let mut usecase = GoogleLoginUseCase {
            id_token: " ".into(),
        };
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::MissingToken)
        ));

        let mut usecase = GoogleLoginUseCase {
            id_token: get_token("wrong", "google|99", false),
        };
        let err = usecase.execute(&ctx).await.unwrap_err();
        assert!(matches!(
            PillboxError::from(err),
            PillboxError::Unauthorized(_)
        ));
    }
}

use super::{decode_token, parse_authtoken_header, Claims};
use crate::error::PillboxError;
use crate::shared::usecase::execute;
use crate::user::create_user::{CreateUserUseCase, UseCaseError};
use actix_web::HttpRequest;
use pillbox_domain::User;
use pillbox_infra::PillboxContext;

/// Finds the `User` of the token subject, provisioning it on first sight.
/// The flag is true when the `User` was created.
pub async fn create_user_if_not_exists(
    claims: &Claims,
    ctx: &PillboxContext,
) -> Result<(User, bool), PillboxError> {
    if let Some(user) = ctx.repos.users.find_by_external_id(&claims.sub).await {
        return Ok((user, false));
    }

    let usecase = CreateUserUseCase {
        claims: claims.clone(),
    };
    match execute(usecase, ctx).await {
        Ok(user) => Ok((user, true)),
        // Created by a concurrent request
        Err(UseCaseError::UserAlreadyExists) => ctx
            .repos
            .users
            .find_by_external_id(&claims.sub)
            .await
            .map(|user| (user, false))
            .ok_or(PillboxError::InternalError),
        Err(e) => Err(e.into()),
    }
}

fn get_token(req: &HttpRequest) -> Result<&str, PillboxError> {
    match req.headers().get("authorization") {
        Some(token) => match token.to_str() {
            Ok(token) => Ok(parse_authtoken_header(token)),
            Err(_) => Err(PillboxError::Unauthorized(
                "Malformed authorization header".into(),
            )),
        },
        None => Err(PillboxError::Unauthorized(
            "Unable to find a bearer token in the authorization header".into(),
        )),
    }
}

/// Authenticates the `User` making the request
pub async fn protect_route(req: &HttpRequest, ctx: &PillboxContext) -> Result<User, PillboxError> {
    let token = get_token(req)?;
    let claims = decode_token(&ctx.config.jwt_secret, token)
        .map_err(|e| PillboxError::Unauthorized(format!("Invalid token: {}", e)))?;

    create_user_if_not_exists(&claims, ctx)
        .await
        .map(|(user, _)| user)
}

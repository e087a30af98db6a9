use crate::shared::usecase::{execute, UseCase};
use crate::{error::PillboxError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use pillbox_api_structs::get_medicines::*;
use pillbox_domain::{Medicine, User};
use pillbox_infra::PillboxContext;

pub async fn get_medicines_controller(
    http_req: HttpRequest,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetMedicinesUseCase { user };

    execute(usecase, &ctx)
        .await
        .map(|medicines| HttpResponse::Ok().json(APIResponse::new(medicines)))
        .map_err(PillboxError::from)
}

/// The active `Medicine`s of the `User`, oldest first
#[derive(Debug)]
pub struct GetMedicinesUseCase {
    pub user: User,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for PillboxError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetMedicinesUseCase {
    type Response = Vec<Medicine>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetMedicines";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx.repos.medicines.find_by_user(&self.user.id).await)
    }
}

use crate::shared::usecase::{execute, UseCase};
use crate::{error::PillboxError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use pillbox_api_structs::get_medicine::*;
use pillbox_domain::{Medicine, User, ID};
use pillbox_infra::PillboxContext;

pub async fn get_medicine_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetMedicineUseCase {
        user,
        medicine_id: path.medicine_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|medicine| HttpResponse::Ok().json(APIResponse::new(medicine)))
        .map_err(PillboxError::from)
}

#[derive(Debug)]
pub struct GetMedicineUseCase {
    pub user: User,
    pub medicine_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for PillboxError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The medicine with id: {}, was not found.", id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetMedicineUseCase {
    type Response = Medicine;
    type Error = UseCaseError;

    const NAME: &'static str = "GetMedicine";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        find_owned_medicine(&self.user, &self.medicine_id, ctx)
            .await
            .ok_or(UseCaseError::NotFound(self.medicine_id))
    }
}

/// The active `Medicine` with the given id if it belongs to the `User`
pub async fn find_owned_medicine(
    user: &User,
    medicine_id: &ID,
    ctx: &PillboxContext,
) -> Option<Medicine> {
    ctx.repos
        .medicines
        .find(medicine_id)
        .await
        .filter(|m| m.user_id == user.id && m.active)
}

use super::get_medicine::find_owned_medicine;
use crate::shared::usecase::{execute, UseCase};
use crate::{error::PillboxError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use pillbox_api_structs::delete_medicine::*;
use pillbox_domain::{Medicine, User, ID};
use pillbox_infra::PillboxContext;

pub async fn delete_medicine_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteMedicineUseCase {
        user,
        medicine_id: path.medicine_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|medicine| HttpResponse::Ok().json(APIResponse::new(medicine)))
        .map_err(PillboxError::from)
}

/// Deactivates the `Medicine`. Its `Reminder`s are kept but are no
/// longer part of any read.
#[derive(Debug)]
pub struct DeleteMedicineUseCase {
    pub user: User,
    pub medicine_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for PillboxError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The medicine with id: {}, was not found.", id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteMedicineUseCase {
    type Response = Medicine;
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteMedicine";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        let mut medicine = find_owned_medicine(&self.user, &self.medicine_id, ctx)
            .await
            .ok_or(UseCaseError::NotFound(self.medicine_id))?;
        let now = ctx.sys.get_timestamp_millis();

        match ctx.repos.medicines.soft_delete(&medicine.id, now).await {
            Ok(true) => {
                medicine.active = false;
                medicine.updated = now;
                Ok(medicine)
            }
            Ok(false) => Err(UseCaseError::NotFound(self.medicine_id)),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pillbox_domain::{Dosage, DosageUnit, Frequency, MedicineType};

    #[actix_web::main]
    #[test]
    async fn deactivates_medicine_once() {
        let ctx = PillboxContext::create_inmemory();
        let user = User::new("google|1".into(), 0);
        let medicine = Medicine::new(
            user.id,
            "Amoxicillin".into(),
            Dosage {
                amount: "250".into(),
                unit: DosageUnit::Milligram,
            },
            MedicineType::Capsule,
            Frequency::ThreeTimesDaily,
            0,
        );
        ctx.repos.medicines.insert(&medicine).await.unwrap();

        let mut usecase = DeleteMedicineUseCase {
            user: user.clone(),
            medicine_id: medicine.id,
        };
        let deleted = usecase.execute(&ctx).await.unwrap();
        assert!(!deleted.active);
        assert!(ctx.repos.medicines.find_by_user(&user.id).await.is_empty());
        // Kept in the store
        assert!(ctx.repos.medicines.find(&medicine.id).await.is_some());

        let mut usecase = DeleteMedicineUseCase {
            user,
            medicine_id: medicine.id,
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(medicine.id)
        );
    }
}

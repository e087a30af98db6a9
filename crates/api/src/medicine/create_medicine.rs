use super::subscribers::ExpandRemindersOnMedicineCreated;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use crate::{error::PillboxError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use pillbox_api_structs::create_medicine::*;
use pillbox_domain::{
    Dosage, Frequency, Medicine, MedicineType, MedicineValidationError, Priority, ReminderTime,
    User,
};
use pillbox_infra::PillboxContext;

pub async fn create_medicine_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateMedicineUseCase {
        user,
        name: body.name,
        dosage: body.dosage,
        medicine_type: body.medicine_type,
        frequency: body.frequency.unwrap_or_default(),
        instructions: body.instructions,
        reminder_times: body.reminder_times.unwrap_or_default(),
        priority: body.priority.unwrap_or_default(),
        stock_quantity: body.stock_quantity,
    };

    execute(usecase, &ctx)
        .await
        .map(|medicine| HttpResponse::Created().json(APIResponse::new(medicine)))
        .map_err(PillboxError::from)
}

#[derive(Debug)]
pub struct CreateMedicineUseCase {
    pub user: User,
    pub name: String,
    pub dosage: Dosage,
    pub medicine_type: MedicineType,
    pub frequency: Frequency,
    pub instructions: Option<String>,
    /// Empty means the default times of the `frequency`
    pub reminder_times: Vec<ReminderTime>,
    pub priority: Priority,
    pub stock_quantity: Option<u32>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidMedicine(MedicineValidationError),
    StorageError,
}

impl From<UseCaseError> for PillboxError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidMedicine(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateMedicineUseCase {
    type Response = Medicine;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateMedicine";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        let mut medicine = Medicine::new(
            self.user.id,
            self.name.trim().to_string(),
            self.dosage.clone(),
            self.medicine_type,
            self.frequency,
            ctx.sys.get_timestamp_millis(),
        );
        medicine.instructions = self
            .instructions
            .as_ref()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty());
        medicine.set_reminder_times(self.reminder_times.clone());
        medicine.priority = self.priority;
        medicine.stock_quantity = self.stock_quantity;

        medicine.validate().map_err(UseCaseError::InvalidMedicine)?;

        ctx.repos
            .medicines
            .insert(&medicine)
            .await
            .map(|_| medicine)
            .map_err(|_| UseCaseError::StorageError)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ExpandRemindersOnMedicineCreated)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pillbox_domain::DosageUnit;

    fn new_usecase(user: User) -> CreateMedicineUseCase {
        CreateMedicineUseCase {
            user,
            name: " Vitamin D3 ".into(),
            dosage: Dosage {
                amount: "2000".into(),
                unit: DosageUnit::InternationalUnit,
            },
            medicine_type: MedicineType::Tablet,
            frequency: Frequency::TwiceDaily,
            instructions: Some("  ".into()),
            reminder_times: Vec::new(),
            priority: Priority::High,
            stock_quantity: Some(30),
        }
    }

    #[actix_web::main]
    #[test]
    async fn creates_medicine_with_default_times() {
        let ctx = PillboxContext::create_inmemory();
        let user = User::new("google|1".into(), 0);

        let mut usecase = new_usecase(user.clone());
        let medicine = usecase.execute(&ctx).await.unwrap();
        assert_eq!(medicine.name, "Vitamin D3");
        assert_eq!(medicine.instructions, None);
        assert_eq!(
            medicine.reminder_times,
            vec![
                ReminderTime::new(9, 0).unwrap(),
                ReminderTime::new(21, 0).unwrap()
            ]
        );
        assert!(medicine.active);
        assert_eq!(medicine.adherence_rate, 0);

        let stored = ctx.repos.medicines.find_by_user(&user.id).await;
        assert_eq!(stored.len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn expands_reminders_after_creation() {
        let ctx = PillboxContext::create_inmemory();
        let user = User::new("google|1".into(), 0);
        ctx.repos.users.insert(&user).await.unwrap();

        let medicine = execute(new_usecase(user), &ctx).await.unwrap();
        let reminders = ctx.repos.reminders.find_by_medicine(&medicine.id).await;
        // Doses of today before creation are not materialised
        assert!(reminders.len() >= 14 && reminders.len() <= 16);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_medicine() {
        let ctx = PillboxContext::create_inmemory();
        let user = User::new("google|1".into(), 0);

        let mut usecase = CreateMedicineUseCase {
            stock_quantity: Some(5000),
            ..new_usecase(user.clone())
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidMedicine(MedicineValidationError::InvalidStockQuantity)
        );

        let mut usecase = CreateMedicineUseCase {
            name: "X".into(),
            ..new_usecase(user)
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidMedicine(MedicineValidationError::InvalidName)
        );
    }
}

use super::get_medicine::find_owned_medicine;
use super::subscribers::ExpandRemindersOnMedicineUpdated;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use crate::{error::PillboxError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use pillbox_api_structs::update_medicine::*;
use pillbox_domain::{
    Dosage, Frequency, Medicine, MedicineType, MedicineValidationError, Priority, ReminderTime,
    User, ID,
};
use pillbox_infra::PillboxContext;
use tracing::info;

pub async fn update_medicine_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    path: web::Path<PathParams>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateMedicineUseCase {
        user,
        medicine_id: path.medicine_id,
        name: body.name,
        dosage: body.dosage,
        medicine_type: body.medicine_type,
        frequency: body.frequency,
        instructions: body.instructions,
        reminder_times: body.reminder_times,
        priority: body.priority,
        stock_quantity: body.stock_quantity,
    };

    execute(usecase, &ctx)
        .await
        .map(|medicine| HttpResponse::Ok().json(APIResponse::new(medicine)))
        .map_err(PillboxError::from)
}

/// Merges the given fields into the `Medicine`.
///
/// When the schedule changes the doses that are still pending are
/// superseded and expanded again from the new reminder times.
#[derive(Debug)]
pub struct UpdateMedicineUseCase {
    pub user: User,
    pub medicine_id: ID,
    pub name: Option<String>,
    pub dosage: Option<Dosage>,
    pub medicine_type: Option<MedicineType>,
    pub frequency: Option<Frequency>,
    pub instructions: Option<String>,
    pub reminder_times: Option<Vec<ReminderTime>>,
    pub priority: Option<Priority>,
    pub stock_quantity: Option<u32>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidMedicine(MedicineValidationError),
    StorageError,
}

impl From<UseCaseError> for PillboxError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(id) => {
                Self::NotFound(format!("The medicine with id: {}, was not found.", id))
            }
            UseCaseError::InvalidMedicine(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateMedicineUseCase {
    type Response = Medicine;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateMedicine";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        let mut medicine = find_owned_medicine(&self.user, &self.medicine_id, ctx)
            .await
            .ok_or(UseCaseError::NotFound(self.medicine_id))?;
        let now = ctx.sys.get_timestamp_millis();

        if let Some(name) = &self.name {
            medicine.name = name.trim().to_string();
        }
        if let Some(dosage) = &self.dosage {
            medicine.dosage = dosage.clone();
        }
        if let Some(medicine_type) = self.medicine_type {
            medicine.medicine_type = medicine_type;
        }
        if let Some(instructions) = &self.instructions {
            medicine.instructions =
                Some(instructions.trim().to_string()).filter(|i| !i.is_empty());
        }
        if let Some(priority) = self.priority {
            medicine.priority = priority;
        }
        if let Some(stock_quantity) = self.stock_quantity {
            medicine.stock_quantity = Some(stock_quantity);
        }

        let previous_times = medicine.reminder_times.clone();
        match (&self.reminder_times, self.frequency) {
            (Some(times), frequency) => {
                if let Some(frequency) = frequency {
                    medicine.frequency = frequency;
                }
                medicine.set_reminder_times(times.clone());
            }
            (None, Some(frequency)) if frequency != medicine.frequency => {
                medicine.frequency = frequency;
                medicine.set_reminder_times(Vec::new());
            }
            _ => (),
        }

        medicine.validate().map_err(UseCaseError::InvalidMedicine)?;
        medicine.updated = now;

        if medicine.reminder_times != previous_times {
            let superseded = ctx
                .repos
                .reminders
                .supersede_pending_by_medicine(&medicine.id, now)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            info!(
                "Schedule of medicine: {} changed, superseded {} pending reminders",
                medicine.id, superseded
            );
        }

        ctx.repos
            .medicines
            .save(&medicine)
            .await
            .map(|_| medicine)
            .map_err(|_| UseCaseError::StorageError)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ExpandRemindersOnMedicineUpdated)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::expand_reminders::{ExpandRemindersTrigger, ExpandRemindersUseCase};
    use pillbox_domain::{date::HOUR_MILLIS, DosageUnit};
    use pillbox_infra::StaticTimeSys;
    use std::sync::Arc;

    // 2021-03-10T12:00:00Z
    const NOW: i64 = 1615377600000;

    async fn setup() -> (PillboxContext, User, Medicine) {
        let mut ctx = PillboxContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys { timestamp: NOW });
        let user = User::new("google|1".into(), 0);
        ctx.repos.users.insert(&user).await.unwrap();
        let medicine = Medicine::new(
            user.id,
            "Metformin".into(),
            Dosage {
                amount: "500".into(),
                unit: DosageUnit::Milligram,
            },
            MedicineType::Tablet,
            Frequency::TwiceDaily,
            NOW - 12 * HOUR_MILLIS,
        );
        ctx.repos.medicines.insert(&medicine).await.unwrap();
        let mut usecase = ExpandRemindersUseCase {
            trigger: ExpandRemindersTrigger::MedicineModified(&medicine),
        };
        usecase.execute(&ctx).await.unwrap();
        (ctx, user, medicine)
    }

    fn new_usecase(user: User, medicine_id: ID) -> UpdateMedicineUseCase {
        UpdateMedicineUseCase {
            user,
            medicine_id,
            name: None,
            dosage: None,
            medicine_type: None,
            frequency: None,
            instructions: None,
            reminder_times: None,
            priority: None,
            stock_quantity: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn merges_given_fields() {
        let (ctx, user, medicine) = setup().await;
        let mut usecase = UpdateMedicineUseCase {
            name: Some("Metformin XR".into()),
            stock_quantity: Some(3),
            ..new_usecase(user, medicine.id)
        };

        let updated = usecase.execute(&ctx).await.unwrap();
        assert_eq!(updated.name, "Metformin XR");
        assert!(updated.is_low_stock());
        assert_eq!(updated.reminder_times, medicine.reminder_times);
        assert_eq!(updated.updated, NOW);

        // Schedule did not change so no reminders were superseded
        let reminders = ctx.repos.reminders.find_by_medicine(&medicine.id).await;
        assert_eq!(reminders.len(), 16);
    }

    #[actix_web::main]
    #[test]
    async fn reschedules_pending_reminders() {
        let (ctx, user, medicine) = setup().await;
        let usecase = UpdateMedicineUseCase {
            reminder_times: Some(vec![ReminderTime::new(18, 0).unwrap()]),
            ..new_usecase(user, medicine.id)
        };

        let updated = execute(usecase, &ctx).await.unwrap();
        assert_eq!(updated.reminder_times, vec![ReminderTime::new(18, 0).unwrap()]);

        let reminders = ctx.repos.reminders.find_by_medicine(&medicine.id).await;
        // The 09:00 dose of today has passed and is kept, then one
        // dose at 18:00 for each of the eight days
        assert_eq!(reminders.len(), 9);
        assert_eq!(reminders[0].scheduled_ts, NOW - 3 * HOUR_MILLIS);
        assert_eq!(reminders[1].scheduled_ts, NOW + 6 * HOUR_MILLIS);
    }

    #[actix_web::main]
    #[test]
    async fn changing_frequency_resets_times() {
        let (ctx, user, medicine) = setup().await;
        let mut usecase = UpdateMedicineUseCase {
            frequency: Some(Frequency::ThreeTimesDaily),
            ..new_usecase(user, medicine.id)
        };

        let updated = usecase.execute(&ctx).await.unwrap();
        assert_eq!(updated.frequency, Frequency::ThreeTimesDaily);
        assert_eq!(updated.reminder_times.len(), 3);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_update() {
        let (ctx, user, medicine) = setup().await;
        let mut usecase = UpdateMedicineUseCase {
            dosage: Some(Dosage {
                amount: "-5".into(),
                unit: DosageUnit::Milligram,
            }),
            ..new_usecase(user.clone(), medicine.id)
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidMedicine(MedicineValidationError::InvalidDosageAmount(
                "-5".into()
            ))
        );

        let mut usecase = new_usecase(User::new("google|2".into(), 0), medicine.id);
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(medicine.id)
        );
    }
}

use super::reminder_dto;
use crate::shared::usecase::{execute, UseCase};
use crate::{error::PillboxError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use pillbox_api_structs::create_reminder::*;
use pillbox_api_structs::dtos::ReminderDTO;
use pillbox_domain::{date::parse_timestamp, Priority, Reminder, ReminderError, User, ID};
use pillbox_infra::PillboxContext;

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateReminderUseCase {
        user,
        medicine_id: body.medicine_id,
        scheduled_time: body.scheduled_time,
        priority: body.priority,
        notes: body.notes,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(PillboxError::from)
}

/// Adds a single dose outside of the reminder times of the `Medicine`
#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub user: User,
    pub medicine_id: ID,
    pub scheduled_time: String,
    pub priority: Option<Priority>,
    pub notes: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidScheduledTime(String),
    MedicineNotFound(ID),
    AlreadyScheduled,
    Reminder(ReminderError),
    StorageError,
}

impl From<UseCaseError> for PillboxError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidScheduledTime(time) => Self::BadClientData(format!(
                "The scheduled time: `{}` is not a valid ISO-8601 timestamp",
                time
            )),
            UseCaseError::MedicineNotFound(id) => {
                Self::NotFound(format!("The medicine with id: {}, was not found.", id))
            }
            UseCaseError::AlreadyScheduled => Self::Conflict(
                "A dose of this medicine is already scheduled at the given time".into(),
            ),
            UseCaseError::Reminder(_) | UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = ReminderDTO;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        let scheduled_ts = parse_timestamp(&self.scheduled_time)
            .ok_or_else(|| UseCaseError::InvalidScheduledTime(self.scheduled_time.clone()))?;

        let medicine = match ctx.repos.medicines.find(&self.medicine_id).await {
            Some(medicine) if medicine.user_id == self.user.id && medicine.active => medicine,
            _ => return Err(UseCaseError::MedicineNotFound(self.medicine_id)),
        };

        let existing = ctx.repos.reminders.find_by_medicine(&medicine.id).await;
        if existing.iter().any(|r| r.scheduled_ts == scheduled_ts) {
            return Err(UseCaseError::AlreadyScheduled);
        }

        let mut reminder = Reminder::new(
            medicine.id,
            self.user.id,
            scheduled_ts,
            self.priority.unwrap_or(medicine.priority),
        );
        reminder.notes = self.notes.clone().filter(|n| !n.trim().is_empty());

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        reminder_dto(reminder, Some(&medicine), ctx.sys.get_timestamp_millis())
            .map_err(UseCaseError::Reminder)
    }
}

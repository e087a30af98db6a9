use super::reminder_dto;
use crate::shared::usecase::{execute, UseCase};
use crate::{error::PillboxError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Duration;
use pillbox_api_structs::mark_reminder_taken::*;
use pillbox_domain::{
    date::{local_date, start_of_day},
    Medicine, Reminder, User, ID,
};
use pillbox_infra::PillboxContext;
use tracing::error;

async fn log_reminder_action(
    http_req: HttpRequest,
    body: RequestBody,
    path: PathParams,
    taken: bool,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = LogReminderActionUseCase {
        user,
        target: ReminderTarget::Reminder {
            reminder_id: path.reminder_id,
            medicine_id: None,
        },
        taken,
        notes: body.notes,
    };

    let now = ctx.sys.get_timestamp_millis();
    let (medicine, reminder) = execute(usecase, &ctx).await.map_err(PillboxError::from)?;
    let reminder =
        reminder_dto(reminder, Some(&medicine), now).map_err(|_| PillboxError::InternalError)?;
    Ok(HttpResponse::Ok().json(APIResponse::new(reminder)))
}

pub async fn mark_reminder_taken_controller(
    http_req: HttpRequest,
    body: Option<web::Json<RequestBody>>,
    path: web::Path<PathParams>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let body = body.map(|b| b.0).unwrap_or_default();
    log_reminder_action(http_req, body, path.into_inner(), true, ctx).await
}

pub async fn mark_reminder_skipped_controller(
    http_req: HttpRequest,
    body: Option<web::Json<RequestBody>>,
    path: web::Path<PathParams>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let body = body.map(|b| b.0).unwrap_or_default();
    log_reminder_action(http_req, body, path.into_inner(), false, ctx).await
}

/// Which dose the action is logged for
#[derive(Debug)]
pub enum ReminderTarget {
    /// A specific `Reminder`, optionally required to belong to the given `Medicine`
    Reminder {
        reminder_id: ID,
        medicine_id: Option<ID>,
    },
    /// The earliest dose of today of the `Medicine` that has not been acted upon
    NextOpenDose { medicine_id: ID },
}

/// Logs a dose as taken or skipped and refreshes the adherence
/// rate and stock of its `Medicine`
#[derive(Debug)]
pub struct LogReminderActionUseCase {
    pub user: User,
    pub target: ReminderTarget,
    pub taken: bool,
    pub notes: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    ReminderNotFound(ID),
    MedicineNotFound(ID),
    NoOpenDose(ID),
    InvalidClock,
    StorageError,
}

impl From<UseCaseError> for PillboxError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::ReminderNotFound(id) => {
                Self::NotFound(format!("The reminder with id: {}, was not found.", id))
            }
            UseCaseError::MedicineNotFound(id) => {
                Self::NotFound(format!("The medicine with id: {}, was not found.", id))
            }
            UseCaseError::NoOpenDose(id) => Self::NotFound(format!(
                "The medicine with id: {}, has no open dose today.",
                id
            )),
            UseCaseError::InvalidClock | UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl LogReminderActionUseCase {
    async fn find_owned_medicine(
        &self,
        medicine_id: &ID,
        ctx: &PillboxContext,
    ) -> Result<Medicine, UseCaseError> {
        match ctx.repos.medicines.find(medicine_id).await {
            Some(medicine) if medicine.user_id == self.user.id && medicine.active => Ok(medicine),
            _ => Err(UseCaseError::MedicineNotFound(*medicine_id)),
        }
    }

    async fn find_target(
        &self,
        ctx: &PillboxContext,
    ) -> Result<(Medicine, Reminder), UseCaseError> {
        match &self.target {
            ReminderTarget::Reminder {
                reminder_id,
                medicine_id,
            } => {
                let reminder = match ctx.repos.reminders.find(reminder_id).await {
                    Some(reminder) if reminder.user_id == self.user.id => reminder,
                    _ => return Err(UseCaseError::ReminderNotFound(*reminder_id)),
                };
                if let Some(medicine_id) = medicine_id {
                    if *medicine_id != reminder.medicine_id {
                        return Err(UseCaseError::ReminderNotFound(*reminder_id));
                    }
                }
                let medicine = self
                    .find_owned_medicine(&reminder.medicine_id, ctx)
                    .await
                    .map_err(|_| UseCaseError::ReminderNotFound(*reminder_id))?;
                Ok((medicine, reminder))
            }
            ReminderTarget::NextOpenDose { medicine_id } => {
                let medicine = self.find_owned_medicine(medicine_id, ctx).await?;
                let now = ctx.sys.get_timestamp_millis();
                let tz = &self.user.timezone;
                let today = local_date(now, tz).ok_or(UseCaseError::InvalidClock)?;
                let start = start_of_day(today, tz);
                let end = start_of_day(today + Duration::days(1), tz);

                let reminder = ctx
                    .repos
                    .reminders
                    .find_by_medicine(medicine_id)
                    .await
                    .into_iter()
                    .filter(|r| {
                        r.scheduled_ts >= start && r.scheduled_ts < end && !r.taken && !r.skipped
                    })
                    .min_by_key(|r| r.scheduled_ts)
                    .ok_or(UseCaseError::NoOpenDose(*medicine_id))?;
                Ok((medicine, reminder))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for LogReminderActionUseCase {
    type Response = (Medicine, Reminder);
    type Error = UseCaseError;

    const NAME: &'static str = "LogReminderAction";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        let (mut medicine, mut reminder) = self.find_target(ctx).await?;
        let now = ctx.sys.get_timestamp_millis();

        let previous = reminder.clone();
        reminder.log_action(self.taken, self.notes.clone(), now);
        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if self.taken && !previous.taken {
            if let Some(stock) = medicine.stock_quantity {
                medicine.stock_quantity = Some(stock.saturating_sub(1));
            }
        }
        let reminders = ctx.repos.reminders.find_by_medicine(&medicine.id).await;
        medicine.refresh_adherence_rate(&reminders, now);
        if ctx.repos.medicines.save(&medicine).await.is_err() {
            // Undo the logged action so the stock is not skipped on a retry
            if let Err(e) = ctx.repos.reminders.save(&previous).await {
                error!("Unable to restore reminder: {} : {:?}", previous.id, e);
            }
            return Err(UseCaseError::StorageError);
        }

        Ok((medicine, reminder))
    }
}

use super::{active_medicines, reminder_dto};
use crate::shared::usecase::{execute, UseCase};
use crate::{error::PillboxError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use pillbox_api_structs::dtos::UpcomingDoseDTO;
use pillbox_api_structs::get_upcoming_reminders::*;
use pillbox_domain::{ReminderError, UpcomingView, User};
use pillbox_infra::PillboxContext;

pub async fn get_upcoming_reminders_controller(
    http_req: HttpRequest,
    query: web::Query<QueryParams>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let user = protect_route(&http_req, &ctx).await?;

    let view = query.0.view.unwrap_or_default();
    let usecase = GetUpcomingRemindersUseCase { user, view };

    execute(usecase, &ctx)
        .await
        .map(|doses| HttpResponse::Ok().json(APIResponse::new(view, doses)))
        .map_err(PillboxError::from)
}

/// Doses that have not been acted upon yet within the time window of the view
#[derive(Debug)]
pub struct GetUpcomingRemindersUseCase {
    pub user: User,
    pub view: UpcomingView,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    Reminder(ReminderError),
}

impl From<UseCaseError> for PillboxError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Reminder(_) => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUpcomingRemindersUseCase {
    type Response = Vec<UpcomingDoseDTO>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetUpcomingReminders";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let medicines = active_medicines(&self.user, ctx).await;
        let reminders = ctx
            .repos
            .reminders
            .find_by_user_in_span(&self.user.id, now + 1, now + self.view.horizon() + 1)
            .await;

        let mut doses = Vec::new();
        for reminder in reminders {
            if reminder.taken
                || reminder.skipped
                || !self.view.includes(reminder.scheduled_ts, now, &self.user.timezone)
            {
                continue;
            }
            let medicine = match medicines.get(&reminder.medicine_id) {
                Some(medicine) => medicine,
                None => continue,
            };
            let scheduled_ts = reminder.scheduled_ts;
            let dto =
                reminder_dto(reminder, Some(medicine), now).map_err(UseCaseError::Reminder)?;
            doses.push(UpcomingDoseDTO::new(dto, scheduled_ts, now));
        }

        Ok(doses)
    }
}

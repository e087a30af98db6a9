use crate::reminder::log_reminder_action::{LogReminderActionUseCase, ReminderTarget};
use crate::reminder::reminder_dto;
use crate::shared::usecase::execute;
use crate::{error::PillboxError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use pillbox_api_structs::log_adherence::*;
use pillbox_infra::PillboxContext;

/// Logs a dose of the `Medicine` as taken or skipped. Without a
/// reminder id the earliest open dose of today is logged.
pub async fn log_adherence_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    path: web::Path<PathParams>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let target = match body.reminder_id {
        Some(reminder_id) => ReminderTarget::Reminder {
            reminder_id,
            medicine_id: Some(path.medicine_id),
        },
        None => ReminderTarget::NextOpenDose {
            medicine_id: path.medicine_id,
        },
    };
    let usecase = LogReminderActionUseCase {
        user,
        target,
        taken: body.taken,
        notes: body.notes,
    };

    let now = ctx.sys.get_timestamp_millis();
    let (medicine, reminder) = execute(usecase, &ctx).await.map_err(PillboxError::from)?;
    let reminder =
        reminder_dto(reminder, Some(&medicine), now).map_err(|_| PillboxError::InternalError)?;
    Ok(HttpResponse::Ok().json(APIResponse::new(medicine, reminder)))
}

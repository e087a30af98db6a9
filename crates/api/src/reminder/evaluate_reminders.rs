use crate::error::PillboxError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pillbox_api_structs::evaluate_reminders::*;
use pillbox_domain::{date::format_timestamp, ReminderError, ReminderRecord, ReminderStatus};
use pillbox_infra::PillboxContext;

pub async fn evaluate_reminders_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let usecase = EvaluateRemindersUseCase {
        reminders: body.0.reminders,
    };

    execute(usecase, &ctx)
        .await
        .map(|(statuses, now)| {
            HttpResponse::Ok().json(APIResponse {
                statuses,
                evaluated_at: format_timestamp(now),
            })
        })
        .map_err(PillboxError::from)
}

/// Derives the status of reminder records that are not stored on the server
#[derive(Debug)]
pub struct EvaluateRemindersUseCase {
    pub reminders: Vec<ReminderRecord>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidRecord { index: usize, error: ReminderError },
}

impl From<UseCaseError> for PillboxError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidRecord { index, error } => {
                Self::BadClientData(format!("Reminder at index {}: {}", index, error))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for EvaluateRemindersUseCase {
    /// Statuses in the order of the records, and the instant they were evaluated at
    type Response = (Vec<ReminderStatus>, i64);
    type Error = UseCaseError;

    const NAME: &'static str = "EvaluateReminders";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let statuses = self
            .reminders
            .iter()
            .enumerate()
            .map(|(index, record)| {
                record
                    .status(now)
                    .map_err(|error| UseCaseError::InvalidRecord { index, error })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((statuses, now))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pillbox_infra::StaticTimeSys;
    use std::sync::Arc;

    fn record(scheduled_time: Option<&str>, taken: bool, skipped: bool) -> ReminderRecord {
        ReminderRecord {
            scheduled_time: scheduled_time.map(String::from),
            taken,
            skipped,
        }
    }

    fn setup_context() -> PillboxContext {
        let mut ctx = PillboxContext::create_inmemory();
        // 2021-03-10T12:00:00Z
        ctx.sys = Arc::new(StaticTimeSys {
            timestamp: 1615377600000,
        });
        ctx
    }

    #[actix_web::main]
    #[test]
    async fn evaluates_records_in_order() {
        let ctx = setup_context();
        let mut usecase = EvaluateRemindersUseCase {
            reminders: vec![
                record(Some("2021-03-10T08:00:00Z"), true, false),
                record(Some("2021-03-10T11:30:00Z"), false, false),
                record(Some("2021-03-10T11:29:59.999Z"), false, false),
                record(Some("2021-03-10T13:00:00Z"), false, false),
                record(Some("2021-03-10T13:00:00Z"), false, true),
            ],
        };

        let (statuses, now) = usecase.execute(&ctx).await.unwrap();
        assert_eq!(now, 1615377600000);
        assert_eq!(
            statuses,
            vec![
                ReminderStatus::Taken,
                ReminderStatus::Due,
                ReminderStatus::Missed,
                ReminderStatus::Upcoming,
                ReminderStatus::Skipped,
            ]
        );
    }

    #[actix_web::main]
    #[test]
    async fn reports_index_of_malformed_record() {
        let ctx = setup_context();
        let mut usecase = EvaluateRemindersUseCase {
            reminders: vec![
                record(Some("2021-03-10T08:00:00Z"), false, false),
                record(Some("2021-03-10T08:00:00Z"), true, true),
                record(None, false, false),
            ],
        };

        let err = usecase.execute(&ctx).await.unwrap_err();
        assert_eq!(
            err,
            UseCaseError::InvalidRecord {
                index: 1,
                error: ReminderError::TakenAndSkipped
            }
        );
        assert!(matches!(
            PillboxError::from(err),
            PillboxError::BadClientData(msg) if msg.starts_with("Reminder at index 1")
        ));
    }
}

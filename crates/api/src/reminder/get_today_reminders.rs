use super::{active_medicines, reminder_dtos};
use crate::shared::usecase::{execute, UseCase};
use crate::{error::PillboxError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Duration;
use pillbox_api_structs::dtos::ReminderDTO;
use pillbox_api_structs::get_today_reminders::*;
use pillbox_domain::{
    date::{format_date, local_date, start_of_day},
    ReminderError, ReminderFilter, User,
};
use pillbox_infra::PillboxContext;

pub async fn get_today_reminders_controller(
    http_req: HttpRequest,
    query: web::Query<QueryParams>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetTodayRemindersUseCase {
        user,
        filter: query.0.filter.unwrap_or_default(),
    };

    execute(usecase, &ctx)
        .await
        .map(|(date, reminders)| HttpResponse::Ok().json(APIResponse::new(date, reminders)))
        .map_err(PillboxError::from)
}

/// The doses of today in the timezone of the `User`
#[derive(Debug)]
pub struct GetTodayRemindersUseCase {
    pub user: User,
    pub filter: ReminderFilter,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidClock,
    Reminder(ReminderError),
}

impl From<UseCaseError> for PillboxError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidClock => Self::InternalError,
            UseCaseError::Reminder(_) => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetTodayRemindersUseCase {
    /// The date of today together with its doses
    type Response = (String, Vec<ReminderDTO>);
    type Error = UseCaseError;

    const NAME: &'static str = "GetTodayReminders";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let tz = &self.user.timezone;
        let today = local_date(now, tz).ok_or(UseCaseError::InvalidClock)?;
        let start = start_of_day(today, tz);
        let end = start_of_day(today + Duration::days(1), tz);

        let medicines = active_medicines(&self.user, ctx).await;
        let reminders = ctx
            .repos
            .reminders
            .find_by_user_in_span(&self.user.id, start, end)
            .await;
        let reminders = self.filter.apply(reminders, now);

        let reminders =
            reminder_dtos(reminders, &medicines, now).map_err(UseCaseError::Reminder)?;
        Ok((format_date(&today), reminders))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use pillbox_domain::{
        date::HOUR_MILLIS, Dosage, DosageUnit, Frequency, Medicine, MedicineType, Reminder,
        ReminderStatus,
    };
    use pillbox_infra::StaticTimeSys;
    use std::sync::Arc;

    fn midday() -> i64 {
        let date = NaiveDate::from_ymd_opt(2021, 3, 10).unwrap();
        start_of_day(date, &pillbox_domain::Tz::UTC) + 12 * HOUR_MILLIS
    }

    async fn setup() -> (PillboxContext, User, Medicine) {
        let mut ctx = PillboxContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys {
            timestamp: midday(),
        });
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
            Frequency::ThreeTimesDaily,
            0,
        );
        ctx.repos.medicines.insert(&medicine).await.unwrap();

        // 08:00 taken, 14:00 pending, and one dose yesterday
        let dose = |ts: i64| Reminder::new(medicine.id, user.id, ts, medicine.priority);
        let mut morning = dose(midday() - 4 * HOUR_MILLIS);
        morning.log_action(true, None, midday() - 4 * HOUR_MILLIS);
        let afternoon = dose(midday() + 2 * HOUR_MILLIS);
        let yesterday = dose(midday() - 22 * HOUR_MILLIS);
        ctx.repos
            .reminders
            .bulk_insert(&[afternoon, morning, yesterday])
            .await
            .unwrap();

        (ctx, user, medicine)
    }

    #[actix_web::main]
    #[test]
    async fn lists_only_doses_of_today() {
        let (ctx, user, medicine) = setup().await;
        let mut usecase = GetTodayRemindersUseCase {
            user,
            filter: ReminderFilter::All,
        };

        let (date, reminders) = usecase.execute(&ctx).await.unwrap();
        assert_eq!(date, "2021-03-10");
        assert_eq!(reminders.len(), 2);
        assert_eq!(reminders[0].status, ReminderStatus::Taken);
        assert_eq!(reminders[1].status, ReminderStatus::Upcoming);
        assert_eq!(reminders[1].minutes_until, Some(120));
        assert_eq!(
            reminders[1].medicine.as_ref().map(|m| m.name.clone()),
            Some(medicine.name)
        );
    }

    #[actix_web::main]
    #[test]
    async fn applies_filter() {
        let (ctx, user, _) = setup().await;
        let mut usecase = GetTodayRemindersUseCase {
            user,
            filter: ReminderFilter::Pending,
        };

        let (_, reminders) = usecase.execute(&ctx).await.unwrap();
        assert_eq!(reminders.len(), 1);
        assert!(!reminders[0].taken);
    }

    #[actix_web::main]
    #[test]
    async fn hides_doses_of_deleted_medicines() {
        let (ctx, user, medicine) = setup().await;
        ctx.repos
            .medicines
            .soft_delete(&medicine.id, midday())
            .await
            .unwrap();
        let mut usecase = GetTodayRemindersUseCase {
            user,
            filter: ReminderFilter::All,
        };

        let (_, reminders) = usecase.execute(&ctx).await.unwrap();
        assert!(reminders.is_empty());
    }
}

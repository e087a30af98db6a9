use crate::shared::usecase::{execute, UseCase};
use crate::{error::PillboxError, shared::auth::protect_route};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Duration;
use pillbox_api_structs::get_adherence::*;
use pillbox_domain::{
    date::{local_date, start_of_day},
    day_stats, AdherenceError, AdherencePeriod, AdherenceSummary, User,
};
use pillbox_infra::PillboxContext;
use std::collections::HashSet;

pub async fn get_adherence_controller(
    http_req: HttpRequest,
    query: web::Query<QueryParams>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let user = protect_route(&http_req, &ctx).await?;

    let period = query.0.period.unwrap_or_default();
    let usecase = GetAdherenceUseCase { user, period };

    execute(usecase, &ctx)
        .await
        .map(|summary| HttpResponse::Ok().json(APIResponse::new(period, summary)))
        .map_err(PillboxError::from)
}

/// Aggregates the doses of the `User` that were due within the period,
/// one day at a time in the timezone of the `User`
#[derive(Debug)]
pub struct GetAdherenceUseCase {
    pub user: User,
    pub period: AdherencePeriod,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidClock,
    Aggregation(AdherenceError),
}

impl From<UseCaseError> for PillboxError {
    fn from(_: UseCaseError) -> Self {
        Self::InternalError
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetAdherenceUseCase {
    type Response = AdherenceSummary;
    type Error = UseCaseError;

    const NAME: &'static str = "GetAdherence";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let tz = &self.user.timezone;
        let today = local_date(now, tz).ok_or(UseCaseError::InvalidClock)?;
        let days = self.period.days();
        let first_day = today - Duration::days(i64::from(days) - 1);

        let active = ctx
            .repos
            .medicines
            .find_by_user(&self.user.id)
            .await
            .into_iter()
            .map(|m| m.id)
            .collect::<HashSet<_>>();
        let reminders = ctx
            .repos
            .reminders
            .find_by_user_in_span(&self.user.id, start_of_day(first_day, tz), now + 1)
            .await
            .into_iter()
            .filter(|r| active.contains(&r.medicine_id))
            .collect::<Vec<_>>();

        AdherenceSummary::new(day_stats(&reminders, tz, today, days))
            .map_err(UseCaseError::Aggregation)
    }
}

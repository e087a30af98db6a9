use crate::error::PillboxError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use pillbox_api_structs::summarize_adherence::*;
use pillbox_domain::{AdherenceError, AdherenceSummary, DayStat};
use pillbox_infra::PillboxContext;

pub async fn summarize_adherence_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<PillboxContext>,
) -> Result<HttpResponse, PillboxError> {
    let usecase = SummarizeAdherenceUseCase { days: body.0.days };

    execute(usecase, &ctx)
        .await
        .map(|summary| HttpResponse::Ok().json(APIResponse::new(summary)))
        .map_err(PillboxError::from)
}

/// Aggregates day stats supplied by the client
#[derive(Debug)]
pub struct SummarizeAdherenceUseCase {
    pub days: Vec<DayStat>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidDayStat(AdherenceError),
}

impl From<UseCaseError> for PillboxError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidDayStat(e) => Self::BadClientData(e.to_string()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SummarizeAdherenceUseCase {
    type Response = AdherenceSummary;
    type Error = UseCaseError;

    const NAME: &'static str = "SummarizeAdherence";

    async fn execute(&mut self, _ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        AdherenceSummary::new(self.days.clone()).map_err(UseCaseError::InvalidDayStat)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pillbox_domain::{Achievement, AdherenceGrade};

    fn day(scheduled: i64, taken: i64) -> DayStat {
        DayStat::new("2021-03-10".into(), scheduled, taken)
    }

    #[actix_web::main]
    #[test]
    async fn summarizes_days() {
        let ctx = PillboxContext::create_inmemory();
        let mut usecase = SummarizeAdherenceUseCase {
            days: vec![day(10, 8), day(10, 10)],
        };

        let summary = usecase.execute(&ctx).await.unwrap();
        assert_eq!(summary.percent, 90);
        assert_eq!(summary.grade, AdherenceGrade::A);
        assert_eq!(summary.streaks.current, 1);
        assert_eq!(summary.achievements, vec![Achievement::ConsistencyChampion]);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_malformed_days() {
        let ctx = PillboxContext::create_inmemory();
        let mut usecase = SummarizeAdherenceUseCase {
            days: vec![day(2, 3)],
        };

        let err = usecase.execute(&ctx).await.unwrap_err();
        assert_eq!(
            err,
            UseCaseError::InvalidDayStat(AdherenceError::TakenExceedsScheduled(
                "2021-03-10".into()
            ))
        );
        assert!(matches!(
            PillboxError::from(err),
            PillboxError::BadClientData(_)
        ));
    }
}

use crate::{APIResponse, BaseClient};
use pillbox_api_structs::*;
use pillbox_domain::{AdherencePeriod, DayStat};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct AdherenceClient {
    base: Arc<BaseClient>,
}

impl AdherenceClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get(
        &self,
        period: AdherencePeriod,
    ) -> APIResponse<get_adherence::APIResponse> {
        let period = match period {
            AdherencePeriod::Week => "week",
            AdherencePeriod::Month => "month",
        };
        self.base
            .get(format!("adherence?period={}", period), StatusCode::OK)
            .await
    }

    pub async fn summarize(
        &self,
        days: Vec<DayStat>,
    ) -> APIResponse<summarize_adherence::APIResponse> {
        let body = summarize_adherence::RequestBody { days };
        self.base
            .post(body, "adherence/summary".into(), StatusCode::OK)
            .await
    }
}

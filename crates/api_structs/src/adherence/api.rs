use crate::dtos::AdherenceDTO;
use pillbox_domain::{AdherencePeriod, AdherenceSummary, DayStat};
use serde::{Deserialize, Serialize};

pub mod get_adherence {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    pub struct QueryParams {
        #[serde(default)]
        pub period: Option<AdherencePeriod>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub period: AdherencePeriod,
        pub adherence: AdherenceDTO,
    }

    impl APIResponse {
        pub fn new(period: AdherencePeriod, summary: AdherenceSummary) -> Self {
            Self {
                period,
                adherence: AdherenceDTO::new(summary),
            }
        }
    }
}

pub mod summarize_adherence {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// Ordered from oldest to most recent day
        pub days: Vec<DayStat>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub adherence: AdherenceDTO,
    }

    impl APIResponse {
        pub fn new(summary: AdherenceSummary) -> Self {
            Self {
                adherence: AdherenceDTO::new(summary),
            }
        }
    }
}

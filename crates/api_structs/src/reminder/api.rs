use crate::dtos::{ReminderDTO, UpcomingDoseDTO};
use pillbox_domain::{Priority, ReminderFilter, ReminderRecord, ReminderStatus, UpcomingView, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: ReminderDTO) -> Self {
        Self { reminder }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReminderPathParams {
    pub reminder_id: ID,
}

pub mod get_today_reminders {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    pub struct QueryParams {
        #[serde(default)]
        pub filter: Option<ReminderFilter>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// Today in the timezone of the `User`, e.g. `2021-03-10`
        pub date: String,
        pub count: usize,
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(date: String, reminders: Vec<ReminderDTO>) -> Self {
            Self {
                date,
                count: reminders.len(),
                reminders,
            }
        }
    }
}

pub mod get_upcoming_reminders {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    pub struct QueryParams {
        #[serde(default)]
        pub view: Option<UpcomingView>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub view: UpcomingView,
        pub count: usize,
        pub doses: Vec<UpcomingDoseDTO>,
    }

    impl APIResponse {
        pub fn new(view: UpcomingView, doses: Vec<UpcomingDoseDTO>) -> Self {
            Self {
                view,
                count: doses.len(),
                doses,
            }
        }
    }
}

pub mod create_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub medicine_id: ID,
        /// ISO-8601 timestamp of the dose
        pub scheduled_time: String,
        #[serde(default)]
        pub priority: Option<Priority>,
        #[serde(default)]
        pub notes: Option<String>,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod mark_reminder_taken {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub notes: Option<String>,
    }

    pub type PathParams = ReminderPathParams;

    pub type APIResponse = ReminderResponse;
}

pub mod mark_reminder_skipped {
    use super::*;

    pub type RequestBody = mark_reminder_taken::RequestBody;

    pub type PathParams = ReminderPathParams;

    pub type APIResponse = ReminderResponse;
}

pub mod evaluate_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub reminders: Vec<ReminderRecord>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// Status of each record, in the order they were given
        pub statuses: Vec<ReminderStatus>,
        pub evaluated_at: String,
    }
}

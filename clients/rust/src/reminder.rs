use crate::{APIResponse, BaseClient};
use pillbox_api_structs::*;
use pillbox_domain::{Priority, ReminderFilter, ReminderRecord, UpcomingView, ID};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct CreateReminderInput {
    pub medicine_id: ID,
    /// ISO-8601 timestamp of the dose
    pub scheduled_time: String,
    pub priority: Option<Priority>,
    pub notes: Option<String>,
}

fn filter_param(filter: ReminderFilter) -> &'static str {
    match filter {
        ReminderFilter::All => "all",
        ReminderFilter::Pending => "pending",
        ReminderFilter::Completed => "completed",
        ReminderFilter::Missed => "missed",
    }
}

fn view_param(view: UpcomingView) -> &'static str {
    match view {
        UpcomingView::Today => "today",
        UpcomingView::Tomorrow => "tomorrow",
        UpcomingView::Week => "week",
    }
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn today(
        &self,
        filter: Option<ReminderFilter>,
    ) -> APIResponse<get_today_reminders::APIResponse> {
        let path = match filter {
            Some(filter) => format!("reminders/today?filter={}", filter_param(filter)),
            None => "reminders/today".into(),
        };
        self.base.get(path, StatusCode::OK).await
    }

    pub async fn upcoming(
        &self,
        view: Option<UpcomingView>,
    ) -> APIResponse<get_upcoming_reminders::APIResponse> {
        let path = match view {
            Some(view) => format!("reminders/upcoming?view={}", view_param(view)),
            None => "reminders/upcoming".into(),
        };
        self.base.get(path, StatusCode::OK).await
    }

    pub async fn create(
        &self,
        input: CreateReminderInput,
    ) -> APIResponse<create_reminder::APIResponse> {
        let body = create_reminder::RequestBody {
            medicine_id: input.medicine_id,
            scheduled_time: input.scheduled_time,
            priority: input.priority,
            notes: input.notes,
        };
        self.base
            .post(body, "reminders".into(), StatusCode::CREATED)
            .await
    }

    pub async fn mark_taken(
        &self,
        reminder_id: ID,
        notes: Option<String>,
    ) -> APIResponse<mark_reminder_taken::APIResponse> {
        let body = mark_reminder_taken::RequestBody { notes };
        self.base
            .post(
                body,
                format!("reminders/{}/taken", reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn mark_skipped(
        &self,
        reminder_id: ID,
        notes: Option<String>,
    ) -> APIResponse<mark_reminder_skipped::APIResponse> {
        let body = mark_reminder_skipped::RequestBody { notes };
        self.base
            .post(
                body,
                format!("reminders/{}/skipped", reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn evaluate(
        &self,
        reminders: Vec<ReminderRecord>,
    ) -> APIResponse<evaluate_reminders::APIResponse> {
        let body = evaluate_reminders::RequestBody { reminders };
        self.base
            .post(body, "reminders/status".into(), StatusCode::OK)
            .await
    }
}

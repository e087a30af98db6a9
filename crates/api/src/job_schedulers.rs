use crate::{
    reminder::expand_reminders::{ExpandRemindersTrigger, ExpandRemindersUseCase},
    shared::usecase::execute,
};
use actix_web::rt::time::interval;
use pillbox_infra::PillboxContext;
use std::time::Duration;

const REMINDERS_EXPANSION_INTERVAL_SECS: u64 = 30 * 60;

pub fn start_reminders_expansion_job_scheduler(ctx: PillboxContext) {
    actix_web::rt::spawn(async move {
        let mut interval = interval(Duration::from_secs(REMINDERS_EXPANSION_INTERVAL_SECS));
        loop {
            // First tick completes immediately
            interval.tick().await;

            let usecase = ExpandRemindersUseCase {
                trigger: ExpandRemindersTrigger::JobScheduler,
            };
            let _ = execute(usecase, &ctx).await;
        }
    });
}

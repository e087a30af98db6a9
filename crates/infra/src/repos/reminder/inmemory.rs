use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use pillbox_domain::{Reminder, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(vec![]),
        }
    }
}

fn by_scheduled_time(mut reminders: Vec<Reminder>) -> Vec<Reminder> {
    reminders.sort_by_key(|r| r.scheduled_ts);
    reminders
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn bulk_insert(&self, reminders: &[Reminder]) -> anyhow::Result<()> {
        bulk_insert(reminders, &self.reminders);
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        save(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders).filter(|r| !r.superseded)
    }

    async fn find_by_medicine(&self, medicine_id: &ID) -> Vec<Reminder> {
        by_scheduled_time(find_by(&self.reminders, |r| {
            !r.superseded && r.medicine_id == *medicine_id
        }))
    }

    async fn find_by_user_in_span(&self, user_id: &ID, start: i64, end: i64) -> Vec<Reminder> {
        by_scheduled_time(find_by(&self.reminders, |r| {
            !r.superseded
                && r.user_id == *user_id
                && r.scheduled_ts >= start
                && r.scheduled_ts < end
        }))
    }

    async fn supersede_pending_by_medicine(
        &self,
        medicine_id: &ID,
        after: i64,
    ) -> anyhow::Result<u64> {
        let superseded = update_many(
            &self.reminders,
            |r| {
                r.medicine_id == *medicine_id
                    && !r.superseded
                    && !r.taken
                    && !r.skipped
                    && r.scheduled_ts > after
            },
            |r| r.superseded = true,
        );
        Ok(superseded as u64)
    }
}

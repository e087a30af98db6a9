mod inmemory;
mod mongo;

pub use inmemory::InMemoryReminderRepo;
pub use mongo::MongoReminderRepo;
use pillbox_domain::{Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn bulk_insert(&self, reminders: &[Reminder]) -> anyhow::Result<()>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    /// Superseded `Reminder`s are never returned by the queries below
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    /// All `Reminder`s of the `Medicine` ordered by scheduled time
    async fn find_by_medicine(&self, medicine_id: &ID) -> Vec<Reminder>;
    /// `Reminder`s of the `User` scheduled in `[start, end)` ordered by scheduled time
    async fn find_by_user_in_span(&self, user_id: &ID, start: i64, end: i64) -> Vec<Reminder>;
    /// Marks the `Reminder`s of the `Medicine` scheduled after `after` that
    /// were never taken or skipped as superseded. Returns how many were marked.
    async fn supersede_pending_by_medicine(
        &self,
        medicine_id: &ID,
        after: i64,
    ) -> anyhow::Result<u64>;
}

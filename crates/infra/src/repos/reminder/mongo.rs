use super::IReminderRepo;
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use mongodb::{
    bson::{doc, Document},
    Collection, Database,
};
use pillbox_domain::{Priority, Reminder, ID};
use serde::{Deserialize, Serialize};
use tracing::error;

pub struct MongoReminderRepo {
    collection: Collection<Document>,
}

impl MongoReminderRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("reminders"),
        }
    }

    async fn find_many(&self, filter: Document) -> Vec<Reminder> {
        let sort = doc! { "scheduled_ts": 1 };
        match mongo_repo::find_many_by::<_, ReminderMongo>(&self.collection, filter, Some(sort))
            .await
        {
            Ok(reminders) => reminders,
            Err(e) => {
                error!("Unable to query reminders: {:?}", e);
                vec![]
            }
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for MongoReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        mongo_repo::insert::<_, ReminderMongo>(&self.collection, reminder).await
    }

    async fn bulk_insert(&self, reminders: &[Reminder]) -> anyhow::Result<()> {
        mongo_repo::bulk_insert::<_, ReminderMongo>(&self.collection, reminders).await
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        mongo_repo::save::<_, ReminderMongo>(&self.collection, reminder).await
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        mongo_repo::find::<_, ReminderMongo>(&self.collection, reminder_id)
            .await
            .filter(|r| !r.superseded)
    }

    async fn find_by_medicine(&self, medicine_id: &ID) -> Vec<Reminder> {
        self.find_many(doc! {
            "medicine_id": medicine_id.as_string(),
            "superseded": { "$ne": true }
        })
        .await
    }

    async fn find_by_user_in_span(&self, user_id: &ID, start: i64, end: i64) -> Vec<Reminder> {
        self.find_many(doc! {
            "user_id": user_id.as_string(),
            "superseded": { "$ne": true },
            "scheduled_ts": {
                "$gte": start,
                "$lt": end
            }
        })
        .await
    }

    async fn supersede_pending_by_medicine(
        &self,
        medicine_id: &ID,
        after: i64,
    ) -> anyhow::Result<u64> {
        let filter = doc! {
            "medicine_id": medicine_id.as_string(),
            "superseded": { "$ne": true },
            "taken": false,
            "skipped": false,
            "scheduled_ts": {
                "$gt": after
            }
        };
        let update = doc! { "$set": { "superseded": true } };
        mongo_repo::update_many(&self.collection, filter, update).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ReminderMongo {
    _id: ID,
    medicine_id: ID,
    user_id: ID,
    scheduled_ts: i64,
    taken: bool,
    skipped: bool,
    taken_at: Option<i64>,
    notes: Option<String>,
    priority: Priority,
    #[serde(default)]
    superseded: bool,
}

impl MongoDocument<Reminder> for ReminderMongo {
    fn to_domain(self) -> Reminder {
        Reminder {
            id: self._id,
            medicine_id: self.medicine_id,
            user_id: self.user_id,
            scheduled_ts: self.scheduled_ts,
            taken: self.taken,
            skipped: self.skipped,
            taken_at: self.taken_at,
            notes: self.notes,
            priority: self.priority,
            superseded: self.superseded,
        }
    }

    fn from_domain(reminder: &Reminder) -> Self {
        Self {
            _id: reminder.id,
            medicine_id: reminder.medicine_id,
            user_id: reminder.user_id,
            scheduled_ts: reminder.scheduled_ts,
            taken: reminder.taken,
            skipped: reminder.skipped,
            taken_at: reminder.taken_at,
            notes: reminder.notes.clone(),
            priority: reminder.priority,
            superseded: reminder.superseded,
        }
    }

    fn get_id_filter(&self) -> Document {
        mongo_repo::get_id_filter(&self._id)
    }
}

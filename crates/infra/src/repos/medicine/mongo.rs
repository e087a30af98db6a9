use super::IMedicineRepo;
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use mongodb::{
    bson::{doc, Document},
    Collection, Database,
};
use pillbox_domain::{
    Dosage, Frequency, Medicine, MedicineType, Priority, ReminderTime, ID,
};
use serde::{Deserialize, Serialize};
use tracing::error;

pub struct MongoMedicineRepo {
    collection: Collection<Document>,
}

impl MongoMedicineRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("medicines"),
        }
    }

    async fn find_many(&self, filter: Document) -> Vec<Medicine> {
        let sort = doc! { "created": 1 };
        match mongo_repo::find_many_by::<_, MedicineMongo>(&self.collection, filter, Some(sort))
            .await
        {
            Ok(medicines) => medicines,
            Err(e) => {
                error!("Unable to query medicines: {:?}", e);
                vec![]
            }
        }
    }
}

#[async_trait::async_trait]
impl IMedicineRepo for MongoMedicineRepo {
    async fn insert(&self, medicine: &Medicine) -> anyhow::Result<()> {
        mongo_repo::insert::<_, MedicineMongo>(&self.collection, medicine).await
    }

    async fn save(&self, medicine: &Medicine) -> anyhow::Result<()> {
        mongo_repo::save::<_, MedicineMongo>(&self.collection, medicine).await
    }

    async fn find(&self, medicine_id: &ID) -> Option<Medicine> {
        mongo_repo::find::<_, MedicineMongo>(&self.collection, medicine_id).await
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Medicine> {
        self.find_many(doc! {
            "user_id": user_id.as_string(),
            "active": true
        })
        .await
    }

    async fn find_all_active(&self) -> Vec<Medicine> {
        self.find_many(doc! { "active": true }).await
    }

    async fn soft_delete(&self, medicine_id: &ID, updated: i64) -> anyhow::Result<bool> {
        let update = doc! {
            "$set": {
                "active": false,
                "updated": updated
            }
        };
        let filter = mongo_repo::get_id_filter(medicine_id);
        let res = self.collection.update_one(filter, update, None).await?;
        Ok(res.matched_count > 0)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct MedicineMongo {
    _id: ID,
    user_id: ID,
    name: String,
    dosage: Dosage,
    medicine_type: MedicineType,
    frequency: Frequency,
    instructions: Option<String>,
    reminder_times: Vec<ReminderTime>,
    priority: Priority,
    stock_quantity: Option<i64>,
    adherence_rate: i32,
    active: bool,
    created: i64,
    updated: i64,
}

impl MongoDocument<Medicine> for MedicineMongo {
    fn to_domain(self) -> Medicine {
        Medicine {
            id: self._id,
            user_id: self.user_id,
            name: self.name,
            dosage: self.dosage,
            medicine_type: self.medicine_type,
            frequency: self.frequency,
            instructions: self.instructions,
            reminder_times: self.reminder_times,
            priority: self.priority,
            stock_quantity: self.stock_quantity.map(|stock| stock.max(0) as u32),
            adherence_rate: self.adherence_rate.clamp(0, 100) as u8,
            active: self.active,
            created: self.created,
            updated: self.updated,
        }
    }

    fn from_domain(medicine: &Medicine) -> Self {
        Self {
            _id: medicine.id,
            user_id: medicine.user_id,
            name: medicine.name.clone(),
            dosage: medicine.dosage.clone(),
            medicine_type: medicine.medicine_type,
            frequency: medicine.frequency,
            instructions: medicine.instructions.clone(),
            reminder_times: medicine.reminder_times.clone(),
            priority: medicine.priority,
            stock_quantity: medicine.stock_quantity.map(i64::from),
            adherence_rate: i32::from(medicine.adherence_rate),
            active: medicine.active,
            created: medicine.created,
            updated: medicine.updated,
        }
    }

    fn get_id_filter(&self) -> Document {
        mongo_repo::get_id_filter(&self._id)
    }
}

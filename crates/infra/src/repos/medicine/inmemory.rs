use super::IMedicineRepo;
use crate::repos::shared::inmemory_repo::*;
use pillbox_domain::{Medicine, ID};

pub struct InMemoryMedicineRepo {
    medicines: std::sync::Mutex<Vec<Medicine>>,
}

impl InMemoryMedicineRepo {
    pub fn new() -> Self {
        Self {
            medicines: std::sync::Mutex::new(vec![]),
        }
    }
}

fn oldest_first(mut medicines: Vec<Medicine>) -> Vec<Medicine> {
    medicines.sort_by_key(|m| m.created);
    medicines
}

#[async_trait::async_trait]
impl IMedicineRepo for InMemoryMedicineRepo {
    async fn insert(&self, medicine: &Medicine) -> anyhow::Result<()> {
        insert(medicine, &self.medicines);
        Ok(())
    }

    async fn save(&self, medicine: &Medicine) -> anyhow::Result<()> {
        save(medicine, &self.medicines);
        Ok(())
    }

    async fn find(&self, medicine_id: &ID) -> Option<Medicine> {
        find(medicine_id, &self.medicines)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Medicine> {
        oldest_first(find_by(&self.medicines, |m| {
            m.active && m.user_id == *user_id
        }))
    }

    async fn find_all_active(&self) -> Vec<Medicine> {
        oldest_first(find_by(&self.medicines, |m| m.active))
    }

    async fn soft_delete(&self, medicine_id: &ID, updated: i64) -> anyhow::Result<bool> {
        let count = update_many(
            &self.medicines,
            |m| m.id == *medicine_id,
            |m| {
                m.active = false;
                m.updated = updated;
            },
        );
        Ok(count > 0)
    }
}

mod inmemory;
mod mongo;

pub use inmemory::InMemoryMedicineRepo;
pub use mongo::MongoMedicineRepo;
use pillbox_domain::{Medicine, ID};

#[async_trait::async_trait]
pub trait IMedicineRepo: Send + Sync {
    async fn insert(&self, medicine: &Medicine) -> anyhow::Result<()>;
    async fn save(&self, medicine: &Medicine) -> anyhow::Result<()>;
    /// Finds the `Medicine` regardless of it being active or not
    async fn find(&self, medicine_id: &ID) -> Option<Medicine>;
    /// Active `Medicine`s of the `User`, oldest first
    async fn find_by_user(&self, user_id: &ID) -> Vec<Medicine>;
    async fn find_all_active(&self) -> Vec<Medicine>;
    /// Deactivates the `Medicine`. Returns false when it does not exist.
    async fn soft_delete(&self, medicine_id: &ID, updated: i64) -> anyhow::Result<bool>;
}

#[cfg(test)]
mod tests {
    use crate::PillboxContext;
    use pillbox_domain::{Dosage, DosageUnit, Frequency, Medicine, MedicineType, ID};

    fn medicine(user_id: ID, name: &str, created: i64) -> Medicine {
        Medicine::new(
            user_id,
            name.into(),
            Dosage {
                amount: "500".into(),
                unit: DosageUnit::Milligram,
            },
            MedicineType::Tablet,
            Frequency::TwiceDaily,
            created,
        )
    }

    #[tokio::test]
    async fn it_soft_deletes_medicines() {
        let ctx = PillboxContext::create_inmemory();
        let user_id = ID::new();
        let metformin = medicine(user_id, "Metformin", 10);
        let vitamin = medicine(user_id, "Vitamin D3", 20);
        let other_user = medicine(ID::new(), "Lisinopril", 30);
        for m in &[&vitamin, &metformin, &other_user] {
            ctx.repos.medicines.insert(m).await.expect("To insert medicine");
        }

        let found = ctx.repos.medicines.find_by_user(&user_id).await;
        assert_eq!(
            found.iter().map(|m| m.id).collect::<Vec<_>>(),
            vec![metformin.id, vitamin.id]
        );

        assert!(ctx
            .repos
            .medicines
            .soft_delete(&metformin.id, 40)
            .await
            .expect("To delete"));
        assert!(!ctx
            .repos
            .medicines
            .soft_delete(&ID::new(), 40)
            .await
            .expect("To delete"));

        let found = ctx.repos.medicines.find_by_user(&user_id).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, vitamin.id);
        assert_eq!(ctx.repos.medicines.find_all_active().await.len(), 2);

        let deleted = ctx
            .repos
            .medicines
            .find(&metformin.id)
            .await
            .expect("To keep deleted medicine");
        assert!(!deleted.active);
        assert_eq!(deleted.updated, 40);
    }
}

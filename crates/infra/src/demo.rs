use crate::PillboxContext;
use pillbox_domain::{
    Dosage, DosageUnit, Frequency, Medicine, MedicineType, Priority, ReminderTime, User,
};
use tracing::info;

/// Token subject of the demo `User`
pub const DEMO_USER_EXTERNAL_ID: &str = "demo-user-123";

struct DemoMedicine {
    name: &'static str,
    medicine_type: MedicineType,
    amount: &'static str,
    unit: DosageUnit,
    instructions: &'static str,
    time: (u32, u32),
    adherence_rate: u8,
    priority: Priority,
}

const DEMO_MEDICINES: [DemoMedicine; 3] = [
    DemoMedicine {
        name: "Vitamin D3",
        medicine_type: MedicineType::Tablet,
        amount: "2000",
        unit: DosageUnit::InternationalUnit,
        instructions: "Take with breakfast for better absorption",
        time: (8, 0),
        adherence_rate: 96,
        priority: Priority::High,
    },
    DemoMedicine {
        name: "Blood Pressure Medicine",
        medicine_type: MedicineType::Tablet,
        amount: "5",
        unit: DosageUnit::Milligram,
        instructions: "Take after lunch, avoid grapefruit",
        time: (14, 0),
        adherence_rate: 88,
        priority: Priority::High,
    },
    DemoMedicine {
        name: "Calcium + Magnesium",
        medicine_type: MedicineType::Capsule,
        amount: "500",
        unit: DosageUnit::Milligram,
        instructions: "Take with dinner, helps with sleep",
        time: (20, 0),
        adherence_rate: 92,
        priority: Priority::Medium,
    },
];

/// Inserts the demo `User` with three `Medicine`s unless it already exists
pub async fn seed_demo_data(ctx: &PillboxContext) -> anyhow::Result<()> {
    if ctx
        .repos
        .users
        .find_by_external_id(DEMO_USER_EXTERNAL_ID)
        .await
        .is_some()
    {
        return Ok(());
    }

    let now = ctx.sys.get_timestamp_millis();
    let mut user = User::new(DEMO_USER_EXTERNAL_ID.into(), now);
    user.name = "Demo User".into();
    user.email = Some("demo@example.com".into());
    user.phone = Some("+919876543210".into());
    ctx.repos.users.insert(&user).await?;

    for demo in DEMO_MEDICINES.iter() {
        let mut medicine = Medicine::new(
            user.id,
            demo.name.into(),
            Dosage {
                amount: demo.amount.into(),
                unit: demo.unit,
            },
            demo.medicine_type,
            Frequency::OnceDaily,
            now,
        );
        medicine.instructions = Some(demo.instructions.into());
        let time = ReminderTime::new(demo.time.0, demo.time.1);
        medicine.set_reminder_times(time.into_iter().collect());
        medicine.priority = demo.priority;
        medicine.adherence_rate = demo.adherence_rate;
        ctx.repos.medicines.insert(&medicine).await?;
    }

    info!("Demo data initialized for user: {}", DEMO_USER_EXTERNAL_ID);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn it_seeds_demo_data_once() {
        let ctx = PillboxContext::create_inmemory();
        seed_demo_data(&ctx).await.expect("To seed");
        seed_demo_data(&ctx).await.expect("To seed");

        let user = ctx
            .repos
            .users
            .find_by_external_id(DEMO_USER_EXTERNAL_ID)
            .await
            .expect("To find demo user");
        let medicines = ctx.repos.medicines.find_by_user(&user.id).await;
        assert_eq!(medicines.len(), 3);
        assert!(medicines.iter().all(|m| m.validate().is_ok()));
        assert_eq!(medicines[0].reminder_times[0].to_string(), "08:00");
    }
}

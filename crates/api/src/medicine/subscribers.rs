use super::{create_medicine::CreateMedicineUseCase, update_medicine::UpdateMedicineUseCase};
use crate::reminder::expand_reminders::{ExpandRemindersTrigger, ExpandRemindersUseCase};
use crate::shared::usecase::{execute, Subscriber};
use pillbox_domain::Medicine;
use pillbox_infra::PillboxContext;

pub struct ExpandRemindersOnMedicineCreated;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateMedicineUseCase> for ExpandRemindersOnMedicineCreated {
    async fn notify(&self, e: &Medicine, ctx: &PillboxContext) {
        let expand_reminders = ExpandRemindersUseCase {
            trigger: ExpandRemindersTrigger::MedicineModified(e),
        };

        // Sideeffect, ignore result
        let _ = execute(expand_reminders, ctx).await;
    }
}

pub struct ExpandRemindersOnMedicineUpdated;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateMedicineUseCase> for ExpandRemindersOnMedicineUpdated {
    async fn notify(&self, e: &Medicine, ctx: &PillboxContext) {
        let expand_reminders = ExpandRemindersUseCase {
            trigger: ExpandRemindersTrigger::MedicineModified(e),
        };

        // Sideeffect, ignore result
        let _ = execute(expand_reminders, ctx).await;
    }
}

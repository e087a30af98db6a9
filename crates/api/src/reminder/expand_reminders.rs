use crate::shared::usecase::UseCase;
use chrono::Duration;
use pillbox_domain::{date::local_date, Medicine, Reminder, User, ID};
use pillbox_infra::PillboxContext;
use std::collections::{HashMap, HashSet};
use tracing::{error, info};

/// Days after today for which `Reminder`s are materialised
pub const EXPANSION_DAYS: i64 = 7;

/// Materialises the `Reminder`s of `Medicine`s from their reminder times
#[derive(Debug)]
pub struct ExpandRemindersUseCase<'a> {
    pub trigger: ExpandRemindersTrigger<'a>,
}

#[derive(Debug)]
pub enum ExpandRemindersTrigger<'a> {
    /// A `Medicine` has been created or updated
    MedicineModified(&'a Medicine),
    /// Periodic job that expands every active `Medicine`
    JobScheduler,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    OwnerNotFound(ID),
    StorageError,
}

/// The `Reminder`s of the `Medicine` from today until `EXPANSION_DAYS` days
/// ahead that are not yet stored. Doses scheduled before the last change
/// of the `Medicine` are left out.
pub fn missing_reminders(
    medicine: &Medicine,
    owner: &User,
    existing: &HashSet<i64>,
    now: i64,
) -> Vec<Reminder> {
    let today = match local_date(now, &owner.timezone) {
        Some(today) => today,
        None => return Vec::new(),
    };
    (0..=EXPANSION_DAYS)
        .flat_map(|offset| medicine.reminders_on(today + Duration::days(offset), owner))
        .filter(|r| r.scheduled_ts >= medicine.updated && !existing.contains(&r.scheduled_ts))
        .collect()
}

async fn expand_medicine(
    medicine: &Medicine,
    owner: &User,
    ctx: &PillboxContext,
) -> Result<usize, UseCaseError> {
    let existing = ctx
        .repos
        .reminders
        .find_by_medicine(&medicine.id)
        .await
        .into_iter()
        .map(|r| r.scheduled_ts)
        .collect::<HashSet<_>>();

    let reminders = missing_reminders(medicine, owner, &existing, ctx.sys.get_timestamp_millis());
    ctx.repos
        .reminders
        .bulk_insert(&reminders)
        .await
        .map_err(|_| UseCaseError::StorageError)?;

    Ok(reminders.len())
}

#[async_trait::async_trait(?Send)]
impl<'a> UseCase for ExpandRemindersUseCase<'a> {
    /// Number of `Reminder`s created
    type Response = usize;
    type Error = UseCaseError;

    const NAME: &'static str = "ExpandReminders";

    async fn execute(&mut self, ctx: &PillboxContext) -> Result<Self::Response, Self::Error> {
        match self.trigger {
            ExpandRemindersTrigger::MedicineModified(medicine) => {
                if !medicine.active {
                    return Ok(0);
                }
                let owner = ctx
                    .repos
                    .users
                    .find(&medicine.user_id)
                    .await
                    .ok_or(UseCaseError::OwnerNotFound(medicine.user_id))?;
                expand_medicine(medicine, &owner, ctx).await
            }
            ExpandRemindersTrigger::JobScheduler => {
                let medicines = ctx.repos.medicines.find_all_active().await;
                let mut owners: HashMap<ID, Option<User>> = HashMap::new();
                let mut created = 0;
                for medicine in &medicines {
                    if !owners.contains_key(&medicine.user_id) {
                        let owner = ctx.repos.users.find(&medicine.user_id).await;
                        owners.insert(medicine.user_id, owner);
                    }
                    let owner = match owners.get(&medicine.user_id) {
                        Some(Some(owner)) => owner,
                        _ => {
                            error!("Owner of medicine: {} was not found", medicine.id);
                            continue;
                        }
                    };
                    match expand_medicine(medicine, owner, ctx).await {
                        Ok(count) => created += count,
                        Err(e) => error!("Unable to expand medicine: {}: {:?}", medicine.id, e),
                    }
                }
                info!(
                    "Expanded {} reminders for {} medicines",
                    created,
                    medicines.len()
                );
                Ok(created)
            }
        }
    }
}

mod adherence;
mod auth;
mod base;
mod medicine;
mod reminder;
mod status;
mod user;

use adherence::AdherenceClient;
use auth::AuthClient;
pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use medicine::MedicineClient;
pub use medicine::{CreateMedicineInput, LogAdherenceInput, UpdateMedicineInput};
pub use pillbox_api_structs::dtos::*;
pub use pillbox_domain::{
    AdherenceGrade, AdherencePeriod, DayStat, Dosage, DosageUnit, Frequency, MedicineType,
    Priority, ReminderFilter, ReminderRecord, ReminderStatus, ReminderTime, UpcomingView, Urgency,
    ID,
};
use reminder::ReminderClient;
pub use reminder::CreateReminderInput;
use status::StatusClient;
use std::sync::Arc;
use user::UserClient;
pub use user::UpdateProfileInput;

// Domain
pub use pillbox_api_structs::dtos::MedicineDTO as Medicine;
pub use pillbox_api_structs::dtos::ReminderDTO as Reminder;
pub use pillbox_api_structs::dtos::UserDTO as User;

/// Pillbox Server SDK
///
/// The SDK contains methods for interacting with the Pillbox server
/// API on behalf of a single user.
#[derive(Clone)]
pub struct PillboxSDK {
    pub adherence: AdherenceClient,
    pub auth: AuthClient,
    pub medicine: MedicineClient,
    pub reminder: ReminderClient,
    pub status: StatusClient,
    pub user: UserClient,
}

impl PillboxSDK {
    /// `token` is sent as bearer token, an empty one sends no credentials
    pub fn new<T: Into<String>>(address: String, token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_token(token.into());
        let base = Arc::new(base);
        let adherence = AdherenceClient::new(base.clone());
        let auth = AuthClient::new(base.clone());
        let medicine = MedicineClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let user = UserClient::new(base);

        Self {
            adherence,
            auth,
            medicine,
            reminder,
            status,
            user,
        }
    }
}

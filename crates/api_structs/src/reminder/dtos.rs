use pillbox_domain::{
    date::format_timestamp, time_until_label, Dosage, Medicine, MedicineType, Priority, Reminder,
    ReminderStatus, Urgency, ID,
};
use serde::{Deserialize, Serialize};

/// The parts of the `Medicine` shown next to each of its doses
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderMedicineDTO {
    pub name: String,
    pub dosage: Dosage,
    #[serde(rename = "type")]
    pub medicine_type: MedicineType,
    pub instructions: Option<String>,
}

impl ReminderMedicineDTO {
    pub fn new(medicine: &Medicine) -> Self {
        Self {
            name: medicine.name.clone(),
            dosage: medicine.dosage.clone(),
            medicine_type: medicine.medicine_type,
            instructions: medicine.instructions.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub medicine_id: ID,
    pub medicine: Option<ReminderMedicineDTO>,
    pub scheduled_time: String,
    pub taken: bool,
    pub skipped: bool,
    pub taken_at: Option<String>,
    pub notes: Option<String>,
    pub priority: Priority,
    pub status: ReminderStatus,
    pub minutes_until: Option<i64>,
    pub minutes_overdue: Option<i64>,
}

impl ReminderDTO {
    /// `status` is the status of the `reminder` at `now`
    pub fn new(
        reminder: Reminder,
        status: ReminderStatus,
        medicine: Option<&Medicine>,
        now: i64,
    ) -> Self {
        Self {
            minutes_until: reminder.minutes_until(now),
            minutes_overdue: reminder.minutes_overdue(now),
            id: reminder.id,
            medicine_id: reminder.medicine_id,
            medicine: medicine.map(ReminderMedicineDTO::new),
            scheduled_time: format_timestamp(reminder.scheduled_ts),
            taken: reminder.taken,
            skipped: reminder.skipped,
            taken_at: reminder.taken_at.map(format_timestamp),
            notes: reminder.notes,
            priority: reminder.priority,
            status,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingDoseDTO {
    #[serde(flatten)]
    pub reminder: ReminderDTO,
    pub urgency: Urgency,
    pub time_until: String,
}

impl UpcomingDoseDTO {
    pub fn new(reminder: ReminderDTO, scheduled_ts: i64, now: i64) -> Self {
        Self {
            reminder,
            urgency: Urgency::new(scheduled_ts, now),
            time_until: time_until_label(scheduled_ts, now),
        }
    }
}

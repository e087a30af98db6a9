use pillbox_domain::{
    date::format_timestamp, Dosage, Frequency, Medicine, MedicineType, Priority, ReminderTime, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineDTO {
    pub id: ID,
    pub user_id: ID,
    pub name: String,
    pub dosage: Dosage,
    #[serde(rename = "type")]
    pub medicine_type: MedicineType,
    pub frequency: Frequency,
    pub instructions: Option<String>,
    pub reminder_times: Vec<ReminderTime>,
    pub priority: Priority,
    pub stock_quantity: Option<u32>,
    pub low_stock: bool,
    pub adherence_rate: u8,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl MedicineDTO {
    pub fn new(medicine: Medicine) -> Self {
        Self {
            low_stock: medicine.is_low_stock(),
            id: medicine.id,
            user_id: medicine.user_id,
            name: medicine.name,
            dosage: medicine.dosage,
            medicine_type: medicine.medicine_type,
            frequency: medicine.frequency,
            instructions: medicine.instructions,
            reminder_times: medicine.reminder_times,
            priority: medicine.priority,
            stock_quantity: medicine.stock_quantity,
            adherence_rate: medicine.adherence_rate,
            is_active: medicine.active,
            created_at: format_timestamp(medicine.created),
            updated_at: format_timestamp(medicine.updated),
        }
    }
}

use crate::dtos::{MedicineDTO, ReminderDTO};
use pillbox_domain::{Dosage, Frequency, Medicine, MedicineType, Priority, ReminderTime, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineResponse {
    pub medicine: MedicineDTO,
}

impl MedicineResponse {
    pub fn new(medicine: Medicine) -> Self {
        Self {
            medicine: MedicineDTO::new(medicine),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MedicinePathParams {
    pub medicine_id: ID,
}

pub mod create_medicine {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub dosage: Dosage,
        #[serde(rename = "type")]
        pub medicine_type: MedicineType,
        #[serde(default)]
        pub frequency: Option<Frequency>,
        #[serde(default)]
        pub instructions: Option<String>,
        /// Defaults to the times of the `frequency` when left out or empty
        #[serde(default)]
        pub reminder_times: Option<Vec<ReminderTime>>,
        #[serde(default)]
        pub priority: Option<Priority>,
        #[serde(default)]
        pub stock_quantity: Option<u32>,
    }

    pub type APIResponse = MedicineResponse;
}

pub mod get_medicines {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub medicines: Vec<MedicineDTO>,
    }

    impl APIResponse {
        pub fn new(medicines: Vec<Medicine>) -> Self {
            Self {
                medicines: medicines.into_iter().map(MedicineDTO::new).collect(),
            }
        }
    }
}

pub mod get_medicine {
    use super::*;

    pub type PathParams = MedicinePathParams;

    pub type APIResponse = MedicineResponse;
}

pub mod update_medicine {
    use super::*;

    /// Fields that are left out are not changed
    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub dosage: Option<Dosage>,
        #[serde(default, rename = "type")]
        pub medicine_type: Option<MedicineType>,
        #[serde(default)]
        pub frequency: Option<Frequency>,
        #[serde(default)]
        pub instructions: Option<String>,
        #[serde(default)]
        pub reminder_times: Option<Vec<ReminderTime>>,
        #[serde(default)]
        pub priority: Option<Priority>,
        #[serde(default)]
        pub stock_quantity: Option<u32>,
    }

    pub type PathParams = MedicinePathParams;

    pub type APIResponse = MedicineResponse;
}

pub mod delete_medicine {
    use super::*;

    pub type PathParams = MedicinePathParams;

    pub type APIResponse = MedicineResponse;
}

pub mod log_adherence {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub taken: bool,
        /// The dose to log. When left out the earliest open dose of
        /// today is used.
        #[serde(default)]
        pub reminder_id: Option<ID>,
        #[serde(default)]
        pub notes: Option<String>,
    }

    pub type PathParams = MedicinePathParams;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
        pub medicine: MedicineDTO,
        pub reminder: ReminderDTO,
    }

    impl APIResponse {
        pub fn new(medicine: Medicine, reminder: ReminderDTO) -> Self {
            Self {
                message: "Adherence logged successfully".into(),
                medicine: MedicineDTO::new(medicine),
                reminder,
            }
        }
    }
}

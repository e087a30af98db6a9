use crate::{APIResponse, BaseClient};
use pillbox_api_structs::*;
use pillbox_domain::{Dosage, Frequency, MedicineType, Priority, ReminderTime, ID};
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct MedicineClient {
    base: Arc<BaseClient>,
}

pub struct CreateMedicineInput {
    pub name: String,
    pub dosage: Dosage,
    pub medicine_type: MedicineType,
    pub frequency: Option<Frequency>,
    pub instructions: Option<String>,
    pub reminder_times: Option<Vec<ReminderTime>>,
    pub priority: Option<Priority>,
    pub stock_quantity: Option<u32>,
}

#[derive(Default)]
pub struct UpdateMedicineInput {
    pub medicine_id: ID,
    pub name: Option<String>,
    pub dosage: Option<Dosage>,
    pub medicine_type: Option<MedicineType>,
    pub frequency: Option<Frequency>,
    pub instructions: Option<String>,
    pub reminder_times: Option<Vec<ReminderTime>>,
    pub priority: Option<Priority>,
    pub stock_quantity: Option<u32>,
}

pub struct LogAdherenceInput {
    pub medicine_id: ID,
    pub taken: bool,
    pub reminder_id: Option<ID>,
    pub notes: Option<String>,
}

impl MedicineClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateMedicineInput,
    ) -> APIResponse<create_medicine::APIResponse> {
        let body = create_medicine::RequestBody {
            name: input.name,
            dosage: input.dosage,
            medicine_type: input.medicine_type,
            frequency: input.frequency,
            instructions: input.instructions,
            reminder_times: input.reminder_times,
            priority: input.priority,
            stock_quantity: input.stock_quantity,
        };
        self.base
            .post(body, "medicines".into(), StatusCode::CREATED)
            .await
    }

    pub async fn list(&self) -> APIResponse<get_medicines::APIResponse> {
        self.base.get("medicines".into(), StatusCode::OK).await
    }

    pub async fn get(&self, medicine_id: ID) -> APIResponse<get_medicine::APIResponse> {
        self.base
            .get(format!("medicines/{}", medicine_id), StatusCode::OK)
            .await
    }

    pub async fn update(
        &self,
        input: UpdateMedicineInput,
    ) -> APIResponse<update_medicine::APIResponse> {
        let body = update_medicine::RequestBody {
            name: input.name,
            dosage: input.dosage,
            medicine_type: input.medicine_type,
            frequency: input.frequency,
            instructions: input.instructions,
            reminder_times: input.reminder_times,
            priority: input.priority,
            stock_quantity: input.stock_quantity,
        };
        self.base
            .put(
                body,
                format!("medicines/{}", input.medicine_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, medicine_id: ID) -> APIResponse<delete_medicine::APIResponse> {
        self.base
            .delete(format!("medicines/{}", medicine_id), StatusCode::OK)
            .await
    }

    pub async fn log_adherence(
        &self,
        input: LogAdherenceInput,
    ) -> APIResponse<log_adherence::APIResponse> {
        let body = log_adherence::RequestBody {
            taken: input.taken,
            reminder_id: input.reminder_id,
            notes: input.notes,
        };
        self.base
            .post(
                body,
                format!("medicines/{}/adherence", input.medicine_id),
                StatusCode::OK,
            )
            .await
    }
}

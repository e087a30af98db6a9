mod create_reminder;
mod evaluate_reminders;
pub mod expand_reminders;
mod get_today_reminders;
mod get_upcoming_reminders;
pub mod log_reminder_action;

use actix_web::web;
use create_reminder::create_reminder_controller;
use evaluate_reminders::evaluate_reminders_controller;
use get_today_reminders::get_today_reminders_controller;
use get_upcoming_reminders::get_upcoming_reminders_controller;
use log_reminder_action::{mark_reminder_skipped_controller, mark_reminder_taken_controller};
use pillbox_api_structs::dtos::ReminderDTO;
use pillbox_domain::{Medicine, Reminder, ReminderError, User, ID};
use pillbox_infra::PillboxContext;
use std::collections::HashMap;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders", web::post().to(create_reminder_controller));
    cfg.route(
        "/reminders/today",
        web::get().to(get_today_reminders_controller),
    );
    cfg.route(
        "/reminders/upcoming",
        web::get().to(get_upcoming_reminders_controller),
    );
    cfg.route(
        "/reminders/status",
        web::post().to(evaluate_reminders_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/taken",
        web::post().to(mark_reminder_taken_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}/skipped",
        web::post().to(mark_reminder_skipped_controller),
    );
}

/// Active `Medicine`s of the `User` by id
pub async fn active_medicines(user: &User, ctx: &PillboxContext) -> HashMap<ID, Medicine> {
    ctx.repos
        .medicines
        .find_by_user(&user.id)
        .await
        .into_iter()
        .map(|m| (m.id, m))
        .collect()
}

pub fn reminder_dto(
    reminder: Reminder,
    medicine: Option<&Medicine>,
    now: i64,
) -> Result<ReminderDTO, ReminderError> {
    let status = reminder.status(now)?;
    Ok(ReminderDTO::new(reminder, status, medicine, now))
}

/// Builds the dtos of the `Reminder`s, leaving out those of `Medicine`s
/// that are not in `medicines`
pub fn reminder_dtos(
    reminders: Vec<Reminder>,
    medicines: &HashMap<ID, Medicine>,
    now: i64,
) -> Result<Vec<ReminderDTO>, ReminderError> {
    reminders
        .into_iter()
        .filter_map(|reminder| {
            let medicine = medicines.get(&reminder.medicine_id)?;
            Some(reminder_dto(reminder, Some(medicine), now))
        })
        .collect()
}

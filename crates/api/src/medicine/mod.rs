mod create_medicine;
mod delete_medicine;
mod get_medicine;
mod get_medicines;
mod log_adherence;
mod subscribers;
mod update_medicine;

use actix_web::web;
use create_medicine::create_medicine_controller;
use delete_medicine::delete_medicine_controller;
use get_medicine::get_medicine_controller;
use get_medicines::get_medicines_controller;
use log_adherence::log_adherence_controller;
use update_medicine::update_medicine_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/medicines", web::get().to(get_medicines_controller));
    cfg.route("/medicines", web::post().to(create_medicine_controller));
    cfg.route(
        "/medicines/{medicine_id}",
        web::get().to(get_medicine_controller),
    );
    cfg.route(
        "/medicines/{medicine_id}",
        web::put().to(update_medicine_controller),
    );
    cfg.route(
        "/medicines/{medicine_id}",
        web::delete().to(delete_medicine_controller),
    );
    cfg.route(
        "/medicines/{medicine_id}/adherence",
        web::post().to(log_adherence_controller),
    );
}

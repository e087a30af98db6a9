mod get_adherence;
mod summarize_adherence;

use actix_web::web;
use get_adherence::get_adherence_controller;
use summarize_adherence::summarize_adherence_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/adherence", web::get().to(get_adherence_controller));
    cfg.route(
        "/adherence/summary",
        web::post().to(summarize_adherence_controller),
    );
}

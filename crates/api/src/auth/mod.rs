mod google_login;

use actix_web::web;
use google_login::google_login_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/google", web::post().to(google_login_controller));
}

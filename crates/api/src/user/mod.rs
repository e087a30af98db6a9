pub mod create_user;
mod get_profile;
mod update_profile;

use actix_web::web;
use get_profile::get_profile_controller;
use update_profile::update_profile_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/users/profile", web::get().to(get_profile_controller));
    cfg.route("/users/profile", web::put().to(update_profile_controller));
}

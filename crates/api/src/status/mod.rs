use actix_web::{web, HttpRequest, HttpResponse};
use pillbox_api_structs::{get_api_docs, get_service_health, route_not_found};
use pillbox_domain::date::format_timestamp;
use pillbox_infra::PillboxContext;

const API_TITLE: &str = "Pillbox Reminder API";
const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Every route served under `/api`
pub const ENDPOINTS: &[&str] = &[
    "GET /api/health",
    "GET /api/docs",
    "POST /api/auth/google",
    "GET /api/users/profile",
    "PUT /api/users/profile",
    "GET /api/medicines",
    "POST /api/medicines",
    "GET /api/medicines/{id}",
    "PUT /api/medicines/{id}",
    "DELETE /api/medicines/{id}",
    "POST /api/medicines/{id}/adherence",
    "GET /api/reminders/today",
    "GET /api/reminders/upcoming",
    "POST /api/reminders",
    "POST /api/reminders/status",
    "POST /api/reminders/{id}/taken",
    "POST /api/reminders/{id}/skipped",
    "GET /api/adherence",
    "POST /api/adherence/summary",
];

async fn status(ctx: web::Data<PillboxContext>) -> HttpResponse {
    HttpResponse::Ok().json(get_service_health::APIResponse {
        status: "OK".into(),
        message: format!("{} is running!", API_TITLE),
        timestamp: format_timestamp(ctx.sys.get_timestamp_millis()),
        storage: ctx.storage().into(),
        version: API_VERSION.into(),
    })
}

async fn docs() -> HttpResponse {
    HttpResponse::Ok().json(get_api_docs::APIResponse {
        title: API_TITLE.into(),
        version: API_VERSION.into(),
        endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
        authentication: "Bearer token (HS256 JWT) required for protected routes".into(),
    })
}

/// Fallback for requests that match no route
pub async fn not_found(http_req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound().json(route_not_found::APIResponse {
        success: false,
        message: "Route not found".into(),
        path: http_req.path().to_string(),
        available_routes: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(status));
    cfg.route("/docs", web::get().to(docs));
}

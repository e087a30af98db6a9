mod adherence;
mod auth;
mod error;
mod job_schedulers;
mod medicine;
mod reminder;
mod shared;
mod status;
mod user;

use actix_cors::Cors;
use actix_web::{dev::Server, http::header, middleware, web, App, HttpServer};
use error::PillboxError;
use job_schedulers::start_reminders_expansion_job_scheduler;
use pillbox_infra::{Config, PillboxContext};
use std::net::TcpListener;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    adherence::configure_routes(cfg);
    auth::configure_routes(cfg);
    medicine::configure_routes(cfg);
    reminder::configure_routes(cfg);
    status::configure_routes(cfg);
    user::configure_routes(cfg);
}

/// Renders malformed paths, queries and bodies as `PillboxError::BadClientData`
fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        PillboxError::BadClientData(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        PillboxError::BadClientData(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        PillboxError::BadClientData(err.to_string()).into()
    }));
}

fn cors(config: &Config) -> Cors {
    config
        .cors_allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .supports_credentials()
        .max_age(3600)
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: PillboxContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        Application::start_job_schedulers(context);

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(context: PillboxContext) {
        start_reminders_expansion_job_scheduler(context);
    }

    async fn configure_server(context: PillboxContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        info!(
            "Listening on port: {} with {} storage",
            port,
            context.storage()
        );

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(cors(&ctx.config))
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .configure(configure_extractors)
                .service(web::scope("/api").configure(configure_server_api))
                .default_service(web::to(status::not_found))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

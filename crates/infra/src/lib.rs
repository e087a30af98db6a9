mod config;
mod demo;
mod repos;
mod system;

pub use config::Config;
pub use demo::{seed_demo_data, DEMO_USER_EXTERNAL_ID};
pub use repos::{DuplicateExternalIdError, IMedicineRepo, IReminderRepo, IUserRepo, Repos};
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct PillboxContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl PillboxContext {
    async fn create(mut config: Config) -> Self {
        let repos = match config.mongodb_uri.clone() {
            Some(uri) => match Repos::create_mongodb(&uri, &config.mongodb_db_name).await {
                Ok(repos) => {
                    info!("Using MongoDB database: {}", config.mongodb_db_name);
                    repos
                }
                Err(e) => {
                    error!("Unable to connect to MongoDB: {:?}", e);
                    warn!("Falling back to the inmemory repositories, data will not be persisted.");
                    config.mongodb_uri = None;
                    Repos::create_inmemory()
                }
            },
            None => {
                warn!("MONGODB_URI is not set, using the inmemory repositories.");
                Repos::create_inmemory()
            }
        };
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
        }
    }

    pub fn create_inmemory() -> Self {
        let mut config = Config::new();
        config.mongodb_uri = None;
        Self {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
        }
    }

    /// Name of the store backing the repositories
    pub fn storage(&self) -> &'static str {
        if self.config.mongodb_uri.is_some() {
            "mongodb"
        } else {
            "inmemory"
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> PillboxContext {
    let ctx = PillboxContext::create(Config::new()).await;
    if ctx.config.seed_demo_data {
        if let Err(e) = seed_demo_data(&ctx).await {
            error!("Unable to seed demo data: {:?}", e);
        }
    }
    ctx
}

use pillbox_utils::create_random_secret;
use tracing::{info, warn};

const DEFAULT_CORS_ORIGINS: [&str; 4] = [
    "http://localhost:5173",
    "http://localhost:3000",
    "http://127.0.0.1:5173",
    "http://127.0.0.1:3000",
];

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Secret used to verify the HS256 signed bearer tokens of users
    pub jwt_secret: String,
    /// Connection string of the MongoDB deployment. When it is missing the
    /// repositories are kept in memory.
    pub mongodb_uri: Option<String>,
    pub mongodb_db_name: String,
    /// Seed the in memory store with a demo user and medicines
    pub seed_demo_data: bool,
    /// Origins the browser dashboard is allowed to call the API from
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn new() -> Self {
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                warn!("Did not find JWT_SECRET environment variable. Going to create one, tokens signed before a restart will be rejected.");
                let secret = create_random_secret(32);
                info!("Secret for verifying user tokens was generated and set to: {}", secret);
                secret
            }
        };
        let default_port = 5000;
        let port = match std::env::var("PORT") {
            Ok(port) => match port.parse::<usize>() {
                Ok(port) => port,
                Err(_) => {
                    warn!(
                        "The given PORT: {} is not valid, falling back to the default port: {}.",
                        port, default_port
                    );
                    default_port
                }
            },
            Err(_) => default_port,
        };
        let mongodb_uri = std::env::var("MONGODB_URI")
            .ok()
            .filter(|uri| !uri.is_empty());
        let mongodb_db_name =
            std::env::var("MONGODB_DB_NAME").unwrap_or_else(|_| "pillbox".into());
        let seed_demo_data = match std::env::var("SEED_DEMO_DATA") {
            Ok(seed) => parse_flag(&seed),
            Err(_) => false,
        };
        let cors_allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
            Ok(origins) => parse_origins(&origins),
            Err(_) => DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Self {
            port,
            jwt_secret,
            mongodb_uri,
            mongodb_db_name,
            seed_demo_data,
            cors_allowed_origins,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}

fn parse_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/').to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

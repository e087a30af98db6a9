use jsonwebtoken::{encode, EncodingKey, Header};
use pillbox_api::Application;
use pillbox_infra::{Config, PillboxContext};
use pillbox_sdk::PillboxSDK;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

const JWT_SECRET: &str = "pillbox-integration-test-secret";

#[derive(Serialize)]
struct Claims {
    sub: String,
    exp: usize,
    name: Option<String>,
    email: Option<String>,
}

pub struct TestApp {
    pub config: Config,
    pub address: String,
}

impl TestApp {
    /// Signs a token for the subject with the secret of the server
    pub fn token(&self, sub: &str) -> String {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Clock before unix epoch")
            .as_secs() as usize
            + 60 * 60;
        let claims = Claims {
            sub: sub.into(),
            exp,
            name: Some("Priya Sharma".into()),
            email: Some(format!("{}@example.com", sub.replace('|', "-"))),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .expect("To sign token")
    }

    /// SDK acting on behalf of the given subject
    pub fn sdk_for(&self, sub: &str) -> PillboxSDK {
        PillboxSDK::new(self.address.clone(), self.token(sub))
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, PillboxSDK, String) {
    let mut ctx = PillboxContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.jwt_secret = JWT_SECRET.into();

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        config,
        address: address.clone(),
    };
    let sdk = PillboxSDK::new(address.clone(), "");
    (app, sdk, address)
}

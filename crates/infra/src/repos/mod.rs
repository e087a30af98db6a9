mod medicine;
mod reminder;
mod shared;
mod user;

pub use medicine::IMedicineRepo;
use medicine::{InMemoryMedicineRepo, MongoMedicineRepo};
pub use reminder::IReminderRepo;
use reminder::{InMemoryReminderRepo, MongoReminderRepo};
pub use user::{DuplicateExternalIdError, IUserRepo};
use user::{InMemoryUserRepo, MongoUserRepo};

use mongodb::{bson::doc, options::ClientOptions, Client};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub medicines: Arc<dyn IMedicineRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
}

impl Repos {
    pub async fn create_mongodb(connection_string: &str, db_name: &str) -> anyhow::Result<Self> {
        let client_options = ClientOptions::parse(connection_string).await?;
        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);
        let users = MongoUserRepo::new(&db);

        // This is needed to make sure that db is ready when opening server
        info!("DB CHECKING CONNECTION ...");
        db.run_command(doc! { "ping": 1 }, None).await?;
        info!("DB CHECKING CONNECTION ... [done]");
        users.create_indexes().await?;
        Ok(Self {
            users: Arc::new(users),
            medicines: Arc::new(MongoMedicineRepo::new(&db)),
            reminders: Arc::new(MongoReminderRepo::new(&db)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            medicines: Arc::new(InMemoryMedicineRepo::new()),
            reminders: Arc::new(InMemoryReminderRepo::new()),
        }
    }
}

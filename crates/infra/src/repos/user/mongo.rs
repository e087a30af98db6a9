use super::{DuplicateExternalIdError, IUserRepo};
use crate::repos::shared::mongo_repo::{self, MongoDocument};
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use pillbox_domain::{Tz, User, ID};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub struct MongoUserRepo {
    collection: Collection<Document>,
}

impl MongoUserRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }

    /// Makes the database reject a second `User` for the same external id
    pub async fn create_indexes(&self) -> anyhow::Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "external_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index, None).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl IUserRepo for MongoUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        match mongo_repo::insert::<_, UserMongo>(&self.collection, user).await {
            Err(e) if mongo_repo::is_duplicate_key_error(&e) => {
                Err(DuplicateExternalIdError(user.external_id.clone()).into())
            }
            res => res,
        }
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        mongo_repo::save::<_, UserMongo>(&self.collection, user).await
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        mongo_repo::find::<_, UserMongo>(&self.collection, user_id).await
    }

    async fn find_by_external_id(&self, external_id: &str) -> Option<User> {
        let filter = doc! {
            "external_id": external_id
        };
        mongo_repo::find_one_by::<_, UserMongo>(&self.collection, filter).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct UserMongo {
    _id: ID,
    external_id: String,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    avatar: Option<String>,
    timezone: String,
    created: i64,
}

impl MongoDocument<User> for UserMongo {
    fn to_domain(self) -> User {
        let timezone = self.timezone.parse::<Tz>().unwrap_or_else(|_| {
            warn!("Stored timezone: {} is unknown, using UTC", self.timezone);
            Tz::UTC
        });
        User {
            id: self._id,
            external_id: self.external_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            avatar: self.avatar,
            timezone,
            created: self.created,
        }
    }

    fn from_domain(user: &User) -> Self {
        Self {
            _id: user.id,
            external_id: user.external_id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            avatar: user.avatar.clone(),
            timezone: user.timezone.name().to_string(),
            created: user.created,
        }
    }

    fn get_id_filter(&self) -> Document {
        mongo_repo::get_id_filter(&self._id)
    }
}

use anyhow::Result;
use futures::stream::StreamExt;
use mongodb::{
    bson::{self, doc, Document},
    error::{ErrorKind, WriteFailure},
    options::{FindOptions, ReplaceOptions},
    Collection, Cursor,
};
use pillbox_domain::ID;
use serde::{de::DeserializeOwned, Serialize};
use tracing::error;

const DUPLICATE_KEY_CODE: i32 = 11000;

pub trait MongoDocument<E>: Serialize + DeserializeOwned {
    fn to_domain(self) -> E;
    fn from_domain(entity: &E) -> Self;
    fn get_id_filter(&self) -> Document;
}

pub fn get_id_filter(id: &ID) -> Document {
    doc! {
        "_id": id.as_string()
    }
}

fn entity_to_persistence<E, D: MongoDocument<E>>(entity: &E) -> Result<Document> {
    let raw = D::from_domain(entity);
    Ok(bson::to_document(&raw)?)
}

fn persistence_to_entity<E, D: MongoDocument<E>>(doc: Document) -> Result<E> {
    let raw: D = bson::from_document(doc)?;
    Ok(raw.to_domain())
}

pub async fn insert<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    entity: &E,
) -> Result<()> {
    let doc = entity_to_persistence::<E, D>(entity)?;
    collection.insert_one(doc, None).await?;
    Ok(())
}

/// Whether the write was rejected by a unique index
pub fn is_duplicate_key_error(error: &anyhow::Error) -> bool {
    match error.downcast_ref::<mongodb::error::Error>() {
        Some(e) => matches!(
            e.kind.as_ref(),
            ErrorKind::Write(WriteFailure::WriteError(write_error))
                if write_error.code == DUPLICATE_KEY_CODE
        ),
        None => false,
    }
}

pub async fn bulk_insert<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    entities: &[E],
) -> Result<()> {
    if entities.is_empty() {
        return Ok(());
    }
    let docs = entities
        .iter()
        .map(|e| entity_to_persistence::<E, D>(e))
        .collect::<Result<Vec<_>>>()?;
    collection.insert_many(docs, None).await?;
    Ok(())
}

/// Replaces the stored document, inserting it when missing
pub async fn save<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    entity: &E,
) -> Result<()> {
    let raw = D::from_domain(entity);
    let filter = raw.get_id_filter();
    let doc = bson::to_document(&raw)?;
    let options = ReplaceOptions::builder().upsert(true).build();
    collection.replace_one(filter, doc, options).await?;
    Ok(())
}

pub async fn update_many(
    collection: &Collection<Document>,
    filter: Document,
    update: Document,
) -> Result<u64> {
    collection
        .update_many(filter, update, None)
        .await
        .map(|res| res.modified_count)
        .map_err(anyhow::Error::new)
}

pub async fn find<E, D: MongoDocument<E>>(collection: &Collection<Document>, id: &ID) -> Option<E> {
    find_one_by::<E, D>(collection, get_id_filter(id)).await
}

pub async fn find_one_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
) -> Option<E> {
    match collection.find_one(filter, None).await {
        Ok(Some(doc)) => match persistence_to_entity::<E, D>(doc) {
            Ok(entity) => Some(entity),
            Err(e) => {
                error!("Unable to read stored document: {:?}", e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            error!("Unable to query the database: {:?}", e);
            None
        }
    }
}

pub async fn find_many_by<E, D: MongoDocument<E>>(
    collection: &Collection<Document>,
    filter: Document,
    sort: Option<Document>,
) -> Result<Vec<E>> {
    let options = FindOptions::builder().sort(sort).build();
    let cursor = collection.find(filter, options).await?;
    Ok(consume_cursor::<E, D>(cursor).await)
}

async fn consume_cursor<E, D: MongoDocument<E>>(mut cursor: Cursor<Document>) -> Vec<E> {
    let mut documents = vec![];
    while let Some(result) = cursor.next().await {
        match result.map_err(anyhow::Error::new).and_then(persistence_to_entity::<E, D>) {
            Ok(entity) => documents.push(entity),
            Err(e) => {
                error!("Error reading document from cursor: {:?}", e);
            }
        }
    }

    documents
}

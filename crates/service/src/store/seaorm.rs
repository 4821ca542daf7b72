use async_trait::async_trait;
use models::{document, Document};
use sea_orm::{ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect, Set};
use serde_json::Value;

use super::DocumentStore;
use crate::errors::ServiceError;

/// SeaORM-backed store: one `documents` table, partitioned by `collection`.
#[derive(Clone)]
pub struct SeaOrmDocumentStore {
    pub db: DatabaseConnection,
}

impl SeaOrmDocumentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create the backing table if this is a fresh database.
    pub async fn ensure_schema(&self) -> Result<(), ServiceError> {
        models::db::ensure_schema(&self.db).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for SeaOrmDocumentStore {
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<(), ServiceError> {
        let am = document::ActiveModel {
            pk: NotSet,
            collection: Set(collection.to_string()),
            body: Set(Value::Object(doc)),
        };
        document::Entity::insert(am).exec(&self.db).await?;
        Ok(())
    }

    async fn find(&self, collection: &str, limit: u64) -> Result<Vec<Document>, ServiceError> {
        // no ORDER BY: callers get whatever order Postgres returns
        let rows = document::Entity::find()
            .filter(document::Column::Collection.eq(collection))
            .limit(limit)
            .all(&self.db)
            .await?;
        rows.into_iter()
            .map(|row| match row.body {
                Value::Object(map) => Ok(map),
                other => Err(ServiceError::Storage(format!(
                    "document {} in {collection} is not an object: {other}",
                    row.pk
                ))),
            })
            .collect()
    }

    async fn close(&self) -> Result<(), ServiceError> {
        self.db.clone().close().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    async fn store() -> Option<SeaOrmDocumentStore> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return None; }
        let db = match models::db::connect().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return None;
            }
        };
        let store = SeaOrmDocumentStore::new(db);
        store.ensure_schema().await.expect("ensure schema");
        Some(store)
    }

    #[tokio::test]
    async fn insert_and_find_without_row_id() -> Result<(), anyhow::Error> {
        let Some(store) = store().await else { return Ok(()) };
        let collection = format!("test_{}", Uuid::new_v4().simple());

        for n in 0..3 {
            let Value::Object(doc) = json!({"id": format!("doc-{n}"), "n": n}) else { unreachable!() };
            store.insert_one(&collection, doc).await?;
        }

        let all = store.find(&collection, 1000).await?;
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|d| !d.contains_key("pk") && !d.contains_key("_id")));

        let capped = store.find(&collection, 2).await?;
        assert_eq!(capped.len(), 2);

        assert!(store.find(&format!("{collection}_empty"), 10).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn ensure_schema_is_repeatable() -> Result<(), anyhow::Error> {
        let Some(store) = store().await else { return Ok(()) };
        store.ensure_schema().await?;
        Ok(())
    }
}

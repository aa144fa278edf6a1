use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sqlx::Row;
use uuid::Uuid;

use crate::store::document::DocRef;
use crate::store::manager::{StoreError, StoreManager};

/// Typed handle over a named collection in the document store.
///
/// Documents are stored as JSONB; equality filters use JSONB containment so
/// `{"uid": "abc", "is_deleted": false}` matches exactly the way the queries
/// read.
pub struct Collection<T> {
    name: &'static str,
    _phantom: std::marker::PhantomData<fn() -> T>,
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _phantom: std::marker::PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn encode(&self, doc: &T) -> Result<Value, StoreError> {
        serde_json::to_value(doc)
            .map_err(|e| StoreError::QueryError(format!("failed to encode {} document: {}", self.name, e)))
    }

    fn decode(&self, data: Value) -> Result<T, StoreError> {
        serde_json::from_value(data)
            .map_err(|e| StoreError::QueryError(format!("failed to decode {} document: {}", self.name, e)))
    }

    /// Insert a new document and return its reference.
    pub async fn add(&self, doc: &T) -> Result<DocRef, StoreError> {
        let pool = StoreManager::pool().await?;
        let id = Uuid::new_v4();
        let data = self.encode(doc)?;

        sqlx::query("INSERT INTO documents (id, collection, data) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(self.name)
            .bind(&data)
            .execute(&pool)
            .await?;

        Ok(DocRef::new(self.name, id))
    }

    /// Snapshot a document by reference, or None if it does not exist.
    pub async fn try_get(&self, doc_ref: &DocRef) -> Result<Option<T>, StoreError> {
        let pool = StoreManager::pool().await?;

        let row = sqlx::query("SELECT data FROM documents WHERE collection = $1 AND id = $2")
            .bind(self.name)
            .bind(doc_ref.id)
            .fetch_optional(&pool)
            .await?;

        match row {
            Some(row) => {
                let data: Value = row
                    .try_get("data")
                    .map_err(|e| StoreError::QueryError(e.to_string()))?;
                Ok(Some(self.decode(data)?))
            }
            None => Ok(None),
        }
    }

    /// Snapshot a document by reference; missing documents are an error.
    pub async fn get(&self, doc_ref: &DocRef) -> Result<T, StoreError> {
        self.try_get(doc_ref).await?.ok_or_else(|| {
            StoreError::NotFound(format!("Document '{}' was not found.", doc_ref.path()))
        })
    }

    /// Overwrite an existing document.
    pub async fn set(&self, doc_ref: &DocRef, doc: &T) -> Result<(), StoreError> {
        let pool = StoreManager::pool().await?;
        let data = self.encode(doc)?;

        let result = sqlx::query("UPDATE documents SET data = $3 WHERE collection = $1 AND id = $2")
            .bind(self.name)
            .bind(doc_ref.id)
            .bind(&data)
            .execute(&pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!(
                "Document '{}' was not found.",
                doc_ref.path()
            )));
        }
        Ok(())
    }

    /// First document whose data contains the given filter object.
    pub async fn find_first(&self, filter: &Value) -> Result<Option<(DocRef, T)>, StoreError> {
        let pool = StoreManager::pool().await?;

        let row = sqlx::query("SELECT id, data FROM documents WHERE collection = $1 AND data @> $2 LIMIT 1")
            .bind(self.name)
            .bind(filter)
            .fetch_optional(&pool)
            .await?;

        match row {
            Some(row) => {
                let id: Uuid = row
                    .try_get("id")
                    .map_err(|e| StoreError::QueryError(e.to_string()))?;
                let data: Value = row
                    .try_get("data")
                    .map_err(|e| StoreError::QueryError(e.to_string()))?;
                Ok(Some((DocRef::new(self.name, id), self.decode(data)?)))
            }
            None => Ok(None),
        }
    }

    /// All documents whose data contains the given filter object.
    pub async fn find_all(&self, filter: &Value) -> Result<Vec<(DocRef, T)>, StoreError> {
        let pool = StoreManager::pool().await?;

        let rows = sqlx::query("SELECT id, data FROM documents WHERE collection = $1 AND data @> $2")
            .bind(self.name)
            .bind(filter)
            .fetch_all(&pool)
            .await?;

        let mut docs = Vec::with_capacity(rows.len());
        for row in rows {
            let id: Uuid = row
                .try_get("id")
                .map_err(|e| StoreError::QueryError(e.to_string()))?;
            let data: Value = row
                .try_get("data")
                .map_err(|e| StoreError::QueryError(e.to_string()))?;
            docs.push((DocRef::new(self.name, id), self.decode(data)?));
        }
        Ok(docs)
    }
}

use arrow::array::{Array, FixedSizeListArray, Float32Array, RecordBatchIterator, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use futures::TryStreamExt;
use lancedb::{
    query::{ExecutableQuery, QueryBase},
    Connection, Table,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use super::embedder::Embedder;
use crate::error::{Error, Result};
use crate::loader::RecipeRecord;

/// Persistent vector store rooted at a local directory, backed by
/// LanceDB. Collections are tables of embedded recipe entries.
pub struct RecipeStore {
    connection: Connection,
    embedder: Arc<dyn Embedder>,
}

/// Handle to one populated (or freshly created) collection.
pub struct RecipeCollection {
    table: Table,
    embedder: Arc<dyn Embedder>,
}

/// One nearest-neighbor match, ranked by ascending distance.
#[derive(Debug, Clone)]
pub struct RecipeMatch {
    pub id: String,
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub distance: f32,
}

impl RecipeStore {
    /// Open the store, creating its directory if needed.
    pub async fn open(path: impl AsRef<Path>, embedder: Arc<dyn Embedder>) -> Result<Self> {
        let path = path.as_ref();

        std::fs::create_dir_all(path)
            .map_err(|e| Error::Store(format!("Failed to create store directory: {e}")))?;
        let path = path
            .canonicalize()
            .map_err(|e| Error::Store(format!("Failed to resolve store directory: {e}")))?;

        let uri = format!("file://{}", path.display());
        let connection = lancedb::connect(&uri)
            .execute()
            .await
            .map_err(|e| Error::Store(format!("Failed to connect to vector store: {e}")))?;

        debug!("Vector store opened at {:?}", path);

        Ok(Self {
            connection,
            embedder,
        })
    }

    /// Create a collection, dropping any previous generation with the
    /// same name so repeated indexing passes replace rather than
    /// accumulate entries.
    pub async fn create_collection(&self, name: &str) -> Result<RecipeCollection> {
        let existing = self
            .connection
            .table_names()
            .execute()
            .await
            .map_err(|e| Error::Store(format!("Failed to list collections: {e}")))?;

        if existing.iter().any(|t| t == name) {
            info!("Dropping previous '{name}' collection");
            self.connection
                .drop_table(name)
                .await
                .map_err(|e| Error::Store(format!("Failed to drop collection: {e}")))?;
        }

        let schema = collection_schema(self.embedder.dimension());
        let table = self
            .connection
            .create_empty_table(name, schema)
            .execute()
            .await
            .map_err(|e| Error::Store(format!("Failed to create collection: {e}")))?;

        info!("Collection '{name}' created");

        Ok(RecipeCollection {
            table,
            embedder: self.embedder.clone(),
        })
    }

    /// Open an existing collection, or `None` if it has never been
    /// built.
    pub async fn open_collection(&self, name: &str) -> Result<Option<RecipeCollection>> {
        let existing = self
            .connection
            .table_names()
            .execute()
            .await
            .map_err(|e| Error::Store(format!("Failed to list collections: {e}")))?;

        if !existing.iter().any(|t| t == name) {
            return Ok(None);
        }

        let table = self
            .connection
            .open_table(name)
            .execute()
            .await
            .map_err(|e| Error::Store(format!("Failed to open collection: {e}")))?;

        Ok(Some(RecipeCollection {
            table,
            embedder: self.embedder.clone(),
        }))
    }
}

impl RecipeCollection {
    /// Embed a record's ingredients text and insert it under the given
    /// id. One entry per call; duplicate-id handling is the indexer's
    /// concern (it rebuilds the collection from scratch).
    pub async fn add(&self, id: &str, record: &RecipeRecord) -> Result<()> {
        let vectors = self.embedder.embed(std::slice::from_ref(&record.ingredients))?;
        let vector = vectors
            .into_iter()
            .next()
            .ok_or_else(|| Error::Embedding("Embedder returned no vector".to_string()))?;

        let batch = self.entry_batch(id, record, &vector)?;
        let schema = batch.schema();
        let reader = RecordBatchIterator::new(std::iter::once(Ok(batch)), schema);

        self.table
            .add(reader)
            .execute()
            .await
            .map_err(|e| Error::Store(format!("Failed to insert entry: {e}")))?;

        Ok(())
    }

    /// Embed the query text and return up to `limit` matches ranked by
    /// distance.
    pub async fn query(&self, text: &str, limit: usize) -> Result<Vec<RecipeMatch>> {
        let vectors = self.embedder.embed(&[text.to_string()])?;
        let query_vector = vectors
            .into_iter()
            .next()
            .ok_or_else(|| Error::Embedding("Embedder returned no vector".to_string()))?;

        let mut results = self
            .table
            .vector_search(query_vector.as_slice())
            .map_err(|e| Error::Store(format!("Failed to build vector search: {e}")))?
            .column("vector")
            .limit(limit)
            .execute()
            .await
            .map_err(|e| Error::Store(format!("Failed to execute search: {e}")))?;

        let mut matches = Vec::new();
        while let Some(batch) = results
            .try_next()
            .await
            .map_err(|e| Error::Store(format!("Failed to read search results: {e}")))?
        {
            matches.extend(parse_match_batch(&batch)?);
        }

        debug!("Query returned {} matches", matches.len());
        Ok(matches)
    }

    /// Number of entries in the collection.
    pub async fn count(&self) -> Result<usize> {
        self.table
            .count_rows(None)
            .await
            .map_err(|e| Error::Store(format!("Failed to count entries: {e}")))
    }

    /// Build the single-entry record batch for an insert.
    fn entry_batch(&self, id: &str, record: &RecipeRecord, vector: &[f32]) -> Result<RecordBatch> {
        let dimension = self.embedder.dimension();
        if vector.len() != dimension {
            return Err(Error::Embedding(format!(
                "Expected {dimension}-dimensional vector, got {}",
                vector.len()
            )));
        }

        let values = Float32Array::from(vector.to_vec());
        let item_field = Arc::new(Field::new("item", DataType::Float32, false));
        let vector_array =
            FixedSizeListArray::try_new(item_field, dimension as i32, Arc::new(values), None)
                .map_err(|e| Error::Store(format!("Failed to build vector column: {e}")))?;

        let arrays: Vec<Arc<dyn Array>> = vec![
            Arc::new(StringArray::from(vec![id])),
            Arc::new(vector_array),
            Arc::new(StringArray::from(vec![record.ingredients.as_str()])),
            Arc::new(StringArray::from(vec![record.title.as_str()])),
            Arc::new(StringArray::from(vec![record.instructions.as_str()])),
        ];

        RecordBatch::try_new(collection_schema(dimension), arrays)
            .map_err(|e| Error::Store(format!("Failed to build record batch: {e}")))
    }
}

fn collection_schema(dimension: usize) -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new(
            "vector",
            DataType::FixedSizeList(
                Arc::new(Field::new("item", DataType::Float32, false)),
                dimension as i32,
            ),
            false,
        ),
        Field::new("ingredients", DataType::Utf8, false),
        Field::new("title", DataType::Utf8, false),
        Field::new("instructions", DataType::Utf8, false),
    ]))
}

/// Parse one record batch from search results into matches.
fn parse_match_batch(batch: &RecordBatch) -> Result<Vec<RecipeMatch>> {
    let ids = string_column(batch, "id")?;
    let ingredients = string_column(batch, "ingredients")?;
    let titles = string_column(batch, "title")?;
    let instructions = string_column(batch, "instructions")?;

    let distances = batch
        .column_by_name("_distance")
        .and_then(|col| col.as_any().downcast_ref::<Float32Array>());

    let mut matches = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let distance = distances.map_or(0.0, |d| if d.is_null(row) { 0.0 } else { d.value(row) });

        matches.push(RecipeMatch {
            id: ids.value(row).to_string(),
            title: titles.value(row).to_string(),
            ingredients: ingredients.value(row).to_string(),
            instructions: instructions.value(row).to_string(),
            distance,
        });
    }

    Ok(matches)
}

fn string_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    batch
        .column_by_name(name)
        .ok_or_else(|| Error::Store(format!("Missing {name} column in search results")))?
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| Error::Store(format!("Invalid {name} column type in search results")))
}

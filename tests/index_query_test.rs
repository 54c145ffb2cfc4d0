use std::sync::Arc;

use larder::indexer::index_recipes;
use larder::loader::RecipeRecord;
use larder::recommend::{self, NO_MATCH_MESSAGE};
use larder::store::{Embedder, RecipeStore};
use larder::Result;

/// Deterministic stand-in for the sentence-embedding model: one vector
/// slot per known ingredient word. Texts sharing words land close
/// together under L2 distance, which is all these tests rely on.
const VOCABULARY: &[&str] = &[
    "carrot", "water", "flour", "sugar", "butter", "tomato", "basil", "chicken", "rice", "onion",
];

struct VocabularyEmbedder;

impl Embedder for VocabularyEmbedder {
    fn dimension(&self) -> usize {
        VOCABULARY.len()
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                let text = text.to_lowercase();
                let mut vector = vec![0.0f32; VOCABULARY.len()];
                for (slot, word) in VOCABULARY.iter().enumerate() {
                    if text.contains(word) {
                        vector[slot] = 1.0;
                    }
                }
                vector
            })
            .collect())
    }
}

fn record(title: &str, ingredients: &str, instructions: &str) -> RecipeRecord {
    RecipeRecord {
        title: title.to_string(),
        ingredients: ingredients.to_string(),
        instructions: instructions.to_string(),
    }
}

fn sample_records() -> Vec<RecipeRecord> {
    vec![
        record("Soup", "carrot, water", "Boil carrots."),
        record("Shortbread", "flour, sugar, butter", "Cream butter, mix, bake."),
        record("Tomato Rice", "tomato, rice, onion", "Simmer everything together."),
    ]
}

async fn open_store(dir: &tempfile::TempDir) -> RecipeStore {
    RecipeStore::open(dir.path(), Arc::new(VocabularyEmbedder))
        .await
        .expect("Failed to open vector store")
}

#[tokio::test]
async fn test_indexing_populates_collection() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    let records = sample_records();
    let collection = index_recipes(&store, Some(&records), "recipes")
        .await
        .expect("Indexing valid records should yield a collection");

    let count = collection.count().await.expect("Failed to count entries");
    assert_eq!(count, 3, "All valid rows should be indexed");
}

#[tokio::test]
async fn test_indexing_skips_invalid_rows() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    let mut records = sample_records();
    records[1].title = String::new();
    records.push(record("Blank", "   ", "Whitespace ingredients."));

    let collection = index_recipes(&store, Some(&records), "recipes")
        .await
        .expect("Indexing should still yield a collection");

    let count = collection.count().await.expect("Failed to count entries");
    assert_eq!(count, 2, "Only rows with all three fields should be indexed");
}

#[tokio::test]
async fn test_indexing_absent_table_yields_absent_collection() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    assert!(index_recipes(&store, None, "recipes").await.is_none());
    assert!(index_recipes(&store, Some(&[]), "recipes").await.is_none());
}

#[tokio::test]
async fn test_reindexing_replaces_collection() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    let records = sample_records();
    index_recipes(&store, Some(&records), "recipes")
        .await
        .expect("First indexing pass failed");

    // A second pass against the same store must replace, not append.
    let collection = index_recipes(&store, Some(&records), "recipes")
        .await
        .expect("Second indexing pass failed");

    let count = collection.count().await.expect("Failed to count entries");
    assert_eq!(count, 3, "Rebuilding should replace the previous entries");
}

#[tokio::test]
async fn test_query_returns_closest_recipe() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    let records = sample_records();
    let collection = index_recipes(&store, Some(&records), "recipes")
        .await
        .expect("Indexing failed");

    let matches = collection
        .query("carrot", 2)
        .await
        .expect("Query failed");

    assert!(!matches.is_empty(), "Expected at least one match");
    assert_eq!(matches[0].title, "Soup");
    assert_eq!(matches[0].id, "0");
    assert!(
        matches.len() <= 2,
        "Query should return at most the requested count"
    );
}

#[tokio::test]
async fn test_recommend_formats_best_match() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    let records = vec![record("Soup", "carrot, water", "Boil carrots.")];
    let collection = index_recipes(&store, Some(&records), "recipes")
        .await
        .expect("Indexing failed");

    let result = recommend::generate(Some(&collection), "carrot", 2)
        .await
        .expect("Recommendation failed");

    assert!(result.contains("Title: Soup"), "Got: {result}");
    assert!(result.contains("Recipe: Boil carrots."), "Got: {result}");
}

#[tokio::test]
async fn test_recommend_on_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    let collection = store
        .create_collection("recipes")
        .await
        .expect("Failed to create collection");

    let result = recommend::generate(Some(&collection), "carrot", 2)
        .await
        .expect("Recommendation failed");

    assert_eq!(result, NO_MATCH_MESSAGE);
}

#[tokio::test]
async fn test_recommend_with_absent_collection() {
    let result = recommend::generate(None, "carrot", 2)
        .await
        .expect("Recommendation failed");

    assert_eq!(result, NO_MATCH_MESSAGE);
}

#[tokio::test]
async fn test_open_collection_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(&dir).await;

    assert!(
        store
            .open_collection("recipes")
            .await
            .expect("Failed to check for collection")
            .is_none(),
        "A never-built collection should be absent"
    );

    let records = sample_records();
    index_recipes(&store, Some(&records), "recipes")
        .await
        .expect("Indexing failed");

    let reopened = store
        .open_collection("recipes")
        .await
        .expect("Failed to reopen collection")
        .expect("Collection should exist after indexing");

    let count = reopened.count().await.expect("Failed to count entries");
    assert_eq!(count, 3);
}

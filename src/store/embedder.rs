use crate::error::{Error, Result};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// Vector length produced by the default model (all-MiniLM-L6-v2).
pub const EMBEDDING_DIMENSION: usize = 384;

/// Produces embedding vectors for text documents and queries.
///
/// The trait seam lets tests substitute a deterministic implementation
/// for the real sentence-embedding model.
pub trait Embedder: Send + Sync {
    /// Length of the vectors this embedder produces.
    fn dimension(&self) -> usize;

    /// Embed a batch of texts, one vector per input.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

/// Local sentence-embedding model via fastembed.
///
/// The model is wrapped in a mutex so the embedder can be shared
/// across request handlers behind an `Arc`.
pub struct SentenceEmbedder {
    model: Mutex<TextEmbedding>,
}

impl SentenceEmbedder {
    /// Load the embedding model, downloading it into the cache
    /// directory on first use.
    pub fn new(cache_dir: Option<&Path>) -> Result<Self> {
        let mut options =
            InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false);

        if let Some(dir) = cache_dir {
            options = options.with_cache_dir(dir.to_path_buf());
        }

        let model = TextEmbedding::try_new(options)
            .map_err(|e| Error::Embedding(format!("Failed to load embedding model: {e}")))?;

        info!("Embedding model loaded");

        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

impl Embedder for SentenceEmbedder {
    fn dimension(&self) -> usize {
        EMBEDDING_DIMENSION
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let model = self
            .model
            .lock()
            .map_err(|_| Error::Embedding("Embedding model lock poisoned".to_string()))?;

        model
            .embed(texts.to_vec(), None)
            .map_err(|e| Error::Embedding(format!("Failed to embed text: {e}")))
    }
}

//! Vector store infrastructure for recipe embeddings.
//!
//! Provides LanceDB collection management and fastembed-based local
//! embedding generation behind a swappable `Embedder` trait.

pub mod collection;
pub mod embedder;

pub use collection::{RecipeCollection, RecipeMatch, RecipeStore};
pub use embedder::{Embedder, SentenceEmbedder, EMBEDDING_DIMENSION};

//! External collaborator traits.
//!
//! The ranking pipeline consumes two black-box services: a text embedder and
//! a k-NN search backend. Both are modeled as object-safe async traits held
//! behind `Arc<dyn _>` by the [`RankingEngine`], so callers can plug in any
//! backend (a remote embedding API, an in-process index, a mock in tests)
//! without the pipeline knowing the difference.
//!
//! The pipeline treats every call as going through an externally managed
//! resource: connection pooling, retries, and timeouts are the
//! implementation's concern, not canto's.
//!
//! [`RankingEngine`]: crate::RankingEngine

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The two vector collections the pipeline searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Whole-document embeddings, one vector per record.
    Documents,
    /// Passage (chunk) embeddings, many vectors per record.
    Passages,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Documents => write!(f, "document"),
            Collection::Passages => write!(f, "passage"),
        }
    }
}

/// A single scored hit from the k-NN backend.
///
/// The payload is carried through to the final results untouched; the
/// pipeline only reads the title/author/position fields it needs for
/// deduplication and display (see [`crate::candidate`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// Opaque identifier assigned by the backend.
    pub id: String,
    /// Raw retrieval score. Typically a cosine similarity in [-1, 1], but
    /// the pipeline treats it as an opaque ordering scalar.
    pub score: f32,
    /// Backend-provided metadata payload.
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl ScoredCandidate {
    /// Create a candidate with the given id, score, and payload.
    pub fn new(id: impl Into<String>, score: f32, payload: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            score,
            payload,
        }
    }
}

/// Converts query text into a fixed-dimension vector.
///
/// The pipeline is dimension-agnostic; whatever length the embedder returns
/// is passed to the searcher unchanged. Implementations should report
/// failures as [`CantoError::Embedding`], which the engine propagates to the
/// caller unchanged.
///
/// [`CantoError::Embedding`]: crate::CantoError::Embedding
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed the given text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Human-readable name, for logs.
    fn name(&self) -> &str {
        "embedder"
    }
}

/// Runs k-nearest-neighbor searches against one of the two collections.
///
/// Implementations should report failures as [`CantoError::Search`] carrying
/// the collection that was queried; the engine uses the collection to decide
/// whether the failure is fatal (documents) or degradable (passages).
///
/// [`CantoError::Search`]: crate::CantoError::Search
#[async_trait]
pub trait KnnSearcher: Send + Sync {
    /// Return the `k` nearest candidates to `vector` in `collection`,
    /// sorted by descending score.
    async fn search(
        &self,
        collection: Collection,
        vector: &[f32],
        k: usize,
    ) -> Result<Vec<ScoredCandidate>>;
}

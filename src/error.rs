//! Error types for canto.

use thiserror::Error;

use crate::client::Collection;

/// Errors produced by the ranking pipeline.
///
/// Only the mandatory path surfaces errors to the caller: a failed embedding
/// or a failed document search aborts the query, while a failed passage
/// search is absorbed by the orchestrator (see [`RankingEngine::rank`]).
///
/// [`RankingEngine::rank`]: crate::RankingEngine::rank
#[derive(Debug, Clone, Error)]
pub enum CantoError {
    /// The query text could not be turned into a vector.
    #[error("embedding failed: {0}")]
    Embedding(String),

    /// A k-NN search against the named collection failed.
    #[error("{collection} search failed: {message}")]
    Search {
        /// Collection the failed search was issued against.
        collection: Collection,
        /// Backend-provided failure description.
        message: String,
    },

    /// The requested result limit is outside the accepted range.
    #[error("invalid limit {limit}: must be between 1 and {max}")]
    InvalidLimit {
        /// The rejected limit.
        limit: usize,
        /// The configured maximum.
        max: usize,
    },

    /// A configuration value is out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CantoError {
    /// Create an embedding error.
    pub fn embedding(message: impl Into<String>) -> Self {
        CantoError::Embedding(message.into())
    }

    /// Create a search error for the given collection.
    pub fn search(collection: Collection, message: impl Into<String>) -> Self {
        CantoError::Search {
            collection,
            message: message.into(),
        }
    }

    /// Create an invalid limit error.
    pub fn invalid_limit(limit: usize, max: usize) -> Self {
        CantoError::InvalidLimit { limit, max }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        CantoError::InvalidConfig(message.into())
    }

    /// Whether this error aborts the whole query.
    ///
    /// A passage search failure is the only recoverable case; everything
    /// else is fatal to the query that produced it.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            CantoError::Search {
                collection: Collection::Passages,
                ..
            }
        )
    }
}

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, CantoError>;

//! # Canto
//!
//! Evidence-backed hybrid ranking for semantic search over long texts.
//!
//! Canto turns one query embedding into a single coherent ordering of
//! documents by merging two independently retrieved candidate sets: whole
//! document matches and sub-document passage matches. Documents whose
//! passages match the query strongly are promoted past documents that only
//! match at the whole-text level, and every returned document carries its own
//! best passages as evidence.
//!
//! ## Features
//!
//! - Pluggable embedding and k-NN backends via async traits
//! - Edition deduplication by normalized (title, author)
//! - Per-document passage evidence aggregation with configurable weights
//! - Stable, deterministic re-ranking with score transparency
//! - Graceful degradation to document-only ranking when the passage
//!   search fails

// Core modules
mod candidate;
mod client;
mod config;
mod engine;
mod error;
pub mod ranking;
mod result;

// Re-exports for the public API
pub use candidate::{DocumentCandidate, PassageCandidate, PassagePosition};
pub use client::{Collection, Embedder, KnnSearcher, ScoredCandidate};
pub use config::{CombineWeights, EvidenceWeights, RankingConfig, RankingConfigBuilder};
pub use engine::RankingEngine;
pub use error::{CantoError, Result};
pub use result::{RankedPassage, RankedResult, ResultSet};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

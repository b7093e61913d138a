//! Retrieval-side value types.
//!
//! [`DocumentCandidate`] and [`PassageCandidate`] are the pipeline's read-only
//! views of k-NN hits. They are built once from [`ScoredCandidate`] payloads
//! when a query starts, never mutated afterwards, and discarded when the
//! query's [`ResultSet`] is returned.
//!
//! Payload parsing is lenient: a hit with a missing title or author is still
//! a valid candidate (the fields default to empty), because retrieval results
//! should never abort a query over display metadata. The one exception is a
//! passage without a parent document id, which cannot be grouped or allocated
//! and is dropped by the engine.
//!
//! [`ScoredCandidate`]: crate::ScoredCandidate
//! [`ResultSet`]: crate::ResultSet

use serde::{Deserialize, Serialize};

use crate::ScoredCandidate;

/// A whole-document hit from the document-level search.
#[derive(Debug, Clone)]
pub struct DocumentCandidate {
    /// Opaque document id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Listed contributors, in payload order. The first entry is the
    /// primary author used for deduplication.
    pub authors: Vec<String>,
    /// Raw document-level retrieval score.
    pub score: f32,
    /// Full backend payload, passed through for display.
    pub metadata: serde_json::Value,
}

impl DocumentCandidate {
    /// Build a document candidate from a raw k-NN hit.
    ///
    /// Reads `title` and `authors` (or a scalar `author`) from the payload;
    /// anything else stays opaque in `metadata`.
    pub fn from_scored(hit: ScoredCandidate) -> Self {
        let title = hit
            .payload
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let authors = parse_authors(&hit.payload);
        Self {
            id: hit.id,
            title,
            authors,
            score: hit.score,
            metadata: hit.payload,
        }
    }
}

/// Position of a passage within its document, for display ("passage 3 of 41").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassagePosition {
    /// Zero-based chunk index within the document.
    pub index: usize,
    /// Total number of chunks in the document.
    pub total: usize,
}

/// A sub-document hit from the passage-level search.
#[derive(Debug, Clone)]
pub struct PassageCandidate {
    /// Opaque chunk id.
    pub id: String,
    /// Id of the owning document.
    pub document_id: String,
    /// Position within the owning document.
    pub position: PassagePosition,
    /// Raw text span.
    pub text: String,
    /// Raw passage-level retrieval score.
    pub score: f32,
}

impl PassageCandidate {
    /// Build a passage candidate from a raw k-NN hit.
    ///
    /// Returns `None` when the payload has no `document_id`: an orphan
    /// passage cannot contribute evidence to any document.
    pub fn from_scored(hit: ScoredCandidate) -> Option<Self> {
        let document_id = hit
            .payload
            .get("document_id")
            .and_then(|v| v.as_str())?
            .to_string();
        let text = hit
            .payload
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let position = PassagePosition {
            index: read_usize(&hit.payload, "chunk_index"),
            total: read_usize(&hit.payload, "chunk_total"),
        };
        Some(Self {
            id: hit.id,
            document_id,
            position,
            text,
            score: hit.score,
        })
    }
}

fn parse_authors(payload: &serde_json::Value) -> Vec<String> {
    if let Some(list) = payload.get("authors").and_then(|v| v.as_array()) {
        return list
            .iter()
            .filter_map(|v| v.as_str())
            .map(str::to_string)
            .collect();
    }
    payload
        .get("author")
        .and_then(|v| v.as_str())
        .map(|s| vec![s.to_string()])
        .unwrap_or_default()
}

fn read_usize(payload: &serde_json::Value, key: &str) -> usize {
    payload
        .get(key)
        .and_then(|v| v.as_u64())
        .unwrap_or_default() as usize
}

//! Response types returned to the caller.

use serde::Serialize;

use crate::candidate::{PassageCandidate, PassagePosition};

/// A passage attached to a ranked result as supporting evidence.
#[derive(Debug, Clone, Serialize)]
pub struct RankedPassage {
    /// Opaque chunk id.
    pub id: String,
    /// Raw text span.
    pub text: String,
    /// Passage-level retrieval score.
    pub score: f32,
    /// Position within the owning document.
    pub position: PassagePosition,
}

impl From<PassageCandidate> for RankedPassage {
    fn from(passage: PassageCandidate) -> Self {
        Self {
            id: passage.id,
            text: passage.text,
            score: passage.score,
            position: passage.position,
        }
    }
}

/// A single document in the final ordering, with its score breakdown.
///
/// `evidence_boost` is omitted from serialized output when no passage
/// evidence was used for this result, so callers can tell "no boost
/// computed" apart from "boost computed as zero". When it is absent,
/// `score == document_score` exactly.
#[derive(Debug, Clone, Serialize)]
pub struct RankedResult {
    /// Opaque document id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Final combined score the ordering is based on.
    pub score: f32,
    /// The document's own retrieval score, before evidence.
    pub document_score: f32,
    /// Aggregated passage evidence, when passage search was enabled and
    /// this document had at least one passage hit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_boost: Option<f32>,
    /// Best supporting passages for this document, score-descending.
    pub passages: Vec<RankedPassage>,
    /// Full backend metadata payload, untouched by the pipeline.
    pub metadata: serde_json::Value,
}

/// The final, deduplicated, re-ranked answer to one query.
#[derive(Debug, Clone, Serialize)]
pub struct ResultSet {
    /// The query text as received.
    pub query: String,
    /// Deduplicated candidate count before trimming to the limit.
    pub total: usize,
    /// Ranked results, combined-score descending, at most the requested limit.
    pub results: Vec<RankedResult>,
    /// Passages attached across all results.
    pub passage_total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(boost: Option<f32>) -> RankedResult {
        RankedResult {
            id: "rec-1".to_string(),
            title: "The Odyssey".to_string(),
            score: 0.62,
            document_score: 0.5,
            evidence_boost: boost,
            passages: Vec::new(),
            metadata: json!({ "language": "en" }),
        }
    }

    #[test]
    fn evidence_boost_is_omitted_when_absent() {
        let value = serde_json::to_value(result(None)).unwrap();
        assert!(value.get("evidence_boost").is_none());
        assert_eq!(value["document_score"], json!(0.5));
    }

    #[test]
    fn evidence_boost_is_present_when_computed() {
        let value = serde_json::to_value(result(Some(0.0))).unwrap();
        assert_eq!(value["evidence_boost"], json!(0.0));
    }

    #[test]
    fn result_set_serializes_expected_shape() {
        let set = ResultSet {
            query: "a tale of a sea voyage".to_string(),
            total: 17,
            results: vec![result(Some(0.711))],
            passage_total: 3,
        };
        let value = serde_json::to_value(set).unwrap();
        assert_eq!(value["query"], "a tale of a sea voyage");
        assert_eq!(value["total"], 17);
        assert_eq!(value["passage_total"], 3);
        assert_eq!(value["results"][0]["id"], "rec-1");
    }
}

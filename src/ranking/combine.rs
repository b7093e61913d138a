//! Score combination and re-ranking.
//!
//! Blends each deduplicated document's own retrieval score with its evidence
//! boost, re-sorts the whole candidate pool by the blended score, and trims
//! to the requested window. Re-sorting after the fact is the point: passage
//! evidence can promote a document that the document-level search ranked
//! outside the requested window, which is why the engine over-fetches
//! document candidates in the first place.

use std::cmp::Ordering as CmpOrdering;

use ahash::AHashMap;

use crate::candidate::DocumentCandidate;
use crate::config::CombineWeights;
use crate::result::RankedResult;

/// Blend, re-sort, and trim the deduplicated candidates.
///
/// A candidate with a boost scores `w_doc * score + w_evidence * boost`;
/// without one (or with `use_evidence` off) its combined score is its
/// document score, exactly. The sort is stable and descending, so equal
/// scores keep their pre-sort relative order and the output is
/// deterministic.
pub fn combine_scores(
    candidates: Vec<DocumentCandidate>,
    boosts: &AHashMap<String, f32>,
    use_evidence: bool,
    limit: usize,
    weights: &CombineWeights,
) -> Vec<RankedResult> {
    let mut results: Vec<RankedResult> = candidates
        .into_iter()
        .map(|candidate| {
            let boost = if use_evidence {
                boosts.get(&candidate.id).copied()
            } else {
                None
            };
            let combined = match boost {
                Some(boost) => {
                    weights.document_weight * candidate.score + weights.evidence_weight * boost
                }
                None => candidate.score,
            };
            RankedResult {
                id: candidate.id,
                title: candidate.title,
                score: combined,
                document_score: candidate.score,
                evidence_boost: boost,
                passages: Vec::new(),
                metadata: candidate.metadata,
            }
        })
        .collect();

    // sort_by is stable; ties preserve input order.
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(CmpOrdering::Equal));
    results.truncate(limit);
    results
}

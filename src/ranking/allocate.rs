//! Passage allocation.
//!
//! Attaches supporting passages to the final results, strictly after document
//! selection. Selecting globally top-K passages instead would starve a
//! promoted-but-passage-sparse document of visible evidence: its best passage
//! may rank far down the global passage ordering, yet it is still the best
//! evidence that document has. Allocation is per result, so every displayed
//! document gets a chance to show its own strongest passages.

use std::cmp::Ordering as CmpOrdering;

use ahash::AHashMap;

use crate::candidate::PassageCandidate;
use crate::result::{RankedPassage, RankedResult};

/// Attach up to `max_per_result` of each result's own passages, score
/// descending. Passages owned by documents that did not survive re-ranking
/// are dropped. Returns the total number of passages attached.
pub fn allocate_passages(
    results: &mut [RankedResult],
    pool: Vec<PassageCandidate>,
    max_per_result: usize,
) -> usize {
    if results.is_empty() || pool.is_empty() || max_per_result == 0 {
        return 0;
    }

    let mut by_document: AHashMap<String, Vec<PassageCandidate>> = AHashMap::new();
    for passage in pool {
        by_document
            .entry(passage.document_id.clone())
            .or_default()
            .push(passage);
    }

    let mut attached = 0;
    for result in results.iter_mut() {
        if let Some(mut group) = by_document.remove(&result.id) {
            group.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(CmpOrdering::Equal));
            group.truncate(max_per_result);
            attached += group.len();
            result.passages = group.into_iter().map(RankedPassage::from).collect();
        }
    }
    attached
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::PassagePosition;
    use serde_json::Value;

    fn result(id: &str, score: f32) -> RankedResult {
        RankedResult {
            id: id.to_string(),
            title: id.to_string(),
            score,
            document_score: score,
            evidence_boost: None,
            passages: Vec::new(),
            metadata: Value::Null,
        }
    }

    fn passage(id: &str, document_id: &str, score: f32) -> PassageCandidate {
        PassageCandidate {
            id: id.to_string(),
            document_id: document_id.to_string(),
            position: PassagePosition { index: 0, total: 1 },
            text: String::new(),
            score,
        }
    }

    #[test]
    fn each_result_gets_its_own_passages() {
        // A's passage dominates the global ranking; B's best passage would
        // be ~40th globally. Both must still receive evidence.
        let mut pool = vec![passage("a-best", "A", 0.95)];
        for i in 0..40 {
            pool.push(passage(&format!("noise-{i}"), "elsewhere", 0.90 - i as f32 * 0.01));
        }
        pool.push(passage("b-best", "B", 0.40));

        let mut results = vec![result("A", 0.9), result("B", 0.8)];
        let attached = allocate_passages(&mut results, pool, 3);

        assert_eq!(attached, 2);
        assert_eq!(results[0].passages.len(), 1);
        assert_eq!(results[0].passages[0].id, "a-best");
        assert_eq!(results[1].passages.len(), 1);
        assert_eq!(results[1].passages[0].id, "b-best");
    }

    #[test]
    fn caps_passages_per_result_and_sorts_descending() {
        let pool = vec![
            passage("p1", "A", 0.5),
            passage("p2", "A", 0.9),
            passage("p3", "A", 0.7),
            passage("p4", "A", 0.8),
        ];
        let mut results = vec![result("A", 0.9)];
        let attached = allocate_passages(&mut results, pool, 3);

        assert_eq!(attached, 3);
        let scores: Vec<f32> = results[0].passages.iter().map(|p| p.score).collect();
        assert_eq!(scores, vec![0.9, 0.8, 0.7]);
    }

    #[test]
    fn passages_of_dropped_documents_are_discarded() {
        let pool = vec![passage("p1", "gone", 0.99), passage("p2", "A", 0.2)];
        let mut results = vec![result("A", 0.9)];
        let attached = allocate_passages(&mut results, pool, 3);

        assert_eq!(attached, 1);
        assert_eq!(results[0].passages[0].id, "p2");
    }

    #[test]
    fn zero_cap_attaches_nothing() {
        let pool = vec![passage("p1", "A", 0.9)];
        let mut results = vec![result("A", 0.9)];
        assert_eq!(allocate_passages(&mut results, pool, 0), 0);
        assert!(results[0].passages.is_empty());
    }
}

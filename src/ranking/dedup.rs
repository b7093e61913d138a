//! Edition deduplication.
//!
//! Public-domain corpora carry many records of the same underlying work
//! ("The Odyssey", "The Odyssey: Translated by Samuel Butler", ...). Left
//! alone these crowd out every other result for a matching query, so the
//! pipeline keeps only the best-scoring record per work.

use ahash::AHashSet;

use crate::candidate::DocumentCandidate;

/// Sentinel primary author for records with no listed contributor.
///
/// Accepted approximation: multiple anonymous works with the same normalized
/// title collapse into one.
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// Identity of an underlying work: normalized title plus normalized primary
/// author. Two candidates with equal keys are the same work.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    title: String,
    author: String,
}

impl DedupKey {
    /// Derive the key for a document candidate.
    ///
    /// The title is cut at the first `:` or `;` (subtitle and edition
    /// markers live there), case-folded, and trimmed. An empty normalized
    /// title is a valid key component. Only the first listed contributor
    /// participates; candidates without one use [`UNKNOWN_AUTHOR`].
    pub fn of(candidate: &DocumentCandidate) -> Self {
        let author = candidate
            .authors
            .first()
            .map(|a| a.trim().to_lowercase())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
        Self {
            title: normalize_title(&candidate.title),
            author,
        }
    }
}

fn normalize_title(raw: &str) -> String {
    let head = raw.split([':', ';']).next().unwrap_or(raw);
    head.trim().to_lowercase()
}

/// Remove duplicate editions from a score-sorted candidate list.
///
/// First occurrence wins; because the input is sorted by descending score,
/// this keeps the highest-scoring record of each work. Idempotent.
pub fn dedup_candidates(candidates: Vec<DocumentCandidate>) -> Vec<DocumentCandidate> {
    let mut seen: AHashSet<DedupKey> = AHashSet::with_capacity(candidates.len());
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(DedupKey::of(candidate)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn candidate(id: &str, title: &str, authors: &[&str], score: f32) -> DocumentCandidate {
        DocumentCandidate {
            id: id.to_string(),
            title: title.to_string(),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            score,
            metadata: Value::Null,
        }
    }

    #[test]
    fn keeps_highest_scoring_edition() {
        let candidates = vec![
            candidate("a", "The Odyssey", &["Homer"], 0.9),
            candidate("b", "The Odyssey: Translated by Samuel Butler", &["Homer"], 0.7),
            candidate("c", "the odyssey ; a new verse translation", &["homer"], 0.6),
        ];
        let deduped = dedup_candidates(candidates);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].id, "a");
    }

    #[test]
    fn different_authors_are_different_works() {
        let candidates = vec![
            candidate("a", "Poems", &["Wilde, Oscar"], 0.9),
            candidate("b", "Poems", &["Keats, John"], 0.8),
        ];
        assert_eq!(dedup_candidates(candidates).len(), 2);
    }

    #[test]
    fn only_first_contributor_counts() {
        let candidates = vec![
            candidate("a", "The Odyssey", &["Homer", "Butler, Samuel"], 0.9),
            candidate("b", "The Odyssey", &["Homer", "Pope, Alexander"], 0.8),
        ];
        assert_eq!(dedup_candidates(candidates).len(), 1);
    }

    #[test]
    fn anonymous_works_share_the_unknown_sentinel() {
        let candidates = vec![
            candidate("a", "Beowulf", &[], 0.9),
            candidate("b", "Beowulf: A Verse Translation", &[], 0.8),
        ];
        let deduped = dedup_candidates(candidates);
        assert_eq!(deduped.len(), 1);
        assert_eq!(DedupKey::of(&deduped[0]).author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn empty_title_is_a_valid_key() {
        let candidates = vec![
            candidate("a", "", &["Homer"], 0.9),
            candidate("b", "  ", &["Homer"], 0.8),
            candidate("c", "", &[], 0.7),
        ];
        // "a" and "b" normalize to the same empty title; "c" differs by author.
        assert_eq!(dedup_candidates(candidates).len(), 2);
    }

    #[test]
    fn dedup_is_idempotent() {
        let candidates = vec![
            candidate("a", "The Odyssey", &["Homer"], 0.9),
            candidate("b", "The Odyssey: Again", &["Homer"], 0.7),
            candidate("c", "The Iliad", &["Homer"], 0.6),
        ];
        let once = dedup_candidates(candidates);
        let twice = dedup_candidates(once.clone());
        assert_eq!(once.len(), twice.len());
        let ids: Vec<&str> = once.iter().map(|c| c.id.as_str()).collect();
        let ids_twice: Vec<&str> = twice.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ids_twice);
    }
}

//! Passage evidence aggregation.
//!
//! Groups passage hits by their owning document and summarizes each group
//! into a single boost scalar. Only documents with at least one passage hit
//! appear in the output map.

use std::cmp::Ordering as CmpOrdering;

use ahash::AHashMap;

use crate::candidate::PassageCandidate;
use crate::config::EvidenceWeights;

/// Compute an evidence boost per document id from the passage pool.
///
/// Per group: `boost = w_max * max + w_cons * topN_avg + w_breadth * bonus`
/// with `bonus = min(group_size * step, cap)`. The boost is monotone in any
/// single passage score, and the count bonus saturates so breadth alone
/// cannot dominate.
pub fn aggregate_evidence(
    passages: &[PassageCandidate],
    weights: &EvidenceWeights,
) -> AHashMap<String, f32> {
    let mut groups: AHashMap<&str, Vec<f32>> = AHashMap::new();
    for passage in passages {
        groups
            .entry(passage.document_id.as_str())
            .or_default()
            .push(passage.score);
    }

    groups
        .into_iter()
        .map(|(document_id, mut scores)| {
            scores.sort_by(|a, b| b.partial_cmp(a).unwrap_or(CmpOrdering::Equal));
            let max_score = scores[0];
            let depth = scores.len().min(weights.consistency_depth.max(1));
            let top_avg = scores[..depth].iter().sum::<f32>() / depth as f32;
            let count_bonus = (scores.len() as f32 * weights.breadth_step).min(weights.breadth_cap);
            let boost = weights.max_weight * max_score
                + weights.consistency_weight * top_avg
                + weights.breadth_weight * count_bonus;
            (document_id.to_string(), boost)
        })
        .collect()
}

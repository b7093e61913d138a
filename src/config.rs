//! Ranking configuration.
//!
//! Every weighting constant in the pipeline is a named, overridable knob.
//! The defaults come from empirical tuning on a small (tens-of-documents)
//! corpus and have no principled derivation; treat them as heuristics to be
//! re-validated at larger corpus scale, not as ground truth.

use serde::{Deserialize, Serialize};

use crate::error::{CantoError, Result};

fn default_document_weight() -> f32 {
    0.4
}

fn default_evidence_weight() -> f32 {
    0.6
}

fn default_max_weight() -> f32 {
    0.5
}

fn default_consistency_weight() -> f32 {
    0.3
}

fn default_breadth_weight() -> f32 {
    0.2
}

fn default_consistency_depth() -> usize {
    3
}

fn default_breadth_step() -> f32 {
    0.01
}

fn default_breadth_cap() -> f32 {
    0.1
}

fn default_overfetch_factor() -> usize {
    5
}

fn default_document_fetch_ceiling() -> usize {
    100
}

fn default_passage_pool_size() -> usize {
    100
}

fn default_max_passages_per_result() -> usize {
    3
}

fn default_max_limit() -> usize {
    100
}

/// Weights for blending a document's own score with its evidence boost.
///
/// `combined = document_weight * document_score + evidence_weight * boost`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CombineWeights {
    /// Weight of the document-level retrieval score.
    #[serde(default = "default_document_weight")]
    pub document_weight: f32,
    /// Weight of the aggregated passage evidence.
    #[serde(default = "default_evidence_weight")]
    pub evidence_weight: f32,
}

impl Default for CombineWeights {
    fn default() -> Self {
        Self {
            document_weight: default_document_weight(),
            evidence_weight: default_evidence_weight(),
        }
    }
}

/// Weights for summarizing a document's passage hits into one boost scalar.
///
/// `boost = max_weight * max + consistency_weight * topN_avg + breadth_weight * count_bonus`
/// where `count_bonus = min(group_size * breadth_step, breadth_cap)`.
///
/// The best single match dominates (precision), the top-N average rewards
/// consistency beyond one lucky hit, and the capped count bonus rewards
/// breadth without letting many weak passages outrank a few strong ones.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EvidenceWeights {
    /// Weight of the best passage score in the group.
    #[serde(default = "default_max_weight")]
    pub max_weight: f32,
    /// Weight of the mean of the top `consistency_depth` scores.
    #[serde(default = "default_consistency_weight")]
    pub consistency_weight: f32,
    /// Weight of the saturating count bonus.
    #[serde(default = "default_breadth_weight")]
    pub breadth_weight: f32,
    /// How many top passages feed the consistency average.
    #[serde(default = "default_consistency_depth")]
    pub consistency_depth: usize,
    /// Count bonus contributed per passage in the group.
    #[serde(default = "default_breadth_step")]
    pub breadth_step: f32,
    /// Saturation point of the count bonus.
    #[serde(default = "default_breadth_cap")]
    pub breadth_cap: f32,
}

impl Default for EvidenceWeights {
    fn default() -> Self {
        Self {
            max_weight: default_max_weight(),
            consistency_weight: default_consistency_weight(),
            breadth_weight: default_breadth_weight(),
            consistency_depth: default_consistency_depth(),
            breadth_step: default_breadth_step(),
            breadth_cap: default_breadth_cap(),
        }
    }
}

/// Configuration for the whole ranking pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Score blending weights.
    #[serde(default)]
    pub combine: CombineWeights,
    /// Passage evidence aggregation weights.
    #[serde(default)]
    pub evidence: EvidenceWeights,
    /// Document over-fetch multiplier when passage evidence is enabled.
    /// The document search fetches `limit * overfetch_factor` candidates so
    /// that passage-strong documents outside the requested window can be
    /// promoted into it.
    #[serde(default = "default_overfetch_factor")]
    pub overfetch_factor: usize,
    /// Hard ceiling on the over-fetched document candidate count.
    #[serde(default = "default_document_fetch_ceiling")]
    pub document_fetch_ceiling: usize,
    /// Fixed passage fetch size, independent of the requested limit.
    #[serde(default = "default_passage_pool_size")]
    pub passage_pool_size: usize,
    /// Maximum passages attached to each final result.
    #[serde(default = "default_max_passages_per_result")]
    pub max_passages_per_result: usize,
    /// Largest limit a caller may request.
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            combine: CombineWeights::default(),
            evidence: EvidenceWeights::default(),
            overfetch_factor: default_overfetch_factor(),
            document_fetch_ceiling: default_document_fetch_ceiling(),
            passage_pool_size: default_passage_pool_size(),
            max_passages_per_result: default_max_passages_per_result(),
            max_limit: default_max_limit(),
        }
    }
}

impl RankingConfig {
    pub fn builder() -> RankingConfigBuilder {
        RankingConfigBuilder::default()
    }
}

/// Builder for [`RankingConfig`].
///
/// Weights are clamped to `[0.0, 1.0]` to prevent NaN/Inf propagation into
/// the combined scores; structural knobs that would break the pipeline
/// (an empty passage pool, a zero consistency depth) are rejected by
/// [`build`](RankingConfigBuilder::build) instead.
#[derive(Default)]
pub struct RankingConfigBuilder {
    config: RankingConfig,
}

impl RankingConfigBuilder {
    /// Set the document/evidence blending weights.
    pub fn combine_weights(mut self, document_weight: f32, evidence_weight: f32) -> Self {
        self.config.combine = CombineWeights {
            document_weight: document_weight.clamp(0.0, 1.0),
            evidence_weight: evidence_weight.clamp(0.0, 1.0),
        };
        self
    }

    /// Set the evidence aggregation weights.
    pub fn evidence_weights(mut self, weights: EvidenceWeights) -> Self {
        self.config.evidence = EvidenceWeights {
            max_weight: weights.max_weight.clamp(0.0, 1.0),
            consistency_weight: weights.consistency_weight.clamp(0.0, 1.0),
            breadth_weight: weights.breadth_weight.clamp(0.0, 1.0),
            ..weights
        };
        self
    }

    pub fn overfetch_factor(mut self, factor: usize) -> Self {
        self.config.overfetch_factor = factor.max(1);
        self
    }

    pub fn document_fetch_ceiling(mut self, ceiling: usize) -> Self {
        self.config.document_fetch_ceiling = ceiling.max(1);
        self
    }

    pub fn passage_pool_size(mut self, size: usize) -> Self {
        self.config.passage_pool_size = size;
        self
    }

    pub fn max_passages_per_result(mut self, max: usize) -> Self {
        self.config.max_passages_per_result = max;
        self
    }

    pub fn max_limit(mut self, max: usize) -> Self {
        self.config.max_limit = max.max(1);
        self
    }

    pub fn build(self) -> Result<RankingConfig> {
        if self.config.passage_pool_size == 0 {
            return Err(CantoError::invalid_config(
                "passage_pool_size must be at least 1",
            ));
        }
        if self.config.evidence.consistency_depth == 0 {
            return Err(CantoError::invalid_config(
                "consistency_depth must be at least 1",
            ));
        }
        Ok(self.config)
    }
}

//! The hybrid query orchestrator.
//!
//! [`RankingEngine`] is the crate's entry point. It acts as a facade over the
//! two external clients, coordinating one query end to end: embed once, fan
//! the two searches out concurrently, then run the pure ranking passes over
//! the candidate sets.
//!
//! The engine holds no state beyond its client handles and configuration;
//! every query builds its candidates fresh and discards them with the
//! returned [`ResultSet`]. Concurrent queries cannot interfere.

use std::sync::Arc;

use log::{debug, warn};

use crate::candidate::{DocumentCandidate, PassageCandidate};
use crate::client::{Collection, Embedder, KnnSearcher};
use crate::config::RankingConfig;
use crate::error::{CantoError, Result};
use crate::ranking::allocate::allocate_passages;
use crate::ranking::combine::combine_scores;
use crate::ranking::dedup::dedup_candidates;
use crate::ranking::evidence::aggregate_evidence;
use crate::result::ResultSet;

/// One resolved query, immutable for the duration of its pipeline run.
struct Query {
    text: String,
    vector: Vec<f32>,
    limit: usize,
    include_passages: bool,
}

/// Evidence-backed hybrid ranking over external embedding and k-NN clients.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use canto::{Embedder, KnnSearcher, RankingEngine, Result};
///
/// async fn example(embedder: Arc<dyn Embedder>, searcher: Arc<dyn KnnSearcher>) -> Result<()> {
///     let engine = RankingEngine::new(embedder, searcher);
///     let results = engine.rank("a tale of a sea voyage", 10, true).await?;
///     for result in &results.results {
///         println!("{:.4} {}", result.score, result.title);
///     }
///     Ok(())
/// }
/// ```
pub struct RankingEngine {
    embedder: Arc<dyn Embedder>,
    searcher: Arc<dyn KnnSearcher>,
    config: RankingConfig,
}

impl RankingEngine {
    /// Create an engine with the default configuration.
    pub fn new(embedder: Arc<dyn Embedder>, searcher: Arc<dyn KnnSearcher>) -> Self {
        Self::with_config(embedder, searcher, RankingConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(
        embedder: Arc<dyn Embedder>,
        searcher: Arc<dyn KnnSearcher>,
        config: RankingConfig,
    ) -> Self {
        Self {
            embedder,
            searcher,
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Rank documents for `query`, returning at most `limit` results.
    ///
    /// With `include_passages` set, passage evidence can promote documents
    /// into the requested window and each result carries its best passages.
    /// A passage search failure degrades to document-only ranking; an
    /// embedding or document search failure aborts the query. Cancelling the
    /// returned future abandons both in-flight searches.
    pub async fn rank(
        &self,
        query: &str,
        limit: usize,
        include_passages: bool,
    ) -> Result<ResultSet> {
        if limit == 0 || limit > self.config.max_limit {
            return Err(CantoError::invalid_limit(limit, self.config.max_limit));
        }

        let vector = self.embedder.embed(query).await?;
        let query = Query {
            text: query.to_string(),
            vector,
            limit,
            include_passages,
        };

        let (documents, passages) = self.fetch_candidates(&query).await?;
        Ok(self.rank_candidates(query, documents, passages))
    }

    /// Issue the document search and, if enabled, the passage search with the
    /// same embedding. The two calls are independent reads and run
    /// concurrently.
    async fn fetch_candidates(
        &self,
        query: &Query,
    ) -> Result<(Vec<DocumentCandidate>, Vec<PassageCandidate>)> {
        let (document_k, passage_k) = self.fetch_sizes(query);
        debug!(
            "query {:?}: fetching {document_k} document candidates, {passage_k} passage candidates",
            query.text
        );

        let document_search = self
            .searcher
            .search(Collection::Documents, &query.vector, document_k);

        let (document_hits, passage_hits) = if query.include_passages {
            let passage_search = self
                .searcher
                .search(Collection::Passages, &query.vector, passage_k);
            let (documents, passages) = tokio::join!(document_search, passage_search);
            let mut documents = documents?;
            let passages = match passages {
                Ok(hits) => hits,
                // Passage evidence is an enhancement, not a requirement.
                // Shrink the over-fetched promotion pool back to the
                // document-only window so a degraded query returns exactly
                // what a passage-free query would.
                Err(err) => {
                    warn!("passage search failed, continuing document-only: {err}");
                    documents.truncate(query.limit);
                    Vec::new()
                }
            };
            (documents, passages)
        } else {
            (document_search.await?, Vec::new())
        };

        let documents = document_hits
            .into_iter()
            .map(DocumentCandidate::from_scored)
            .collect();

        let passage_hit_count = passage_hits.len();
        let passages: Vec<PassageCandidate> = passage_hits
            .into_iter()
            .filter_map(PassageCandidate::from_scored)
            .collect();
        if passages.len() < passage_hit_count {
            debug!(
                "dropped {} passage hits without a parent document id",
                passage_hit_count - passages.len()
            );
        }

        Ok((documents, passages))
    }

    /// Fetch sizes per query mode. With passage evidence the document search
    /// over-fetches to build a promotion pool; without it, the window is the
    /// limit itself and the passage stage is skipped.
    fn fetch_sizes(&self, query: &Query) -> (usize, usize) {
        if query.include_passages {
            let document_k = (query.limit * self.config.overfetch_factor)
                .min(self.config.document_fetch_ceiling)
                .max(query.limit);
            (document_k, self.config.passage_pool_size)
        } else {
            (query.limit, 0)
        }
    }

    /// The synchronous tail of the pipeline: dedup, aggregate, combine,
    /// allocate.
    fn rank_candidates(
        &self,
        query: Query,
        documents: Vec<DocumentCandidate>,
        passages: Vec<PassageCandidate>,
    ) -> ResultSet {
        let deduped = dedup_candidates(documents);
        let total = deduped.len();

        let boosts = aggregate_evidence(&passages, &self.config.evidence);
        let mut results = combine_scores(
            deduped,
            &boosts,
            query.include_passages,
            query.limit,
            &self.config.combine,
        );
        let passage_total =
            allocate_passages(&mut results, passages, self.config.max_passages_per_result);

        debug!(
            "query {:?}: {total} candidates after dedup, {} returned, {passage_total} passages attached",
            query.text,
            results.len()
        );

        ResultSet {
            query: query.text,
            total,
            results,
            passage_total,
        }
    }
}

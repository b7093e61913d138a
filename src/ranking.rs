//! Pure ranking passes.
//!
//! This module holds the four computation stages the [`RankingEngine`] runs
//! after both searches return, in order:
//!
//! - [`dedup`] - collapse multiple editions of the same work
//! - [`evidence`] - summarize each document's passage hits into one boost
//! - [`combine`] - blend document score and boost, re-sort, trim
//! - [`allocate`] - attach each surviving document's own best passages
//!
//! Every function here is a pure transformation over its inputs: no I/O, no
//! shared state, no mutation of retrieval results. All the async work
//! happens in the engine before these run.
//!
//! [`RankingEngine`]: crate::RankingEngine

pub mod allocate;
pub mod combine;
pub mod dedup;
pub mod evidence;

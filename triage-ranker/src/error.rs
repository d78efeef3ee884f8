//! Error types raised while configuring or running the ranker.
#![forbid(unsafe_code)]

use thiserror::Error;
use triage_core::CaseInputError;

/// Errors raised by [`Ranker`](crate::Ranker).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RankError {
    /// The case document did not yield a case record.
    #[error(transparent)]
    Case(#[from] CaseInputError),
    /// Score weights were negative, non-finite, or summed to zero.
    #[error("score weights must be finite, non-negative, and have a non-zero total")]
    InvalidWeights,
    /// The ranker was asked to keep zero matches.
    #[error("top_n must keep at least one match")]
    InvalidTopN,
}

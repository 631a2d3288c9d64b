//! Eligibility scoring for recognition award submissions.
//!
//! The [`analysis`] module holds the scoring engine: a pure function from extracted document
//! text, a category catalog, and a [`analysis::ScoringConfig`] to a ranked list of
//! [`analysis::MatchResult`]s. The remaining modules provide the service plumbing around it.

pub mod analysis;
pub mod config;
pub mod error;
pub mod telemetry;

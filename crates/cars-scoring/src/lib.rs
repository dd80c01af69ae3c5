//! cars-scoring
//!
//! Scoring and risk classification for the CARS 25-item behavioural
//! screening questionnaire. Pure data and pure functions — no I/O.
//!
//! The pipeline runs in four stages:
//!
//! 1. [`collect::collect_answers`] reads the positional form fields.
//! 2. [`scoring::compute_raw_scores`] sums answers per subscale.
//! 3. [`scoring::convert_all_to_standard`] maps raw totals to T-scores.
//! 4. [`risk::determine_risk`] assigns the risk tier, with the self-harm
//!    override on item 25.
//!
//! [`pipeline::Screening`] composes the stages over a given set of
//! subscales, norm tables and thresholds.

pub mod catalog;
pub mod collect;
pub mod error;
pub mod norms;
pub mod pipeline;
pub mod risk;
pub mod scoring;
pub mod validate;

pub use error::ScoringError;
pub use pipeline::{Screening, run_pipeline};

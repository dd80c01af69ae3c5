//! The composed screening pipeline.

use std::sync::LazyLock;

use cars_core::models::assessment::AssessmentResult;

use crate::catalog::{self, SELF_HARM_ITEM_ID, Subscale};
use crate::collect::{FieldSource, collect_answers};
use crate::error::ScoringError;
use crate::norms::NormTables;
use crate::risk::{RiskThresholds, determine_risk};
use crate::scoring::{compute_raw_scores, convert_all_to_standard};

/// Everything the pipeline needs besides the answers: subscale definitions,
/// norm tables and risk thresholds. Read-only once built and safe to share
/// across threads.
#[derive(Debug, Clone)]
pub struct Screening {
    subscales: Vec<Subscale>,
    norms: NormTables,
    thresholds: RiskThresholds,
}

impl Default for Screening {
    fn default() -> Self {
        Self {
            subscales: catalog::subscales().to_vec(),
            norms: NormTables::standard().clone(),
            thresholds: RiskThresholds::default(),
        }
    }
}

impl Screening {
    pub fn new(
        subscales: Vec<Subscale>,
        norms: NormTables,
        thresholds: RiskThresholds,
    ) -> Result<Self, ScoringError> {
        thresholds.validate()?;
        Ok(Self {
            subscales,
            norms,
            thresholds,
        })
    }

    /// The shipped instrument with default thresholds.
    pub fn standard() -> &'static Screening {
        static STANDARD: LazyLock<Screening> = LazyLock::new(Screening::default);
        &STANDARD
    }

    /// The shipped instrument with custom thresholds.
    pub fn with_thresholds(thresholds: RiskThresholds) -> Result<Self, ScoringError> {
        thresholds.validate()?;
        Ok(Self {
            thresholds,
            ..Self::default()
        })
    }

    pub fn subscales(&self) -> &[Subscale] {
        &self.subscales
    }

    pub fn norms(&self) -> &NormTables {
        &self.norms
    }

    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    /// Collect, score and classify a submitted form, stamped with the
    /// current time.
    pub fn run<F: FieldSource + ?Sized>(&self, fields: &F) -> Result<AssessmentResult, ScoringError> {
        self.run_at(fields, jiff::Timestamp::now())
    }

    /// Like [`Screening::run`] with an explicit timestamp.
    pub fn run_at<F: FieldSource + ?Sized>(
        &self,
        fields: &F,
        taken_at: jiff::Timestamp,
    ) -> Result<AssessmentResult, ScoringError> {
        let answers = collect_answers(fields);
        self.score_answers(&answers, taken_at)
    }

    /// Score an already collected answer sequence.
    pub fn score_answers(
        &self,
        answers: &[i32],
        taken_at: jiff::Timestamp,
    ) -> Result<AssessmentResult, ScoringError> {
        let raw_scores = compute_raw_scores(answers, &self.subscales)?;
        let standard_scores = convert_all_to_standard(&raw_scores, &self.norms)?;
        tracing::debug!(subscales = raw_scores.len(), "computed raw and standard scores");

        let self_harm = self_harm_indicated(answers);
        let classification = determine_risk(&standard_scores, self_harm, &self.thresholds)?;
        if classification.self_harm_override_applied {
            tracing::warn!("self-harm item answered affirmatively; high-risk override applied");
        }
        tracing::debug!(risk_level = %classification.risk_level, "classified assessment");

        Ok(AssessmentResult::new(
            taken_at,
            answers.to_vec(),
            raw_scores,
            standard_scores,
            classification,
        ))
    }
}

/// Whether the self-harm item was answered "Yes" (exactly `1`).
pub fn self_harm_indicated(answers: &[i32]) -> bool {
    answers.get(SELF_HARM_ITEM_ID as usize - 1) == Some(&1)
}

/// Run the shipped instrument over a submitted form.
pub fn run_pipeline<F: FieldSource + ?Sized>(fields: &F) -> Result<AssessmentResult, ScoringError> {
    Screening::standard().run(fields)
}

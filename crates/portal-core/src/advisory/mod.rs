//! AI-advisory tools: Career Simulator, 360 Feedback, Job Crafting and PR Coach.
//!
//! The flow of every tool is `Input -> Processing(0..=3) -> Results`, with PR
//! Coach optionally holding results in `Review`. This module only holds the
//! synchronous state; timers and completion calls are driven by the
//! application layer.

pub mod demo;
mod form;
mod mode;
mod report;
mod state;

pub use form::{AdvisoryForm, AdvisoryInput};
pub use mode::{AdvisoryMode, AdvisoryTiming, PROCESSING_STEPS};
pub use report::{
    ActionStep, AdvisoryOutcome, AdvisoryReport, CareerSimulation, CoachHint, CraftingProposal,
    FeedbackSummary, Improvement, LearningTask, PrAnalysis, ProposalKind, ResultSource, Scenario,
    ScenarioKind, SkillDelta, SkillsAnalysis,
};
pub use state::{AdvisoryPhase, AdvisoryState};

use crate::config::AdvisoryConfig;

/// Whether a generated PR review must be held for a human spot check.
///
/// `roll` is a uniform sample in `[0, 1)`. Only generated PR Coach reports are
/// ever held; demo and fallback data go straight to results.
pub fn needs_review(outcome: &AdvisoryOutcome, config: &AdvisoryConfig, roll: f64) -> bool {
    if outcome.source != ResultSource::Generated {
        return false;
    }
    let AdvisoryReport::PrReview(analysis) = &outcome.report else {
        return false;
    };
    analysis.confidence < config.review_confidence_threshold || roll < config.spot_check_rate
}

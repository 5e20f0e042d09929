use serde::Serialize;

use super::form::AdvisoryForm;
use super::mode::{AdvisoryMode, PROCESSING_STEPS};
use super::report::AdvisoryOutcome;
use crate::error::{PortalError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum AdvisoryPhase {
    Input,
    Processing { step: u8 },
    Results,
    /// Held for a human spot check before results are released.
    Review,
}

/// Form, phase and result of one advisory tool.
#[derive(Debug, Clone, Serialize)]
pub struct AdvisoryState {
    form: AdvisoryForm,
    phase: AdvisoryPhase,
    outcome: Option<AdvisoryOutcome>,
}

impl AdvisoryState {
    pub fn new(mode: AdvisoryMode) -> Self {
        Self {
            form: AdvisoryForm::new(mode),
            phase: AdvisoryPhase::Input,
            outcome: None,
        }
    }

    pub fn mode(&self) -> AdvisoryMode {
        self.form.mode()
    }

    pub fn form(&self) -> &AdvisoryForm {
        &self.form
    }

    /// Form edits are only accepted in the input phase.
    pub fn form_mut(&mut self) -> Result<&mut AdvisoryForm> {
        if self.phase != AdvisoryPhase::Input {
            return Err(PortalError::invalid_state(
                "the form is locked while a run is in progress",
            ));
        }
        Ok(&mut self.form)
    }

    pub fn phase(&self) -> AdvisoryPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<&AdvisoryOutcome> {
        self.outcome.as_ref()
    }

    /// Validates the form and enters `Processing { step: 0 }`.
    ///
    /// A rejected form leaves the phase at `Input`.
    pub fn submit(&mut self) -> Result<()> {
        if self.phase != AdvisoryPhase::Input {
            return Err(PortalError::invalid_state(format!(
                "{} is not accepting input",
                self.mode().title()
            )));
        }
        self.form.validate()?;
        self.phase = AdvisoryPhase::Processing { step: 0 };
        self.outcome = None;
        Ok(())
    }

    /// Moves the processing animation forward one step, up to the last.
    pub fn advance_step(&mut self) -> bool {
        match self.phase {
            AdvisoryPhase::Processing { step } if step < PROCESSING_STEPS => {
                self.phase = AdvisoryPhase::Processing { step: step + 1 };
                true
            }
            _ => false,
        }
    }

    /// Stores the outcome and leaves processing. Ignored outside processing.
    pub fn complete(&mut self, outcome: AdvisoryOutcome, needs_review: bool) -> bool {
        if !matches!(self.phase, AdvisoryPhase::Processing { .. }) {
            return false;
        }
        self.phase = if needs_review {
            AdvisoryPhase::Review
        } else {
            AdvisoryPhase::Results
        };
        self.outcome = Some(outcome);
        true
    }

    /// Hands a held report to the review queue and returns to the form.
    pub fn send_to_review_queue(&mut self) -> Result<()> {
        if self.phase != AdvisoryPhase::Review {
            return Err(PortalError::invalid_state("nothing is waiting for review"));
        }
        self.phase = AdvisoryPhase::Input;
        self.outcome = None;
        Ok(())
    }

    /// Back to the form, dropping any result. Form values are kept.
    pub fn reset(&mut self) {
        self.phase = AdvisoryPhase::Input;
        self.outcome = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::demo;
    use crate::advisory::report::{AdvisoryReport, ResultSource};

    fn demo_outcome(mode: AdvisoryMode) -> AdvisoryOutcome {
        AdvisoryOutcome {
            report: demo::report(mode, true),
            source: ResultSource::Demo,
        }
    }

    #[test]
    fn test_submit_without_consent_stays_in_input() {
        let mut state = AdvisoryState::new(AdvisoryMode::JobCrafting);
        assert!(state.submit().unwrap_err().is_consent_required());
        assert_eq!(state.phase(), AdvisoryPhase::Input);
    }

    #[test]
    fn test_steps_stop_at_last() {
        let mut state = AdvisoryState::new(AdvisoryMode::Feedback360);
        state.submit().unwrap();
        assert_eq!(state.phase(), AdvisoryPhase::Processing { step: 0 });

        assert!(state.advance_step());
        assert!(state.advance_step());
        assert!(state.advance_step());
        assert!(!state.advance_step());
        assert_eq!(state.phase(), AdvisoryPhase::Processing { step: 3 });
    }

    #[test]
    fn test_complete_moves_to_results() {
        let mut state = AdvisoryState::new(AdvisoryMode::Feedback360);
        state.submit().unwrap();
        let outcome = demo_outcome(AdvisoryMode::Feedback360);
        assert!(state.complete(outcome, false));
        assert_eq!(state.phase(), AdvisoryPhase::Results);
        assert!(matches!(
            state.outcome().unwrap().report,
            AdvisoryReport::Feedback(_)
        ));
    }

    #[test]
    fn test_complete_after_reset_is_ignored() {
        let mut state = AdvisoryState::new(AdvisoryMode::Feedback360);
        state.submit().unwrap();
        state.reset();
        let outcome = demo_outcome(AdvisoryMode::Feedback360);
        assert!(!state.complete(outcome, false));
        assert_eq!(state.phase(), AdvisoryPhase::Input);
        assert!(state.outcome().is_none());
    }

    #[test]
    fn test_review_round_trip() {
        let mut state = AdvisoryState::new(AdvisoryMode::PrCoach);
        {
            let form = state.form_mut().unwrap();
            form.consent = true;
            form.set_demo(true);
        }
        state.submit().unwrap();
        assert!(state.form_mut().is_err());

        state.complete(demo_outcome(AdvisoryMode::PrCoach), true);
        assert_eq!(state.phase(), AdvisoryPhase::Review);

        state.send_to_review_queue().unwrap();
        assert_eq!(state.phase(), AdvisoryPhase::Input);
        assert!(state.send_to_review_queue().is_err());
    }

    #[test]
    fn test_double_submit_is_rejected() {
        let mut state = AdvisoryState::new(AdvisoryMode::Feedback360);
        state.submit().unwrap();
        assert!(state.submit().unwrap_err().is_invalid_state());
    }
}

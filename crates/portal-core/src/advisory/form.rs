use serde::Serialize;

use super::demo;
use super::mode::AdvisoryMode;
use super::report::ScenarioKind;
use crate::error::{PortalError, Result};

/// Mode-specific form fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdvisoryInput {
    Career {
        goal: String,
        horizon: String,
    },
    Feedback {
        went_well: String,
        improvements: String,
        help_needed: String,
    },
    Crafting {
        interests: String,
        horizon: String,
        risk: ScenarioKind,
        preferences: Vec<String>,
    },
    PrReview {
        diff: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvisoryForm {
    pub consent: bool,
    pub demo: bool,
    pub input: AdvisoryInput,
}

impl AdvisoryForm {
    /// Initial form: demo mode on, consent not given.
    pub fn new(mode: AdvisoryMode) -> Self {
        let input = match mode {
            AdvisoryMode::CareerSimulator => AdvisoryInput::Career {
                goal: "Senior Frontend Developer".to_string(),
                horizon: "6 months".to_string(),
            },
            AdvisoryMode::Feedback360 => AdvisoryInput::Feedback {
                went_well: String::new(),
                improvements: String::new(),
                help_needed: String::new(),
            },
            AdvisoryMode::JobCrafting => AdvisoryInput::Crafting {
                interests: String::new(),
                horizon: "1 month".to_string(),
                risk: ScenarioKind::Likely,
                preferences: Vec::new(),
            },
            AdvisoryMode::PrCoach => AdvisoryInput::PrReview {
                diff: String::new(),
            },
        };
        Self {
            consent: false,
            demo: true,
            input,
        }
    }

    pub fn mode(&self) -> AdvisoryMode {
        match self.input {
            AdvisoryInput::Career { .. } => AdvisoryMode::CareerSimulator,
            AdvisoryInput::Feedback { .. } => AdvisoryMode::Feedback360,
            AdvisoryInput::Crafting { .. } => AdvisoryMode::JobCrafting,
            AdvisoryInput::PrReview { .. } => AdvisoryMode::PrCoach,
        }
    }

    /// Switches demo mode and applies the mode's demo presets.
    ///
    /// Job Crafting fills in a sample profile when turned on and clears it when
    /// turned off. PR Coach loads the sample diff into an empty editor.
    pub fn set_demo(&mut self, demo: bool) {
        self.demo = demo;
        match &mut self.input {
            AdvisoryInput::Crafting {
                interests,
                horizon,
                risk,
                preferences,
            } => {
                if demo {
                    *interests = "System Design, Leadership, Product Strategy".to_string();
                    *horizon = "3 months".to_string();
                    *risk = ScenarioKind::Likely;
                    *preferences = vec!["New Roles".to_string(), "Experiments".to_string()];
                } else {
                    interests.clear();
                    preferences.clear();
                }
            }
            AdvisoryInput::PrReview { diff } if demo && diff.trim().is_empty() => {
                *diff = demo::DEMO_DIFF.to_string();
            }
            _ => {}
        }
    }

    /// Sets the main free-text field of the form.
    pub fn set_primary_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        match &mut self.input {
            AdvisoryInput::Career { goal, .. } => *goal = text,
            AdvisoryInput::Feedback { went_well, .. } => *went_well = text,
            AdvisoryInput::Crafting { interests, .. } => *interests = text,
            AdvisoryInput::PrReview { diff } => *diff = text,
        }
    }

    /// Checks the consent gate and required fields.
    pub fn validate(&self) -> Result<()> {
        let mode = self.mode();
        if mode.requires_consent() && !self.consent {
            return Err(PortalError::consent_required(mode.title()));
        }
        if let AdvisoryInput::PrReview { diff } = &self.input {
            if diff.trim().is_empty() {
                return Err(PortalError::validation("paste a diff to analyze"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_form_defaults() {
        let form = AdvisoryForm::new(AdvisoryMode::CareerSimulator);
        assert!(form.demo);
        assert!(!form.consent);
        assert_eq!(form.mode(), AdvisoryMode::CareerSimulator);
    }

    #[test]
    fn test_consent_required() {
        let mut form = AdvisoryForm::new(AdvisoryMode::CareerSimulator);
        assert!(form.validate().unwrap_err().is_consent_required());
        form.consent = true;
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_feedback_has_no_consent_gate() {
        let form = AdvisoryForm::new(AdvisoryMode::Feedback360);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_pr_coach_rejects_empty_diff() {
        let mut form = AdvisoryForm::new(AdvisoryMode::PrCoach);
        form.consent = true;
        assert!(matches!(
            form.validate().unwrap_err(),
            PortalError::Validation(_)
        ));

        form.set_demo(true);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_crafting_demo_presets() {
        let mut form = AdvisoryForm::new(AdvisoryMode::JobCrafting);
        form.set_demo(true);
        let AdvisoryInput::Crafting {
            interests,
            preferences,
            horizon,
            ..
        } = &form.input
        else {
            panic!("expected crafting input");
        };
        assert!(interests.contains("System Design"));
        assert_eq!(preferences.len(), 2);
        assert_eq!(horizon, "3 months");

        form.set_demo(false);
        let AdvisoryInput::Crafting { interests, .. } = &form.input else {
            panic!("expected crafting input");
        };
        assert!(interests.is_empty());
    }

    #[test]
    fn test_set_primary_text() {
        let mut form = AdvisoryForm::new(AdvisoryMode::PrCoach);
        form.set_primary_text("fn main() {}");
        assert_eq!(
            form.input,
            AdvisoryInput::PrReview {
                diff: "fn main() {}".to_string()
            }
        );
    }
}

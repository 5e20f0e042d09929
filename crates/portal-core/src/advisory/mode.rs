use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::view::ViewId;

/// The four AI-advisory tools.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AdvisoryMode {
    CareerSimulator,
    Feedback360,
    JobCrafting,
    PrCoach,
}

/// Animation step interval and the minimum time before results are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvisoryTiming {
    pub step_interval: Duration,
    pub settle_delay: Duration,
}

/// Number of animated processing steps after step 0.
pub const PROCESSING_STEPS: u8 = 3;

impl AdvisoryMode {
    pub fn title(&self) -> &'static str {
        match self {
            Self::CareerSimulator => "Career Simulator",
            Self::Feedback360 => "360 Feedback",
            Self::JobCrafting => "Job Crafting",
            Self::PrCoach => "PR Coach",
        }
    }

    /// Whether submitting needs an explicit data-processing consent.
    pub fn requires_consent(&self) -> bool {
        !matches!(self, Self::Feedback360)
    }

    /// Whether demo mode skips the completion call entirely.
    ///
    /// 360 Feedback uses demo mode to add simulated peers to the prompt instead.
    pub fn demo_skips_completion(&self) -> bool {
        !matches!(self, Self::Feedback360)
    }

    pub fn timing(&self) -> AdvisoryTiming {
        match self {
            Self::CareerSimulator | Self::Feedback360 => AdvisoryTiming {
                step_interval: Duration::from_millis(800),
                settle_delay: Duration::from_millis(3000),
            },
            Self::JobCrafting | Self::PrCoach => AdvisoryTiming {
                step_interval: Duration::from_millis(1000),
                settle_delay: Duration::from_millis(3500),
            },
        }
    }

    /// Labels of processing steps 1 to 3.
    pub fn step_labels(&self) -> [&'static str; 3] {
        match self {
            Self::CareerSimulator => [
                "Analyzing Profile & History...",
                "Calculating Skill Deltas...",
                "Projecting Scenarios...",
            ],
            Self::Feedback360 => [
                "Anonymizing Data Layers...",
                "Clustering Peer Sentiments...",
                "Generating Executive Insights...",
            ],
            Self::JobCrafting => [
                "Analyzing Backlog & Workload...",
                "Matching Corporate Needs...",
                "Crafting personalized roles...",
            ],
            Self::PrCoach => [
                "Parsing AST & Syntax...",
                "Checking Internal Guidelines...",
                "Formulating Growth Hints...",
            ],
        }
    }

    /// Screen hosting this tool, if it has one.
    pub fn view(&self) -> Option<ViewId> {
        match self {
            Self::CareerSimulator => Some(ViewId::ProfileCareer),
            Self::JobCrafting => Some(ViewId::ProfileJobCrafting),
            Self::PrCoach => Some(ViewId::PrCoach),
            Self::Feedback360 => None,
        }
    }

    /// Tool hosted on `view`, if any.
    pub fn from_view(view: ViewId) -> Option<Self> {
        Self::iter().find(|mode| mode.view() == Some(view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_timing_per_mode() {
        let career = AdvisoryMode::CareerSimulator.timing();
        assert_eq!(career.step_interval, Duration::from_millis(800));
        assert_eq!(career.settle_delay, Duration::from_millis(3000));

        let pr = AdvisoryMode::PrCoach.timing();
        assert_eq!(pr.step_interval, Duration::from_millis(1000));
        assert_eq!(pr.settle_delay, Duration::from_millis(3500));
    }

    #[test]
    fn test_consent_gate() {
        assert!(AdvisoryMode::CareerSimulator.requires_consent());
        assert!(AdvisoryMode::JobCrafting.requires_consent());
        assert!(AdvisoryMode::PrCoach.requires_consent());
        assert!(!AdvisoryMode::Feedback360.requires_consent());
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(
            AdvisoryMode::from_str("pr-coach").unwrap(),
            AdvisoryMode::PrCoach
        );
        let label = AdvisoryMode::Feedback360.to_string();
        assert_eq!(
            AdvisoryMode::from_str(&label).unwrap(),
            AdvisoryMode::Feedback360
        );
    }

    #[test]
    fn test_from_view() {
        assert_eq!(
            AdvisoryMode::from_view(ViewId::PrCoach),
            Some(AdvisoryMode::PrCoach)
        );
        assert_eq!(
            AdvisoryMode::from_view(ViewId::ProfileJobCrafting),
            Some(AdvisoryMode::JobCrafting)
        );
        assert_eq!(AdvisoryMode::from_view(ViewId::Messenger), None);
    }
}

//! Typed advisory results, as returned by the completion service.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use super::mode::AdvisoryMode;
use crate::completion::{CompletionError, parse_json_completion};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display)]
pub enum ScenarioKind {
    Conservative,
    Likely,
    Ambitious,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionStep {
    pub title: String,
    pub time_est: String,
    pub owner: String,
}

/// Skill level on a 0-10 scale, now and at the end of the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDelta {
    pub skill: String,
    pub current: f64,
    pub projected: f64,
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(rename = "type")]
    pub kind: ScenarioKind,
    pub title: String,
    /// 0-100.
    pub risk_level: f64,
    #[serde(default)]
    pub actions: Vec<ActionStep>,
    #[serde(default)]
    pub skills: Vec<SkillDelta>,
    pub confidence: f64,
    pub rationale: String,
    pub impact: String,
    #[serde(default)]
    pub risks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerSimulation {
    pub scenarios: Vec<Scenario>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachHint {
    pub title: String,
    pub action: String,
    pub time: String,
    pub how_to_check: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSummary {
    pub summary: String,
    #[serde(default)]
    pub coach_hints: Vec<CoachHint>,
    #[serde(default)]
    pub manager_tips: Vec<String>,
    pub confidence: f64,
    #[serde(default)]
    pub urgent_issue: bool,
    /// Set when simulated peer feedback was part of the input.
    #[serde(default)]
    pub is_simulated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, Display)]
pub enum ProposalKind {
    Project,
    Mentorship,
    #[serde(rename = "Role Expansion")]
    #[strum(serialize = "Role Expansion")]
    RoleExpansion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftingProposal {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ProposalKind,
    pub description: String,
    pub rationale: String,
    pub impact: String,
    pub time_est: String,
    #[serde(default)]
    pub risks: Vec<String>,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Improvement {
    pub suggestion: String,
    pub rationale: String,
    pub code_before: String,
    pub code_after: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningTask {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsAnalysis {
    pub demonstrated: Vec<String>,
    pub next_steps: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrAnalysis {
    #[serde(default)]
    pub positives: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<Improvement>,
    pub learning_task: LearningTask,
    pub skills_analysis: SkillsAnalysis,
    pub confidence: f64,
}

/// Result of one advisory run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum AdvisoryReport {
    Career(CareerSimulation),
    Feedback(FeedbackSummary),
    Crafting(Vec<CraftingProposal>),
    PrReview(PrAnalysis),
}

impl AdvisoryReport {
    /// Parses a completion for `mode` into its typed report.
    pub fn parse(mode: AdvisoryMode, text: &str) -> Result<Self, CompletionError> {
        if text.trim().is_empty() {
            return Err(CompletionError::EmptyResponse);
        }
        Ok(match mode {
            AdvisoryMode::CareerSimulator => Self::Career(parse_json_completion(text)?),
            AdvisoryMode::Feedback360 => Self::Feedback(parse_json_completion(text)?),
            AdvisoryMode::JobCrafting => Self::Crafting(parse_json_completion(text)?),
            AdvisoryMode::PrCoach => Self::PrReview(parse_json_completion(text)?),
        })
    }

    pub fn mode(&self) -> AdvisoryMode {
        match self {
            Self::Career(_) => AdvisoryMode::CareerSimulator,
            Self::Feedback(_) => AdvisoryMode::Feedback360,
            Self::Crafting(_) => AdvisoryMode::JobCrafting,
            Self::PrReview(_) => AdvisoryMode::PrCoach,
        }
    }

    /// Overall confidence, the lowest item confidence for multi-item reports.
    pub fn confidence(&self) -> Option<f64> {
        match self {
            Self::Career(simulation) => simulation
                .scenarios
                .iter()
                .map(|s| s.confidence)
                .reduce(f64::min),
            Self::Feedback(summary) => Some(summary.confidence),
            Self::Crafting(proposals) => proposals.iter().map(|p| p.confidence).reduce(f64::min),
            Self::PrReview(analysis) => Some(analysis.confidence),
        }
    }
}

/// Where a report came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultSource {
    Generated,
    Demo,
    /// The completion failed; the demo payload stands in.
    Fallback { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvisoryOutcome {
    pub report: AdvisoryReport,
    pub source: ResultSource,
}

impl AdvisoryOutcome {
    /// Banner shown above results that are not freshly generated.
    pub fn banner(&self) -> Option<String> {
        match &self.source {
            ResultSource::Generated => None,
            ResultSource::Demo => Some("Demo mode: showing example data".to_string()),
            ResultSource::Fallback { reason } => Some(format!(
                "AI service unavailable ({reason}), showing example data"
            )),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, ResultSource::Fallback { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::demo;

    #[test]
    fn test_parse_crafting_array() {
        let text = r#"```json
[{"title":"Guardian","type":"Role Expansion","description":"d","rationale":"r",
  "impact":"i","timeEst":"4h","risks":["x"],"confidence":0.8}]
```"#;
        let AdvisoryReport::Crafting(proposals) =
            AdvisoryReport::parse(AdvisoryMode::JobCrafting, text).unwrap()
        else {
            panic!("expected crafting report");
        };
        assert_eq!(proposals[0].kind, ProposalKind::RoleExpansion);
        assert_eq!(proposals[0].time_est, "4h");
    }

    #[test]
    fn test_parse_feedback_defaults_simulated_flag() {
        let text = r#"{"summary":"ok","coachHints":[],"managerTips":[],"confidence":0.9,"urgentIssue":false}"#;
        let report = AdvisoryReport::parse(AdvisoryMode::Feedback360, text).unwrap();
        let AdvisoryReport::Feedback(summary) = report else {
            panic!("expected feedback report");
        };
        assert!(!summary.is_simulated);
    }

    #[test]
    fn test_parse_wrong_shape_is_malformed() {
        let err = AdvisoryReport::parse(AdvisoryMode::PrCoach, r#"{"foo":1}"#).unwrap_err();
        assert!(matches!(err, CompletionError::Malformed(_)));
    }

    #[test]
    fn test_parse_blank_is_empty_response() {
        let err = AdvisoryReport::parse(AdvisoryMode::PrCoach, "  ").unwrap_err();
        assert!(matches!(err, CompletionError::EmptyResponse));
    }

    #[test]
    fn test_career_confidence_is_minimum() {
        let report = AdvisoryReport::Career(demo::career_simulation());
        assert_eq!(report.confidence(), Some(0.45));
        assert_eq!(report.mode(), AdvisoryMode::CareerSimulator);
    }

    #[test]
    fn test_banner_only_for_non_generated() {
        let outcome = AdvisoryOutcome {
            report: AdvisoryReport::PrReview(demo::pr_analysis()),
            source: ResultSource::Generated,
        };
        assert!(outcome.banner().is_none());

        let fallback = AdvisoryOutcome {
            source: ResultSource::Fallback {
                reason: "timeout".to_string(),
            },
            ..outcome
        };
        assert!(fallback.is_fallback());
        assert!(fallback.banner().unwrap().contains("showing example data"));
    }
}

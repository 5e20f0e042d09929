//! Built-in example data shown in demo mode and on fallback.

use super::mode::AdvisoryMode;
use super::report::{
    ActionStep, AdvisoryReport, CareerSimulation, CoachHint, CraftingProposal, FeedbackSummary,
    Improvement, LearningTask, PrAnalysis, ProposalKind, Scenario, ScenarioKind, SkillDelta,
    SkillsAnalysis,
};

/// Anonymized peer comments added to 360 Feedback prompts in demo mode.
pub const SIMULATED_PEERS: &str = r#"Peer 1: "Ekaterina is great at vision, but sometimes moves too fast for the team to catch up."
Peer 2: "Amazing leadership during the Q3 crisis. Would love more 1:1 time."
Peer 3: "Technically brilliant, but needs to delegate more operational tasks."
Peer 4: "Always inspiring. However, the roadmap changes frequently."
Peer 5: "Great speaker, but sometimes emails are too brief and unclear."
Peer 6: "A true visionary. I want to learn strategic planning from her.""#;

/// Sample diff loaded by the PR Coach demo button.
pub const DEMO_DIFF: &str = r#"// useEffect in DashboardWidget.tsx
useEffect(() => {
  const fetchData = async () => {
    const data = await api.getWidgetData(widgetId);
    setData(data);
  };
  fetchData();
}, []); // eslint-disable-line react-hooks/exhaustive-deps
"#;

/// Example report for `mode`. `simulated` only affects 360 Feedback.
pub fn report(mode: AdvisoryMode, simulated: bool) -> AdvisoryReport {
    match mode {
        AdvisoryMode::CareerSimulator => AdvisoryReport::Career(career_simulation()),
        AdvisoryMode::Feedback360 => AdvisoryReport::Feedback(feedback_summary(simulated)),
        AdvisoryMode::JobCrafting => AdvisoryReport::Crafting(crafting_proposals()),
        AdvisoryMode::PrCoach => AdvisoryReport::PrReview(pr_analysis()),
    }
}

fn action(title: &str, time_est: &str, owner: &str) -> ActionStep {
    ActionStep {
        title: title.to_string(),
        time_est: time_est.to_string(),
        owner: owner.to_string(),
    }
}

fn skill(name: &str, current: f64, projected: f64) -> SkillDelta {
    SkillDelta {
        skill: name.to_string(),
        current,
        projected,
        delta: projected - current,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn career_simulation() -> CareerSimulation {
    CareerSimulation {
        scenarios: vec![
            Scenario {
                kind: ScenarioKind::Conservative,
                title: "Solid Senior Engineer".to_string(),
                risk_level: 20.0,
                confidence: 0.92,
                rationale: "Based on your high code quality output, this path focuses on deepening technical expertise without aggressive leadership scope expansion.".to_string(),
                impact: "Steady contribution to team velocity.".to_string(),
                risks: strings(&["Limited visibility outside current team."]),
                actions: vec![
                    action("Lead 2 Epic Refactorings", "3 months", "Self"),
                    action("Mentor 1 Junior Dev", "Ongoing", "Self"),
                    action("Complete 'System Design' internal cert", "1 month", "LMS"),
                    action("Write 2 Technical Articles", "6 months", "Self"),
                ],
                skills: vec![skill("System Design", 4.0, 6.0), skill("Code Quality", 8.0, 9.0)],
            },
            Scenario {
                kind: ScenarioKind::Likely,
                title: "Tech Lead Track".to_string(),
                risk_level: 50.0,
                confidence: 0.78,
                rationale: "Your communication skills show promise. This path pushes for architectural ownership and team coordination.".to_string(),
                impact: "High impact on cross-team alignment.".to_string(),
                risks: strings(&["Requires 20% time reduction in coding."]),
                actions: vec![
                    action("Owner of 'Auth Service' Migration", "4 months", "Manager"),
                    action("Facilitate Weekly Architecture Review", "Weekly", "Self"),
                    action("Shadow Oleg (CTO) for 1 day", "1 day", "HR"),
                    action("Public Speaking Course", "2 months", "LMS"),
                ],
                skills: vec![skill("System Design", 4.0, 7.0), skill("Leadership", 3.0, 6.0)],
            },
            Scenario {
                kind: ScenarioKind::Ambitious,
                title: "Principal Engineer Fast-Track".to_string(),
                risk_level: 85.0,
                confidence: 0.45,
                rationale: "Aggressive growth targeting ecosystem-wide impact. Requires high visibility and solving novel problems.".to_string(),
                impact: "Transformational impact on platform scalability.".to_string(),
                risks: strings(&["High burnout risk", "Requires Executive Sponsorship"]),
                actions: vec![
                    action(
                        "Propose & Lead New Micro-Frontend Arch",
                        "6-9 months",
                        "Self",
                    ),
                    action("Speak at HighLoad++ Conference", "Q4", "DevRel"),
                    action("Lead Cross-Department Guild", "Ongoing", "Self"),
                    action("Solve P0 Incident in unfamiliar domain", "Ad-hoc", "Self"),
                ],
                skills: vec![skill("System Design", 4.0, 9.0), skill("Leadership", 3.0, 8.0)],
            },
        ],
    }
}

pub fn feedback_summary(simulated: bool) -> FeedbackSummary {
    let summary = if simulated {
        "The feedback highlights strong visionary leadership and crisis management. However, there is a recurring theme of 'velocity mismatch': the team struggles to keep up with rapid strategic pivots. Peers request more delegation of operations and clearer written communication."
    } else {
        "Based on self-reflection, you have a clear grasp of your wins. To grow, focus on verifying your assumptions with actual peer feedback in the next full cycle."
    };
    let hint = |title: &str, action: &str, time: &str, how_to_check: &str| CoachHint {
        title: title.to_string(),
        action: action.to_string(),
        time: time.to_string(),
        how_to_check: how_to_check.to_string(),
    };
    FeedbackSummary {
        summary: summary.to_string(),
        coach_hints: vec![
            hint(
                "Stabilize the Roadmap",
                "Freeze scope for 2 weeks after major pivots.",
                "Ongoing",
                "Team Pulse Survey > 4.0",
            ),
            hint(
                "Delegate Ops",
                "Assign 'Auth Service' ownership completely to Igor.",
                "1 week",
                "Zero operational tickets in your queue",
            ),
            hint(
                "Communication Clarity",
                "Use the 'What-Why-Next' template for all team emails.",
                "Daily",
                "Fewer follow-up questions",
            ),
        ],
        manager_tips: strings(&[
            "Encourage Ekaterina to take a 'listening tour' to understand team capacity.",
            "Celebrate her crisis management, but set KPIs for stability.",
        ]),
        confidence: if simulated { 0.92 } else { 0.65 },
        urgent_issue: false,
        is_simulated: simulated,
    }
}

pub fn crafting_proposals() -> Vec<CraftingProposal> {
    vec![
        CraftingProposal {
            title: "Performance Guardian for Auth Service".to_string(),
            kind: ProposalKind::RoleExpansion,
            description: "Take ownership of the 'Auth Service' latency metrics. Dedicate 4 hours/week to optimization tasks.".to_string(),
            rationale: "Aligns with your interest in System Design and leverages your recent bug fixes in this module.".to_string(),
            impact: "Potential reduction of P99 latency by 15%.".to_string(),
            time_est: "4 hours / week".to_string(),
            risks: strings(&["May reduce velocity on feature tickets slightly."]),
            confidence: 0.92,
        },
        CraftingProposal {
            title: "Shadow Product Manager for Q4 Planning".to_string(),
            kind: ProposalKind::Mentorship,
            description: "Join weekly product roadmap sessions for the 'Billing' squad as a technical advisor.".to_string(),
            rationale: "Supports your 'Product Strategy' interest. Provides context on business decisions.".to_string(),
            impact: "Improved technical feasibility of Q4 roadmap items.".to_string(),
            time_est: "2 hours / week".to_string(),
            risks: strings(&["Meeting overload risk if not time-boxed."]),
            confidence: 0.75,
        },
        CraftingProposal {
            title: "Lead 'Micro-Frontend' Proof of Concept".to_string(),
            kind: ProposalKind::Project,
            description: "Allocated 10% innovation time to prototype a migration to Module Federation.".to_string(),
            rationale: "High-risk, high-reward experiment fitting your 'Ambitious' risk profile.".to_string(),
            impact: "Could reduce build times by 40% if successful.".to_string(),
            time_est: "10% time (Fridays)".to_string(),
            risks: strings(&["Technically complex; PoC might fail."]),
            confidence: 0.55,
        },
    ]
}

pub fn pr_analysis() -> PrAnalysis {
    PrAnalysis {
        positives: strings(&[
            "Good separation of concerns by extracting data fetching into a dedicated async function.",
            "Clean variable naming conventions used throughout the component.",
        ]),
        improvements: vec![
            Improvement {
                suggestion: "Fix missing dependency in useEffect".to_string(),
                rationale: "The `widgetId` is used inside the effect but is missing from the dependency array. This can lead to stale data if the `widgetId` prop changes.".to_string(),
                code_before: "useEffect(() => {\n  // ...\n}, []);".to_string(),
                code_after: "useEffect(() => {\n  // ...\n}, [widgetId]);".to_string(),
            },
            Improvement {
                suggestion: "Handle loading and error states".to_string(),
                rationale: "There is no error handling around the async call. If the API fails, the UI might crash or show an undefined state.".to_string(),
                code_before: "const data = await api.getWidgetData(widgetId);\nsetData(data);".to_string(),
                code_after: "try {\n  setLoading(true);\n  const data = await api.getWidgetData(widgetId);\n  setData(data);\n} catch (e) {\n  setError(e);\n} finally {\n  setLoading(false);\n}".to_string(),
            },
        ],
        learning_task: LearningTask {
            title: "Mastering React Hooks Dependencies".to_string(),
            description: "Read the 'A Complete Guide to useEffect' to understand why suppressing linter warnings is often a code smell.".to_string(),
            link: Some("https://react.dev/reference/react/useEffect".to_string()),
        },
        skills_analysis: SkillsAnalysis {
            demonstrated: strings(&[
                "React Hooks Lifecycle",
                "Async Data Fetching",
                "Functional Component Patterns",
            ]),
            next_steps: "You are mastering basic hooks. To level up, try creating a custom `useFetch` hook to abstract this logic, or explore state machines for handling complex loading/error states.".to_string(),
        },
        confidence: 0.88,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_report_matches_mode() {
        for mode in [
            AdvisoryMode::CareerSimulator,
            AdvisoryMode::Feedback360,
            AdvisoryMode::JobCrafting,
            AdvisoryMode::PrCoach,
        ] {
            assert_eq!(report(mode, true).mode(), mode);
        }
    }

    #[test]
    fn test_feedback_payload_depends_on_simulation() {
        assert!(feedback_summary(true).is_simulated);
        assert_eq!(feedback_summary(false).confidence, 0.65);
    }

    #[test]
    fn test_skill_delta_is_computed() {
        let simulation = career_simulation();
        let ambitious = &simulation.scenarios[2];
        assert_eq!(ambitious.skills[0].delta, 5.0);
    }
}

//! Prompt templates for the messenger persona and the advisory tools.
//!
//! Templates are Jinja2 (minijinja) and render from small `Serialize` structs.

use minijinja::Environment;
use portal_core::advisory::{AdvisoryForm, AdvisoryInput, demo};
use portal_core::completion::CompletionRequest;
use portal_core::config::MessengerConfig;
use portal_core::messenger::Counterpart;
use portal_core::{PortalError, Result};
use serde::Serialize;
use serde_json::{Value, json};

const MESSENGER_REPLY: &str = r#"{% if counterpart.kind == "direct" -%}
You are {{ counterpart.display_name }} ({{ counterpart.role }}), a colleague at {{ company }}.
{%- else -%}
You are a colleague at {{ company }} replying in the thread "{{ counterpart.title }}" of the #{{ counterpart.channel_name }} channel.
{%- endif %}
You are chatting with {{ user_name }} ({{ user_role }}).
Keep your responses professional but concise.
If the user mentions a ticket like {{ ticket_prefix }}-xxxx, acknowledge it."#;

const CAREER_SYSTEM: &str = r#"Act as a Corporate Career Architect.
Generate 3 career path scenarios (Conservative, Likely, Ambitious) based on the user's goal.
Output JSON only.
Schema: { scenarios: [ { type, title, riskLevel (0-100), confidence (0-1), rationale, impact, risks:[], actions: [{title, timeEst, owner}], skills: [{skill, current, projected, delta}] } ] }"#;

const CAREER_CONTENT: &str = r#"Current Role: Middle Frontend Developer.
Goal: {{ goal }}.
Horizon: {{ horizon }}.
Context: High performance in feature delivery, average in system design."#;

const FEEDBACK_SYSTEM: &str = r#"You are an elite executive coach. Analyze the 360 feedback.
Input contains Self-Reflection and optionally Peer Feedback.

Return a JSON object with this exact structure:
{
  "summary": "Short summary (max 90 words) of the feedback profile.",
  "coachHints": [
    { "title": "Hint Title", "action": "Specific Action", "time": "Time Est.", "howToCheck": "Success Measure" }
  ],
  "managerTips": ["Tip 1", "Tip 2"],
  "confidence": 0.9,
  "urgentIssue": false
}
Give exactly 3 coachHints.

If "Simulated Colleague Feedback" is present, explicitly mention "Based on peer feedback..." in the summary.
If only Self-Reflection is present, focus on self-awareness."#;

const FEEDBACK_CONTENT: &str = r#"User Self-Reflection:
1. What went well: {{ went_well }}
2. Improvements: {{ improvements }}
3. Help needed: {{ help_needed }}
{%- if peers %}

Simulated Colleague Feedback (Anonymized):
{{ peers }}
{%- endif %}"#;

const CRAFTING_SYSTEM: &str = r#"You are an expert Organizational Psychologist and Agile Coach.
Generate exactly 3 job crafting proposals based on the user's input profile.

Proposal 1: Conservative (Low Risk, High Confidence). Small tweaks.
Proposal 2: Balanced (Medium Risk). Standard crafting like Mentorship or Process improvements.
Proposal 3: Ambitious (High Risk). Significant Role Expansion or innovative Projects.

Ensure the 'type' field accurately reflects the nature of the proposal (e.g., use 'Role Expansion' for adding new responsibilities).
Use modal language (e.g., "may improve", "potential impact") to ensure psychological safety."#;

const CRAFTING_CONTENT: &str = r#"Employee Context: Mid-Level Developer.
Current Baseline: High feature velocity, reliable delivery, but low visibility in architecture.

User Inputs:
- Interests / Growth Areas: {{ interests or "General Professional Growth" }}
- Activity Preferences: {% if preferences %}{{ preferences | join(", ") }}{% else %}Open to all{% endif %}
- Risk Tolerance: {{ risk }}
- Time Horizon: {{ horizon }}

Based on these inputs, generate 3 distinct Job Crafting proposals.
If the user is interested in 'Leadership' or 'System Design', suggest a 'Role Expansion' or 'Project' that builds these skills."#;

const PR_SYSTEM: &str = r#"You are a Senior Staff Engineer acting as a mentor.
Analyze the provided code diff.
Focus on GROWTH, MASTERY, and PERFORMANCE.
Output a JSON object with:
- positives: string[] (2-3 items)
- improvements: { suggestion, rationale, codeBefore, codeAfter }[] (1-2 items)
- learningTask: { title, description, link }
- skillsAnalysis: {
    demonstrated: string[] (List 2-3 specific technical skills shown in this code),
    nextSteps: string (1-2 sentences on how to advance from this level)
  }
- confidence: number (0-1)"#;

#[derive(Serialize)]
struct ReplyContext<'a> {
    company: &'a str,
    user_name: &'a str,
    user_role: &'a str,
    ticket_prefix: &'a str,
    counterpart: &'a Counterpart,
}

/// Compiled prompt templates.
pub struct PromptRenderer {
    env: Environment<'static>,
}

impl PromptRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for (name, source) in [
            ("messenger_reply", MESSENGER_REPLY),
            ("career_content", CAREER_CONTENT),
            ("feedback_content", FEEDBACK_CONTENT),
            ("crafting_content", CRAFTING_CONTENT),
        ] {
            env.add_template(name, source)
                .map_err(|e| PortalError::internal(format!("template '{name}': {e}")))?;
        }
        Ok(Self { env })
    }

    fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(ctx))
            .map_err(|e| PortalError::internal(format!("failed to render '{name}': {e}")))
    }

    /// System instruction for a messenger reply.
    pub fn messenger_reply(
        &self,
        config: &MessengerConfig,
        counterpart: &Counterpart,
    ) -> Result<String> {
        self.render(
            "messenger_reply",
            ReplyContext {
                company: &config.company,
                user_name: &config.user_display_name,
                user_role: &config.user_role,
                ticket_prefix: &config.ticket_prefix,
                counterpart,
            },
        )
    }

    /// JSON completion request for an advisory form.
    ///
    /// In demo mode, 360 Feedback appends the simulated peer comments.
    pub fn advisory_request(&self, form: &AdvisoryForm) -> Result<CompletionRequest> {
        let request = match &form.input {
            AdvisoryInput::Career { goal, horizon } => CompletionRequest::json(
                CAREER_SYSTEM,
                self.render(
                    "career_content",
                    json!({ "goal": goal, "horizon": horizon }),
                )?,
            ),
            AdvisoryInput::Feedback {
                went_well,
                improvements,
                help_needed,
            } => {
                let peers = form.demo.then_some(demo::SIMULATED_PEERS);
                CompletionRequest::json(
                    FEEDBACK_SYSTEM,
                    self.render(
                        "feedback_content",
                        json!({
                            "went_well": went_well,
                            "improvements": improvements,
                            "help_needed": help_needed,
                            "peers": peers,
                        }),
                    )?,
                )
            }
            AdvisoryInput::Crafting {
                interests,
                horizon,
                risk,
                preferences,
            } => CompletionRequest::json(
                CRAFTING_SYSTEM,
                self.render(
                    "crafting_content",
                    json!({
                        "interests": interests,
                        "horizon": horizon,
                        "risk": risk.as_ref(),
                        "preferences": preferences,
                    }),
                )?,
            )
            .with_schema(crafting_schema()),
            AdvisoryInput::PrReview { diff } => CompletionRequest::json(PR_SYSTEM, diff.clone()),
        };
        Ok(request)
    }
}

/// Response schema for Job Crafting, in the Gemini schema dialect.
pub fn crafting_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": { "type": "STRING", "description": "Title of the job crafting proposal" },
                "description": { "type": "STRING", "description": "Detailed description of the task or role change" },
                "rationale": { "type": "STRING", "description": "Why this fits the user's profile and interests" },
                "impact": { "type": "STRING", "description": "Expected business or team impact" },
                "timeEst": { "type": "STRING", "description": "Time estimation (e.g. '2 hours/week')" },
                "risks": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Potential risks of this change"
                },
                "confidence": { "type": "NUMBER", "description": "Confidence score between 0 and 1" },
                "type": {
                    "type": "STRING",
                    "enum": ["Project", "Mentorship", "Role Expansion"],
                    "description": "Category of the proposal"
                }
            },
            "required": ["title", "description", "rationale", "impact", "timeEst", "risks", "confidence", "type"]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::advisory::AdvisoryMode;
    use portal_core::completion::ResponseFormat;

    fn renderer() -> PromptRenderer {
        PromptRenderer::new().unwrap()
    }

    #[test]
    fn test_direct_reply_persona() {
        let counterpart = Counterpart::Direct {
            display_name: "Igor Malysh".to_string(),
            role: "Chief DevEx".to_string(),
        };
        let text = renderer()
            .messenger_reply(&MessengerConfig::default(), &counterpart)
            .unwrap();

        let intro = "You are Igor Malysh (Chief DevEx), a colleague at MTS Web Services.";
        assert!(text.starts_with(intro));
        assert!(text.contains("chatting with Ekaterina Tyukavkina (CEO)"));
        assert!(text.contains("MWS-xxxx"));
    }

    #[test]
    fn test_thread_reply_persona() {
        let counterpart = Counterpart::Thread {
            title: "Q4 All-Hands Meeting".to_string(),
            channel_name: "general".to_string(),
        };
        let text = renderer()
            .messenger_reply(&MessengerConfig::default(), &counterpart)
            .unwrap();
        let location = "thread \"Q4 All-Hands Meeting\" of the #general channel";
        assert!(text.contains(location));
    }

    #[test]
    fn test_feedback_demo_appends_peers() {
        let mut form = AdvisoryForm::new(AdvisoryMode::Feedback360);
        form.set_primary_text("Shipped the Q3 release");

        let with_peers = renderer().advisory_request(&form).unwrap();
        let content = &with_peers.content;
        assert!(content.contains("What went well: Shipped the Q3 release"));
        assert!(content.contains("Simulated Colleague Feedback"));
        assert!(with_peers.expects_json());

        form.set_demo(false);
        let without = renderer().advisory_request(&form).unwrap();
        assert!(!without.content.contains("Simulated Colleague Feedback"));
    }

    #[test]
    fn test_crafting_request_has_schema_and_defaults() {
        let mut form = AdvisoryForm::new(AdvisoryMode::JobCrafting);
        form.set_demo(false);
        let request = renderer().advisory_request(&form).unwrap();

        let content = &request.content;
        assert!(content.contains("Interests / Growth Areas: General Professional Growth"));
        assert!(content.contains("Activity Preferences: Open to all"));
        assert!(content.contains("Risk Tolerance: Likely"));
        assert!(matches!(
            request.response_format,
            ResponseFormat::Json { schema: Some(_) }
        ));
    }

    #[test]
    fn test_crafting_preferences_are_joined() {
        let mut form = AdvisoryForm::new(AdvisoryMode::JobCrafting);
        form.set_demo(true);
        let request = renderer().advisory_request(&form).unwrap();
        let expected = "Activity Preferences: New Roles, Experiments";
        assert!(request.content.contains(expected));
    }

    #[test]
    fn test_pr_request_sends_diff_as_content() {
        let mut form = AdvisoryForm::new(AdvisoryMode::PrCoach);
        form.set_primary_text("fn main() {}");
        let request = renderer().advisory_request(&form).unwrap();
        assert_eq!(request.content, "fn main() {}");
        let persona = &request.system_instruction;
        assert!(persona.contains("Senior Staff Engineer"));
    }
}

//! Phase-sequenced runner for the AI-advisory tools.
//!
//! A run is one spawned task: the completion call and the step animation run
//! together, results wait for the mode's settle delay, and the whole run is
//! dropped when [`AdvisoryFlow::reset`] cancels it.

use std::sync::{Arc, Mutex};

use portal_core::Result;
use portal_core::advisory::{
    AdvisoryForm, AdvisoryMode, AdvisoryOutcome, AdvisoryReport, AdvisoryState,
    PROCESSING_STEPS, ResultSource, demo, needs_review,
};
use portal_core::completion::CompletionAgent;
use portal_core::config::AdvisoryConfig;
use portal_core::view::ViewId;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep, sleep_until};
use tokio_util::sync::CancellationToken;

use crate::lock;
use crate::prompts::PromptRenderer;

type Roll = Arc<dyn Fn() -> f64 + Send + Sync>;

struct FlowInner {
    state: AdvisoryState,
    /// Bumped on every submit and reset; a run only writes while it matches.
    generation: u64,
}

/// Everything a run task needs, cloned out of the flow.
#[derive(Clone)]
struct RunContext {
    inner: Arc<Mutex<FlowInner>>,
    agent: Arc<dyn CompletionAgent>,
    prompts: Arc<PromptRenderer>,
    config: AdvisoryConfig,
    roll: Roll,
}

pub struct AdvisoryFlow {
    ctx: RunContext,
    run: Mutex<Option<CancellationToken>>,
}

impl AdvisoryFlow {
    pub fn new(
        mode: AdvisoryMode,
        agent: Arc<dyn CompletionAgent>,
        prompts: Arc<PromptRenderer>,
        config: AdvisoryConfig,
    ) -> Self {
        Self {
            ctx: RunContext {
                inner: Arc::new(Mutex::new(FlowInner {
                    state: AdvisoryState::new(mode),
                    generation: 0,
                })),
                agent,
                prompts,
                config,
                roll: Arc::new(rand::random::<f64>),
            },
            run: Mutex::new(None),
        }
    }

    /// Replaces the spot-check sampler.
    pub fn with_roll(mut self, roll: impl Fn() -> f64 + Send + Sync + 'static) -> Self {
        self.ctx.roll = Arc::new(roll);
        self
    }

    pub fn mode(&self) -> AdvisoryMode {
        lock(&self.ctx.inner).state.mode()
    }

    pub fn snapshot(&self) -> AdvisoryState {
        lock(&self.ctx.inner).state.clone()
    }

    /// Edits the form. Rejected while a run is in progress or results are shown.
    pub fn update_form<R>(&self, f: impl FnOnce(&mut AdvisoryForm) -> R) -> Result<R> {
        let mut inner = lock(&self.ctx.inner);
        Ok(f(inner.state.form_mut()?))
    }

    /// Validates the form and starts a run.
    ///
    /// A rejected form (missing consent, empty diff) leaves the flow in `Input`.
    pub fn submit(&self) -> Result<JoinHandle<()>> {
        let (form, generation) = {
            let mut inner = lock(&self.ctx.inner);
            inner.state.submit()?;
            inner.generation += 1;
            (inner.state.form().clone(), inner.generation)
        };
        tracing::info!("[Advisory] Started {} run", form.mode().title());

        let token = CancellationToken::new();
        if let Some(previous) = lock(&self.run).replace(token.clone()) {
            previous.cancel();
        }
        Ok(tokio::spawn(run_flow(
            self.ctx.clone(),
            form,
            generation,
            token,
        )))
    }

    /// Cancels the run in flight and returns to the form.
    pub fn reset(&self) {
        if let Some(token) = lock(&self.run).take() {
            token.cancel();
        }
        let mut inner = lock(&self.ctx.inner);
        inner.state.reset();
        inner.generation += 1;
    }

    pub fn send_to_review_queue(&self) -> Result<()> {
        lock(&self.ctx.inner).state.send_to_review_queue()?;
        tracing::info!("[Advisory] Report sent to the review queue");
        Ok(())
    }
}

impl Drop for AdvisoryFlow {
    fn drop(&mut self) {
        if let Some(token) = lock(&self.run).take() {
            token.cancel();
        }
    }
}

async fn run_flow(ctx: RunContext, form: AdvisoryForm, generation: u64, token: CancellationToken) {
    let mode = form.mode();
    let timing = mode.timing();
    let started = Instant::now();

    let animate = async {
        for _ in 0..PROCESSING_STEPS {
            sleep(timing.step_interval).await;
            let mut inner = lock(&ctx.inner);
            if inner.generation != generation {
                return;
            }
            inner.state.advance_step();
        }
    };
    let work = async {
        let (outcome, ()) = tokio::join!(
            produce_outcome(ctx.agent.as_ref(), &ctx.prompts, &form),
            animate
        );
        sleep_until(started + timing.settle_delay).await;
        outcome
    };

    let outcome = tokio::select! {
        _ = token.cancelled() => {
            tracing::debug!("[Advisory] {} run cancelled", mode.title());
            return;
        }
        outcome = work => outcome,
    };

    let review = needs_review(&outcome, &ctx.config, (ctx.roll)());
    let mut inner = lock(&ctx.inner);
    if inner.generation != generation {
        return;
    }
    if inner.state.complete(outcome, review) {
        tracing::info!(
            "[Advisory] {} finished{}",
            mode.title(),
            if review { ", held for review" } else { "" }
        );
    }
}

/// Demo payload, generated report, or fallback. Never fails.
async fn produce_outcome(
    agent: &dyn CompletionAgent,
    prompts: &PromptRenderer,
    form: &AdvisoryForm,
) -> AdvisoryOutcome {
    let mode = form.mode();
    if form.demo && mode.demo_skips_completion() {
        return AdvisoryOutcome {
            report: demo::report(mode, true),
            source: ResultSource::Demo,
        };
    }

    match generate(agent, prompts, form).await {
        Ok(report) => AdvisoryOutcome {
            report,
            source: ResultSource::Generated,
        },
        Err(reason) => {
            tracing::warn!(
                "[Advisory] {} failed, using example data: {}",
                mode.title(),
                reason
            );
            AdvisoryOutcome {
                report: demo::report(mode, form.demo),
                source: ResultSource::Fallback { reason },
            }
        }
    }
}

async fn generate(
    agent: &dyn CompletionAgent,
    prompts: &PromptRenderer,
    form: &AdvisoryForm,
) -> std::result::Result<AdvisoryReport, String> {
    let request = prompts.advisory_request(form).map_err(|e| e.to_string())?;
    let text = agent.complete(request).await.map_err(|e| e.to_string())?;
    let mut report = AdvisoryReport::parse(form.mode(), &text).map_err(|e| e.to_string())?;
    if let AdvisoryReport::Feedback(summary) = &mut report {
        summary.is_simulated = form.demo;
    }
    Ok(report)
}

/// One flow per advisory mode.
pub struct AdvisoryService {
    career: AdvisoryFlow,
    feedback: AdvisoryFlow,
    crafting: AdvisoryFlow,
    pr_coach: AdvisoryFlow,
}

impl AdvisoryService {
    pub fn new(
        agent: Arc<dyn CompletionAgent>,
        prompts: Arc<PromptRenderer>,
        config: AdvisoryConfig,
    ) -> Self {
        let flow = |mode| {
            AdvisoryFlow::new(
                mode,
                Arc::clone(&agent),
                Arc::clone(&prompts),
                config.clone(),
            )
        };
        Self {
            career: flow(AdvisoryMode::CareerSimulator),
            feedback: flow(AdvisoryMode::Feedback360),
            crafting: flow(AdvisoryMode::JobCrafting),
            pr_coach: flow(AdvisoryMode::PrCoach),
        }
    }

    pub fn flow(&self, mode: AdvisoryMode) -> &AdvisoryFlow {
        match mode {
            AdvisoryMode::CareerSimulator => &self.career,
            AdvisoryMode::Feedback360 => &self.feedback,
            AdvisoryMode::JobCrafting => &self.crafting,
            AdvisoryMode::PrCoach => &self.pr_coach,
        }
    }

    fn flows(&self) -> [&AdvisoryFlow; 4] {
        [&self.career, &self.feedback, &self.crafting, &self.pr_coach]
    }

    /// Cancels every run.
    pub fn reset_all(&self) {
        for flow in self.flows() {
            flow.reset();
        }
    }

    /// Tears down the tool hosted on `view`, if any.
    pub fn reset_for_view(&self, view: ViewId) {
        if let Some(mode) = AdvisoryMode::from_view(view) {
            self.flow(mode).reset();
        }
    }
}

use std::sync::Arc;

use portal_core::Result;
use portal_core::completion::CompletionAgent;
use portal_core::config::PortalConfig;
use portal_core::layout::PreferenceStore;
use portal_core::navigation::NavParams;
use portal_core::view::ViewId;

use crate::advisory_service::AdvisoryService;
use crate::call_session::CallSession;
use crate::messenger_service::MessengerService;
use crate::prompts::PromptRenderer;
use crate::shell::Shell;

/// The whole portal: shell, call overlay, messenger and advisory tools.
///
/// Navigation goes through here so that a messenger deep link is consumed as
/// soon as the messenger is shown, and an advisory tool is torn down when its
/// view is left.
pub struct PortalApp {
    shell: Shell,
    call: CallSession,
    messenger: MessengerService,
    advisory: AdvisoryService,
}

impl PortalApp {
    pub fn new(
        config: &PortalConfig,
        viewport_width: u32,
        store: Arc<dyn PreferenceStore>,
        agent: Arc<dyn CompletionAgent>,
    ) -> Result<Self> {
        let prompts = Arc::new(PromptRenderer::new()?);
        let messenger = MessengerService::seeded(
            config.messenger.clone(),
            Arc::clone(&agent),
            Arc::clone(&prompts),
        )?;
        let advisory = AdvisoryService::new(agent, prompts, config.advisory.clone());

        Ok(Self {
            shell: Shell::new(config.layout, viewport_width, store),
            call: CallSession::new(config.call),
            messenger,
            advisory,
        })
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// Layout, search and notification controls. Use [`Self::navigate`] to
    /// change views.
    pub fn shell_mut(&mut self) -> &mut Shell {
        &mut self.shell
    }

    pub fn call(&self) -> &CallSession {
        &self.call
    }

    pub fn messenger(&self) -> &MessengerService {
        &self.messenger
    }

    pub fn advisory(&self) -> &AdvisoryService {
        &self.advisory
    }

    pub fn navigate(&mut self, view: ViewId, params: NavParams) {
        let previous = self.shell.current_view();
        self.shell.navigate(view, params);
        self.after_navigation(previous);
    }

    pub fn navigate_route(&mut self, route: &str, params: NavParams) -> ViewId {
        let previous = self.shell.current_view();
        let view = self.shell.navigate_route(route, params);
        self.after_navigation(previous);
        view
    }

    /// Opens the DM with a contact from the right panel.
    pub fn message_contact(&mut self, id: &str) -> Result<()> {
        let previous = self.shell.current_view();
        self.shell.message_contact(id)?;
        self.after_navigation(previous);
        Ok(())
    }

    /// Starts a call with a contact from the right panel.
    pub fn call_contact(&self, id: &str) -> Result<()> {
        let contact = self.shell.contact(id)?.clone();
        self.call.start_call(contact);
        Ok(())
    }

    fn after_navigation(&mut self, previous: ViewId) {
        let current = self.shell.current_view();
        if previous != current {
            self.advisory.reset_for_view(previous);
        }
        if current.is_messenger() {
            let target = self.shell.target_chat_user().map(str::to_string);
            let shell = &mut self.shell;
            self.messenger
                .consume_target(target.as_deref(), || shell.clear_target_chat_user());
        }
    }
}

use std::borrow::Cow::{self, Borrowed, Owned};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

use portal_application::PortalApp;
use portal_core::advisory::AdvisoryMode;
use portal_core::navigation::NavParams;
use portal_core::view::ViewId;
use portal_infrastructure::{ConfigService, PortalPaths, TomlPreferenceRepository};

mod commands;
mod render;

use commands::{COMMANDS, Command, HELP};

#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Portal - corporate intranet shell in the terminal", long_about = None)]
struct Args {
    /// Initial viewport width in pixels
    #[arg(long, default_value_t = 1440)]
    width: u32,

    /// Configuration directory (defaults to ~/.config/portal)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Never call the AI service
    #[arg(long)]
    offline: bool,
}

/// Completion, highlighting and hints for slash commands.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return Ok((0, vec![]));
        }
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Background work whose result is printed once it finishes.
enum Pending {
    Reply(JoinHandle<()>),
    Advisory(AdvisoryMode, JoinHandle<()>),
}

impl Pending {
    fn is_finished(&self) -> bool {
        match self {
            Self::Reply(handle) | Self::Advisory(_, handle) => handle.is_finished(),
        }
    }
}

fn init_logging(logs_dir: &Path) -> Result<()> {
    fs::create_dir_all(logs_dir)
        .with_context(|| format!("failed to create {}", logs_dir.display()))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(logs_dir.join("portal.log"))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // ===== Bootstrap =====
    let paths = PortalPaths::new(args.config_dir.as_deref())?;
    init_logging(&paths.logs_dir())?;
    tracing::info!("[Shell] Starting portal v{}", env!("CARGO_PKG_VERSION"));

    let config_service = ConfigService::new(paths.clone());
    let config = config_service.load_config()?;
    let secrets = config_service.load_secrets()?;
    let agent = portal_interaction::build_agent(&config.completion, &secrets, args.offline);
    let store = Arc::new(TomlPreferenceRepository::new(&paths));
    let mut app = PortalApp::new(&config, args.width, store, Arc::clone(&agent))?;

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Portal ===".bright_magenta().bold());
    render::info(&format!(
        "AI: {}. Type /help for commands, /quit to exit. Press Enter to refresh.",
        agent.name()
    ));
    println!();
    render::status(&app);

    let mut pending: Vec<Pending> = Vec::new();

    // ===== Main REPL Loop =====
    loop {
        report_finished(&app, &mut pending);

        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let command = match commands::parse(trimmed) {
                    Ok(command) => command,
                    Err(e) => {
                        render::error(&e.to_string());
                        continue;
                    }
                };
                if command == Command::Quit {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                if let Err(e) = execute(&mut app, command, &mut pending) {
                    render::error(&e.to_string());
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                render::error(&format!("Error: {err:?}"));
                break;
            }
        }
    }

    app.call().end_call();
    app.advisory().reset_all();
    Ok(())
}

/// Prints the results of background work that completed since the last prompt.
fn report_finished(app: &PortalApp, pending: &mut Vec<Pending>) {
    let (finished, running): (Vec<_>, Vec<_>) =
        pending.drain(..).partition(Pending::is_finished);
    *pending = running;

    let mut show_messenger = false;
    for item in finished {
        match item {
            Pending::Reply(_) => show_messenger = true,
            Pending::Advisory(mode, _) => render::advisory(&app.advisory().flow(mode).snapshot()),
        }
    }
    if show_messenger && app.shell().current_view() == ViewId::Messenger {
        render::messenger(app.messenger());
    }
}

fn execute(app: &mut PortalApp, command: Command, pending: &mut Vec<Pending>) -> Result<()> {
    match command {
        Command::Go(route) => {
            app.navigate_route(&route, NavParams::default());
            render::current_view(app);
        }
        Command::Views => render::views(app),
        Command::Search(query) => {
            let shell = app.shell_mut();
            shell.set_search_query(query);
            if shell.search().results_visible {
                render::search_results(&shell.search_results());
            }
        }
        Command::Theme => {
            let theme = app.shell_mut().toggle_theme();
            render::info(&format!("Theme: {theme}"));
        }
        Command::Sidebar => {
            let open = app.shell_mut().toggle_sidebar();
            let state = if open { "opened" } else { "closed" };
            render::info(&format!("Sidebar {state}"));
        }
        Command::Panel => {
            let open = app.shell_mut().toggle_right_panel();
            let state = if open { "opened" } else { "closed" };
            render::info(&format!("Right panel {state}"));
        }
        Command::Resize(width) => {
            app.shell_mut().resize(width);
            render::status(app);
        }
        Command::Notifications => {
            if app.shell_mut().toggle_notifications() {
                render::notifications(app.shell().notifications());
            }
        }
        Command::ReadAll => {
            app.shell_mut().mark_all_read();
            render::notifications(app.shell().notifications());
        }
        Command::Contacts => render::contacts(app.shell().contacts()),
        Command::Message(id) => {
            app.message_contact(&id)?;
            render::current_view(app);
        }
        Command::Call(id) => {
            app.call_contact(&id)?;
            render::call(&app.call().snapshot());
        }
        Command::Hangup => {
            app.call().end_call();
            render::info("Call ended.");
        }
        Command::Chats => {
            app.navigate(ViewId::Messenger, NavParams::default());
            render::current_view(app);
        }
        Command::Open(id) => {
            ensure_messenger(app);
            app.messenger().select_session(&id)?;
            render::messenger(app.messenger());
        }
        Command::Thread(id) => {
            ensure_messenger(app);
            app.messenger().select_thread(&id)?;
            render::messenger(app.messenger());
        }
        Command::Back => {
            if !app.messenger().go_back() {
                render::info("Already at the session list.");
            }
            render::messenger(app.messenger());
        }
        Command::Filter(query) => {
            app.messenger().set_filter(&query);
            render::messenger(app.messenger());
        }
        Command::Consent(mode, flag) => {
            let consent = app
                .advisory()
                .flow(mode)
                .update_form(|form| {
                    form.consent = flag.unwrap_or(!form.consent);
                    form.consent
                })?;
            render::info(&format!(
                "{}: consent {}",
                mode.title(),
                if consent { "given" } else { "withdrawn" }
            ));
        }
        Command::Demo(mode, flag) => {
            let demo = app.advisory().flow(mode).update_form(|form| {
                let demo = flag.unwrap_or(!form.demo);
                form.set_demo(demo);
                demo
            })?;
            render::info(&format!(
                "{}: demo mode {}",
                mode.title(),
                if demo { "on" } else { "off" }
            ));
        }
        Command::Advise(mode, text) => {
            if let Some(view) = mode.view() {
                if app.shell().current_view() != view {
                    app.navigate(view, NavParams::default());
                }
            }
            let flow = app.advisory().flow(mode);
            if let Some(text) = text {
                flow.update_form(|form| form.set_primary_text(text))?;
            }
            let handle = flow.submit()?;
            pending.push(Pending::Advisory(mode, handle));
            for label in mode.step_labels() {
                render::info(&format!("  {label}"));
            }
        }
        Command::Review(mode) => {
            app.advisory().flow(mode).send_to_review_queue()?;
            render::info("Sent to the review queue.");
        }
        Command::ResetAdvisor(mode) => {
            app.advisory().flow(mode).reset();
            render::advisory(&app.advisory().flow(mode).snapshot());
        }
        Command::Status => {
            render::status(app);
            if app.shell().current_view() == ViewId::Messenger {
                render::messenger(app.messenger());
            }
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
        Command::Send(text) => {
            ensure_messenger(app);
            if let Some(handle) = app.messenger().send_message(&text)? {
                pending.push(Pending::Reply(handle));
            }
            render::messenger(app.messenger());
        }
    }
    Ok(())
}

/// Messenger commands bring the messenger on screen first.
fn ensure_messenger(app: &mut PortalApp) {
    if app.shell().current_view() != ViewId::Messenger {
        app.navigate(ViewId::Messenger, NavParams::default());
    }
}

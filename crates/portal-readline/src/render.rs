//! Colored terminal output for shell state.

use colored::{ColoredString, Colorize};
use portal_application::{MessengerService, PortalApp};
use portal_core::advisory::{
    AdvisoryMode, AdvisoryPhase, AdvisoryReport, AdvisoryState, CareerSimulation, CraftingProposal,
    FeedbackSummary, PROCESSING_STEPS, PrAnalysis,
};
use portal_core::call::{CallState, CallStatus};
use portal_core::contact::{Contact, Presence};
use portal_core::messenger::{
    ConversationView, Message, MessengerView, SessionListView, TextSegment,
};
use portal_core::notification::NotificationCenter;
use portal_core::search::SearchEntry;
use portal_core::view::ViewId;

pub fn info(text: &str) {
    println!("{}", text.bright_black());
}

pub fn error(text: &str) {
    eprintln!("{}", text.red());
}

pub fn status(app: &PortalApp) {
    let shell = app.shell();
    let crumb = shell.breadcrumb();
    let layout = shell.layout();
    println!(
        "{} {} {}",
        crumb.section.bright_black(),
        "/".bright_black(),
        crumb.page.bright_white().bold()
    );
    println!(
        "  view: {}  width: {}px  theme: {}",
        shell.current_view().route().cyan(),
        shell.viewport_width(),
        shell.theme()
    );
    println!(
        "  sidebar: {}  right panel: {}  notifications: {} unread",
        on_off(layout.sidebar_open),
        on_off(layout.right_panel_open),
        shell.notifications().unread_count()
    );
    call(&app.call().snapshot());
}

fn on_off(open: bool) -> ColoredString {
    if open { "open".green() } else { "closed".bright_black() }
}

pub fn views(app: &PortalApp) {
    let registry = app.shell().registry();
    let current = app.shell().current_view();
    for view in registry.views() {
        let crumb = registry.breadcrumb(view);
        let marker = if view == current { "*" } else { " " };
        println!(
            "{} {:<22} {}",
            marker.cyan(),
            view.route(),
            format!("{} / {}", crumb.section, crumb.page).bright_black()
        );
    }
}

pub fn search_results(results: &[&SearchEntry]) {
    if results.is_empty() {
        info("No results.");
        return;
    }
    for entry in results {
        println!(
            "  {:<22} {} {}",
            entry.label.bright_white(),
            entry.section.bright_black(),
            format!("(/go {})", entry.view.route()).bright_black()
        );
    }
}

pub fn notifications(center: &NotificationCenter) {
    println!(
        "{}",
        format!("Notifications ({} unread)", center.unread_count()).bold()
    );
    for record in center.records() {
        let dot = if record.read { " ".normal() } else { "•".bright_blue() };
        println!(
            "  {} {} {}",
            dot,
            record.text,
            record.relative_time.bright_black()
        );
    }
}

pub fn contacts(contacts: &[Contact]) {
    for contact in contacts {
        let presence = match contact.presence {
            Presence::Online => contact.presence.as_ref().green(),
            Presence::Busy => contact.presence.as_ref().red(),
            Presence::Offline => contact.presence.as_ref().bright_black(),
        };
        println!(
            "  {:<8} {:<18} {:<12} {}",
            contact.id.cyan(),
            contact.name,
            contact.role.bright_black(),
            presence
        );
    }
}

pub fn call(state: &CallState) {
    let Some(contact) = state.contact() else {
        return;
    };
    let label = match state.status() {
        CallStatus::Ringing => state.status_label().yellow(),
        CallStatus::Connected => state.status_label().green(),
        CallStatus::Idle => return,
    };
    println!("  {} {} {}", "call:".bright_black(), contact.name, label);
}

// === Messenger ===

pub fn messenger(service: &MessengerService) {
    match service.view() {
        MessengerView::SessionList(list) => session_list(&list),
        MessengerView::ThreadList { channel, threads } => {
            println!("{}", format!("#{}", channel.name).bold());
            if threads.is_empty() {
                info("  No threads yet.");
            }
            for thread in threads {
                println!(
                    "  {:<6} {} {}",
                    thread.id.cyan(),
                    thread.title.bright_white(),
                    format!(
                        "by {}, {} replies, {}",
                        thread.author_name, thread.reply_count, thread.last_activity
                    )
                    .bright_black()
                );
                if !thread.tags.is_empty() {
                    println!("         {}", thread.tags.join(" ").magenta());
                }
            }
            info("Use /thread <id> to open a thread, /back for the session list.");
        }
        MessengerView::Conversation(conversation) => conversation_view(service, &conversation),
    }
}

fn session_list(list: &SessionListView) {
    println!("{}", "Channels".bold());
    for channel in &list.channels {
        println!(
            "  {:<16} #{}{}",
            channel.id.cyan(),
            channel.name,
            unread(channel.unread_count)
        );
    }
    println!("{}", "Direct messages".bold());
    for dm in &list.direct_messages {
        println!(
            "  {:<16} {} {}{}",
            dm.id.cyan(),
            dm.display_name,
            format!("{} {}", dm.last_timestamp, dm.last_message_preview).bright_black(),
            unread(dm.unread_count)
        );
    }
    info("Use /open <id> to select a session.");
}

fn unread(count: u32) -> String {
    if count == 0 {
        String::new()
    } else {
        format!(" ({count})").bright_blue().to_string()
    }
}

fn conversation_view(service: &MessengerService, conversation: &ConversationView) {
    println!(
        "{} {}",
        conversation.title.bold(),
        conversation.subtitle.bright_black()
    );
    for message in &conversation.messages {
        message_line(service, message);
    }
    if conversation.typing {
        info("  typing...");
    }
}

fn message_line(service: &MessengerService, message: &Message) {
    if message.is_system() {
        println!(
            "  {} {}",
            message.timestamp().bright_black(),
            message.text().yellow()
        );
        return;
    }

    let rendered = service.render_text(message.text());
    let body: String = rendered
        .segments
        .iter()
        .map(|segment| match segment {
            TextSegment::Plain { text } => text.normal().to_string(),
            TextSegment::TicketKey { key, known: true } => {
                key.bright_cyan().underline().to_string()
            }
            TextSegment::TicketKey { key, known: false } => key.cyan().to_string(),
        })
        .collect();
    let author = if message.is_me() {
        "me".green()
    } else {
        message.sender_id().bright_magenta()
    };
    println!(
        "  {} {} {}",
        message.timestamp().bright_black(),
        author,
        body
    );

    for card in &rendered.cards {
        let meta = format!("{} | {} | {}", card.status, card.priority, card.assignee);
        println!(
            "      {} {} {}",
            format!("[{}]", card.key).bright_cyan(),
            card.title,
            meta.bright_black()
        );
    }
}

// === Advisory ===

pub fn advisory(state: &AdvisoryState) {
    let mode = state.mode();
    let form = state.form();
    println!(
        "{} {}",
        mode.title().bold(),
        format!(
            "(consent: {}, demo: {})",
            if form.consent { "yes" } else { "no" },
            if form.demo { "on" } else { "off" }
        )
        .bright_black()
    );

    match state.phase() {
        AdvisoryPhase::Input => info("  Waiting for input. Run /advise to start."),
        AdvisoryPhase::Processing { step } => {
            for (index, label) in mode.step_labels().iter().enumerate() {
                let done = (index as u8) < step;
                let marker = if done { "✓".green() } else { "·".bright_black() };
                println!("  {marker} {label}");
            }
            info(&format!("  step {step}/{PROCESSING_STEPS}"));
        }
        AdvisoryPhase::Review => {
            println!(
                "  {}",
                "Held for a human spot check. Use /review to send it to the review queue."
                    .yellow()
            );
        }
        AdvisoryPhase::Results => {
            if let Some(outcome) = state.outcome() {
                if let Some(banner) = outcome.banner() {
                    println!("  {}", banner.yellow());
                }
                report(&outcome.report);
            }
        }
    }
}

fn report(report: &AdvisoryReport) {
    match report {
        AdvisoryReport::Career(simulation) => career(simulation),
        AdvisoryReport::Feedback(summary) => feedback(summary),
        AdvisoryReport::Crafting(proposals) => crafting(proposals),
        AdvisoryReport::PrReview(analysis) => pr_review(analysis),
    }
}

fn confidence(value: f64) -> ColoredString {
    let text = format!("{:.0}%", value * 100.0);
    if value >= 0.8 {
        text.green()
    } else if value >= 0.6 {
        text.yellow()
    } else {
        text.red()
    }
}

fn career(simulation: &CareerSimulation) {
    for scenario in &simulation.scenarios {
        println!(
            "  {} {} {} risk {:.0}",
            format!("[{}]", scenario.kind).cyan(),
            scenario.title.bold(),
            confidence(scenario.confidence),
            scenario.risk_level
        );
        println!("    {}", scenario.rationale);
        for action in &scenario.actions {
            println!(
                "    - {} {}",
                action.title,
                format!("({}, {})", action.time_est, action.owner).bright_black()
            );
        }
        for skill in &scenario.skills {
            println!(
                "    {} {:.0} -> {:.0}",
                skill.skill.bright_black(),
                skill.current,
                skill.projected
            );
        }
    }
}

fn feedback(summary: &FeedbackSummary) {
    if summary.urgent_issue {
        println!("  {}", "Urgent issue flagged".red().bold());
    }
    println!("  {} {}", summary.summary, confidence(summary.confidence));
    for hint in &summary.coach_hints {
        println!("  - {} {}", hint.title.bold(), hint.action);
        let check = format!("{} | check: {}", hint.time, hint.how_to_check);
        println!("    {}", check.bright_black());
    }
    if !summary.manager_tips.is_empty() {
        println!("  {}", "Manager tips".bold());
        for tip in &summary.manager_tips {
            println!("  - {tip}");
        }
    }
}

fn crafting(proposals: &[CraftingProposal]) {
    for proposal in proposals {
        println!(
            "  {} {} {}",
            format!("[{}]", proposal.kind).cyan(),
            proposal.title.bold(),
            confidence(proposal.confidence)
        );
        println!("    {}", proposal.description);
        println!(
            "    {}",
            format!("{} | {}", proposal.time_est, proposal.impact).bright_black()
        );
        if !proposal.risks.is_empty() {
            println!("    risks: {}", proposal.risks.join("; ").bright_black());
        }
    }
}

fn pr_review(analysis: &PrAnalysis) {
    println!("  confidence {}", confidence(analysis.confidence));
    for positive in &analysis.positives {
        println!("  {} {}", "+".green(), positive);
    }
    for improvement in &analysis.improvements {
        println!("  {} {}", "~".yellow(), improvement.suggestion.bold());
        println!("    {}", improvement.rationale.bright_black());
        for line in improvement.code_before.lines() {
            println!("    {}", format!("- {line}").red());
        }
        for line in improvement.code_after.lines() {
            println!("    {}", format!("+ {line}").green());
        }
    }
    let task = &analysis.learning_task;
    println!("  {} {}", "Learn:".bold(), task.title);
    println!("    {}", task.description);
    if let Some(link) = &task.link {
        println!("    {}", link.underline());
    }
    println!(
        "  {} {}",
        "Skills:".bold(),
        analysis.skills_analysis.demonstrated.join(", ")
    );
    println!("    {}", analysis.skills_analysis.next_steps.bright_black());
}

/// Shows the screen behind the current view after a navigation.
pub fn current_view(app: &PortalApp) {
    let view = app.shell().current_view();
    let crumb = app.shell().breadcrumb();
    println!(
        "{} {} {}",
        crumb.section.bright_black(),
        "/".bright_black(),
        crumb.page.bright_white().bold()
    );
    if view == ViewId::Messenger {
        messenger(app.messenger());
        return;
    }
    if let Some(mode) = AdvisoryMode::from_view(view) {
        advisory(&app.advisory().flow(mode).snapshot());
    }
}

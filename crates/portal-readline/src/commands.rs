//! Slash-command parsing for the REPL.

use portal_core::advisory::AdvisoryMode;
use thiserror::Error;

/// Every slash command, used for completion and hints.
pub const COMMANDS: &[&str] = &[
    "/go",
    "/views",
    "/search",
    "/theme",
    "/sidebar",
    "/panel",
    "/resize",
    "/notifications",
    "/read-all",
    "/contacts",
    "/message",
    "/call",
    "/hangup",
    "/chats",
    "/open",
    "/thread",
    "/back",
    "/filter",
    "/consent",
    "/demo",
    "/advise",
    "/review",
    "/reset-advisor",
    "/status",
    "/help",
    "/quit",
];

pub const HELP: &str = "\
Navigation
  /go <view>                 switch view (unknown views open the default)
  /views                     list views
  /search [query]            quick-jump search; empty clears
Layout
  /theme  /sidebar  /panel   toggle theme, sidebar, right panel
  /resize <px>               simulate a viewport resize
  /notifications             toggle the notification panel
  /read-all                  mark all notifications read
People
  /contacts                  list contacts
  /message <id>              open a DM with a contact
  /call <id>  /hangup        start or end a call
Messenger
  /chats                     open the messenger session list
  /open <session-id>         select a DM or channel
  /thread <thread-id>        open a channel thread
  /back                      go back one level
  /filter [query]            filter DMs by name
  <text>                     send a message in the open conversation
Advisory (modes: career, feedback, crafting, pr)
  /consent <mode> [on|off]   give or withdraw consent
  /demo <mode> [on|off]      toggle demo mode
  /advise <mode> [text]      run a tool, optionally setting its main field
  /review <mode>             send a held PR review to the review queue
  /reset-advisor <mode>      cancel a run and return to the form
Other
  /status  /help  /quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(String),
    Views,
    Search(String),
    Theme,
    Sidebar,
    Panel,
    Resize(u32),
    Notifications,
    ReadAll,
    Contacts,
    Message(String),
    Call(String),
    Hangup,
    Chats,
    Open(String),
    Thread(String),
    Back,
    Filter(String),
    /// `None` toggles.
    Consent(AdvisoryMode, Option<bool>),
    Demo(AdvisoryMode, Option<bool>),
    Advise(AdvisoryMode, Option<String>),
    Review(AdvisoryMode),
    ResetAdvisor(AdvisoryMode),
    Status,
    Help,
    Quit,
    /// Plain text for the open conversation.
    Send(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type /help for a list.")]
    Unknown(String),

    #[error("{command} needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Invalid {argument}: '{value}'")]
    InvalidArgument {
        argument: &'static str,
        value: String,
    },
}

/// Parses one non-empty input line.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    if !line.starts_with('/') {
        return Ok(Command::Send(line.to_string()));
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let command = match name {
        "/go" => Command::Go(required(rest, "/go", "a view name")?),
        "/views" => Command::Views,
        "/search" => Command::Search(rest.to_string()),
        "/theme" => Command::Theme,
        "/sidebar" => Command::Sidebar,
        "/panel" => Command::Panel,
        "/resize" => {
            let value = required(rest, "/resize", "a width in pixels")?;
            let width = value.parse().map_err(|_| CommandError::InvalidArgument {
                argument: "width",
                value,
            })?;
            Command::Resize(width)
        }
        "/notifications" => Command::Notifications,
        "/read-all" => Command::ReadAll,
        "/contacts" => Command::Contacts,
        "/message" => Command::Message(required(rest, "/message", "a contact id")?),
        "/call" => Command::Call(required(rest, "/call", "a contact id")?),
        "/hangup" => Command::Hangup,
        "/chats" => Command::Chats,
        "/open" => Command::Open(required(rest, "/open", "a session id")?),
        "/thread" => Command::Thread(required(rest, "/thread", "a thread id")?),
        "/back" => Command::Back,
        "/filter" => Command::Filter(rest.to_string()),
        "/consent" => {
            let (mode, flag) = mode_and_flag(rest, "/consent")?;
            Command::Consent(mode, flag)
        }
        "/demo" => {
            let (mode, flag) = mode_and_flag(rest, "/demo")?;
            Command::Demo(mode, flag)
        }
        "/advise" => {
            let (mode, text) = split_mode(rest, "/advise")?;
            Command::Advise(mode, (!text.is_empty()).then(|| text.to_string()))
        }
        "/review" => Command::Review(split_mode(rest, "/review")?.0),
        "/reset-advisor" => Command::ResetAdvisor(split_mode(rest, "/reset-advisor")?.0),
        "/status" => Command::Status,
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn required(
    rest: &str,
    command: &'static str,
    argument: &'static str,
) -> Result<String, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument { command, argument });
    }
    Ok(rest.to_string())
}

fn split_mode<'a>(
    rest: &'a str,
    command: &'static str,
) -> Result<(AdvisoryMode, &'a str), CommandError> {
    let (name, tail) = match rest.split_once(char::is_whitespace) {
        Some((name, tail)) => (name, tail.trim()),
        None => (rest, ""),
    };
    if name.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            argument: "an advisory mode",
        });
    }
    Ok((parse_mode(name)?, tail))
}

fn mode_and_flag(
    rest: &str,
    command: &'static str,
) -> Result<(AdvisoryMode, Option<bool>), CommandError> {
    let (mode, tail) = split_mode(rest, command)?;
    let flag = match tail {
        "" => None,
        "on" | "yes" | "true" => Some(true),
        "off" | "no" | "false" => Some(false),
        other => {
            return Err(CommandError::InvalidArgument {
                argument: "flag",
                value: other.to_string(),
            });
        }
    };
    Ok((mode, flag))
}

/// Accepts short aliases as well as the full kebab-case names.
pub fn parse_mode(value: &str) -> Result<AdvisoryMode, CommandError> {
    match value.to_lowercase().as_str() {
        "career" | "career-simulator" => Ok(AdvisoryMode::CareerSimulator),
        "feedback" | "feedback360" | "feedback-360" | "360" => Ok(AdvisoryMode::Feedback360),
        "crafting" | "job-crafting" => Ok(AdvisoryMode::JobCrafting),
        "pr" | "pr-coach" => Ok(AdvisoryMode::PrCoach),
        _ => Err(CommandError::InvalidArgument {
            argument: "advisory mode",
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_send() {
        assert_eq!(
            parse("  Please check MWS-1024 ").unwrap(),
            Command::Send("Please check MWS-1024".to_string())
        );
    }

    #[test]
    fn test_navigation_commands() {
        assert_eq!(
            parse("/go pr-coach").unwrap(),
            Command::Go("pr-coach".to_string())
        );
        assert_eq!(parse("/views").unwrap(), Command::Views);
        assert_eq!(parse("/search").unwrap(), Command::Search(String::new()));
        assert_eq!(
            parse("/search  team dash").unwrap(),
            Command::Search("team dash".to_string())
        );
    }

    #[test]
    fn test_missing_argument() {
        assert_eq!(
            parse("/go").unwrap_err(),
            CommandError::MissingArgument {
                command: "/go",
                argument: "a view name",
            }
        );
        assert!(matches!(
            parse("/advise").unwrap_err(),
            CommandError::MissingArgument { .. }
        ));
    }

    #[test]
    fn test_resize_parses_width() {
        assert_eq!(parse("/resize 800").unwrap(), Command::Resize(800));
        assert!(matches!(
            parse("/resize wide").unwrap_err(),
            CommandError::InvalidArgument { argument: "width", .. }
        ));
    }

    #[test]
    fn test_messenger_commands() {
        assert_eq!(
            parse("/open chat_igor").unwrap(),
            Command::Open("chat_igor".to_string())
        );
        assert_eq!(
            parse("/thread th_1").unwrap(),
            Command::Thread("th_1".to_string())
        );
        assert_eq!(parse("/back").unwrap(), Command::Back);
        assert_eq!(parse("/filter").unwrap(), Command::Filter(String::new()));
        assert_eq!(
            parse("/message igor").unwrap(),
            Command::Message("igor".to_string())
        );
    }

    #[test]
    fn test_advisory_commands() {
        assert_eq!(
            parse("/consent career").unwrap(),
            Command::Consent(AdvisoryMode::CareerSimulator, None)
        );
        assert_eq!(
            parse("/demo pr off").unwrap(),
            Command::Demo(AdvisoryMode::PrCoach, Some(false))
        );
        assert_eq!(
            parse("/advise 360 Shipped the Q3 release").unwrap(),
            Command::Advise(
                AdvisoryMode::Feedback360,
                Some("Shipped the Q3 release".to_string())
            )
        );
        assert_eq!(
            parse("/advise crafting").unwrap(),
            Command::Advise(AdvisoryMode::JobCrafting, None)
        );
        assert_eq!(
            parse("/reset-advisor job-crafting").unwrap(),
            Command::ResetAdvisor(AdvisoryMode::JobCrafting)
        );
        assert_eq!(
            parse("/review PR").unwrap(),
            Command::Review(AdvisoryMode::PrCoach)
        );
    }

    #[test]
    fn test_bad_mode_and_flag() {
        assert!(matches!(
            parse("/advise tarot").unwrap_err(),
            CommandError::InvalidArgument {
                argument: "advisory mode",
                ..
            }
        ));
        assert!(matches!(
            parse("/consent career maybe").unwrap_err(),
            CommandError::InvalidArgument { argument: "flag", .. }
        ));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse("/dance").unwrap_err(),
            CommandError::Unknown("/dance".to_string())
        );
        assert_eq!(parse("/exit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_every_listed_command_parses_or_asks_for_arguments() {
        for name in COMMANDS {
            match parse(name) {
                Ok(_) | Err(CommandError::MissingArgument { .. }) => {}
                Err(e) => panic!("{name}: {e}"),
            }
        }
    }
}

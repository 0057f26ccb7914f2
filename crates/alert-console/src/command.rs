//! Console command parsing

use alerting::{AlertFilter, SeverityFilter, StatusFilter};
use thiserror::Error;

/// Command line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// One console action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List(AlertFilter),
    Show(String),
    Assign { id: String, user: String },
    Unassign(String),
    /// Open the acknowledgment form
    Ack(String),
    Reason(String),
    /// Attach proof; `None` clears it
    Proof(Option<String>),
    Confirm,
    Cancel,
    Resolve(String),
    History { id: String, newest_first: bool },
    Summary,
    Conveyors,
    Users,
    Export,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  list [severity|all] [status|all] [limit]   list alerts
  show <id>                                  alert details
  assign <id> <user name>                    assign a user
  unassign <id>                              clear the assignee
  ack <id>                                   open the acknowledgment form
  reason <text>                              set the acknowledgment reason
  proof [file]                               attach proof (no file clears it)
  confirm | cancel                           submit or discard the form
  resolve <id>                               mark an alert resolved
  history <id> [--newest]                    lifecycle history
  summary | conveyors | users | export       overview, plant, roster, JSON
  help | quit";

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match verb.to_ascii_lowercase().as_str() {
        "list" | "ls" => Command::List(parse_filter(&args)?),
        "show" => Command::Show(single_id(&args, "show <id>")?),
        "assign" => {
            let (id, user) = rest
                .split_once(char::is_whitespace)
                .map(|(id, user)| (id.to_string(), user.trim().to_string()))
                .filter(|(_, user)| !user.is_empty())
                .ok_or(CommandError::Usage("assign <id> <user name>"))?;
            Command::Assign { id, user }
        }
        "unassign" => Command::Unassign(single_id(&args, "unassign <id>")?),
        "ack" | "acknowledge" => Command::Ack(single_id(&args, "ack <id>")?),
        "reason" => Command::Reason(rest.to_string()),
        "proof" => Command::Proof(if rest.is_empty() { None } else { Some(rest.to_string()) }),
        "confirm" => Command::Confirm,
        "cancel" => Command::Cancel,
        "resolve" => Command::Resolve(single_id(&args, "resolve <id>")?),
        "history" => match args.as_slice() {
            [id] => Command::History { id: id.to_string(), newest_first: false },
            [id, "--newest"] | ["--newest", id] => Command::History {
                id: id.to_string(),
                newest_first: true,
            },
            _ => return Err(CommandError::Usage("history <id> [--newest]")),
        },
        "summary" => Command::Summary,
        "conveyors" => Command::Conveyors,
        "users" => Command::Users,
        "export" => Command::Export,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

fn single_id(args: &[&str], usage: &'static str) -> Result<String, CommandError> {
    match args {
        [id] => Ok(id.to_string()),
        _ => Err(CommandError::Usage(usage)),
    }
}

fn parse_filter(args: &[&str]) -> Result<AlertFilter, CommandError> {
    if args.len() > 3 {
        return Err(CommandError::Usage("list [severity|all] [status|all] [limit]"));
    }

    let mut filter = AlertFilter::default();
    if let Some(severity) = args.first() {
        filter.severity = severity
            .parse::<SeverityFilter>()
            .map_err(CommandError::InvalidArgument)?;
    }
    if let Some(status) = args.get(1) {
        filter.status = status
            .parse::<StatusFilter>()
            .map_err(CommandError::InvalidArgument)?;
    }
    if let Some(limit) = args.get(2) {
        let limit = limit.parse::<usize>().map_err(|_| {
            CommandError::InvalidArgument(format!("limit '{}' is not a number", limit))
        })?;
        filter.limit = Some(limit);
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alerting::{AlertStatus, Severity};

    #[test]
    fn test_blank_and_comment_lines() {
        assert_eq!(parse("   "), Ok(None));
        assert_eq!(parse("# setup"), Ok(None));
    }

    #[test]
    fn test_list_filters() {
        assert_eq!(parse("list"), Ok(Some(Command::List(AlertFilter::default()))));

        let expected = AlertFilter::new(
            SeverityFilter::Only(Severity::Critical),
            StatusFilter::Only(AlertStatus::New),
        )
        .with_limit(5);
        assert_eq!(parse("list critical new 5"), Ok(Some(Command::List(expected))));

        assert!(matches!(parse("list loud"), Err(CommandError::InvalidArgument(_))));
        assert!(matches!(parse("list all all x"), Err(CommandError::InvalidArgument(_))));
    }

    #[test]
    fn test_assign_keeps_full_name() {
        assert_eq!(
            parse("assign a001   Sachi Gupta "),
            Ok(Some(Command::Assign {
                id: "a001".to_string(),
                user: "Sachi Gupta".to_string()
            }))
        );
        assert_eq!(parse("assign a001"), Err(CommandError::Usage("assign <id> <user name>")));
    }

    #[test]
    fn test_acknowledgment_commands() {
        assert_eq!(parse("ack a003"), Ok(Some(Command::Ack("a003".to_string()))));
        assert_eq!(
            parse("reason Removed metal object"),
            Ok(Some(Command::Reason("Removed metal object".to_string())))
        );
        assert_eq!(parse("reason"), Ok(Some(Command::Reason(String::new()))));
        assert_eq!(parse("proof"), Ok(Some(Command::Proof(None))));
        assert_eq!(
            parse("proof belt photo.jpg"),
            Ok(Some(Command::Proof(Some("belt photo.jpg".to_string()))))
        );
    }

    #[test]
    fn test_history_flags() {
        assert_eq!(
            parse("history a003 --newest"),
            Ok(Some(Command::History { id: "a003".to_string(), newest_first: true }))
        );
        assert!(matches!(parse("history"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_unknown_verb() {
        assert_eq!(parse("delete a001"), Err(CommandError::Unknown("delete".to_string())));
    }
}

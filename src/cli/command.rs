use std::str::FromStr;

use uuid::Uuid;

use crate::{
    errors::{CliError, LedgerError},
    ledger::{TransactionDraft, TransactionKind},
    preferences::Theme,
};

pub const USAGE: &str = "Usage: budget_tracker_cli <command>
Commands:
  add <name> <amount> <income|expense> <category> <YYYY-MM-DD>
  update <id> <name> <amount> <income|expense> <category> <YYYY-MM-DD>
  remove <id>
  list
  summary
  monthly
  goal [amount]
  theme [dark|light|toggle]
  version";

#[derive(Debug, Clone, PartialEq)]
pub enum ThemeAction {
    Show,
    Set(Theme),
    Toggle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(TransactionDraft),
    Update(Uuid, TransactionDraft),
    Remove(Uuid),
    List,
    Summary,
    Monthly,
    Goal(Option<f64>),
    Theme(ThemeAction),
    Version,
    Help,
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let Some((name, rest)) = args.split_first() else {
            return Ok(Command::Help);
        };
        let command = match name.as_str() {
            "add" => Command::Add(parse_draft(expect_args(rest, 5, "add")?)?),
            "update" => {
                let rest = expect_args(rest, 6, "update")?;
                Command::Update(parse_id(&rest[0])?, parse_draft(&rest[1..])?)
            }
            "remove" => Command::Remove(parse_id(&expect_args(rest, 1, "remove")?[0])?),
            "list" => Command::List,
            "summary" => Command::Summary,
            "monthly" => Command::Monthly,
            "goal" => match rest {
                [] => Command::Goal(None),
                [value] => Command::Goal(Some(parse_amount(value)?)),
                _ => return Err(usage("goal takes at most one argument")),
            },
            "theme" => match rest {
                [] => Command::Theme(ThemeAction::Show),
                [value] if value == "toggle" => Command::Theme(ThemeAction::Toggle),
                [value] => Command::Theme(ThemeAction::Set(Theme::from_str(value)?)),
                _ => return Err(usage("theme takes at most one argument")),
            },
            "version" | "--version" => Command::Version,
            "help" | "--help" | "-h" => Command::Help,
            other => return Err(usage(&format!("unknown command `{other}`"))),
        };
        Ok(command)
    }
}

/// Parses a user-typed amount; anything non-numeric is a validation error.
pub fn parse_amount(raw: &str) -> Result<f64, LedgerError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| LedgerError::validation(format!("`{raw}` is not a number")))
}

fn parse_draft(fields: &[String]) -> Result<TransactionDraft, CliError> {
    let kind = TransactionKind::from_str(&fields[2])?;
    Ok(TransactionDraft::new(
        fields[0].clone(),
        parse_amount(&fields[1])?,
        kind,
        fields[3].clone(),
        fields[4].clone(),
    ))
}

fn parse_id(raw: &str) -> Result<Uuid, CliError> {
    Uuid::parse_str(raw.trim()).map_err(|_| usage(&format!("`{raw}` is not a transaction id")))
}

fn expect_args<'a>(rest: &'a [String], count: usize, command: &str) -> Result<&'a [String], CliError> {
    if rest.len() == count {
        Ok(rest)
    } else {
        Err(usage(&format!(
            "{command} expects {count} argument(s), got {}",
            rest.len()
        )))
    }
}

fn usage(message: &str) -> CliError {
    CliError::Usage(format!("{message}\n{USAGE}"))
}

//! Command-line front end: parses one command, applies it to the ledger
//! stored under the configured data directory, and prints the result.

pub mod command;
pub mod output;

use std::{
    env,
    io::{self, Write},
    path::Path,
};

use crate::{
    aggregate::{monthly_series, Dashboard},
    config::{self, Config, ConfigManager},
    errors::{CliError, LedgerError},
    ledger::Ledger,
    preferences::Preferences,
    storage::JsonFileStore,
    utils::build_info,
};

pub use command::{Command, ThemeAction, USAGE};

/// Entry point used by the `budget_tracker_cli` binary.
pub fn run_cli() -> Result<(), CliError> {
    let args: Vec<String> = env::args().skip(1).collect();
    let app_dir = config::app_dir();
    let config = ConfigManager::with_base_dir(&app_dir)
        .load()
        .map_err(LedgerError::from)?;
    crate::init_with_filter(config.log_filter.as_deref());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&args, &app_dir, &config, &mut out)
}

/// Runs a single command against the store under `app_dir`, writing to `out`.
pub fn run(
    args: &[String],
    app_dir: &Path,
    config: &Config,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let command = Command::parse(args)?;
    let symbol = config.currency_symbol.as_str();

    match command {
        Command::Help => writeln!(out, "{USAGE}")?,
        Command::Version => writeln!(out, "{}", build_info::current().summary())?,
        Command::Theme(action) => {
            let mut store = JsonFileStore::open(config.resolve_data_dir(app_dir))?;
            let theme = match action {
                ThemeAction::Show => Preferences::theme(&store)?,
                ThemeAction::Toggle => Preferences::toggle_theme(&mut store)?,
                ThemeAction::Set(theme) => {
                    Preferences::set_theme(&mut store, theme)?;
                    theme
                }
            };
            writeln!(out, "Theme: {theme}")?;
        }
        command => {
            let store = JsonFileStore::open(config.resolve_data_dir(app_dir))?;
            let mut ledger = Ledger::load(store)?;
            run_ledger_command(command, &mut ledger, symbol, out)?;
        }
    }
    Ok(())
}

fn run_ledger_command(
    command: Command,
    ledger: &mut Ledger,
    symbol: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Command::Add(draft) => {
            let id = ledger.add(draft)?;
            writeln!(out, "Transaction added: {id}")?;
        }
        Command::Update(id, draft) => {
            ledger.update(id, draft)?;
            writeln!(out, "Transaction updated: {id}")?;
        }
        Command::Remove(id) => match ledger.remove(id)? {
            Some(removed) => writeln!(out, "Transaction removed: {} ({})", removed.name, id)?,
            None => writeln!(out, "No transaction with id {id}; nothing removed.")?,
        },
        Command::List => {
            let listing = ledger.list();
            if listing.is_empty() {
                writeln!(out, "No transactions added yet.")?;
            }
            for txn in &listing {
                writeln!(out, "{}", output::transaction_line(txn, symbol))?;
            }
        }
        Command::Summary => {
            let dashboard = Dashboard::from_ledger(ledger);
            for line in output::summary_lines(&dashboard, symbol)
                .into_iter()
                .chain(output::breakdown_lines(&dashboard.breakdown, symbol))
            {
                writeln!(out, "{line}")?;
            }
        }
        Command::Monthly => {
            let series = monthly_series(ledger.transactions());
            for line in output::monthly_lines(&series, symbol) {
                writeln!(out, "{line}")?;
            }
        }
        Command::Goal(None) => {
            writeln!(out, "Savings goal: {}", output::format_money(symbol, ledger.goal()))?;
        }
        Command::Goal(Some(value)) => {
            ledger.set_goal(value)?;
            writeln!(out, "Savings goal set to {}", output::format_money(symbol, value))?;
        }
        Command::Help | Command::Version | Command::Theme(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn run_to_string(args: &[&str], app_dir: &Path) -> Result<String, CliError> {
        colored::control::set_override(false);
        let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        let mut buffer = Vec::new();
        run(&args, app_dir, &Config::default(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap())
    }

    #[test]
    fn add_then_summary_reflects_totals() {
        let dir = tempdir().unwrap();
        run_to_string(&["add", "Salary", "1000", "income", "Other", "2024-01-15"], dir.path())
            .unwrap();
        run_to_string(&["add", "Groceries", "200", "expense", "Food", "2024-01-20"], dir.path())
            .unwrap();

        let summary = run_to_string(&["summary"], dir.path()).unwrap();
        assert!(summary.contains("Total income:    $1000.00"), "{summary}");
        assert!(summary.contains("Net savings:     $800.00"), "{summary}");
        assert!(summary.contains("16%"), "{summary}");
        assert!(summary.lines().any(|line| line.starts_with("Food") && line.ends_with("$200.00")));
    }

    #[test]
    fn empty_list_prints_placeholder() {
        let dir = tempdir().unwrap();
        let listing = run_to_string(&["list"], dir.path()).unwrap();
        assert_eq!(listing.trim(), "No transactions added yet.");
    }

    #[test]
    fn invalid_goal_is_rejected() {
        let dir = tempdir().unwrap();
        let err = run_to_string(&["goal", "-5"], dir.path()).unwrap_err();
        assert!(matches!(err, CliError::Core(ref inner) if inner.is_validation()));
        let goal = run_to_string(&["goal"], dir.path()).unwrap();
        assert!(goal.contains("$5000.00"), "{goal}");
    }
}

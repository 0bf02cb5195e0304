//! Plain-text rendering of ledger listings and summary views.
//!
//! Formatting helpers return uncolored strings; color is applied by the
//! `paint_*` helpers so it can be disabled through `NO_COLOR`.

use colored::{ColoredString, Colorize};

use crate::{
    aggregate::{CategoryBreakdown, Dashboard, MonthlySeries},
    ledger::{Transaction, TransactionKind},
};

const BAR_WIDTH: usize = 20;

pub fn section(title: &str) -> String {
    format!("=== {} ===", title.trim())
}

/// `$12.50`, or `-$12.50` for negative values.
pub fn format_money(symbol: &str, amount: f64) -> String {
    if amount < 0.0 {
        format!("-{symbol}{:.2}", amount.abs())
    } else {
        format!("{symbol}{amount:.2}")
    }
}

/// `+$12.50` for income, `-$12.50` for expenses.
pub fn format_signed(kind: TransactionKind, symbol: &str, amount: f64) -> String {
    format!("{}{symbol}{amount:.2}", kind.sign())
}

pub fn paint_signed(kind: TransactionKind, text: &str) -> ColoredString {
    match kind {
        TransactionKind::Income => text.green(),
        TransactionKind::Expense => text.red(),
    }
}

pub fn transaction_line(txn: &Transaction, symbol: &str) -> String {
    format!(
        "{}  {} - {}  {}  [{}]",
        txn.date,
        txn.name,
        txn.category,
        paint_signed(txn.kind, &format_signed(txn.kind, symbol, txn.amount)),
        txn.id
    )
}

/// `[####----------------] 16%`; the bar uses the clamped fill, the
/// percentage shows the raw progress.
pub fn progress_bar(fill: f64, progress: f64) -> String {
    let filled = ((fill / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        progress
    )
}

pub fn summary_lines(dashboard: &Dashboard, symbol: &str) -> Vec<String> {
    let totals = &dashboard.totals;
    vec![
        section("Summary"),
        format!("Total income:    {}", format_money(symbol, totals.total_income)),
        format!("Total expenses:  {}", format_money(symbol, totals.total_expenses)),
        format!("Net savings:     {}", format_money(symbol, totals.net_savings)),
        format!(
            "Savings goal:    {}  {}",
            format_money(symbol, dashboard.goal),
            progress_bar(dashboard.progress_bar_fill(), dashboard.goal_progress)
        ),
    ]
}

pub fn breakdown_lines(breakdown: &CategoryBreakdown, symbol: &str) -> Vec<String> {
    let mut lines = vec![section("Category breakdown")];
    lines.extend(
        breakdown
            .iter()
            .map(|(category, amount)| format!("{:<15} {}", category, format_money(symbol, amount))),
    );
    lines
}

pub fn monthly_lines(series: &MonthlySeries, symbol: &str) -> Vec<String> {
    let mut lines = vec![section("Monthly")];
    if series.points.is_empty() {
        lines.push("No monthly data yet.".to_string());
    }
    for point in &series.points {
        lines.push(format!(
            "{:<10} income {:>12}  expense {:>12}",
            point.label,
            format_money(symbol, point.income),
            format_money(symbol, point.expense)
        ));
    }
    for issue in &series.skipped {
        lines.push(format!("{} {issue}", "WARNING:".yellow()));
    }
    lines
}

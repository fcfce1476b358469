//! Statement display formatting
//!
//! Renders an account's history and balance as a framed statement.

use crate::config::Settings;
use crate::models::HistoryEntry;
use crate::services::Statement;

const TITLE: &str = " STATEMENT ";
const RULE_WIDTH: usize = 16;

/// Format a single history entry as a statement row
pub fn format_statement_row(entry: &HistoryEntry, settings: &Settings) -> String {
    let transaction = entry.transaction();
    format!(
        "{}  {:<12}  {}",
        entry.timestamp().format(&settings.date_format),
        transaction.kind().to_string(),
        settings.format_money(transaction.amount())
    )
}

/// Format a full statement
pub fn format_statement(statement: &Statement, settings: &Settings) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let header = format!("{}{}{}", rule, TITLE, rule);

    let mut output = String::new();
    output.push_str(&header);
    output.push('\n');
    output.push_str(&format!(
        "Customer: {} ({})\n",
        statement.holder,
        statement.tax_id.formatted()
    ));
    output.push_str(&format!(
        "Branch: {}  Account: {}\n",
        statement.branch, statement.number
    ));
    output.push('\n');

    if statement.entries.is_empty() {
        output.push_str("No transactions recorded.\n");
    } else {
        for entry in &statement.entries {
            output.push_str(&format_statement_row(entry, settings));
            output.push('\n');
        }
    }

    output.push('\n');
    output.push_str(&format!(
        "Balance: {}\n",
        settings.format_money(statement.balance)
    ));
    output.push_str(&"=".repeat(header.len()));
    output.push('\n');

    output
}

//! Account display formatting
//!
//! Formats the account roster for terminal output as a table.

use crate::config::Settings;
use crate::models::{Customer, Money};
use crate::services::AccountSummary;

/// Format every account with its holder and balance as a table
pub fn format_account_list(summaries: &[AccountSummary], settings: &Settings) -> String {
    if summaries.is_empty() {
        return "No accounts found.".to_string();
    }

    let holder_width = summaries
        .iter()
        .map(|s| s.holder.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<6}  {:>7}  {:<holder_width$}  {:<14}  {:<8}  {:>14}\n",
        "Branch",
        "Account",
        "Holder",
        "Tax ID",
        "Type",
        "Balance",
        holder_width = holder_width,
    ));

    output.push_str(&format!(
        "{:-<6}  {:->7}  {:-<holder_width$}  {:-<14}  {:-<8}  {:->14}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        holder_width = holder_width,
    ));

    for summary in summaries {
        output.push_str(&format!(
            "{:<6}  {:>7}  {:<holder_width$}  {:<14}  {:<8}  {:>14}\n",
            summary.branch,
            summary.number.to_string(),
            summary.holder,
            summary.tax_id.formatted(),
            summary.kind.to_string(),
            settings.format_money(summary.balance),
            holder_width = holder_width,
        ));
    }

    output.push_str(&format!("\n{} account(s)", summaries.len()));
    match Money::checked_sum(summaries.iter().map(|s| s.balance)) {
        Some(total) => output.push_str(&format!(
            ", total deposits held: {}\n",
            settings.format_money(total)
        )),
        None => output.push_str(", total deposits held exceed the displayable range\n"),
    }

    output
}

/// Format the customer roster
pub fn format_customer_list(customers: &[Customer]) -> String {
    if customers.is_empty() {
        return "No customers registered.".to_string();
    }

    let mut output = String::new();
    for customer in customers {
        let accounts = customer.accounts().len();
        output.push_str(&format!(
            "{:<14}  {}  ({} account{})\n",
            customer.tax_id().formatted(),
            customer.name(),
            accounts,
            if accounts == 1 { "" } else { "s" }
        ));
    }
    output
}

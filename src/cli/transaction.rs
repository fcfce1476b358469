//! Transaction CLI commands
//!
//! Deposits, withdrawals and statements against a customer's first account.

use crate::display::format_statement;
use crate::error::BankResult;
use crate::models::{Transaction, TransactionKind};
use crate::services::{parse_amount, BankService};

/// Apply a deposit or withdrawal and save on success
///
/// Rejections are recorded in the activity log by the service and returned
/// as errors; nothing is saved in that case. Service warnings go to stderr.
pub fn handle_transaction(
    service: &mut BankService,
    kind: TransactionKind,
    tax_id: &str,
    amount: &str,
) -> BankResult<()> {
    let amount = parse_amount(amount)?;
    let result = service
        .realize(tax_id, Transaction::new(kind, amount))
        .map(|account| (account.number(), account.balance()));
    for warning in service.take_warnings() {
        eprintln!("Warning: {}", warning);
    }
    let (number, balance) = result?;

    let settings = service.settings();
    println!(
        "{} of {} on account {}. Balance: {}",
        kind,
        settings.format_money(amount),
        number,
        settings.format_money(balance)
    );

    service.save()
}

/// Print the statement of a customer's first account
pub fn handle_statement(service: &BankService, tax_id: &str) -> BankResult<()> {
    let statement = service.statement(tax_id)?;
    print!("{}", format_statement(&statement, service.settings()));
    Ok(())
}
